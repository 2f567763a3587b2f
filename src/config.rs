use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use chrono_tz::Tz;

use crate::error::AppError;
use crate::riot::Platform;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub database_url: String,
    pub bind_addr: String,
    pub platform: Platform,
    pub timezone: Tz,
    pub day_boundary_hour: u32,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub match_fetch_concurrency: usize,
    pub response_cache_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        const DEFAULT_DATABASE_URL: &str = "sqlite:dailyrank.db";
        const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
        const DEFAULT_PLATFORM: &str = "LA2";
        const DEFAULT_TIMEZONE: &str = "America/Santiago";
        const DEFAULT_DAY_BOUNDARY_HOUR: u32 = 4;
        const DEFAULT_RIOT_RATE_LIMIT_PER_SECOND: u32 = 20;
        const DEFAULT_MATCH_FETCH_CONCURRENCY: usize = 4;
        const DEFAULT_RESPONSE_CACHE_TTL_SECS: u64 = 60;

        let riot_api_key = lookup("RIOT_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());

        let platform: Platform = lookup("RIOT_PLATFORM")
            .unwrap_or_else(|| DEFAULT_PLATFORM.into())
            .parse()?;

        let timezone_name = lookup("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.into());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| AppError::InvalidTimezone(timezone_name.clone()))?;

        let day_boundary_hour = match lookup("DAY_BOUNDARY_HOUR") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|h| *h < 24)
                .ok_or_else(|| {
                    AppError::Config(format!("DAY_BOUNDARY_HOUR must be in 0..=23, got {raw}"))
                })?,
            None => DEFAULT_DAY_BOUNDARY_HOUR,
        };

        let riot_rate_limit_per_second = lookup("RIOT_RATE_LIMIT_PER_SECOND")
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_RIOT_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        let match_fetch_concurrency = lookup("MATCH_FETCH_CONCURRENCY")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MATCH_FETCH_CONCURRENCY)
            .max(1);

        let response_cache_ttl = Duration::from_secs(
            lookup("RESPONSE_CACHE_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RESPONSE_CACHE_TTL_SECS),
        );

        Ok(Self {
            riot_api_key,
            database_url,
            bind_addr,
            platform,
            timezone,
            day_boundary_hour,
            riot_rate_limit_per_second,
            match_fetch_concurrency,
            response_cache_ttl,
        })
    }
}
