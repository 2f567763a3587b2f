use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike};
use chrono_tz::Tz;

/// The rolling day `[start, end)` anchored at a local boundary hour.
///
/// Matches played between local midnight and the boundary hour belong to the
/// previous day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyWindow {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl DailyWindow {
    /// Window containing `now`, computed in `now`'s timezone.
    pub fn containing(now: &DateTime<Tz>, boundary_hour: u32) -> Self {
        let today = now.date_naive();
        let day = if now.hour() >= boundary_hour {
            today
        } else {
            today - TimeDelta::days(1)
        };

        let start = local_boundary(&now.timezone(), day, boundary_hour);
        let end = start + TimeDelta::hours(24);

        Self { start, end }
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    pub fn start_timestamp(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_timestamp(&self) -> i64 {
        self.end.timestamp()
    }

    #[cfg(test)]
    pub fn contains<T: TimeZone>(&self, instant: &DateTime<T>) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

/// Whether a record last written at `last_update` must have its counters
/// zeroed before being recomputed at `now`.
///
/// Both instants are compared in `now`'s timezone.
pub fn crossed_boundary(last_update: &DateTime<Tz>, now: &DateTime<Tz>, boundary_hour: u32) -> bool {
    let last_update = last_update.with_timezone(&now.timezone());

    now.hour() >= boundary_hour
        && last_update.hour() < boundary_hour
        && last_update.date_naive() < now.date_naive()
}

/// `date` at `hour:00` local. Ambiguous times resolve to the earliest instant,
/// skipped times to the next valid hour.
fn local_boundary(tz: &Tz, date: NaiveDate, hour: u32) -> DateTime<Tz> {
    let naive = date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(hour));

    (0..3)
        .find_map(|shift| {
            tz.from_local_datetime(&(naive + TimeDelta::hours(shift)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}
