use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Ranked queue a daily record is tracked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Queue {
    SoloDuo,
    Flex,
}

impl Queue {
    /// Match-v5 `queueId`.
    pub fn queue_id(self) -> i32 {
        match self {
            Self::SoloDuo => 420,
            Self::Flex => 440,
        }
    }

    /// League-v4 `queueType`.
    pub fn league_label(self) -> &'static str {
        match self {
            Self::SoloDuo => "RANKED_SOLO_5x5",
            Self::Flex => "RANKED_FLEX_SR",
        }
    }

    /// Route segment, also the column prefix in `summoners`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SoloDuo => "soloq",
            Self::Flex => "flexq",
        }
    }
}

impl FromStr for Queue {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soloq" => Ok(Self::SoloDuo),
            "flexq" => Ok(Self::Flex),
            _ => Err(AppError::InvalidQueue(s.to_string())),
        }
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
