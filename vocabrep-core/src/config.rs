use serde::{Deserialize, Serialize};

use crate::{CoreError, SystemClock};

const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Engine knobs that are safe to tune. Scheduling constants are deliberately absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Default cap for review queues; `None` means unlimited.
    pub review_limit: Option<usize>,
    /// Fixed offset from UTC used to decide which calendar day "today" is.
    pub utc_offset_minutes: i32,
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self, CoreError> {
        let cfg: EngineConfig = serde_json::from_str(s)
            .map_err(|e| CoreError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(CoreError::InvalidConfig(format!(
                "utc_offset_minutes {} outside ±{MAX_UTC_OFFSET_MINUTES}",
                self.utc_offset_minutes
            )));
        }
        if self.review_limit == Some(0) {
            return Err(CoreError::InvalidConfig("review_limit must be at least 1".into()));
        }
        Ok(())
    }

    pub fn system_clock(&self) -> Result<SystemClock, CoreError> {
        self.validate()?;
        SystemClock::with_offset_minutes(self.utc_offset_minutes)
    }
}
