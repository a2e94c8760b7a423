use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use parking_lot::RwLock;

use crate::CoreError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Source of "now" for every engine entry point.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day that `now` falls on under this clock's time-zone
    /// convention. Defaults to the UTC date.
    fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.date_naive()
    }

    fn today(&self) -> NaiveDate {
        self.today_at(self.now())
    }

    /// Reads the clock once; `now` and `today` always agree.
    fn reading(&self) -> ClockReading {
        let now = self.now();
        ClockReading {
            now,
            today: self.today_at(now),
        }
    }
}

/// A single read of a clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockReading {
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
}

/// Wall clock with a fixed time-zone convention for calendar days.
#[derive(Clone, Debug)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn with_offset_minutes(minutes: i32) -> Result<Self, CoreError> {
        let offset = FixedOffset::east_opt(minutes.saturating_mul(60)).ok_or_else(|| {
            CoreError::InvalidConfig(format!("utc offset {minutes} minutes out of range"))
        })?;
        Ok(Self { offset })
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }
}

/// Virtual clock for tests and replays. Starts at midnight of the given day.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(midnight(date))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write() = now;
    }

    pub fn set_date(&self, date: NaiveDate) {
        self.set(midnight(date));
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.write();
        *now += Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}

/// Start of the given calendar day, in UTC.
pub fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// `YYYY-MM-DD` key used by the statistics store.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|_| CoreError::InvalidConfig(format!("bad date {key:?}, expected YYYY-MM-DD")))
}
