use crate::{Card, CardKey, CoreError, DailyStatistic};
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod memory;

/// Persistent cards keyed by (user, scope, word). Implementations must
/// serialize concurrent read-modify-write cycles on the same key.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn get(&self, user: &str, key: &CardKey) -> Result<Option<Card>, CoreError>;
    async fn put(&self, user: &str, key: &CardKey, card: &Card) -> Result<(), CoreError>;
    async fn list(&self, user: &str) -> Result<Vec<Card>, CoreError>;
}

/// Per-day counters keyed by (user, calendar date).
#[async_trait]
pub trait StatisticsStore: Send + Sync {
    async fn get(&self, user: &str, date: NaiveDate) -> Result<Option<DailyStatistic>, CoreError>;
    async fn put(&self, user: &str, date: NaiveDate, stat: &DailyStatistic) -> Result<(), CoreError>;
    async fn list(&self, user: &str) -> Result<Vec<(NaiveDate, DailyStatistic)>, CoreError>;
}
