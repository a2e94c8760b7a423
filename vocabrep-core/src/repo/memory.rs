use crate::{date_key, parse_date_key, Card, CardKey, CardStore, CoreError, DailyStatistic, StatisticsStore};
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// In-process store for both ports. Daily statistics are keyed by their
/// `YYYY-MM-DD` string, as a document store would key them.
#[derive(Default)]
pub struct MemoryStore {
    cards: RwLock<HashMap<String, BTreeMap<CardKey, Card>>>,
    daily: RwLock<HashMap<String, BTreeMap<String, DailyStatistic>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn get(&self, user: &str, key: &CardKey) -> Result<Option<Card>, CoreError> {
        Ok(self
            .cards
            .read()
            .get(user)
            .and_then(|m| m.get(key))
            .cloned())
    }

    async fn put(&self, user: &str, key: &CardKey, card: &Card) -> Result<(), CoreError> {
        if card.key() != *key {
            return Err(CoreError::MalformedCard(format!(
                "card {:?} stored under mismatched key {:?}",
                card.word, key.word
            )));
        }
        self.cards
            .write()
            .entry(user.to_string())
            .or_default()
            .insert(key.clone(), card.clone());
        Ok(())
    }

    async fn list(&self, user: &str) -> Result<Vec<Card>, CoreError> {
        Ok(self
            .cards
            .read()
            .get(user)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl StatisticsStore for MemoryStore {
    async fn get(&self, user: &str, date: NaiveDate) -> Result<Option<DailyStatistic>, CoreError> {
        Ok(self
            .daily
            .read()
            .get(user)
            .and_then(|m| m.get(&date_key(date)))
            .cloned())
    }

    async fn put(&self, user: &str, date: NaiveDate, stat: &DailyStatistic) -> Result<(), CoreError> {
        self.daily
            .write()
            .entry(user.to_string())
            .or_default()
            .insert(date_key(date), stat.clone());
        Ok(())
    }

    async fn list(&self, user: &str) -> Result<Vec<(NaiveDate, DailyStatistic)>, CoreError> {
        let daily = self.daily.read();
        let Some(m) = daily.get(user) else {
            return Ok(Vec::new());
        };
        m.iter()
            .map(|(k, s)| {
                parse_date_key(k)
                    .map(|d| (d, s.clone()))
                    .map_err(|_| CoreError::Storage("bad date key"))
            })
            .collect()
    }
}
