//! Glue between answer events and the storage ports.
//!
//! Each call runs the only valid sequence for one event: `get`, then
//! `apply_review`, then `put`. Two answers to the same card must not race;
//! serializing them is the store's responsibility.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    apply_review_at, calculate_streak, calculate_user_statistics, cards_due_for_review,
    create_new_card_at, daily_records, filter_by_scope, group_cards_by_category, record_daily_review,
    Card, CardKey, CardScope, CardStore, CategorySummary, Clock, CoreError, EngineConfig,
    ScopeFilter, StatisticsStore, StreakSummary, UserStatistics,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub statistics: UserStatistics,
    pub categories: Vec<CategorySummary>,
    pub streak: StreakSummary,
}

/// One learner's answer to one word.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    pub word: String,
    pub translation: String,
    pub scope: CardScope,
    pub correct: bool,
    #[serde(default)]
    pub study_seconds: u64,
}

pub struct ReviewService {
    cards: Arc<dyn CardStore>,
    stats: Arc<dyn StatisticsStore>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl ReviewService {
    pub fn new(
        cards: Arc<dyn CardStore>,
        stats: Arc<dyn StatisticsStore>,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> Self {
        Self {
            cards,
            stats,
            clock,
            config,
        }
    }

    /// Applies one answer and bumps today's counters. A word seen for the
    /// first time gets a new card, and that first answer is applied to it.
    pub async fn record_answer(&self, user: &str, answer: &Answer) -> Result<Card, CoreError> {
        let at = self.clock.reading();
        let key = CardKey::new(&answer.scope, &answer.word);
        let existing = self.cards.get(user, &key).await?;
        let is_new = existing.is_none();
        let card = match existing {
            Some(c) => c,
            None => create_new_card_at(
                answer.word.trim(),
                answer.translation.trim(),
                answer.scope.clone(),
                at,
            ),
        };

        let updated = apply_review_at(&card, answer.correct, at)?;
        self.cards.put(user, &key, &updated).await?;

        let stat = self.stats.get(user, at.today).await?;
        let stat = record_daily_review(stat, answer.correct, is_new, answer.study_seconds);
        self.stats.put(user, at.today, &stat).await?;

        log::debug!(
            "user {user}: {:?} answered {}, next review {}",
            updated.word,
            if answer.correct { "correctly" } else { "incorrectly" },
            updated.next_review_date
        );
        Ok(updated)
    }

    /// Due cards for `user` within `scope`. `limit` falls back to the
    /// configured default.
    pub async fn review_queue(
        &self,
        user: &str,
        scope: &ScopeFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Card>, CoreError> {
        let cards = filter_by_scope(&self.cards.list(user).await?, scope);
        let limit = limit.or(self.config.review_limit);
        Ok(cards_due_for_review(&cards, self.clock.today(), limit))
    }

    pub async fn dashboard(&self, user: &str) -> Result<Dashboard, CoreError> {
        let today = self.clock.today();
        let cards = self.cards.list(user).await?;
        let history = self.stats.list(user).await?;
        Ok(Dashboard {
            today,
            statistics: calculate_user_statistics(&cards, today)?,
            categories: group_cards_by_category(&cards)?,
            streak: calculate_streak(&daily_records(&history), today),
        })
    }
}
