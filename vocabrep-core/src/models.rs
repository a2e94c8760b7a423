use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

pub type UserId = String;
pub type CategoryId = String;

pub const EF_MIN: f64 = 1.3;
pub const EF_DEFAULT: f64 = 2.5;

/// Repetition count at which a card leaves `New`.
pub const LEARNING_THRESHOLD: u32 = 1;
/// Repetition count at which a card is `Mastered`.
pub const MASTERED_THRESHOLD: u32 = 5;

/// Which deck a card belongs to. Custom decks carry no category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum CardScope {
    Custom,
    Category { id: CategoryId, name: String },
}

impl CardScope {
    pub fn category(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        CardScope::Category {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn key(&self) -> ScopeKey {
        match self {
            CardScope::Custom => ScopeKey::Custom,
            CardScope::Category { id, .. } => ScopeKey::Category(id.clone()),
        }
    }
}

/// Scope discriminator used for identity; the category name is display-only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKey {
    Custom,
    Category(CategoryId),
}

/// Storage identity of a card within one user's collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardKey {
    pub scope: ScopeKey,
    pub word: String,
}

impl CardKey {
    pub fn new(scope: &CardScope, word: &str) -> Self {
        Self {
            scope: scope.key(),
            word: word.trim().to_lowercase(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Mastered,
}

impl CardStatus {
    pub fn from_repetitions(repetitions: u32) -> Self {
        if repetitions < LEARNING_THRESHOLD {
            CardStatus::New
        } else if repetitions < MASTERED_THRESHOLD {
            CardStatus::Learning
        } else {
            CardStatus::Mastered
        }
    }
}

/// The scheduling-relevant slice of a card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScheduleState {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self {
            ease_factor: EF_DEFAULT,
            interval: 1,
            repetitions: 0,
        }
    }
}

impl ScheduleState {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.ease_factor.is_finite() || self.ease_factor < EF_MIN {
            return Err(CoreError::MalformedCard(format!(
                "ease factor {} below floor {EF_MIN}",
                self.ease_factor
            )));
        }
        if self.interval < 1 {
            return Err(CoreError::MalformedCard(format!(
                "interval {} below 1 day",
                self.interval
            )));
        }
        Ok(())
    }
}

/// One learner's memory state for one word.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub word: String,
    pub translation: String,
    pub scope: CardScope,

    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub next_review_date: NaiveDate,
    pub last_review_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,

    pub total_reviews: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

impl Card {
    pub fn key(&self) -> CardKey {
        CardKey::new(&self.scope, &self.word)
    }

    pub fn schedule_state(&self) -> ScheduleState {
        ScheduleState {
            ease_factor: self.ease_factor,
            interval: self.interval,
            repetitions: self.repetitions,
        }
    }

    pub fn status(&self) -> CardStatus {
        CardStatus::from_repetitions(self.repetitions)
    }

    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.next_review_date <= today
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if let Err(CoreError::MalformedCard(msg)) = self.schedule_state().validate() {
            return Err(CoreError::MalformedCard(format!("{:?}: {msg}", self.word)));
        }
        let answered = self.correct_count.checked_add(self.incorrect_count);
        if answered != Some(self.total_reviews) {
            return Err(CoreError::MalformedCard(format!(
                "{:?}: total_reviews {} != correct {} + incorrect {}",
                self.word, self.total_reviews, self.correct_count, self.incorrect_count
            )));
        }
        Ok(())
    }
}

/// Per-user, per-day review counters.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyStatistic {
    pub reviewed_cards: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub new_cards: u32,
    pub study_time: u64,
}

/// Streak input: how many cards were reviewed on a calendar day.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub reviewed_cards: u32,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, reviewed_cards: u32) -> Self {
        Self {
            date,
            reviewed_cards,
        }
    }

    pub fn counts(&self) -> bool {
        self.reviewed_cards > 0
    }
}
