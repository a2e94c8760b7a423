use crate::{cards_due_for_review, Card, CardScope, CardStatus, CoreError, DailyRecord, DailyStatistic};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStatistics {
    pub total: u32,
    pub new_cards: u32,
    pub learning_cards: u32,
    pub mastered_cards: u32,
    pub due_today: u32,
    /// Whole percent, 0 when nothing has been reviewed.
    pub overall_accuracy: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub category_id: String,
    pub category_name: String,
    pub learned_words: u32,
    pub total_words: u32,
    pub accuracy: u32,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Default)]
struct Tally {
    correct: u64,
    reviews: u64,
}

impl Tally {
    fn record(&mut self, card: &Card) {
        self.correct += card.correct_count as u64;
        self.reviews += card.total_reviews as u64;
    }

    fn accuracy(&self) -> u32 {
        accuracy_percent(self.correct, self.reviews)
    }
}

pub fn accuracy_percent(correct: u64, total: u64) -> u32 {
    if total == 0 {
        0
    } else {
        (100.0 * correct as f64 / total as f64).round() as u32
    }
}

fn validated(cards: &[Card]) -> Result<(), CoreError> {
    for c in cards {
        if let Err(e) = c.validate() {
            log::warn!("aggregation hit malformed card: {e}");
            return Err(e);
        }
    }
    Ok(())
}

pub fn calculate_user_statistics(cards: &[Card], today: NaiveDate) -> Result<UserStatistics, CoreError> {
    validated(cards)?;
    let mut stats = UserStatistics {
        total: cards.len() as u32,
        ..Default::default()
    };
    let mut tally = Tally::default();
    for c in cards {
        match c.status() {
            CardStatus::New => stats.new_cards += 1,
            CardStatus::Learning => stats.learning_cards += 1,
            CardStatus::Mastered => stats.mastered_cards += 1,
        }
        tally.record(c);
    }
    stats.due_today = cards_due_for_review(cards, today, None).len() as u32;
    stats.overall_accuracy = tally.accuracy();
    Ok(stats)
}

/// Summaries for category-scoped cards, ordered by category id. Custom cards
/// have no category and are left out.
pub fn group_cards_by_category(cards: &[Card]) -> Result<Vec<CategorySummary>, CoreError> {
    validated(cards)?;
    let mut groups: BTreeMap<&str, (&str, u32, u32, Tally)> = BTreeMap::new();
    for c in cards {
        let CardScope::Category { id, name } = &c.scope else {
            continue;
        };
        let entry = groups
            .entry(id.as_str())
            .or_insert_with(|| (name.as_str(), 0, 0, Tally::default()));
        entry.2 += 1;
        if c.status() != CardStatus::New {
            entry.1 += 1;
        }
        entry.3.record(c);
    }
    Ok(groups
        .into_iter()
        .map(|(id, (name, learned, total, tally))| CategorySummary {
            category_id: id.to_string(),
            category_name: name.to_string(),
            learned_words: learned,
            total_words: total,
            accuracy: tally.accuracy(),
        })
        .collect())
}

/// Current and longest runs of consecutive study days. Records sharing a date
/// are merged. Today without a review means no current streak.
pub fn calculate_streak(records: &[DailyRecord], today: NaiveDate) -> StreakSummary {
    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for r in records {
        let n = per_day.entry(r.date).or_default();
        *n = n.saturating_add(r.reviewed_cards);
    }

    let mut current = 0u32;
    let mut day = today;
    while per_day.get(&day).map(|n| *n > 0).unwrap_or(false) {
        current += 1;
        match day.pred_opt() {
            Some(d) => day = d,
            None => break,
        }
    }

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for (&date, &reviewed) in per_day.iter().rev() {
        if reviewed == 0 {
            run = 0;
        } else if prev.map(|p| p - date == Duration::days(1)).unwrap_or(false) {
            run += 1;
        } else {
            run = 1;
        }
        longest = longest.max(run);
        prev = Some(date);
    }

    StreakSummary {
        current_streak: current,
        longest_streak: longest,
    }
}

/// Today's counters after one more answer. `None` means this is the first
/// review of the day.
pub fn record_daily_review(
    existing: Option<DailyStatistic>,
    is_correct: bool,
    is_new_card: bool,
    study_seconds: u64,
) -> DailyStatistic {
    let mut stat = existing.unwrap_or_default();
    stat.reviewed_cards = stat.reviewed_cards.saturating_add(1);
    if is_correct {
        stat.correct_answers = stat.correct_answers.saturating_add(1);
    } else {
        stat.incorrect_answers = stat.incorrect_answers.saturating_add(1);
    }
    if is_new_card {
        stat.new_cards = stat.new_cards.saturating_add(1);
    }
    stat.study_time = stat.study_time.saturating_add(study_seconds);
    stat
}

pub fn daily_records(stats: &[(NaiveDate, DailyStatistic)]) -> Vec<DailyRecord> {
    stats
        .iter()
        .map(|(date, s)| DailyRecord::new(*date, s.reviewed_cards))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_rounds_to_whole_percent() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(1, 8), 13);
        assert_eq!(accuracy_percent(5, 5), 100);
    }

    #[test]
    fn daily_review_accumulates() {
        let s = record_daily_review(None, true, true, 12);
        let s = record_daily_review(Some(s), false, false, 8);
        assert_eq!(
            s,
            DailyStatistic {
                reviewed_cards: 2,
                correct_answers: 1,
                incorrect_answers: 1,
                new_cards: 1,
                study_time: 20,
            }
        );
    }
}
