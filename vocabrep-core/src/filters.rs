use crate::{Card, CardScope, CardStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which part of a collection a review queue draws from.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScopeFilter {
    #[default]
    All,
    Custom,
    AnyCategory,
    Category(String),
}

impl ScopeFilter {
    pub fn matches(&self, scope: &CardScope) -> bool {
        match (self, scope) {
            (ScopeFilter::All, _) => true,
            (ScopeFilter::Custom, CardScope::Custom) => true,
            (ScopeFilter::AnyCategory, CardScope::Category { .. }) => true,
            (ScopeFilter::Category(want), CardScope::Category { id, .. }) => want == id,
            _ => false,
        }
    }
}

/// Due cards (next review on or before `today`), oldest first. Ties keep
/// creation order, then input order. With a limit, the most overdue win.
pub fn cards_due_for_review(cards: &[Card], today: NaiveDate, limit: Option<usize>) -> Vec<Card> {
    let mut due: Vec<Card> = cards.iter().filter(|c| c.is_due_on(today)).cloned().collect();
    due.sort_by_key(|c| (c.next_review_date, c.created_at));
    if let Some(n) = limit {
        due.truncate(n);
    }
    log::trace!("{} of {} cards due on {today}", due.len(), cards.len());
    due
}

pub fn filter_by_scope(cards: &[Card], want: &ScopeFilter) -> Vec<Card> {
    cards
        .iter()
        .filter(|c| want.matches(&c.scope))
        .cloned()
        .collect()
}

pub fn filter_by_status(cards: &[Card], want: CardStatus) -> Vec<Card> {
    cards
        .iter()
        .filter(|c| c.status() == want)
        .cloned()
        .collect()
}

pub fn filter_by_text(cards: &[Card], query: &str) -> Vec<Card> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return cards.to_vec();
    }
    cards
        .iter()
        .filter(|c| {
            c.word.to_lowercase().contains(&q) || c.translation.to_lowercase().contains(&q)
        })
        .cloned()
        .collect()
}
