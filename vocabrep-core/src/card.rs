//! Card lifecycle: creation, applying an answer, status classification.

use crate::{
    update_card_after_review, Card, CardKey, CardScope, CardStatus, Clock, ClockReading, CoreError,
    EF_DEFAULT,
};

/// A fresh card, first due tomorrow.
pub fn create_new_card(
    word: impl Into<String>,
    translation: impl Into<String>,
    scope: CardScope,
    clock: &dyn Clock,
) -> Card {
    create_new_card_at(word, translation, scope, clock.reading())
}

pub fn create_new_card_at(
    word: impl Into<String>,
    translation: impl Into<String>,
    scope: CardScope,
    at: ClockReading,
) -> Card {
    Card {
        word: word.into(),
        translation: translation.into(),
        scope,
        ease_factor: EF_DEFAULT,
        interval: 1,
        repetitions: 0,
        next_review_date: at.today.succ_opt().unwrap_or(at.today),
        last_review_date: None,
        created_at: at.now,
        total_reviews: 0,
        correct_count: 0,
        incorrect_count: 0,
    }
}

/// Returns the card as it stands after one answer. The input is left untouched;
/// persisting the result under `card.key()` is the caller's job.
pub fn apply_review(card: &Card, is_correct: bool, clock: &dyn Clock) -> Result<Card, CoreError> {
    apply_review_at(card, is_correct, clock.reading())
}

pub fn apply_review_at(card: &Card, is_correct: bool, at: ClockReading) -> Result<Card, CoreError> {
    if let Err(e) = card.validate() {
        log::warn!("rejecting review of malformed card: {e}");
        return Err(e);
    }
    let outcome = update_card_after_review(is_correct, &card.schedule_state(), at.today)?;

    let exhausted = || CoreError::MalformedCard(format!("{:?}: review counters exhausted", card.word));
    let mut next = card.clone();
    next.ease_factor = outcome.ease_factor;
    next.interval = outcome.interval;
    next.repetitions = outcome.repetitions;
    next.next_review_date = outcome.next_review_date;
    next.last_review_date = Some(at.now);
    next.total_reviews = card.total_reviews.checked_add(1).ok_or_else(exhausted)?;
    if is_correct {
        next.correct_count = card.correct_count.checked_add(1).ok_or_else(exhausted)?;
    } else {
        next.incorrect_count = card.incorrect_count.checked_add(1).ok_or_else(exhausted)?;
    }
    Ok(next)
}

pub fn status_of(card: &Card) -> CardStatus {
    card.status()
}

/// Lookup key for `(scope, word)`; the word is case-folded so "Hello" and
/// "hello" resolve to the same card.
pub fn card_key(scope: &CardScope, word: &str) -> CardKey {
    CardKey::new(scope, word)
}
