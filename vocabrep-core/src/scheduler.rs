use crate::{CoreError, ScheduleState, EF_MIN};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const QUALITY_MIN: i32 = 0;
pub const QUALITY_MAX: i32 = 5;
/// Quality passed for every correct answer.
pub const QUALITY_CORRECT: i32 = 4;
/// Quality passed for every incorrect answer.
pub const QUALITY_INCORRECT: i32 = 0;
/// Answers below this quality count as a lapse.
pub const QUALITY_PASS: i32 = 3;
/// Longest gap the scheduler will produce, about a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScheduleOutcome {
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub next_review_date: NaiveDate,
}

impl ScheduleOutcome {
    pub fn state(&self) -> ScheduleState {
        ScheduleState {
            ease_factor: self.ease_factor,
            interval: self.interval,
            repetitions: self.repetitions,
        }
    }
}

fn floor_ef(x: f64) -> f64 {
    x.max(EF_MIN)
}

/// SM-2 step. The success interval multiplies the *old* interval by the
/// *new* ease factor.
pub fn calculate_next_review(
    quality: i32,
    current: &ScheduleState,
    today: NaiveDate,
) -> Result<ScheduleOutcome, CoreError> {
    if !(QUALITY_MIN..=QUALITY_MAX).contains(&quality) {
        return Err(CoreError::InvalidQuality(quality));
    }
    current.validate()?;

    let new_ef = {
        let miss = (5 - quality) as f64;
        floor_ef(current.ease_factor + (0.1 - miss * (0.08 + miss * 0.02)))
    };

    let new_reps;
    let new_interval;

    if quality < QUALITY_PASS {
        new_reps = 0;
        new_interval = 1;
    } else {
        new_reps = current.repetitions.saturating_add(1);
        new_interval = if new_reps == 1 {
            1
        } else if new_reps == 2 {
            6
        } else {
            (current.interval as f64 * new_ef)
                .round()
                .clamp(1.0, MAX_INTERVAL_DAYS as f64) as u32
        };
    }

    let next_review_date = today
        .checked_add_days(Days::new(new_interval as u64))
        .ok_or_else(|| CoreError::DateOutOfRange(format!("{today} + {new_interval} days")))?;
    log::debug!(
        "scheduled q={quality}: ef {:.2}->{new_ef:.2}, reps {}->{new_reps}, interval {}->{new_interval}, next {next_review_date}",
        current.ease_factor,
        current.repetitions,
        current.interval,
    );

    Ok(ScheduleOutcome {
        ease_factor: new_ef,
        interval: new_interval,
        repetitions: new_reps,
        next_review_date,
    })
}

/// Right/wrong convenience: correct maps to quality 4, incorrect to 0.
pub fn update_card_after_review(
    is_correct: bool,
    current: &ScheduleState,
    today: NaiveDate,
) -> Result<ScheduleOutcome, CoreError> {
    let quality = if is_correct {
        QUALITY_CORRECT
    } else {
        QUALITY_INCORRECT
    };
    calculate_next_review(quality, current, today)
}

/// Intervals a correct and an incorrect answer would produce, in that order.
pub fn preview_intervals(current: &ScheduleState, today: NaiveDate) -> Result<[u32; 2], CoreError> {
    let correct = update_card_after_review(true, current, today)?.interval;
    let incorrect = update_card_after_review(false, current, today)?.interval;
    Ok([correct, incorrect])
}
