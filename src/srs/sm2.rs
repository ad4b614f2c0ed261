//! SM-2 scheduling rule: one card's prior state and a recall rating in,
//! the card's next scheduling state out.
//!
//! - Ratings 1-2 are lapses: progression resets and the card comes back in
//!   a day
//! - Ratings 3-5 grow the interval: 1 day, then 6 days, then the prior
//!   interval times the prior ease factor
//! - The ease factor shifts after every review (the penalty is quadratic
//!   in how far the rating falls short of 5) and never drops below 1.3

use chrono::{DateTime, Duration, Utc};

use crate::domain::ReviewQuality;
use crate::validation::{self, Violation};

#[derive(Debug, Clone)]
pub struct Sm2Result {
  pub ease_factor: f64,
  pub interval_days: i64,
  pub repetitions: i64,
  pub next_review: DateTime<Utc>,
}

#[derive(Debug)]
pub enum ScheduleError {
  /// Rating outside the 1-5 scale.
  InvalidRating(u8),
  /// Scheduling fields violate a card invariant on input.
  InvalidCardState(Violation),
}

impl std::fmt::Display for ScheduleError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ScheduleError::InvalidRating(rating) => {
        write!(f, "invalid rating {}: expected 1-5", rating)
      }
      ScheduleError::InvalidCardState(violation) => {
        write!(f, "invalid card state: {}", violation)
      }
    }
  }
}

impl std::error::Error for ScheduleError {}

impl From<Violation> for ScheduleError {
  fn from(violation: Violation) -> Self {
    ScheduleError::InvalidCardState(violation)
  }
}

/// Compute a card's next scheduling state from a 1-5 recall rating.
///
/// Pure: `now` is the moment the rating was submitted, supplied by the
/// caller. Input is validated before any scheduling logic runs; corrupt
/// state is rejected, never repaired.
pub fn schedule_next(
  rating: u8,
  current_ease_factor: f64,
  current_interval: i64,
  current_repetitions: i64,
  now: DateTime<Utc>,
) -> Result<Sm2Result, ScheduleError> {
  let quality =
    ReviewQuality::from_u8(rating).ok_or(ScheduleError::InvalidRating(rating))?;
  validation::check_scheduling(current_ease_factor, current_interval, current_repetitions)?;

  let (new_interval, new_repetitions) = if quality.is_lapse() {
    // Failed review: reset progression, card comes back in a day
    (1, 0)
  } else {
    // Successful review. The growth step multiplies by the ease factor as
    // it stood before this review.
    let interval = match current_repetitions {
      0 => 1,
      1 => 6,
      _ => ((current_interval as f64) * current_ease_factor).round() as i64,
    };
    (interval, current_repetitions + 1)
  };

  // Calculate new ease factor, on lapse and success alike
  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
  let q = rating as f64;
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let new_ease_factor = (current_ease_factor + ease_delta).max(validation::MIN_EASE_FACTOR);

  Ok(Sm2Result {
    ease_factor: new_ease_factor,
    interval_days: new_interval,
    repetitions: new_repetitions,
    next_review: now + Duration::days(new_interval),
  })
}
