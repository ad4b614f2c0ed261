use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Card;

/// Recall quality submitted after a card's answer is revealed.
///
/// Ratings below 3 are lapses: the card's progression resets and it comes
/// back almost immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewQuality {
  Again = 1,
  Hard = 2,
  Good = 3,
  Easy = 4,
  Perfect = 5,
}

impl ReviewQuality {
  pub fn from_u8(value: u8) -> Option<Self> {
    match value {
      1 => Some(Self::Again),
      2 => Some(Self::Hard),
      3 => Some(Self::Good),
      4 => Some(Self::Easy),
      5 => Some(Self::Perfect),
      _ => None,
    }
  }

  pub fn as_u8(&self) -> u8 {
    *self as u8
  }

  /// True for ratings that reset the card's progression.
  pub fn is_lapse(&self) -> bool {
    (*self as u8) < 3
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Again => "again",
      Self::Hard => "hard",
      Self::Good => "good",
      Self::Easy => "easy",
      Self::Perfect => "perfect",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "again" => Some(Self::Again),
      "hard" => Some(Self::Hard),
      "good" => Some(Self::Good),
      "easy" => Some(Self::Easy),
      "perfect" => Some(Self::Perfect),
      _ => None,
    }
  }
}

/// One rated card within a study session: the rating applied, when it was
/// submitted, and the card state the scheduler produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEntry {
  pub rating: ReviewQuality,
  pub reviewed_at: DateTime<Utc>,
  pub card: Card,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_u8_valid_range() {
    assert_eq!(ReviewQuality::from_u8(1), Some(ReviewQuality::Again));
    assert_eq!(ReviewQuality::from_u8(2), Some(ReviewQuality::Hard));
    assert_eq!(ReviewQuality::from_u8(3), Some(ReviewQuality::Good));
    assert_eq!(ReviewQuality::from_u8(4), Some(ReviewQuality::Easy));
    assert_eq!(ReviewQuality::from_u8(5), Some(ReviewQuality::Perfect));
  }

  #[test]
  fn test_from_u8_out_of_range() {
    assert_eq!(ReviewQuality::from_u8(0), None);
    assert_eq!(ReviewQuality::from_u8(6), None);
    assert_eq!(ReviewQuality::from_u8(255), None);
  }

  #[test]
  fn test_is_lapse_threshold() {
    assert!(ReviewQuality::Again.is_lapse());
    assert!(ReviewQuality::Hard.is_lapse());
    assert!(!ReviewQuality::Good.is_lapse());
    assert!(!ReviewQuality::Easy.is_lapse());
    assert!(!ReviewQuality::Perfect.is_lapse());
  }

  #[test]
  fn test_quality_values() {
    assert_eq!(ReviewQuality::Again.as_u8(), 1);
    assert_eq!(ReviewQuality::Hard.as_u8(), 2);
    assert_eq!(ReviewQuality::Good.as_u8(), 3);
    assert_eq!(ReviewQuality::Easy.as_u8(), 4);
    assert_eq!(ReviewQuality::Perfect.as_u8(), 5);
  }

  #[test]
  fn test_str_roundtrip() {
    for quality in [
      ReviewQuality::Again,
      ReviewQuality::Hard,
      ReviewQuality::Good,
      ReviewQuality::Easy,
      ReviewQuality::Perfect,
    ] {
      let s = quality.as_str();
      assert_eq!(ReviewQuality::from_str(s), Some(quality));
    }
  }

  #[test]
  fn test_from_str_invalid() {
    assert_eq!(ReviewQuality::from_str(""), None);
    assert_eq!(ReviewQuality::from_str("Good"), None); // case sensitive
    assert_eq!(ReviewQuality::from_str("ok"), None);
  }
}
