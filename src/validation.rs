//! Data-model invariant checks shared by the scheduler and deck-managing
//! callers.
//!
//! The scheduler rejects corrupt scheduling state instead of silently
//! repairing it; callers creating cards or decks can run the same checks
//! before handing records to the rest of the system.

use crate::domain::{Card, Deck};

/// Lower bound for a card's ease factor. Intervals must always be able to
/// grow by at least 30% per successful cycle.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// A violated data-model invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
  /// Ease factor below the minimum, or not a number.
  EaseBelowMinimum(f64),
  NegativeInterval(i64),
  NegativeRepetitions(i64),
  /// A required text field is empty after trimming. Carries the wire name.
  EmptyField(&'static str),
  /// A card carries a deck id other than the deck it sits in.
  ForeignCard { card_id: String, deck_id: String },
}

impl std::fmt::Display for Violation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Violation::EaseBelowMinimum(ef) => {
        write!(f, "ease factor {} is below the minimum {}", ef, MIN_EASE_FACTOR)
      }
      Violation::NegativeInterval(days) => write!(f, "interval of {} days is negative", days),
      Violation::NegativeRepetitions(n) => write!(f, "repetition count {} is negative", n),
      Violation::EmptyField(field) => write!(f, "{} must not be empty", field),
      Violation::ForeignCard { card_id, deck_id } => {
        write!(f, "card '{}' belongs to deck '{}'", card_id, deck_id)
      }
    }
  }
}

impl std::error::Error for Violation {}

/// Check the three scheduling invariants: ease factor at or above the
/// floor, non-negative interval, non-negative repetition count.
pub fn check_scheduling(
  ease_factor: f64,
  interval_days: i64,
  repetitions: i64,
) -> Result<(), Violation> {
  // Negated >= so that NaN fails the check too
  if !(ease_factor >= MIN_EASE_FACTOR) {
    return Err(Violation::EaseBelowMinimum(ease_factor));
  }
  if interval_days < 0 {
    return Err(Violation::NegativeInterval(interval_days));
  }
  if repetitions < 0 {
    return Err(Violation::NegativeRepetitions(repetitions));
  }
  Ok(())
}

/// Check a full card: identifiers and prompt/answer text present,
/// scheduling invariants hold.
pub fn check_card(card: &Card) -> Result<(), Violation> {
  if card.id.trim().is_empty() {
    return Err(Violation::EmptyField("id"));
  }
  if card.deck_id.trim().is_empty() {
    return Err(Violation::EmptyField("deckId"));
  }
  if card.front.trim().is_empty() {
    return Err(Violation::EmptyField("front"));
  }
  if card.back.trim().is_empty() {
    return Err(Violation::EmptyField("back"));
  }
  check_scheduling(card.ease_factor, card.interval_days, card.repetitions)
}

/// Check a deck: title present, every card valid and owned by this deck.
pub fn check_deck(deck: &Deck) -> Result<(), Violation> {
  if deck.id.trim().is_empty() {
    return Err(Violation::EmptyField("id"));
  }
  if deck.title.trim().is_empty() {
    return Err(Violation::EmptyField("title"));
  }
  for card in &deck.cards {
    if card.deck_id != deck.id {
      return Err(Violation::ForeignCard {
        card_id: card.id.clone(),
        deck_id: card.deck_id.clone(),
      });
    }
    check_card(card)?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};

  fn card() -> Card {
    Card::new("c1", "d1", "front", "back", Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
  }

  #[test]
  fn test_scheduling_ok() {
    assert!(check_scheduling(2.5, 0, 0).is_ok());
    assert!(check_scheduling(1.3, 6, 2).is_ok()); // floor itself is valid
  }

  #[test]
  fn test_ease_below_floor_rejected() {
    assert_eq!(check_scheduling(1.29, 0, 0), Err(Violation::EaseBelowMinimum(1.29)));
    assert_eq!(check_scheduling(0.0, 0, 0), Err(Violation::EaseBelowMinimum(0.0)));
  }

  #[test]
  fn test_nan_ease_rejected() {
    assert!(matches!(
      check_scheduling(f64::NAN, 0, 0),
      Err(Violation::EaseBelowMinimum(_))
    ));
  }

  #[test]
  fn test_negative_counters_rejected() {
    assert_eq!(check_scheduling(2.5, -1, 0), Err(Violation::NegativeInterval(-1)));
    assert_eq!(check_scheduling(2.5, 0, -3), Err(Violation::NegativeRepetitions(-3)));
  }

  #[test]
  fn test_card_text_required() {
    let mut c = card();
    c.front = "   ".to_string();
    assert_eq!(check_card(&c), Err(Violation::EmptyField("front")));

    let mut c = card();
    c.back = String::new();
    assert_eq!(check_card(&c), Err(Violation::EmptyField("back")));

    let mut c = card();
    c.id = String::new();
    assert_eq!(check_card(&c), Err(Violation::EmptyField("id")));
  }

  #[test]
  fn test_card_scheduling_checked() {
    let mut c = card();
    c.ease_factor = 1.0;
    assert_eq!(check_card(&c), Err(Violation::EaseBelowMinimum(1.0)));
  }

  #[test]
  fn test_deck_title_required() {
    let mut deck = Deck::new("d1", "Biology", None);
    deck.title = String::new();
    assert_eq!(check_deck(&deck), Err(Violation::EmptyField("title")));
  }

  #[test]
  fn test_deck_rejects_foreign_card() {
    let mut deck = Deck::new("d1", "Biology", None);
    let mut c = card();
    c.deck_id = "d2".to_string();
    deck.add_card(c);

    assert_eq!(
      check_deck(&deck),
      Err(Violation::ForeignCard { card_id: "c1".to_string(), deck_id: "d2".to_string() })
    );
  }

  #[test]
  fn test_deck_ok() {
    let mut deck = Deck::new("d1", "Biology", Some("Cell structure".to_string()));
    deck.add_card(card());
    assert!(check_deck(&deck).is_ok());
  }

  #[test]
  fn test_violation_messages() {
    assert_eq!(
      Violation::EmptyField("front").to_string(),
      "front must not be empty"
    );
    assert_eq!(
      Violation::NegativeInterval(-2).to_string(),
      "interval of -2 days is negative"
    );
  }
}
