use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of recall: a prompt, an answer, and the scheduling state that
/// decides when the card comes back.
///
/// Serde names follow the records the surrounding app exchanges
/// (`easeFactor`, `nextReviewAt`, `deckId`), so a card round-trips through
/// the caller's persistence layer unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
  pub id: String,
  pub front: String,
  pub back: String,
  /// Days until the next review once the card comes due.
  #[serde(rename = "interval")]
  pub interval_days: i64,
  /// Consecutive qualifying reviews (rating >= 3) since the last lapse.
  #[serde(rename = "repetition")]
  pub repetitions: i64,
  /// Multiplier applied to the interval on successful recall. Never below 1.3.
  pub ease_factor: f64,
  pub next_review_at: DateTime<Utc>,
  pub deck_id: String,
}

impl Card {
  /// Create a fresh card: no repetitions, zero interval, default ease
  /// factor, due immediately.
  pub fn new(
    id: impl Into<String>,
    deck_id: impl Into<String>,
    front: impl Into<String>,
    back: impl Into<String>,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id: id.into(),
      front: front.into().trim().to_string(),
      back: back.into().trim().to_string(),
      interval_days: 0,
      repetitions: 0,
      ease_factor: 2.5,
      next_review_at: created_at,
      deck_id: deck_id.into(),
    }
  }

  /// A card is due once its next-review time has passed (inclusive).
  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.next_review_at <= now
  }
}

/// A named collection of cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
  pub id: String,
  pub title: String,
  pub description: Option<String>,
  #[serde(rename = "flashcards")]
  pub cards: Vec<Card>,
}

impl Deck {
  pub fn new(
    id: impl Into<String>,
    title: impl Into<String>,
    description: Option<String>,
  ) -> Self {
    Self {
      id: id.into(),
      title: title.into().trim().to_string(),
      description,
      cards: Vec::new(),
    }
  }

  pub fn add_card(&mut self, card: Card) {
    self.cards.push(card);
  }

  /// Number of cards currently due. Derived, never stored: it changes
  /// whenever "now" or any card's state changes.
  pub fn due_count(&self, now: DateTime<Utc>) -> usize {
    self.cards.iter().filter(|c| c.is_due(now)).count()
  }

  /// The due subset in input order.
  pub fn due_cards(&self, now: DateTime<Utc>) -> Vec<&Card> {
    self.cards.iter().filter(|c| c.is_due(now)).collect()
  }
}
