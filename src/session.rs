//! Study-session engine: walks a deck's due queue one card at a time.
//!
//! A session snapshots the due subset of a deck's cards at start time and
//! owns the queue, cursor, and reveal flag for one study pass. Rating a
//! card runs the SM-2 scheduler and advances the cursor; the caller
//! persists the updated cards, either after each rating or once at the
//! end. Cards never reached keep their pre-session state.

use chrono::{DateTime, Utc};

use crate::domain::{Card, ReviewEntry, ReviewQuality};
use crate::srs::sm2::{self, ScheduleError};

/// Ordering applied to the due queue at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueOrder {
  /// Cards stay in the order they were supplied.
  #[default]
  InputOrder,
  /// Longest-overdue card first: stable sort on next-review time.
  OverdueFirst,
}

#[derive(Debug)]
pub enum SessionError {
  /// Rating submitted against a session that is complete or had no due
  /// cards to begin with.
  EmptySession,
  /// The scheduler rejected the rating or the card's stored state.
  Schedule(ScheduleError),
}

impl std::fmt::Display for SessionError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SessionError::EmptySession => write!(f, "no card left to rate in this session"),
      SessionError::Schedule(err) => write!(f, "{}", err),
    }
  }
}

impl std::error::Error for SessionError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SessionError::EmptySession => None,
      SessionError::Schedule(err) => Some(err),
    }
  }
}

impl From<ScheduleError> for SessionError {
  fn from(err: ScheduleError) -> Self {
    SessionError::Schedule(err)
  }
}

/// Result of rating the current card.
#[derive(Debug, Clone)]
pub struct RatingOutcome {
  /// True once every card in the queue has been rated.
  pub done: bool,
  /// The rated card with the scheduler's output applied.
  pub updated: Card,
}

/// One in-memory study pass over a deck's due cards.
///
/// The session owns its queue and cursor exclusively; nothing here touches
/// storage. A session with zero due cards is valid and starts complete.
#[derive(Debug, Clone)]
pub struct StudySession {
  queue: Vec<Card>,
  cursor: usize,
  answer_shown: bool,
  reviewed: Vec<ReviewEntry>,
}

impl StudySession {
  /// Snapshot the due subset of `cards` in stable input order.
  pub fn start(cards: &[Card], now: DateTime<Utc>) -> Self {
    Self::start_with_order(cards, now, QueueOrder::InputOrder)
  }

  /// Snapshot the due subset with an explicit queue ordering.
  pub fn start_with_order(cards: &[Card], now: DateTime<Utc>, order: QueueOrder) -> Self {
    let mut queue: Vec<Card> = cards.iter().filter(|c| c.is_due(now)).cloned().collect();
    if order == QueueOrder::OverdueFirst {
      queue.sort_by_key(|c| c.next_review_at);
    }

    tracing::debug!(
      "study session started: {} due of {} cards",
      queue.len(),
      cards.len()
    );

    Self {
      queue,
      cursor: 0,
      answer_shown: false,
      reviewed: Vec::new(),
    }
  }

  /// The card under the cursor, front side up unless the answer was
  /// revealed. None once the session is complete.
  pub fn current_card(&self) -> Option<&Card> {
    self.queue.get(self.cursor)
  }

  /// Flip between question-shown and answer-shown. Presentation state
  /// only: toggling any number of times never touches scheduling.
  pub fn toggle_answer(&mut self) {
    if self.cursor < self.queue.len() {
      self.answer_shown = !self.answer_shown;
    }
  }

  pub fn answer_shown(&self) -> bool {
    self.answer_shown
  }

  /// Number of cards in the due queue.
  pub fn len(&self) -> usize {
    self.queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  /// Zero-based index of the current card; equals `len()` once complete.
  pub fn position(&self) -> usize {
    self.cursor
  }

  pub fn is_complete(&self) -> bool {
    self.cursor >= self.queue.len()
  }

  /// Rate the current card 1-5 and advance.
  ///
  /// `now` is the moment the rating was submitted; the card's next review
  /// is counted from it. On error nothing is consumed: the cursor, the
  /// reveal flag, and the queue are exactly as before the call.
  pub fn rate(&mut self, rating: u8, now: DateTime<Utc>) -> Result<RatingOutcome, SessionError> {
    let card = self.queue.get(self.cursor).ok_or(SessionError::EmptySession)?;
    let quality =
      ReviewQuality::from_u8(rating).ok_or(ScheduleError::InvalidRating(rating))?;

    let result = sm2::schedule_next(
      rating,
      card.ease_factor,
      card.interval_days,
      card.repetitions,
      now,
    )?;

    let mut updated = card.clone();
    updated.ease_factor = result.ease_factor;
    updated.interval_days = result.interval_days;
    updated.repetitions = result.repetitions;
    updated.next_review_at = result.next_review;

    self.reviewed.push(ReviewEntry {
      rating: quality,
      reviewed_at: now,
      card: updated.clone(),
    });
    self.cursor += 1;
    self.answer_shown = false;

    let done = self.is_complete();
    tracing::debug!(
      "card '{}' rated {} ({} of {})",
      updated.id,
      quality.as_str(),
      self.cursor,
      self.queue.len()
    );
    if done {
      tracing::debug!("study session complete: {} cards reviewed", self.reviewed.len());
    }

    Ok(RatingOutcome { done, updated })
  }

  /// Updated state of every card rated so far, in rating order. Cards the
  /// session never reached do not appear.
  pub fn updated_cards(&self) -> Vec<Card> {
    self.reviewed.iter().map(|entry| entry.card.clone()).collect()
  }

  /// The full per-card record of this session so far.
  pub fn reviewed(&self) -> &[ReviewEntry] {
    &self.reviewed
  }

  pub fn into_reviewed(self) -> Vec<ReviewEntry> {
    self.reviewed
  }
}
