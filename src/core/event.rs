//! Game history.
//!
//! Every engine operation that changes the game appends one or more
//! [`GameEvent`]s to the [`EventLog`]. The log is append-only: entries are
//! never edited or removed, except that a full reset starts a new log.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use super::player::PlayerId;

/// Event identifier, unique and increasing within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of thing happened.
///
/// Displays as the tag the history panel shows (`GAME_START`, `RE_ROLL`, ...).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    GameStart,
    TurnStart,
    DiceRoll,
    ReRoll,
    Move,
    SpaceEffect,
    Action,
    Choice,
    SkipTurn,
    ExtraAction,
    GameOver,
}

/// A single history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    /// The player the event is attributed to.
    pub player: PlayerId,
    pub kind: EventKind,
    pub description: String,
}

impl GameEvent {
    /// Create an event stamped with the current time.
    pub fn new(id: EventId, player: PlayerId, kind: EventKind, description: impl Into<String>) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            player,
            kind,
            description: description.into(),
        }
    }

    /// Override the timestamp (builder pattern).
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Ordered, append-only history.
///
/// Backed by an `im::Vector`, so snapshots of the game share history
/// structure instead of copying it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vector<GameEvent>,
    next_id: u64,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return it.
    pub fn record(&mut self, player: PlayerId, kind: EventKind, description: impl Into<String>) -> &GameEvent {
        let event = GameEvent::new(EventId(self.next_id), player, kind, description);
        self.next_id += 1;
        self.events.push_back(event);
        &self.events[self.events.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.back()
    }

    /// Iterate in creation order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Events of one kind, in creation order.
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Count events of one kind.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.of_kind(kind).count()
    }

    /// The entries the action history panel lists: drawn actions and choices.
    pub fn action_history(&self) -> impl Iterator<Item = &GameEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Action | EventKind::Choice))
    }
}
