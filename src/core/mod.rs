//! Core engine types: players, configuration, history, state and RNG.
//!
//! These are the pieces every other module builds on. Board layout,
//! action content and the timer live in their own modules; the engine
//! ties them together.

pub mod config;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{ConfigError, GameConfig, GameMode, TimerRange};
pub use event::{EventId, EventKind, EventLog, GameEvent};
pub use player::{
    validate_roster, MovementStyle, Player, PlayerColor, PlayerId, PlayerSetup, RosterIssue, MAX_SEATS, PALETTE,
};
pub use rng::{GameRng, GameRngState, DIE_FACES};
pub use state::{GamePhase, GameState, RollOutcome, TurnStage};
