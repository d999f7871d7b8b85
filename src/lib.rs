//! # party-board
//!
//! Turn and game-state engine for a party board game.
//!
//! Players take turns rolling, move along a board (or roll a class die),
//! draw category-filtered actions, race a countdown and build up a running
//! history. A presentation layer drives the engine with intents and
//! renders the [`GameState`] snapshot it gets back.
//!
//! ## Design Principles
//!
//! 1. **Reducer-style engine**: Every operation takes a state and returns
//!    a new one or a [`Rejection`]. Nothing is half-applied.
//!
//! 2. **Explicit roll in flight**: A roll moves the turn into
//!    `TurnStage::Rolling` until it is resolved, so duplicate resolutions
//!    and double rolls are structurally impossible.
//!
//! 3. **Configuration over constants**: Board size, timers, rerolls,
//!    palette, categories and content are inputs via [`GameConfig`].
//!
//! 4. **Deterministic when seeded**: All randomness goes through
//!    [`GameRng`], so a seeded game replays exactly.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, history, state, RNG
//! - `board`: Spaces, layout generation, movement and effects
//! - `actions`: Action records, category filtering, catalog, position prompts
//! - `timer`: Seconds countdown
//! - `engine`: Turn state machine and the two game variants
//! - `session`: Tokio actor that serializes engine calls

pub mod actions;
pub mod board;
pub mod core;
pub mod engine;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{
    EventKind, EventLog, GameConfig, GameEvent, GameMode, GamePhase, GameRng, GameRngState,
    GameState, Player, PlayerId, PlayerSetup, RollOutcome, TurnStage,
};

pub use crate::board::{apply_effect, resolve_position, Board, Space, SpaceEffect, SpaceType};

pub use crate::actions::{pick_action, Action, ActionCatalog, ActionType, CategoryFilter};

pub use crate::timer::{format_clock, Countdown, Tick};

pub use crate::engine::{
    Command, FollowUp, GameEngine, GameEngineBuilder, Notice, Rejection, Step, TurnVariant,
};

pub use crate::session::{GameSession, SessionConfig, SessionHandle, SessionUpdate};
