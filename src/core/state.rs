//! Game state: the single source of truth the presentation layer renders.
//!
//! ## GamePhase
//!
//! `Setup -> Playing -> Finished`. Only `reset` goes backwards.
//!
//! ## TurnStage
//!
//! Within `Playing`, a turn moves `AwaitingRoll -> Rolling -> Rolled`.
//! `Rolling` is the roll-in-flight window: the outcome is known but not
//! yet applied, and no second roll may start until it resolves.
//!
//! ## GameState
//!
//! Players and history use `im` persistent structures, so every engine
//! operation can hand out a fresh state while sharing unchanged data.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::event::EventLog;
use super::player::{Player, PlayerId};
use crate::actions::{Action, CategoryFilter};
use crate::timer::Countdown;

/// Top-level lifecycle stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Setup,
    Playing,
    Finished { winner: PlayerId },
}

/// Result of a roll.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollOutcome {
    /// Movement die face, 1-6.
    Die(u8),
    /// Face of the class die.
    Class(String),
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RollOutcome::Die(face) => write!(f, "{face}"),
            RollOutcome::Class(class) => f.write_str(class),
        }
    }
}

/// Where the current turn stands.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStage {
    /// The current player may roll (or reroll).
    #[default]
    AwaitingRoll,
    /// A roll was issued and waits for resolution.
    Rolling { outcome: RollOutcome },
    /// This turn's roll is resolved; the turn ends with `next_turn`.
    Rolled,
}

/// Complete observable game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,

    /// Seated players in turn order. Fixed once confirmed.
    pub players: Vector<Player>,

    /// Index into `players` of whose turn it is.
    pub current_player: usize,

    /// Turn counter, starting at 1 when play begins.
    pub turn_number: u32,

    pub stage: TurnStage,

    /// Last roll of the current turn (dice face or class), for display.
    pub last_roll: Option<RollOutcome>,

    /// The drawn action the current player must perform, if any.
    pub current_action: Option<Action>,

    pub timer: Countdown,

    pub history: EventLog,

    /// Category map used for board-mode draws.
    pub categories: CategoryFilter,
}

impl GameState {
    /// Fresh setup-phase state for a config.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: GamePhase::Setup,
            players: Vector::new(),
            current_player: 0,
            turn_number: 0,
            stage: TurnStage::AwaitingRoll,
            last_roll: None,
            current_action: None,
            timer: Countdown::new(config.default_timer_secs),
            history: EventLog::new(),
            categories: config.categories.clone(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Winner, once the game is finished.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        match self.phase {
            GamePhase::Finished { winner } => self.player(winner),
            _ => None,
        }
    }

    /// Whether the roll control should be enabled.
    #[must_use]
    pub fn can_roll(&self) -> bool {
        self.is_playing()
            && self.stage == TurnStage::AwaitingRoll
            && self.current().is_some_and(|p| !p.skip_turn)
    }

    /// Whether the reroll control should be enabled.
    #[must_use]
    pub fn can_reroll(&self) -> bool {
        self.can_roll() && self.current().is_some_and(|p| p.rerolls > 0)
    }

    /// Outcome waiting for resolution, if a roll is in flight.
    #[must_use]
    pub fn pending_roll(&self) -> Option<&RollOutcome> {
        match &self.stage {
            TurnStage::Rolling { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// Apply a change to the current player.
    ///
    /// Returns false when there is no current player.
    pub fn update_current(&mut self, f: impl FnOnce(&mut Player)) -> bool {
        match self.players.get_mut(self.current_player) {
            Some(player) => {
                f(player);
                true
            }
            None => false,
        }
    }
}
