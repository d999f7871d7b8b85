//! What engine operations take and give back.

use std::time::Duration;

use thiserror::Error;

use crate::core::{GameState, PlayerId, PlayerSetup, RosterIssue};

/// A presentation-layer intent, or an internal stimulus (tick, scheduled
/// follow-up) routed through the same entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    ConfirmPlayers(Vec<PlayerSetup>),
    Roll,
    Reroll,
    ResolveRoll,
    ChooseOption(String),
    CompleteAction,
    UseExtraAction,
    AdvanceToNextPlayer,
    NextTurn,
    Tick,
    ResetTimer,
    SetCategory { name: String, enabled: bool },
    Reset,
}

/// Why an operation was refused. The caller keeps its previous state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{0}")]
    InvalidRoster(#[from] RosterIssue),

    #[error("the game has already started")]
    AlreadyStarted,

    #[error("the game has not started")]
    NotPlaying,

    #[error("the game is over")]
    GameOver,

    #[error("rolling is not allowed right now")]
    RollNotAllowed,

    #[error("{player} skips this turn")]
    TurnSkipped { player: String },

    #[error("{player} has no more re-rolls available")]
    NoRerollsLeft { player: String },

    #[error("no roll is waiting to be resolved")]
    NoPendingRoll,

    #[error("no action is in play")]
    NoActiveAction,

    #[error("the current action is not a choice")]
    NotAChoice,

    #[error("{option:?} is not one of the options")]
    UnknownOption { option: String },

    #[error("finish the current action first")]
    ActionInProgress,

    #[error("roll before using an extra action")]
    RollUnresolved,

    #[error("{player} has no extra actions")]
    NoExtraActions { player: String },

    #[error("there are no players")]
    NoPlayers,
}

impl Rejection {
    /// Whether the player should be told.
    ///
    /// Non-advisory rejections guard states the presentation layer should
    /// never reach, such as a duplicate roll resolution, and are dropped
    /// silently.
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        !matches!(self, Rejection::NoPendingRoll | Rejection::NoPlayers)
    }
}

/// Advisory messages for the presentation layer (toast equivalent).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    GameStarted { players: usize },
    TimeUp,
    /// No action matched the turn's categories.
    NothingToDraw,
    GameOver { winner: PlayerId },
    GameReset,
    Rejected(Rejection),
}

/// Work the owner should schedule after a delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    /// Resolve the pending roll once the dice animation settles.
    ResolveRoll { after: Duration, turn: u32 },
    /// Pass the turn on after an empty draw.
    ///
    /// `events` is the history length when the draw came up empty; any
    /// later event in the same turn supersedes the advance.
    AutoAdvance { after: Duration, turn: u32, events: usize },
}

impl FollowUp {
    #[must_use]
    pub fn delay(&self) -> Duration {
        match self {
            FollowUp::ResolveRoll { after, .. } | FollowUp::AutoAdvance { after, .. } => *after,
        }
    }

    /// Turn number the follow-up was issued on.
    #[must_use]
    pub fn turn(&self) -> u32 {
        match self {
            FollowUp::ResolveRoll { turn, .. } | FollowUp::AutoAdvance { turn, .. } => *turn,
        }
    }

    /// Whether the follow-up still applies to `state`.
    ///
    /// A roll resolution needs its roll still pending. An auto-advance
    /// needs the turn untouched since the empty draw: no new history and
    /// no active action.
    #[must_use]
    pub fn is_current(&self, state: &GameState) -> bool {
        if self.turn() != state.turn_number {
            return false;
        }
        match self {
            FollowUp::ResolveRoll { .. } => state.pending_roll().is_some(),
            FollowUp::AutoAdvance { events, .. } => {
                *events == state.history.len() && state.current_action.is_none()
            }
        }
    }

    #[must_use]
    pub fn command(&self) -> Command {
        match self {
            FollowUp::ResolveRoll { .. } => Command::ResolveRoll,
            FollowUp::AutoAdvance { .. } => Command::AdvanceToNextPlayer,
        }
    }
}

/// Result of an accepted operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub state: GameState,
    pub notices: Vec<Notice>,
    pub follow_up: Option<FollowUp>,
}

impl Step {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            notices: Vec::new(),
            follow_up: None,
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    #[must_use]
    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }
}
