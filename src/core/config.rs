//! Game configuration.
//!
//! Everything the engine treats as input rather than computing itself:
//! board size, timer bounds, reroll allowance, palette, dice classes and
//! the default category map. Presentation hosts either build a config in
//! code with the `with_*` methods or load one from JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use super::player::{PlayerColor, MAX_SEATS};
use crate::actions::CategoryFilter;

/// Which rule set drives a turn.
///
/// The two variants are not merged: a game is built with exactly one.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameMode {
    /// Roll a six-sided die, move along the board, resolve the landed space.
    #[default]
    BoardMovement,
    /// Roll a class die; the rolled class is the only category for the draw.
    ClassSelector,
}

/// Inclusive bounds for randomly chosen turn timers, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRange {
    pub min: u32,
    pub max: u32,
}

impl TimerRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl Default for TimerRange {
    fn default() -> Self {
        Self::new(120, 300)
    }
}

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board needs at least 2 spaces, got {0}")]
    BoardTooSmall(usize),

    #[error("timer range is inverted: min {min} > max {max}")]
    InvertedTimerRange { min: u32, max: u32 },

    #[error("max_players must be at least 1")]
    NoSeats,

    #[error("max_players is {0}, at most {max} seats are supported", max = MAX_SEATS)]
    TooManySeats(usize),

    #[error("player palette is empty")]
    EmptyPalette,

    #[error("class-selector mode needs at least one dice class")]
    NoDiceClasses,

    #[error("invalid config JSON")]
    Json(#[from] serde_json::Error),
}

/// Complete game configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rule set used for every turn.
    pub mode: GameMode,

    /// Number of spaces on the board; the last one is the finish.
    pub board_size: usize,

    /// Largest roster accepted at setup.
    pub max_players: usize,

    /// Rerolls each player starts with.
    pub starting_rerolls: u32,

    /// Timer duration shown before the game starts and after a reset.
    pub default_timer_secs: u32,

    /// Range the per-turn timer duration is drawn from.
    pub timer_range: TimerRange,

    /// Timer duration applied when a position action becomes active.
    pub position_timer_secs: u32,

    /// Faces of the class die (class-selector mode).
    pub dice_classes: Vec<String>,

    /// Category map the game starts with and returns to on reset.
    pub categories: CategoryFilter,

    /// Seat colors, assigned by seat index when a player picks none.
    pub palette: Vec<PlayerColor>,

    /// Window between a roll and its resolution (dice animation).
    pub roll_settle_ms: u64,

    /// Delay before the turn passes on after an empty draw.
    pub auto_advance_ms: u64,

    /// Whether landing on the finish space ends the game.
    pub end_on_finish: bool,

    /// Fixed RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::BoardMovement,
            board_size: 32,
            max_players: 8,
            starting_rerolls: 3,
            default_timer_secs: 30,
            timer_range: TimerRange::default(),
            position_timer_secs: 60,
            dice_classes: ["intimate", "playful", "daring", "naughty", "wild", "extreme"]
                .into_iter()
                .map(String::from)
                .collect(),
            categories: CategoryFilter::defaults(),
            palette: PlayerColor::palette(),
            roll_settle_ms: 600,
            auto_advance_ms: 1500,
            end_on_finish: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Preset for the class-selector variant (longer dice animation).
    #[must_use]
    pub fn class_selector() -> Self {
        Self {
            mode: GameMode::ClassSelector,
            roll_settle_ms: 1000,
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 2 {
            return Err(ConfigError::BoardTooSmall(self.board_size));
        }
        if self.timer_range.min > self.timer_range.max {
            return Err(ConfigError::InvertedTimerRange {
                min: self.timer_range.min,
                max: self.timer_range.max,
            });
        }
        if self.max_players == 0 {
            return Err(ConfigError::NoSeats);
        }
        if self.max_players > MAX_SEATS {
            return Err(ConfigError::TooManySeats(self.max_players));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.mode == GameMode::ClassSelector && self.dice_classes.is_empty() {
            return Err(ConfigError::NoDiceClasses);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    #[must_use]
    pub fn with_starting_rerolls(mut self, rerolls: u32) -> Self {
        self.starting_rerolls = rerolls;
        self
    }

    #[must_use]
    pub fn with_timer_range(mut self, min: u32, max: u32) -> Self {
        self.timer_range = TimerRange::new(min, max);
        self
    }

    #[must_use]
    pub fn with_categories(mut self, categories: CategoryFilter) -> Self {
        self.categories = categories;
        self
    }

    #[must_use]
    pub fn with_dice_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dice_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_end_on_finish(mut self, end: bool) -> Self {
        self.end_on_finish = end;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Index of the finish space.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.board_size.saturating_sub(1)
    }

    #[must_use]
    pub fn roll_settle(&self) -> Duration {
        Duration::from_millis(self.roll_settle_ms)
    }

    #[must_use]
    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }
}
