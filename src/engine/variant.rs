//! Turn variants: the two rule sets a game can be built with.
//!
//! A variant decides what a roll produces and what resolving it does to
//! the state. The engine handles everything the variants share: gating,
//! history for the roll itself, drawing and activating actions, and
//! ending the game.

use tracing::debug;

use crate::actions::{Action, ActionCatalog, CategoryFilter, PositionPrompts};
use crate::board::{apply_effect, describe_effect, resolve_position, Board, SpaceType};
use crate::core::{EventKind, GameConfig, GameMode, GameRng, GameState, RollOutcome};

/// Read-only game content plus the RNG, lent to a variant while it resolves.
pub struct TurnContext<'a> {
    pub config: &'a GameConfig,
    pub board: &'a Board,
    pub catalog: &'a ActionCatalog,
    pub prompts: &'a PositionPrompts,
    pub rng: &'a mut GameRng,
}

/// What should happen once a roll's own effects are applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Draw an action through this filter.
    Draw(CategoryFilter),
    /// Activate this action without drawing.
    Activate(Action),
    /// The current player reached the finish.
    Finish,
}

/// Rule set for a turn.
pub trait TurnVariant: std::fmt::Debug + Send + Sync {
    fn mode(&self) -> GameMode;

    /// Produce a roll.
    fn roll(&self, rng: &mut GameRng) -> RollOutcome;

    /// Apply a pending roll to the current player.
    ///
    /// The engine guarantees there is a current player.
    fn resolve(&self, ctx: &mut TurnContext<'_>, state: &mut GameState, outcome: &RollOutcome) -> Resolution;

    /// Filter for a draw that is not tied to a roll (extra actions).
    fn extra_filter(&self, state: &GameState) -> CategoryFilter;
}

/// Roll a die, move, resolve the landed space, then draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoardMovement;

impl TurnVariant for BoardMovement {
    fn mode(&self) -> GameMode {
        GameMode::BoardMovement
    }

    fn roll(&self, rng: &mut GameRng) -> RollOutcome {
        RollOutcome::Die(rng.roll_die())
    }

    fn resolve(&self, ctx: &mut TurnContext<'_>, state: &mut GameState, outcome: &RollOutcome) -> Resolution {
        let (RollOutcome::Die(face), Some(before)) = (outcome, state.current().cloned()) else {
            return Resolution::Draw(state.categories.clone());
        };

        let last = ctx.board.last_index();
        let landed = resolve_position(before.position, u32::from(*face), last);
        state.update_current(|p| p.position = landed);
        state.history.record(
            before.id,
            EventKind::Move,
            format!("Moved from space {} to space {}", before.position, landed),
        );
        debug!(player = %before.name, from = before.position, to = landed, "moved");

        let Some(space) = ctx.board.space(landed).copied() else {
            return Resolution::Draw(state.categories.clone());
        };

        if let (Some(effect), Some(moved)) = (space.effect, state.current().cloned()) {
            let after = apply_effect(&moved, &space, last);
            let description = describe_effect(effect, &moved, &after);
            state.update_current(|p| *p = after);
            state.history.record(moved.id, EventKind::SpaceEffect, description);
            debug!(player = %moved.name, ?effect, "space effect applied");
        }

        let position = state.current().map_or(landed, |p| p.position);
        if ctx.config.end_on_finish && position == last {
            return Resolution::Finish;
        }

        if space.kind == SpaceType::Position {
            let catalog = ctx.catalog;
            let prompts = ctx.prompts;
            let images: Vec<&str> = catalog.position_images().collect();
            let image = ctx.rng.choose(&images).copied();
            return Resolution::Activate(prompts.synthesize(state.turn_number, image, ctx.rng));
        }

        Resolution::Draw(state.categories.clone())
    }

    fn extra_filter(&self, state: &GameState) -> CategoryFilter {
        state.categories.clone()
    }
}

/// Roll a class die; the rolled class alone filters the draw.
#[derive(Clone, Debug)]
pub struct ClassSelector {
    classes: Vec<String>,
}

impl ClassSelector {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl TurnVariant for ClassSelector {
    fn mode(&self) -> GameMode {
        GameMode::ClassSelector
    }

    fn roll(&self, rng: &mut GameRng) -> RollOutcome {
        RollOutcome::Class(rng.choose(&self.classes).cloned().unwrap_or_default())
    }

    fn resolve(&self, _ctx: &mut TurnContext<'_>, state: &mut GameState, outcome: &RollOutcome) -> Resolution {
        match outcome {
            RollOutcome::Class(class) => Resolution::Draw(CategoryFilter::only(class.clone())),
            RollOutcome::Die(_) => Resolution::Draw(state.categories.clone()),
        }
    }

    fn extra_filter(&self, state: &GameState) -> CategoryFilter {
        match &state.last_roll {
            Some(RollOutcome::Class(class)) => CategoryFilter::only(class.clone()),
            _ => state.categories.clone(),
        }
    }
}

/// Variant for a config's mode.
#[must_use]
pub fn variant_for(config: &GameConfig) -> Box<dyn TurnVariant> {
    match config.mode {
        GameMode::BoardMovement => Box::new(BoardMovement),
        GameMode::ClassSelector => Box::new(ClassSelector::new(config.dice_classes.iter().cloned())),
    }
}
