//! The turn engine.
//!
//! Every operation takes the current [`GameState`] by reference and either
//! returns a [`Step`] holding the next state or a [`Rejection`], in which
//! case the caller keeps the state it has. No operation mutates its input,
//! so readers never observe a half-applied change.

use tracing::{debug, info};

use super::outcome::{Command, FollowUp, Notice, Rejection, Step};
use super::variant::{variant_for, Resolution, TurnContext, TurnVariant};
use crate::actions::{Action, ActionCatalog, CategoryFilter, PositionPrompts};
use crate::board::Board;
use crate::core::{
    validate_roster, ConfigError, EventKind, GameConfig, GameMode, GamePhase, GameRng, GameRngState,
    GameState, Player, PlayerId, PlayerSetup, RollOutcome, TurnStage,
};
use crate::timer::Tick;

/// Builder for a [`GameEngine`] and its initial state.
///
/// ```
/// use party_board::core::{GameConfig, GamePhase};
/// use party_board::engine::GameEngineBuilder;
///
/// let (engine, state) = GameEngineBuilder::new(GameConfig::default())
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(state.phase, GamePhase::Setup);
/// assert_eq!(engine.board().len(), 32);
/// ```
pub struct GameEngineBuilder {
    config: GameConfig,
    board: Option<Board>,
    catalog: ActionCatalog,
    prompts: PositionPrompts,
}

impl GameEngineBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            board: None,
            catalog: ActionCatalog::sample(),
            prompts: PositionPrompts::default(),
        }
    }

    /// Use a custom board. Its length replaces the configured board size.
    #[must_use]
    pub fn board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    #[must_use]
    pub fn catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn prompts(mut self, prompts: PositionPrompts) -> Self {
        self.prompts = prompts;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<(GameEngine, GameState), ConfigError> {
        let mut config = self.config;
        if let Some(board) = &self.board {
            config.board_size = board.len();
        }
        config.validate()?;

        let board = self.board.unwrap_or_else(|| Board::standard(config.board_size));
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let variant = variant_for(&config);
        let state = GameState::new(&config);

        info!(
            mode = %config.mode,
            board = board.len(),
            actions = self.catalog.len(),
            seed = rng.seed(),
            "game engine built"
        );

        let engine = GameEngine {
            config,
            board,
            catalog: self.catalog,
            prompts: self.prompts,
            variant,
            rng,
        };
        Ok((engine, state))
    }
}

/// Owns the static content and the RNG; applies operations to states.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    catalog: ActionCatalog,
    prompts: PositionPrompts,
    variant: Box<dyn TurnVariant>,
    rng: GameRng,
}

impl GameEngine {
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.variant.mode()
    }

    /// RNG position, for replaying a session from the same point.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
    }

    /// Route a command to its operation.
    pub fn dispatch(&mut self, state: &GameState, command: Command) -> Result<Step, Rejection> {
        match command {
            Command::ConfirmPlayers(setups) => self.confirm_players(state, &setups),
            Command::Roll => self.roll(state),
            Command::Reroll => self.reroll(state),
            Command::ResolveRoll => self.resolve_roll(state),
            Command::ChooseOption(option) => self.choose_option(state, &option),
            Command::CompleteAction => self.complete_action(state),
            Command::UseExtraAction => self.use_extra_action(state),
            Command::AdvanceToNextPlayer => self.advance_to_next_player(state),
            Command::NextTurn => self.next_turn(state),
            Command::Tick => Ok(self.tick(state)),
            Command::ResetTimer => self.reset_timer(state),
            Command::SetCategory { name, enabled } => self.set_category(state, &name, enabled),
            Command::Reset => Ok(self.reset(state)),
        }
    }

    /// Seat the roster and start play.
    pub fn confirm_players(&mut self, state: &GameState, setups: &[PlayerSetup]) -> Result<Step, Rejection> {
        if state.phase != GamePhase::Setup {
            return Err(Rejection::AlreadyStarted);
        }
        validate_roster(setups, self.config.max_players)?;

        let mut next = state.clone();
        next.players = PlayerId::all(setups.len())
            .zip(setups)
            .map(|(id, setup)| {
                Player::seat(id, setup, self.config.starting_rerolls, &self.config.palette)
            })
            .collect();
        next.phase = GamePhase::Playing;
        next.current_player = 0;
        next.turn_number = 1;
        next.stage = TurnStage::AwaitingRoll;
        next.last_roll = None;
        next.current_action = None;
        next.timer
            .reset(self.rng.duration_between(self.config.timer_range), false);
        next.history
            .record(PlayerId::new(0), EventKind::GameStart, "Game started! Let's roll!");

        info!(players = setups.len(), timer = next.timer.duration(), "game started");
        Ok(Step::new(next).with_notice(Notice::GameStarted {
            players: setups.len(),
        }))
    }

    /// Roll for the current player.
    pub fn roll(&mut self, state: &GameState) -> Result<Step, Rejection> {
        let player = self.roll_gate(state)?;
        let mut next = state.clone();
        let follow_up = self.issue_roll(&mut next, player.id);
        Ok(Step::new(next).with_follow_up(follow_up))
    }

    /// Spend a reroll, then roll.
    pub fn reroll(&mut self, state: &GameState) -> Result<Step, Rejection> {
        let player = self.roll_gate(state)?;
        if player.rerolls == 0 {
            return Err(Rejection::NoRerollsLeft {
                player: player.name.clone(),
            });
        }

        let left = player.rerolls - 1;
        let mut next = state.clone();
        next.update_current(|p| p.rerolls = left);
        next.history.record(
            player.id,
            EventKind::ReRoll,
            format!("Used a re-roll ({left} left)"),
        );
        debug!(player = %player.name, left, "reroll");

        let follow_up = self.issue_roll(&mut next, player.id);
        Ok(Step::new(next).with_follow_up(follow_up))
    }

    /// Apply the pending roll. A second call finds nothing pending.
    pub fn resolve_roll(&mut self, state: &GameState) -> Result<Step, Rejection> {
        let outcome = state.pending_roll().cloned().ok_or(Rejection::NoPendingRoll)?;
        if state.current().is_none() {
            return Err(Rejection::NoPlayers);
        }

        let mut next = state.clone();
        next.stage = TurnStage::Rolled;

        let resolution = {
            let mut ctx = TurnContext {
                config: &self.config,
                board: &self.board,
                catalog: &self.catalog,
                prompts: &self.prompts,
                rng: &mut self.rng,
            };
            self.variant.resolve(&mut ctx, &mut next, &outcome)
        };
        debug!(%outcome, ?resolution, "roll resolved");

        Ok(self.conclude(next, resolution))
    }

    /// Record the chosen option and complete the choice action.
    pub fn choose_option(&mut self, state: &GameState, option: &str) -> Result<Step, Rejection> {
        ensure_playing(state)?;
        let action = state.current_action.as_ref().ok_or(Rejection::NoActiveAction)?;
        if !action.is_choice() {
            return Err(Rejection::NotAChoice);
        }
        if !action.has_option(option) {
            return Err(Rejection::UnknownOption {
                option: option.to_string(),
            });
        }
        let player = state.current().ok_or(Rejection::NoPlayers)?.id;

        let mut next = state.clone();
        next.history
            .record(player, EventKind::Choice, format!("Chose: {option}"));
        finish_action(&mut next);
        Ok(Step::new(next))
    }

    /// Clear the current action and stop the timer.
    pub fn complete_action(&mut self, state: &GameState) -> Result<Step, Rejection> {
        ensure_playing(state)?;
        if state.current_action.is_none() {
            return Err(Rejection::NoActiveAction);
        }
        let mut next = state.clone();
        finish_action(&mut next);
        Ok(Step::new(next))
    }

    /// Spend a banked extra action on another draw this turn.
    pub fn use_extra_action(&mut self, state: &GameState) -> Result<Step, Rejection> {
        ensure_playing(state)?;
        let player = state.current().ok_or(Rejection::NoPlayers)?;
        if state.stage != TurnStage::Rolled {
            return Err(Rejection::RollUnresolved);
        }
        if state.current_action.is_some() {
            return Err(Rejection::ActionInProgress);
        }
        if player.extra_actions == 0 {
            return Err(Rejection::NoExtraActions {
                player: player.name.clone(),
            });
        }

        let left = player.extra_actions - 1;
        let mut next = state.clone();
        next.update_current(|p| p.extra_actions = left);
        next.history.record(
            player.id,
            EventKind::ExtraAction,
            format!("Used an extra action ({left} left)"),
        );

        let filter = self.variant.extra_filter(&next);
        Ok(self.conclude(next, Resolution::Draw(filter)))
    }

    /// Pass the turn on, skipping at most one flagged player.
    pub fn advance_to_next_player(&mut self, state: &GameState) -> Result<Step, Rejection> {
        ensure_playing(state)?;
        let mut next = state.clone();
        advance(&mut next)?;
        Ok(Step::new(next))
    }

    /// End the turn: complete the action, advance and start a fresh timer.
    pub fn next_turn(&mut self, state: &GameState) -> Result<Step, Rejection> {
        ensure_playing(state)?;
        let mut next = state.clone();
        finish_action(&mut next);
        advance(&mut next)?;
        next.timer
            .reset(self.rng.duration_between(self.config.timer_range), true);
        Ok(Step::new(next))
    }

    /// One elapsed second.
    ///
    /// On expiry the current action is completed and [`Notice::TimeUp`]
    /// is raised. Ticks never fail.
    pub fn tick(&mut self, state: &GameState) -> Step {
        let mut next = state.clone();
        match next.timer.tick() {
            Tick::Expired => {
                debug!("timer expired");
                finish_action(&mut next);
                Step::new(next).with_notice(Notice::TimeUp)
            }
            Tick::Running { .. } | Tick::Idle => Step::new(next),
        }
    }

    /// Restart the timer with a fresh random duration.
    pub fn reset_timer(&mut self, state: &GameState) -> Result<Step, Rejection> {
        ensure_playing(state)?;
        let mut next = state.clone();
        next.timer
            .reset(self.rng.duration_between(self.config.timer_range), true);
        Ok(Step::new(next))
    }

    /// Enable or disable a category for board-mode draws.
    pub fn set_category(&mut self, state: &GameState, name: &str, enabled: bool) -> Result<Step, Rejection> {
        if matches!(state.phase, GamePhase::Finished { .. }) {
            return Err(Rejection::GameOver);
        }
        let mut next = state.clone();
        next.categories.set(name, enabled);
        debug!(category = name, enabled, "category toggled");
        Ok(Step::new(next))
    }

    /// Back to setup with an empty roster and history.
    #[must_use]
    pub fn reset(&mut self, state: &GameState) -> Step {
        info!(turns = state.turn_number, events = state.history.len(), "game reset");
        Step::new(GameState::new(&self.config)).with_notice(Notice::GameReset)
    }

    fn roll_gate<'s>(&self, state: &'s GameState) -> Result<&'s Player, Rejection> {
        ensure_playing(state)?;
        let player = state.current().ok_or(Rejection::NoPlayers)?;
        if state.stage != TurnStage::AwaitingRoll {
            return Err(Rejection::RollNotAllowed);
        }
        if player.skip_turn {
            return Err(Rejection::TurnSkipped {
                player: player.name.clone(),
            });
        }
        Ok(player)
    }

    fn issue_roll(&mut self, next: &mut GameState, player: PlayerId) -> FollowUp {
        let outcome = self.variant.roll(&mut self.rng);
        next.history
            .record(player, EventKind::DiceRoll, format!("Rolled: {outcome}"));
        debug!(%player, %outcome, "rolled");

        next.last_roll = Some(outcome.clone());
        next.stage = TurnStage::Rolling { outcome };
        FollowUp::ResolveRoll {
            after: self.config.roll_settle(),
            turn: next.turn_number,
        }
    }

    fn conclude(&mut self, mut next: GameState, resolution: Resolution) -> Step {
        match resolution {
            Resolution::Finish => {
                let Some(winner) = next.current().cloned() else {
                    return Step::new(next);
                };
                next.phase = GamePhase::Finished { winner: winner.id };
                next.current_action = None;
                next.timer.stop();
                next.history.record(
                    winner.id,
                    EventKind::GameOver,
                    format!("{} reached the finish!", winner.name),
                );
                info!(winner = %winner.name, turns = next.turn_number, "game over");
                Step::new(next).with_notice(Notice::GameOver { winner: winner.id })
            }
            Resolution::Activate(action) => {
                self.activate(&mut next, action);
                Step::new(next)
            }
            Resolution::Draw(filter) => match self.draw(&filter) {
                Some(action) => {
                    self.activate(&mut next, action);
                    Step::new(next)
                }
                None => {
                    debug!(turn = next.turn_number, "nothing to draw");
                    let (turn, events) = (next.turn_number, next.history.len());
                    Step::new(next)
                        .with_notice(Notice::NothingToDraw)
                        .with_follow_up(FollowUp::AutoAdvance {
                            after: self.config.auto_advance_delay(),
                            turn,
                            events,
                        })
                }
            },
        }
    }

    fn draw(&mut self, filter: &CategoryFilter) -> Option<Action> {
        self.catalog.pick(filter, &mut self.rng).cloned()
    }

    fn activate(&self, next: &mut GameState, action: Action) {
        let Some(player) = next.current().map(|p| p.id) else {
            return;
        };

        let description = match &next.last_roll {
            Some(RollOutcome::Class(class)) => format!("Drew {class} action: {}", action.text),
            _ => format!("Drew action: {}", action.text),
        };
        next.history.record(player, EventKind::Action, description);

        if action.is_position() {
            next.timer.reset(self.config.position_timer_secs, true);
        } else {
            next.timer.resume();
        }
        debug!(action = %action.id, kind = %action.kind, "action activated");
        next.current_action = Some(action);
    }
}

fn ensure_playing(state: &GameState) -> Result<(), Rejection> {
    match state.phase {
        GamePhase::Playing => Ok(()),
        GamePhase::Setup => Err(Rejection::NotPlaying),
        GamePhase::Finished { .. } => Err(Rejection::GameOver),
    }
}

fn finish_action(next: &mut GameState) {
    next.current_action = None;
    next.timer.stop();
}

fn advance(next: &mut GameState) -> Result<(), Rejection> {
    let count = next.players.len();
    if count == 0 {
        return Err(Rejection::NoPlayers);
    }

    // A flagged player who was handed the turn without rolling has served it.
    if next.stage == TurnStage::AwaitingRoll {
        if let Some(departing) = next.players.get_mut(next.current_player) {
            if departing.skip_turn {
                departing.skip_turn = false;
                let id = departing.id;
                next.history
                    .record(id, EventKind::SkipTurn, "Turn skipped due to penalty");
            }
        }
    }

    let mut index = (next.current_player + 1) % count;
    if next.players[index].skip_turn {
        let skipped = &mut next.players[index];
        skipped.skip_turn = false;
        let id = skipped.id;
        debug!(player = %skipped.name, "turn skipped");
        next.history
            .record(id, EventKind::SkipTurn, "Turn skipped due to penalty");
        index = (index + 1) % count;
    }

    finish_action(next);
    next.current_player = index;
    next.turn_number += 1;
    next.stage = TurnStage::AwaitingRoll;
    next.last_roll = None;

    let player = &next.players[index];
    let (id, description) = (player.id, format!("{}'s turn", player.name));
    next.history.record(id, EventKind::TurnStart, description);
    Ok(())
}
