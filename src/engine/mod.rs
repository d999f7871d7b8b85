//! Turn engine: the state machine behind a game.
//!
//! ## Lifecycle
//!
//! ```text
//! Setup --confirm_players--> Playing --finish space--> Finished
//!   ^                                                      |
//!   +------------------------- reset ----------------------+
//! ```
//!
//! ## Turn flow
//!
//! Within `Playing`, `roll` (or `reroll`) moves the turn to
//! `TurnStage::Rolling` and returns a [`FollowUp::ResolveRoll`]; the owner
//! calls `resolve_roll` when the dice animation settles. Resolution applies
//! the variant's rules, then activates a drawn action, or reports
//! [`Notice::NothingToDraw`] with a [`FollowUp::AutoAdvance`]. `next_turn`
//! ends the turn.
//!
//! ## Variants
//!
//! The game mode is fixed at construction. [`BoardMovement`] moves tokens
//! along the board; [`ClassSelector`] rolls a class die and draws from
//! that class only.
//!
//! ## Example
//!
//! ```
//! use party_board::core::{GameConfig, PlayerSetup, TurnStage};
//! use party_board::engine::GameEngineBuilder;
//!
//! let (mut engine, state) = GameEngineBuilder::new(GameConfig::default())
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let state = engine
//!     .confirm_players(&state, &[PlayerSetup::new("Ana"), PlayerSetup::new("Ben")])
//!     .unwrap()
//!     .state;
//! let state = engine.roll(&state).unwrap().state;
//! let state = engine.resolve_roll(&state).unwrap().state;
//! assert_eq!(state.stage, TurnStage::Rolled);
//!
//! let state = engine.next_turn(&state).unwrap().state;
//! assert_eq!(state.current().unwrap().name, "Ben");
//! ```

mod game;
mod outcome;
mod variant;

pub use game::{GameEngine, GameEngineBuilder};
pub use outcome::{Command, FollowUp, Notice, Rejection, Step};
pub use variant::{variant_for, BoardMovement, ClassSelector, Resolution, TurnContext, TurnVariant};
