//! Board model: spaces, layout generation and movement.
//!
//! The standard board is generated once from a positional rule; custom
//! layouts go through [`Board::from_spaces`], which enforces the single
//! finish space at the last index.

mod layout;
mod movement;
mod space;

pub use layout::{Board, BoardError};
pub use movement::{apply_effect, describe_effect, resolve_position};
pub use space::{Space, SpaceEffect, SpaceType};
