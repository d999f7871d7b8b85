//! Action content: records, category filtering, catalog and position prompts.
//!
//! ## Selection
//!
//! A draw filters the catalog through the active [`CategoryFilter`] and
//! picks uniformly among the survivors:
//!
//! ```
//! use party_board::actions::{ActionCatalog, CategoryFilter};
//! use party_board::core::GameRng;
//!
//! let catalog = ActionCatalog::sample();
//! let mut rng = GameRng::new(42);
//!
//! let drawn = catalog.pick(&CategoryFilter::only("physical"), &mut rng).unwrap();
//! assert_eq!(drawn.text, "Do 10 jumping jacks");
//! ```

mod action;
mod catalog;
mod category;
mod prompts;

pub use action::{Action, ActionOptions, ActionType};
pub use catalog::{pick_action, ActionCatalog, CatalogError};
pub use category::{CategoryFilter, DEFAULT_CATEGORIES};
pub use prompts::PositionPrompts;
