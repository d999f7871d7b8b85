//! Action catalog and random selection.
//!
//! The catalog is static content: drawing never removes or edits an
//! entry, so the same action can come up again on a later draw.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::action::{Action, ActionType};
use super::category::CategoryFilter;
use crate::core::GameRng;

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate action id {0:?}")]
    DuplicateId(String),

    #[error("choice action {0:?} has no options")]
    ChoiceWithoutOptions(String),

    #[error("action {0:?} has options but is not a choice")]
    UnexpectedOptions(String),

    #[error("invalid action JSON")]
    Json(#[from] serde_json::Error),
}

/// Uniform random pick among actions the filter admits.
///
/// Returns `None` when nothing is eligible.
pub fn pick_action<'a>(
    actions: &'a [Action],
    filter: &CategoryFilter,
    rng: &mut GameRng,
) -> Option<&'a Action> {
    let eligible: Vec<&Action> = actions.iter().filter(|a| filter.admits(a)).collect();
    rng.choose(&eligible).copied()
}

/// Validated, ordered collection of actions with lookup by id.
#[derive(Clone, Debug, Default)]
pub struct ActionCatalog {
    actions: Vec<Action>,
    by_id: FxHashMap<String, usize>,
}

impl ActionCatalog {
    /// Build a catalog, checking ids are unique and that options appear
    /// exactly on choice actions.
    pub fn new(actions: Vec<Action>) -> Result<Self, CatalogError> {
        let mut by_id = FxHashMap::default();

        for (index, action) in actions.iter().enumerate() {
            if action.is_choice() && action.options.is_empty() {
                return Err(CatalogError::ChoiceWithoutOptions(action.id.clone()));
            }
            if !action.is_choice() && !action.options.is_empty() {
                return Err(CatalogError::UnexpectedOptions(action.id.clone()));
            }
            if by_id.insert(action.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(action.id.clone()));
            }
        }

        Ok(Self { actions, by_id })
    }

    /// Load a catalog from a JSON array of actions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let actions: Vec<Action> = serde_json::from_str(json)?;
        Self::new(actions)
    }

    /// The built-in starter deck.
    #[must_use]
    pub fn sample() -> Self {
        let actions = vec![
            Action::new("1", ActionType::Drink, "Take two sips").with_categories(["drinks"]),
            Action::new("2", ActionType::Question, "What's your most embarrassing moment?")
                .with_categories(["personal"]),
            Action::new("3", ActionType::Dare, "Do 10 jumping jacks").with_categories(["physical"]),
            Action::new("4", ActionType::Event, "Everyone with blue clothing drinks")
                .with_categories(["drinks", "group"]),
            Action::new(
                "5",
                ActionType::Choice,
                "Choose: Take a shot or answer a personal question",
            )
            .with_options(["Take a shot", "Answer a question"])
            .with_categories(["drinks", "personal"]),
            Action::new("6", ActionType::Position, "Hold this position for 30 seconds")
                .with_image("https://images.unsplash.com/photo-1472396961693-142e6e269027")
                .with_categories(["intimate"]),
        ];

        let by_id = actions
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        Self { actions, by_id }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Action> {
        self.by_id.get(id).map(|&i| &self.actions[i])
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Actions the filter admits, in catalog order.
    pub fn eligible<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Action> {
        self.actions.iter().filter(move |a| filter.admits(a))
    }

    pub fn pick(&self, filter: &CategoryFilter, rng: &mut GameRng) -> Option<&Action> {
        pick_action(&self.actions, filter, rng)
    }

    /// Image references of position actions, used to illustrate
    /// position prompts.
    pub fn position_images(&self) -> impl Iterator<Item = &str> {
        self.actions
            .iter()
            .filter(|a| a.is_position())
            .filter_map(|a| a.image.as_deref())
    }
}
