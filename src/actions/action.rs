//! Action records: the prompts a player draws and performs.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumIter, EnumString};

/// Options of a choice action. Most choices offer two.
pub type ActionOptions = SmallVec<[String; 2]>;

/// What kind of prompt an action is.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Drink,
    Question,
    Dare,
    Event,
    /// Offers options; the player picks one.
    Choice,
    /// Reenact a pictured position, under the position timer.
    Position,
}

/// An immutable catalog entry.
///
/// Serializes to the catalog JSON shape: `id`, `type`, `text`, `options`,
/// `imageUrl`, `category`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ActionType,

    pub text: String,

    /// Non-empty only for [`ActionType::Choice`].
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub options: ActionOptions,

    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Category tags. An untagged action is eligible under any filter.
    #[serde(rename = "category", default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Action {
    pub fn new(id: impl Into<String>, kind: ActionType, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
            options: SmallVec::new(),
            image: None,
            categories: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn is_choice(&self) -> bool {
        self.kind == ActionType::Choice
    }

    #[must_use]
    pub fn is_position(&self) -> bool {
        self.kind == ActionType::Position
    }

    #[must_use]
    pub fn is_untagged(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}
