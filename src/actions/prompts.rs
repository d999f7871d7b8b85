//! Prompts used when a player lands on a position space.

use super::action::{Action, ActionType};
use crate::core::GameRng;

const DEFAULT_PROMPTS: [&str; 3] = [
    "Strike the pose: reenact the position and choose an action to perform in it.",
    "Photo-Op! Reenact the position and let another player take a picture.",
    "Selfie! Reenact the position, take a selfie and send it to another player.",
];

/// Pool of position prompts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionPrompts {
    prompts: Vec<String>,
}

impl Default for PositionPrompts {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPTS)
    }
}

impl PositionPrompts {
    pub fn new<I, S>(prompts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompts: prompts.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Build a position action from a random prompt.
    ///
    /// `serial` keeps synthesized ids distinct within a game. An empty
    /// pool falls back to a generic prompt.
    pub fn synthesize(&self, serial: u32, image: Option<&str>, rng: &mut GameRng) -> Action {
        let text = rng
            .choose(&self.prompts)
            .map_or("Reenact the position.", String::as_str);

        let action = Action::new(format!("position-{serial}"), ActionType::Position, text);
        match image {
            Some(url) => action.with_image(url),
            None => action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesize_default_pool() {
        let prompts = PositionPrompts::default();
        let mut rng = GameRng::new(5);

        let action = prompts.synthesize(7, Some("https://example.com/a.jpg"), &mut rng);
        assert_eq!(action.id, "position-7");
        assert!(action.is_position());
        assert!(action.is_untagged());
        assert!(DEFAULT_PROMPTS.contains(&action.text.as_str()));
        assert_eq!(action.image.as_deref(), Some("https://example.com/a.jpg"));
    }

    #[test]
    fn test_empty_pool_fallback() {
        let prompts = PositionPrompts::new(Vec::<String>::new());
        let mut rng = GameRng::new(5);

        let action = prompts.synthesize(0, None, &mut rng);
        assert_eq!(action.text, "Reenact the position.");
        assert!(action.image.is_none());
    }
}
