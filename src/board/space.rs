//! Board spaces and their effects.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Visual and rule category of a space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceType {
    Regular,
    Bonus,
    Penalty,
    Finish,
    /// Landing here activates a position prompt instead of a draw.
    Position,
}

/// What landing on a space does to the player.
///
/// Serializes as `{"type": "MOVE_FORWARD", "value": 2}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceEffect {
    MoveForward(u32),
    MoveBackward(u32),
    SkipTurn,
    ExtraAction,
    Finish,
}

/// One cell of the board. `id` equals its board index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Space {
    pub id: usize,

    #[serde(rename = "type")]
    pub kind: SpaceType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<SpaceEffect>,
}

impl Space {
    #[must_use]
    pub const fn regular(id: usize) -> Self {
        Self {
            id,
            kind: SpaceType::Regular,
            effect: None,
        }
    }

    #[must_use]
    pub const fn new(id: usize, kind: SpaceType, effect: Option<SpaceEffect>) -> Self {
        Self { id, kind, effect }
    }

    #[must_use]
    pub const fn finish(id: usize) -> Self {
        Self::new(id, SpaceType::Finish, Some(SpaceEffect::Finish))
    }

    #[must_use]
    pub fn is_finish(&self) -> bool {
        self.kind == SpaceType::Finish
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_json_shape() {
        let forward = serde_json::to_string(&SpaceEffect::MoveForward(2)).unwrap();
        assert_eq!(forward, r#"{"type":"MOVE_FORWARD","value":2}"#);

        let skip: SpaceEffect = serde_json::from_str(r#"{"type":"SKIP_TURN"}"#).unwrap();
        assert_eq!(skip, SpaceEffect::SkipTurn);
    }

    #[test]
    fn test_space_json_shape() {
        let space: Space = serde_json::from_str(r#"{"id": 4, "type": "REGULAR"}"#).unwrap();
        assert_eq!(space, Space::regular(4));

        let finish = serde_json::to_string(&Space::finish(31)).unwrap();
        assert!(finish.contains(r#""type":"FINISH""#));
    }
}
