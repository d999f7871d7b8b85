//! Board layout: the ordered sequence of spaces.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::space::{Space, SpaceEffect, SpaceType};

/// Problems with a hand-made board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board needs at least 2 spaces, got {0}")]
    TooSmall(usize),

    #[error("board has no finish space")]
    MissingFinish,

    #[error("finish space at index {index} is not the last space")]
    FinishNotLast { index: usize },

    #[error("space at index {index} has id {id}")]
    IdMismatch { index: usize, id: usize },
}

/// The board. Exactly one finish space, at the last index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    spaces: Vec<Space>,
}

impl Board {
    /// Generate the standard layout for `size` spaces.
    ///
    /// Rules are tried top to bottom and the first match wins:
    ///
    /// | index | space |
    /// |---|---|
    /// | last | finish |
    /// | `% 8 == 3` | bonus, forward 2 |
    /// | `% 8 == 7` | penalty, back 2 |
    /// | `% 12 == 10` | penalty, skip turn |
    /// | `% 10 == 5` | bonus, extra action |
    /// | otherwise | regular |
    #[must_use]
    pub fn standard(size: usize) -> Self {
        let last = size.saturating_sub(1);
        let spaces = (0..size)
            .map(|index| {
                if index == last {
                    Space::finish(index)
                } else if index % 8 == 3 {
                    Space::new(index, SpaceType::Bonus, Some(SpaceEffect::MoveForward(2)))
                } else if index % 8 == 7 {
                    Space::new(index, SpaceType::Penalty, Some(SpaceEffect::MoveBackward(2)))
                } else if index % 12 == 10 {
                    Space::new(index, SpaceType::Penalty, Some(SpaceEffect::SkipTurn))
                } else if index % 10 == 5 {
                    Space::new(index, SpaceType::Bonus, Some(SpaceEffect::ExtraAction))
                } else {
                    Space::regular(index)
                }
            })
            .collect();

        Self { spaces }
    }

    /// Accept a custom layout after checking ids and the finish rule.
    pub fn from_spaces(spaces: Vec<Space>) -> Result<Self, BoardError> {
        if spaces.len() < 2 {
            return Err(BoardError::TooSmall(spaces.len()));
        }
        if let Some((index, space)) = spaces.iter().enumerate().find(|(i, s)| s.id != *i) {
            return Err(BoardError::IdMismatch { index, id: space.id });
        }

        let last = spaces.len() - 1;
        if let Some(index) = spaces.iter().position(|s| s.is_finish() && s.id != last) {
            return Err(BoardError::FinishNotLast { index });
        }
        if !spaces[last].is_finish() {
            return Err(BoardError::MissingFinish);
        }

        Ok(Self { spaces })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Index of the finish space.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.spaces.len().saturating_sub(1)
    }

    #[must_use]
    pub fn space(&self, index: usize) -> Option<&Space> {
        self.spaces.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter()
    }

    #[must_use]
    pub fn count(&self, kind: SpaceType) -> usize {
        self.spaces.iter().filter(|s| s.kind == kind).count()
    }
}
