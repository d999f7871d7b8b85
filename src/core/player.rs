//! Players: identity, seat setup and per-player board state.
//!
//! ## PlayerId
//!
//! Seat identifier, 0-based, unique within a game.
//!
//! ## PlayerSetup
//!
//! What the setup screen collects (name, color, token style) before the
//! roster is confirmed. [`validate_roster`] is the gate the presentation
//! layer checks before confirming; the engine re-checks it.
//!
//! ## Player
//!
//! A seated player during play: board position, rerolls, banked extra
//! actions and the skip-next-turn flag.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Default seat colors.
pub const PALETTE: [&str; 8] = [
    "#ef4444", "#3b82f6", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16",
];

/// Most seats a game can hold; every seat needs a distinct [`PlayerId`].
pub const MAX_SEATS: usize = u8::MAX as usize;

/// Player identifier. The first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use party_board::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(MAX_SEATS) as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A token color, stored as a CSS hex string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerColor(pub String);

impl PlayerColor {
    #[must_use]
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// The default palette as owned colors.
    #[must_use]
    pub fn palette() -> Vec<PlayerColor> {
        PALETTE.iter().map(|hex| PlayerColor::new(*hex)).collect()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a player's token travels between spaces. Cosmetic only.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementStyle {
    Walk,
    Hop,
    Slide,
    Dash,
}

/// A seat as filled in on the setup screen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub color: Option<PlayerColor>,
    pub movement: Option<MovementStyle>,
}

impl PlayerSetup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: PlayerColor) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_movement(mut self, style: MovementStyle) -> Self {
        self.movement = Some(style);
        self
    }

    /// Whether the name is empty once whitespace is trimmed.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Why a roster cannot be confirmed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RosterIssue {
    #[error("at least one player is needed")]
    Empty,

    #[error("at most {max} players can join")]
    TooMany { max: usize },

    #[error("player {} needs a name", .seat + 1)]
    BlankName { seat: usize },
}

/// Check a roster before starting the game.
///
/// Reports the first problem found: no seats, more seats than allowed, or
/// the first seat (0-based) whose name is blank.
pub fn validate_roster(setups: &[PlayerSetup], max_players: usize) -> Result<(), RosterIssue> {
    if setups.is_empty() {
        return Err(RosterIssue::Empty);
    }
    if setups.len() > max_players {
        return Err(RosterIssue::TooMany { max: max_players });
    }
    if let Some(seat) = setups.iter().position(PlayerSetup::is_blank) {
        return Err(RosterIssue::BlankName { seat });
    }
    Ok(())
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    /// Board index, always within `0..board_size`.
    pub position: usize,
    pub rerolls: u32,
    pub extra_actions: u32,
    pub skip_turn: bool,
    pub movement: Option<MovementStyle>,
}

impl Player {
    /// Seat a player from their setup entry.
    ///
    /// Names are trimmed; a missing color falls back to the palette entry
    /// for the seat, wrapping around when there are more seats than colors.
    pub fn seat(id: PlayerId, setup: &PlayerSetup, starting_rerolls: u32, palette: &[PlayerColor]) -> Self {
        let color = setup.color.clone().unwrap_or_else(|| {
            palette
                .get(id.index() % palette.len().max(1))
                .cloned()
                .unwrap_or_else(|| PlayerColor::new(PALETTE[0]))
        });

        Self {
            id,
            name: setup.name.trim().to_string(),
            color,
            position: 0,
            rerolls: starting_rerolls,
            extra_actions: 0,
            skip_turn: false,
            movement: setup.movement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(4).collect();
        assert_eq!(players.len(), 4);
        assert_eq!(players[3], PlayerId::new(3));
    }

    #[test]
    fn test_seat_uses_palette_by_index() {
        let palette = PlayerColor::palette();
        let player = Player::seat(PlayerId::new(2), &PlayerSetup::new("  Robin "), 3, &palette);

        assert_eq!(player.name, "Robin");
        assert_eq!(player.color.as_str(), PALETTE[2]);
        assert_eq!(player.position, 0);
        assert_eq!(player.rerolls, 3);
        assert_eq!(player.extra_actions, 0);
        assert!(!player.skip_turn);
    }

    #[test]
    fn test_seat_wraps_palette() {
        let palette = vec![PlayerColor::new("#000000"), PlayerColor::new("#ffffff")];
        let player = Player::seat(PlayerId::new(3), &PlayerSetup::new("Sam"), 0, &palette);
        assert_eq!(player.color.as_str(), "#ffffff");
    }

    #[test]
    fn test_seat_keeps_chosen_color_and_style() {
        let setup = PlayerSetup::new("Kai")
            .with_color(PlayerColor::new("#123456"))
            .with_movement(MovementStyle::Hop);
        let player = Player::seat(PlayerId::new(0), &setup, 3, &PlayerColor::palette());

        assert_eq!(player.color.as_str(), "#123456");
        assert_eq!(player.movement, Some(MovementStyle::Hop));
    }

    #[test]
    fn test_validate_roster() {
        let ok = vec![PlayerSetup::new("A"), PlayerSetup::new("B")];
        assert_eq!(validate_roster(&ok, 8), Ok(()));

        assert_eq!(validate_roster(&[], 8), Err(RosterIssue::Empty));

        let blank = vec![PlayerSetup::new("A"), PlayerSetup::new("   ")];
        assert_eq!(validate_roster(&blank, 8), Err(RosterIssue::BlankName { seat: 1 }));

        let crowd: Vec<_> = (0..3).map(|i| PlayerSetup::new(format!("P{i}"))).collect();
        assert_eq!(validate_roster(&crowd, 2), Err(RosterIssue::TooMany { max: 2 }));
    }

    #[test]
    fn test_movement_style_names() {
        assert_eq!(MovementStyle::Slide.to_string(), "SLIDE");
        assert_eq!("DASH".parse::<MovementStyle>().unwrap(), MovementStyle::Dash);
    }
}
