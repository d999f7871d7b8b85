//! Movement and space-effect resolution.
//!
//! Both functions are pure: they read their inputs and return new values.

use super::space::{Space, SpaceEffect};
use crate::core::Player;

/// Position after moving `steps` forward. Overshoot stops on the finish.
#[must_use]
pub fn resolve_position(position: usize, steps: u32, last_index: usize) -> usize {
    position.saturating_add(steps as usize).min(last_index)
}

/// Apply the landed space's effect, returning the changed player.
///
/// Fields the effect does not touch are copied unchanged.
#[must_use]
pub fn apply_effect(player: &Player, space: &Space, last_index: usize) -> Player {
    let mut next = player.clone();

    match space.effect {
        Some(SpaceEffect::MoveForward(n)) => {
            next.position = resolve_position(player.position, n, last_index);
        }
        Some(SpaceEffect::MoveBackward(n)) => {
            next.position = player.position.saturating_sub(n as usize);
        }
        Some(SpaceEffect::SkipTurn) => next.skip_turn = true,
        Some(SpaceEffect::ExtraAction) => next.extra_actions += 1,
        Some(SpaceEffect::Finish) | None => {}
    }

    next
}

/// History text for an applied effect.
#[must_use]
pub fn describe_effect(effect: SpaceEffect, before: &Player, after: &Player) -> String {
    match effect {
        SpaceEffect::MoveForward(_) => format!(
            "Bonus! Moved forward {} to space {}",
            after.position - before.position,
            after.position
        ),
        SpaceEffect::MoveBackward(_) => format!(
            "Penalty! Moved back {} to space {}",
            before.position - after.position,
            after.position
        ),
        SpaceEffect::SkipTurn => "Penalty! Next turn will be skipped".to_string(),
        SpaceEffect::ExtraAction => format!(
            "Bonus! Extra action earned ({} banked)",
            after.extra_actions
        ),
        SpaceEffect::Finish => "Reached the finish".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SpaceType;
    use crate::core::{PlayerColor, PlayerId, PlayerSetup};

    fn player_at(position: usize) -> Player {
        let mut player = Player::seat(PlayerId::new(0), &PlayerSetup::new("A"), 3, &PlayerColor::palette());
        player.position = position;
        player
    }

    #[test]
    fn test_resolve_position_clamps() {
        assert_eq!(resolve_position(0, 4, 31), 4);
        assert_eq!(resolve_position(30, 5, 31), 31);
        assert_eq!(resolve_position(31, 6, 31), 31);
    }

    #[test]
    fn test_forward_and_backward() {
        let bonus = Space::new(3, SpaceType::Bonus, Some(SpaceEffect::MoveForward(2)));
        assert_eq!(apply_effect(&player_at(3), &bonus, 31).position, 5);
        assert_eq!(apply_effect(&player_at(30), &bonus, 31).position, 31);

        let penalty = Space::new(1, SpaceType::Penalty, Some(SpaceEffect::MoveBackward(2)));
        assert_eq!(apply_effect(&player_at(1), &penalty, 31).position, 0);
        assert_eq!(apply_effect(&player_at(7), &penalty, 31).position, 5);
    }

    #[test]
    fn test_flag_effects() {
        let skip = Space::new(10, SpaceType::Penalty, Some(SpaceEffect::SkipTurn));
        let after = apply_effect(&player_at(10), &skip, 31);
        assert!(after.skip_turn);
        assert_eq!(after.position, 10);

        let extra = Space::new(5, SpaceType::Bonus, Some(SpaceEffect::ExtraAction));
        let after = apply_effect(&player_at(5), &extra, 31);
        assert_eq!(after.extra_actions, 1);
        assert_eq!(after.rerolls, 3);
    }

    #[test]
    fn test_no_effect_is_identity() {
        let before = player_at(2);
        assert_eq!(apply_effect(&before, &Space::regular(2), 31), before);
        assert_eq!(apply_effect(&player_at(31), &Space::finish(31), 31), player_at(31));
    }

    #[test]
    fn test_describe_uses_actual_distance() {
        let before = player_at(1);
        let penalty = Space::new(1, SpaceType::Penalty, Some(SpaceEffect::MoveBackward(2)));
        let after = apply_effect(&before, &penalty, 31);
        assert_eq!(
            describe_effect(SpaceEffect::MoveBackward(2), &before, &after),
            "Penalty! Moved back 1 to space 0"
        );
    }
}
