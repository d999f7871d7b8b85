//! Board-movement turn tests.
//!
//! These drive the engine through the public API:
//! - Turn order and skip penalties
//! - Movement, space effects and finishing
//! - Drawing, choosing and completing actions
//! - Timer coupling and reset

use party_board::actions::{Action, ActionCatalog, ActionType, CategoryFilter};
use party_board::core::{
    EventKind, GameConfig, GamePhase, GameState, PlayerId, PlayerSetup, RollOutcome, TurnStage,
};
use party_board::engine::{FollowUp, GameEngine, GameEngineBuilder, Notice, Rejection};

fn start(config: GameConfig, catalog: ActionCatalog, names: &[&str]) -> (GameEngine, GameState) {
    let (mut engine, state) = GameEngineBuilder::new(config)
        .catalog(catalog)
        .seed(42)
        .build()
        .expect("valid config");
    let setups: Vec<_> = names.iter().map(|n| PlayerSetup::new(*n)).collect();
    let state = engine
        .confirm_players(&state, &setups)
        .expect("valid roster")
        .state;
    (engine, state)
}

/// Put a known die face in flight, as if `roll` had produced it.
fn with_pending(state: &GameState, face: u8) -> GameState {
    let mut next = state.clone();
    next.last_roll = Some(RollOutcome::Die(face));
    next.stage = TurnStage::Rolling {
        outcome: RollOutcome::Die(face),
    };
    next
}

fn place(state: &mut GameState, position: usize) {
    state.update_current(|p| p.position = position);
}

/// Skipping a flagged player in a three-player game.
#[test]
fn test_skip_one_flagged_player() {
    let (mut engine, mut state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana", "Ben", "Cam"],
    );
    state.players[1].skip_turn = true;

    let next = engine.advance_to_next_player(&state).unwrap().state;

    assert_eq!(next.current_player, 2);
    assert!(!next.players[1].skip_turn);
    assert_eq!(next.history.count(EventKind::SkipTurn), 1);

    let skip = next.history.of_kind(EventKind::SkipTurn).next().unwrap();
    assert_eq!(skip.player, PlayerId::new(1));
    assert_eq!(skip.description, "Turn skipped due to penalty");

    let turn = next.history.last().unwrap();
    assert_eq!(turn.kind, EventKind::TurnStart);
    assert_eq!(turn.description, "Cam's turn");
}

/// Two flagged players in a row unwind one hop per advance.
#[test]
fn test_skip_chain_unwinds_one_hop_per_call() {
    let (mut engine, mut state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana", "Ben", "Cam", "Dee"],
    );
    state.players[1].skip_turn = true;
    state.players[2].skip_turn = true;

    let landed = engine.advance_to_next_player(&state).unwrap().state;
    assert_eq!(landed.current_player, 2);
    assert!(landed.players[2].skip_turn);
    assert_eq!(
        engine.roll(&landed),
        Err(Rejection::TurnSkipped {
            player: "Cam".into()
        })
    );

    let next = engine.next_turn(&landed).unwrap().state;
    assert_eq!(next.current_player, 3);
    assert!(!next.players[2].skip_turn);
    assert_eq!(next.history.count(EventKind::SkipTurn), 2);
    assert!(next.can_roll());
}

/// A skip space flags the mover for the next round, not this one.
#[test]
fn test_skip_space_penalizes_next_round() {
    let (mut engine, mut state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana", "Ben"],
    );
    place(&mut state, 8);

    // 8 + 2 lands on 10: penalty, skip turn
    let state = engine.resolve_roll(&with_pending(&state, 2)).unwrap().state;
    assert!(state.players[0].skip_turn);

    // Ana keeps the flag while the turn passes to Ben
    let state = engine.next_turn(&state).unwrap().state;
    assert_eq!(state.current_player, 1);
    assert!(state.players[0].skip_turn);

    // Ben finishes; Ana is skipped and Ben goes again
    let state = engine.next_turn(&state).unwrap().state;
    assert_eq!(state.current_player, 1);
    assert!(!state.players[0].skip_turn);
}

/// Overshooting the finish clamps to the last space and ends the game.
#[test]
fn test_overshoot_clamps_to_finish() {
    let (mut engine, mut state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana", "Ben"],
    );
    place(&mut state, 30);

    let step = engine.resolve_roll(&with_pending(&state, 5)).unwrap();
    let state = step.state;

    assert_eq!(state.players[0].position, 31);
    assert_eq!(
        state.phase,
        GamePhase::Finished {
            winner: PlayerId::new(0)
        }
    );
    assert_eq!(state.winner().unwrap().name, "Ana");
    assert!(state.current_action.is_none());
    assert!(!state.timer.is_active());
    assert_eq!(
        step.notices,
        vec![Notice::GameOver {
            winner: PlayerId::new(0)
        }]
    );

    let kinds: Vec<_> = state.history.iter().rev().take(3).map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::GameOver, EventKind::SpaceEffect, EventKind::Move]
    );

    assert_eq!(engine.roll(&state), Err(Rejection::GameOver));
    assert_eq!(engine.next_turn(&state), Err(Rejection::GameOver));
    assert_eq!(engine.reset(&state).state.phase, GamePhase::Setup);
}

#[test]
fn test_finish_can_be_disabled() {
    let (mut engine, mut state) = start(
        GameConfig::default().with_end_on_finish(false),
        ActionCatalog::sample(),
        &["Ana"],
    );
    place(&mut state, 29);

    let state = engine.resolve_roll(&with_pending(&state, 6)).unwrap().state;
    assert_eq!(state.players[0].position, 31);
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.current_action.is_some());
}

/// Bonus and penalty spaces report the concrete outcome.
#[test]
fn test_space_effects_are_logged() {
    let (mut engine, state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana"],
    );

    let forward = engine.resolve_roll(&with_pending(&state, 3)).unwrap().state;
    assert_eq!(forward.players[0].position, 5);
    let effect = forward.history.of_kind(EventKind::SpaceEffect).last().unwrap();
    assert_eq!(effect.description, "Bonus! Moved forward 2 to space 5");

    let mut state = state;
    place(&mut state, 3);
    let back = engine.resolve_roll(&with_pending(&state, 4)).unwrap().state;
    assert_eq!(back.players[0].position, 5);
    let effect = back.history.of_kind(EventKind::SpaceEffect).last().unwrap();
    assert_eq!(effect.description, "Penalty! Moved back 2 to space 5");
}

/// Disabled categories never supply a draw; untagged actions always can.
#[test]
fn test_draw_respects_category_filter() {
    let catalog = ActionCatalog::new(vec![
        Action::new("p", ActionType::Question, "Tell a secret").with_categories(["personal"]),
        Action::new("u", ActionType::Dare, "Sing a song"),
    ])
    .unwrap();
    let filter = CategoryFilter::new()
        .with("drinks", true)
        .with("personal", false);
    let (mut engine, state) = start(
        GameConfig::default().with_categories(filter),
        catalog,
        &["Ana"],
    );

    for _ in 0..25 {
        let next = engine.resolve_roll(&with_pending(&state, 1)).unwrap().state;
        assert_eq!(next.current_action.as_ref().unwrap().id, "u");
    }
}

#[test]
fn test_empty_draw_schedules_auto_advance() {
    let (mut engine, state) = start(
        GameConfig::default().with_categories(CategoryFilter::new()),
        ActionCatalog::sample(),
        &["Ana", "Ben"],
    );

    let step = engine.resolve_roll(&with_pending(&state, 1)).unwrap();

    assert!(step.state.current_action.is_none());
    assert_eq!(step.state.history.count(EventKind::Action), 0);
    assert_eq!(step.notices, vec![Notice::NothingToDraw]);
    assert!(matches!(
        step.follow_up,
        Some(FollowUp::AutoAdvance { turn: 1, after, .. }) if after.as_millis() == 1500
    ));

    let next = engine
        .dispatch(&step.state, step.follow_up.unwrap().command())
        .unwrap()
        .state;
    assert_eq!(next.current_player, 1);
    assert_eq!(next.turn_number, 2);
}

#[test]
fn test_choice_flow() {
    let (mut engine, mut state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana", "Ben"],
    );
    state.current_action = engine.catalog().get("5").cloned();
    state.timer.resume();

    assert_eq!(
        engine.choose_option(&state, "Dance"),
        Err(Rejection::UnknownOption {
            option: "Dance".into()
        })
    );

    let next = engine.choose_option(&state, "Take a shot").unwrap().state;
    assert!(next.current_action.is_none());
    assert!(!next.timer.is_active());

    let choice = next.history.last().unwrap();
    assert_eq!(choice.kind, EventKind::Choice);
    assert_eq!(choice.description, "Chose: Take a shot");
    assert_eq!(next.history.action_history().count(), 1);

    let mut dare = state.clone();
    dare.current_action = engine.catalog().get("3").cloned();
    assert_eq!(engine.choose_option(&dare, "x"), Err(Rejection::NotAChoice));
}

#[test]
fn test_position_action_uses_position_timer() {
    let catalog = ActionCatalog::new(vec![ActionCatalog::sample().get("6").cloned().unwrap()]).unwrap();
    let (mut engine, state) = start(GameConfig::default(), catalog, &["Ana"]);

    let next = engine.resolve_roll(&with_pending(&state, 1)).unwrap().state;

    assert!(next.current_action.as_ref().unwrap().is_position());
    assert_eq!(next.timer.duration(), 60);
    assert_eq!(next.timer.remaining(), 60);
    assert!(next.timer.is_active());
}

#[test]
fn test_regular_action_starts_timer() {
    let no_positions: Vec<_> = ActionCatalog::sample()
        .iter()
        .filter(|a| !a.is_position())
        .cloned()
        .collect();
    let (mut engine, state) = start(
        GameConfig::default().with_timer_range(45, 45),
        ActionCatalog::new(no_positions).unwrap(),
        &["Ana"],
    );
    assert!(!state.timer.is_active());

    let next = engine.resolve_roll(&with_pending(&state, 1)).unwrap().state;
    let action = next.current_action.as_ref().unwrap();
    assert!(!action.is_position());
    assert!(next.timer.is_active());
    assert_eq!(next.timer.duration(), 45);

    let drawn = next.history.last().unwrap();
    assert_eq!(drawn.kind, EventKind::Action);
    assert_eq!(drawn.description, format!("Drew action: {}", action.text));
}

#[test]
fn test_extra_action_from_bonus_space() {
    let (mut engine, state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana", "Ben"],
    );
    assert_eq!(engine.use_extra_action(&state), Err(Rejection::RollUnresolved));

    // 0 + 5 lands on the extra-action space
    let landed = engine.resolve_roll(&with_pending(&state, 5)).unwrap().state;
    assert_eq!(landed.players[0].extra_actions, 1);
    assert_eq!(engine.use_extra_action(&landed), Err(Rejection::ActionInProgress));

    let done = engine.complete_action(&landed).unwrap().state;
    let extra = engine.use_extra_action(&done).unwrap().state;

    assert_eq!(extra.players[0].extra_actions, 0);
    assert_eq!(extra.history.count(EventKind::ExtraAction), 1);
    assert!(extra.current_action.is_some());

    let done = engine.complete_action(&extra).unwrap().state;
    assert_eq!(
        engine.use_extra_action(&done),
        Err(Rejection::NoExtraActions {
            player: "Ana".into()
        })
    );
}

#[test]
fn test_next_turn_restarts_timer() {
    let (mut engine, state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana", "Ben"],
    );
    let rolled = engine.roll(&state).unwrap().state;
    let resolved = engine.resolve_roll(&rolled).unwrap().state;

    let next = engine.next_turn(&resolved).unwrap().state;

    assert_eq!(next.current_player, 1);
    assert_eq!(next.turn_number, 2);
    assert_eq!(next.stage, TurnStage::AwaitingRoll);
    assert!(next.current_action.is_none());
    assert!(next.last_roll.is_none());
    assert!(next.timer.is_active());
    assert!((120..=300).contains(&next.timer.duration()));
    assert_eq!(next.history.last().unwrap().description, "Ben's turn");
}

#[test]
fn test_rejected_operation_leaves_state_alone() {
    let (mut engine, mut state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana"],
    );
    state.update_current(|p| p.rerolls = 0);
    let before = state.clone();

    assert!(engine.reroll(&state).is_err());
    assert_eq!(state, before);
}

#[test]
fn test_set_category_survives_play_and_resets() {
    let (mut engine, state) = GameEngineBuilder::new(GameConfig::default())
        .seed(3)
        .build()
        .unwrap();

    let state = engine.set_category(&state, "drinks", false).unwrap().state;
    let state = engine
        .confirm_players(&state, &[PlayerSetup::new("Ana")])
        .unwrap()
        .state;
    assert!(!state.categories.is_enabled("drinks"));

    let state = engine.reset(&state).state;
    assert!(state.categories.is_enabled("drinks"));
}

/// Play until somebody finishes.
#[test]
fn test_full_game_reaches_finish() {
    let (mut engine, mut state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana", "Ben", "Cam"],
    );

    for _ in 0..1000 {
        if !state.is_playing() {
            break;
        }
        state = match engine.roll(&state) {
            Ok(step) => {
                let resolved = engine.resolve_roll(&step.state).unwrap().state;
                if resolved.is_playing() {
                    let done = match engine.complete_action(&resolved) {
                        Ok(step) => step.state,
                        Err(Rejection::NoActiveAction) => resolved,
                        Err(other) => panic!("unexpected rejection: {other}"),
                    };
                    engine.next_turn(&done).unwrap().state
                } else {
                    resolved
                }
            }
            Err(Rejection::TurnSkipped { .. }) => engine.next_turn(&state).unwrap().state,
            Err(other) => panic!("unexpected rejection: {other}"),
        };

        assert!(state.players.iter().all(|p| p.position <= 31));
    }

    let winner = state.winner().expect("someone finishes");
    assert_eq!(winner.position, 31);
    assert_eq!(state.history.count(EventKind::GameOver), 1);
    assert_eq!(state.history.count(EventKind::GameStart), 1);
}

#[test]
fn test_advance_leaves_no_action_for_next_player() {
    let (mut engine, state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana", "Ben"],
    );
    let drawn = engine.resolve_roll(&with_pending(&state, 1)).unwrap().state;
    assert!(drawn.current_action.is_some());
    assert!(drawn.timer.is_active());

    let next = engine.advance_to_next_player(&drawn).unwrap().state;

    assert_eq!(next.current_player, 1);
    assert!(next.current_action.is_none());
    assert!(!next.timer.is_active());
    assert_eq!(next.stage, TurnStage::AwaitingRoll);
}

#[test]
fn test_complete_without_action_keeps_timer() {
    let (mut engine, state) = start(
        GameConfig::default(),
        ActionCatalog::sample(),
        &["Ana", "Ben"],
    );
    let timed = engine.reset_timer(&state).unwrap().state;
    assert!(timed.timer.is_active());

    assert_eq!(engine.complete_action(&timed), Err(Rejection::NoActiveAction));
    assert!(Rejection::NoActiveAction.is_advisory());
}
