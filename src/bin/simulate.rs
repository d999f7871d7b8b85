use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use party_board::actions::ActionCatalog;
use party_board::core::{GameConfig, GameMode, PlayerSetup, RollOutcome};
use party_board::engine::{GameEngine, GameEngineBuilder, Rejection};
use party_board::GameState;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "party-board-simulate")]
#[command(about = "Play a party board game headlessly and print its history")]
struct Args {
    /// Comma-separated player names
    #[arg(long, default_value = "Ana,Ben,Cam")]
    players: String,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Game mode: board-movement or class-selector
    #[arg(long, default_value = "board-movement")]
    mode: GameMode,

    /// Stop after this many turns if nobody finishes
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Roll with rerolls while players have them left
    #[arg(long)]
    use_rerolls: bool,

    /// Game config JSON (overrides --mode)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Action catalog JSON
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the final state as JSON instead of the history
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json(&json)?
        }
        None if args.mode == GameMode::ClassSelector => GameConfig::class_selector(),
        None => GameConfig::default(),
    };

    let mut builder = GameEngineBuilder::new(config).seed(args.seed);
    if let Some(path) = &args.catalog {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        builder = builder.catalog(ActionCatalog::from_json(&json)?);
    }
    let (mut engine, state) = builder.build()?;

    let setups: Vec<PlayerSetup> = args.players.split(',').map(PlayerSetup::new).collect();
    let mut state = engine.confirm_players(&state, &setups)?.state;

    while state.is_playing() && state.turn_number <= args.max_turns {
        state = play_turn(&mut engine, state, args.use_rerolls)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    for event in state.history.iter() {
        let name = state.player(event.player).map_or("?", |p| p.name.as_str());
        println!(
            "{:>5} {:<12} {:<8} {}",
            event.id.to_string(),
            event.kind.to_string(),
            name,
            event.description
        );
    }

    match state.winner() {
        Some(winner) => info!(winner = %winner.name, turns = state.turn_number, "finished"),
        None => info!(turns = state.turn_number, "no winner"),
    }
    Ok(())
}

/// One scripted turn: roll, resolve, act on every drawn action, pass on.
fn play_turn(engine: &mut GameEngine, state: GameState, use_rerolls: bool) -> Result<GameState> {
    let wants_reroll = use_rerolls && state.current().is_some_and(|p| p.rerolls > 0);
    let rolled = if wants_reroll {
        engine.reroll(&state)
    } else {
        engine.roll(&state)
    };

    let mut state = match rolled {
        Ok(step) => step.state,
        Err(Rejection::TurnSkipped { player }) => {
            warn!(%player, "skipping flagged player");
            return Ok(engine.next_turn(&state)?.state);
        }
        Err(other) => return Err(other.into()),
    };

    if let Some(RollOutcome::Die(face)) = state.pending_roll() {
        debug!(turn = state.turn_number, face = *face, "rolled");
    }

    state = engine.resolve_roll(&state)?.state;
    if !state.is_playing() {
        return Ok(state);
    }

    state = act(engine, state)?;
    while state.current().is_some_and(|p| p.extra_actions > 0) {
        state = engine.use_extra_action(&state)?.state;
        state = act(engine, state)?;
    }

    Ok(engine.next_turn(&state)?.state)
}

fn act(engine: &mut GameEngine, state: GameState) -> Result<GameState> {
    let Some(action) = &state.current_action else {
        return Ok(state);
    };

    let step = match action.options.first().filter(|_| action.is_choice()) {
        Some(option) => engine.choose_option(&state, option)?,
        None => engine.complete_action(&state)?,
    };
    Ok(step.state)
}
