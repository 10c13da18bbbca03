use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use duel_2048::config::EngineConfig;
use duel_2048::engine::Board;
use duel_2048::expectimax::{Difficulty, Searcher, SearchPolicy};
use duel_2048::game::{DuelOutcome, Game};
use duel_2048::trace::{self, Recorder};

/// duel-2048: 2048 engine with an expectimax opponent
#[derive(Parser)]
#[command(name = "duel-2048")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Postcard engine config; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[arg(long, global = true)]
    size: Option<usize>,
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[arg(long, global = true)]
    difficulty: Option<Difficulty>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Let the opponent play a game alone
    Play {
        /// Stop after this many moves
        #[arg(long)]
        max_moves: Option<u64>,
        /// Record the game to this file
        #[arg(long)]
        trace: Option<PathBuf>,
        /// Only print the final board
        #[arg(long)]
        quiet: bool,
    },
    /// Hint-driven board against the opponent, side by side
    Duel {
        /// Rounds to play before comparing scores
        #[arg(long, default_value_t = 200)]
        rounds: u64,
    },
    /// Suggest a move for a board given as rows, e.g. "2,2,4,0;0,0,0,0;..."
    Hint { rows: String },
    /// Summarize a recorded game
    Replay { path: PathBuf },
    /// Write the effective config to a file
    SaveConfig { path: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level.as_str())).init();

    let cfg = effective_config(&cli)?;
    match &cli.command {
        Commands::Play { max_moves, trace, quiet } => run_play(&cfg, *max_moves, trace.as_ref(), *quiet),
        Commands::Duel { rounds } => run_duel(&cfg, *rounds),
        Commands::Hint { rows } => run_hint(&cfg, rows),
        Commands::Replay { path } => run_replay(path),
        Commands::SaveConfig { path } => {
            cfg.save(path).with_context(|| format!("writing config to {}", path.display()))?;
            info!("config written to {}", path.display());
            Ok(())
        }
    }
}

fn effective_config(cli: &Cli) -> Result<EngineConfig> {
    let mut cfg = match &cli.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(size) = cli.size {
        cfg.grid_size = size;
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    if let Some(d) = cli.difficulty {
        cfg.difficulty = d;
    }
    cfg.validate().context("invalid engine config")?;
    Ok(cfg)
}

fn searcher(cfg: &EngineConfig, stream: u64) -> Searcher {
    Searcher::with_rng_and_capacity(cfg.rng(stream), cfg.cache_capacity)
}

fn run_play(cfg: &EngineConfig, max_moves: Option<u64>, trace_path: Option<&PathBuf>, quiet: bool) -> Result<()> {
    let mut game = Game::from_config(cfg, 0)?;
    let mut ai = searcher(cfg, 1);
    let mut recorder = trace_path.map(|_| Recorder::new(cfg.grid_size, cfg.difficulty.to_string()));
    if !quiet {
        println!("{}", game.board());
    }
    let mut move_count = 0u64;
    let mut total_nodes = 0u64;
    while !game.is_over() && max_moves.map_or(true, |m| move_count < m) {
        let (direction, branches) = ai.choose_with_branches(game.board(), cfg.difficulty);
        let Some(direction) = direction else { break };
        if let Some(rec) = recorder.as_mut() {
            rec.record(game.board(), direction, &branches);
        }
        game.play_settled(direction)?;
        move_count += 1;
        total_nodes += ai.last_stats().nodes;
        if !quiet {
            println!("{direction}\n{}", game.board());
        }
    }
    println!("{}", game.board());
    println!(
        "Moves made: {}, Score: {}, Highest tile: {}, Boards evaluated: {}",
        move_count,
        game.score(),
        game.best_tile(),
        total_nodes
    );
    if let (Some(rec), Some(path)) = (recorder, trace_path) {
        let run = rec.finish(game.board());
        trace::write_run_to_path(path, &run).with_context(|| format!("writing trace {}", path.display()))?;
        info!("trace with {} steps written to {}", run.meta.steps, path.display());
    }
    Ok(())
}

/// Advance one side by a single decision. Returns false once it cannot move.
fn step_side(game: &mut Game, ai: &mut Searcher, policy: SearchPolicy) -> bool {
    if game.is_over() {
        return false;
    }
    let Some(direction) = ai.choose_direction(game.board(), policy) else {
        return false;
    };
    match game.play_settled(direction) {
        Ok(turn) => turn.moved,
        Err(e) => {
            warn!("{} side rejected {direction}: {e}", policy.name());
            false
        }
    }
}

fn run_duel(cfg: &EngineConfig, rounds: u64) -> Result<()> {
    let mut human = Game::from_config(cfg, 0)?;
    let mut opponent = Game::from_config(cfg, 1)?;
    let mut human_ai = searcher(cfg, 2);
    let mut opponent_ai = searcher(cfg, 3);
    let opponent_policy = SearchPolicy::opponent(cfg.difficulty);

    let mut played = 0;
    for _ in 0..rounds {
        let (h, o) = rayon::join(
            || step_side(&mut human, &mut human_ai, SearchPolicy::hint()),
            || step_side(&mut opponent, &mut opponent_ai, opponent_policy),
        );
        played += 1;
        if !h && !o {
            break;
        }
    }

    println!("You (hint policy):\n{}", human.board());
    println!("Opponent ({}):\n{}", cfg.difficulty, opponent.board());
    let verdict = match DuelOutcome::from_scores(human.score(), opponent.score()) {
        DuelOutcome::HumanWins => "hint policy wins",
        DuelOutcome::OpponentWins => "opponent wins",
        DuelOutcome::Draw => "draw",
    };
    println!("After {played} rounds: {} vs {} ({verdict})", human.score(), opponent.score());
    Ok(())
}

fn run_hint(cfg: &EngineConfig, rows: &str) -> Result<()> {
    let board: Board = rows.parse().with_context(|| format!("parsing board {rows:?}"))?;
    let mut ai = searcher(cfg, 0);
    match ai.choose_direction(&board, SearchPolicy::hint()) {
        Some(direction) => println!("Try {direction}"),
        None if board.is_game_over() => println!("No moves left: game over"),
        None => println!("No move changes this board"),
    }
    Ok(())
}

fn run_replay(path: &Path) -> Result<()> {
    let run = trace::read_run_from_path(path).with_context(|| format!("reading trace {}", path.display()))?;
    let board = run.final_board().context("trace holds an invalid final board")?;
    if run.steps.len() != run.meta.steps as usize {
        bail!("trace claims {} steps but holds {}", run.meta.steps, run.steps.len());
    }
    println!(
        "{} steps by {} on {}x{} in {:.1}s, final score {}, highest tile {}",
        run.meta.steps,
        run.meta.policy,
        run.meta.grid_size,
        run.meta.grid_size,
        run.meta.elapsed_s,
        run.meta.final_score,
        run.meta.highest_tile
    );
    println!("{board}");
    Ok(())
}
