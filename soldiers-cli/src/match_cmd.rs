//! Match command - AI-vs-AI games with a results summary
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use soldiers_core::{GameResult, GameState, MinimaxAI, Move, SearchConfig, Side};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play (first mover alternates)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// AI search depth (ignored when --config is given)
    #[arg(long, default_value = "3")]
    pub depth: u32,

    /// Search config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Random plies played before the AI takes over, so games differ
    #[arg(long, default_value = "2")]
    pub openings: u32,

    /// Turn limit per game; unfinished games count as draws
    #[arg(long, default_value = "200")]
    pub max_plies: u32,

    /// Play games one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
pub(crate) struct GameRecord {
    pub game_number: usize,
    pub first_mover: Side,
    pub result: GameResult,
    pub plies: u32,
    pub moves: Vec<Move>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
pub(crate) struct MatchResults {
    pub games: Vec<GameRecord>,
    pub white_wins: usize,
    pub black_wins: usize,
    pub first_mover_wins: usize,
    pub draws: usize,
    pub avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Load the search config
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(&args)?;

    tracing::info!(
        "Starting match: {} games, config '{}' (depth={})",
        args.games,
        config.name,
        config.depth
    );

    let results = play_match(&config, &args, seed);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Config from file, or defaults at the requested depth
fn load_config(args: &MatchArgs) -> Result<SearchConfig> {
    match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load search config: {}", path.display())),
        None => {
            let config = SearchConfig::with_depth(args.depth);
            config.validate()?;
            Ok(config)
        }
    }
}

/// Play all games in the match
pub(crate) fn play_match(config: &SearchConfig, args: &MatchArgs, seed: Option<u64>) -> MatchResults {
    let base_seed = seed.unwrap_or_else(rand::random);
    let ai = MinimaxAI::from_config(config);

    let play = |game_index: usize| {
        let record = play_single_game(&ai, game_index, args, base_seed.wrapping_add(game_index as u64));
        tracing::info!(
            "Game {}: {:?} ({} plies, {} moved first)",
            record.game_number,
            record.result,
            record.plies,
            record.first_mover
        );
        record
    };

    let games: Vec<GameRecord> = if args.sequential {
        (0..args.games).map(play).collect()
    } else {
        (0..args.games).into_par_iter().map(play).collect()
    };

    compute_match_statistics(games)
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results)
    } else {
        print_text_results(results);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game: random openings, then the AI on both sides
fn play_single_game(ai: &MinimaxAI, game_index: usize, args: &MatchArgs, seed: u64) -> GameRecord {
    let first_mover = if game_index % 2 == 0 { Side::White } else { Side::Black };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new(first_mover);
    let mut moves = Vec::new();

    while state.ply() < args.openings.min(args.max_plies) && state.result() == GameResult::Ongoing {
        let legal = state.legal_moves();
        let Some(&mv) = legal.choose(&mut rng) else {
            break;
        };
        match state.play(mv) {
            Ok(next) => {
                moves.push(mv);
                state = next;
            }
            Err(err) => {
                tracing::warn!(%err, "random opening move rejected");
                break;
            }
        }
    }

    let (final_state, history) = ai.play_game(state, args.max_plies);
    moves.extend(history);

    GameRecord {
        game_number: game_index + 1,
        first_mover,
        result: final_state.result(),
        plies: final_state.ply(),
        moves,
    }
}

/// Compute aggregate statistics from game records
pub(crate) fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let white_wins = games.iter().filter(|g| g.result == GameResult::WhiteWins).count();
    let black_wins = games.iter().filter(|g| g.result == GameResult::BlackWins).count();
    let draws = games.iter().filter(|g| g.result == GameResult::Ongoing).count();
    let first_mover_wins = games
        .iter()
        .filter(|g| g.result.winner() == Some(g.first_mover))
        .count();

    let total_plies: u32 = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    MatchResults {
        games,
        white_wins,
        black_wins,
        first_mover_wins,
        draws,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame<'a> {
        game_number: usize,
        first_mover: Side,
        result: GameResult,
        plies: u32,
        moves: &'a [Move],
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        white_wins: usize,
        black_wins: usize,
        first_mover_wins: usize,
        draws: usize,
        avg_plies: f32,
        games: Vec<JsonGame<'a>>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        white_wins: results.white_wins,
        black_wins: results.black_wins,
        first_mover_wins: results.first_mover_wins,
        draws: results.draws,
        avg_plies: results.avg_plies,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                first_mover: g.first_mover,
                result: g.result,
                plies: g.plies,
                moves: &g.moves,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize match results")?;
    println!("{}", json);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games:       {}", total);
    println!("White wins:        {} ({:.1}%)", results.white_wins, percent(results.white_wins, total));
    println!("Black wins:        {} ({:.1}%)", results.black_wins, percent(results.black_wins, total));
    println!(
        "First-mover wins:  {} ({:.1}%)",
        results.first_mover_wins,
        percent(results.first_mover_wins, total)
    );
    println!("Draws:             {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg plies:         {:.1}", results.avg_plies);

    println!("\nGame details:");
    for game in &results.games {
        let opening: Vec<String> = game.moves.iter().take(4).map(Move::to_string).collect();
        println!(
            "  Game {}: {:?} in {} plies ({} first; {} ...)",
            game.game_number,
            game.result,
            game.plies,
            game.first_mover,
            opening.join(" ")
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
