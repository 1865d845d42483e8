//! Analyze command - inspect one position
//!
//! Prints the board, the legal moves for the side to move, the static
//! evaluation, any winner, and the AI's suggestion.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use soldiers_core::{Board, GameState, MinimaxAI, Move, SearchConfig, Side};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Position as 37 symbols (W, B, .) in node order; defaults to the opening
    #[arg(long)]
    pub board: Option<String>,

    /// Side to move
    #[arg(long, default_value = "white")]
    pub to_move: String,

    /// AI search depth (ignored when --config is given)
    #[arg(long, default_value = "3")]
    pub depth: u32,

    /// Search config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything reported about a position
#[derive(Debug, serde::Serialize)]
struct Analysis {
    board: String,
    to_move: Side,
    legal_moves: Vec<Move>,
    evaluation: f32,
    winner: Option<Side>,
    suggestion: Option<Move>,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let state = parse_position(&args)?;
    let config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load search config: {}", path.display()))?,
        None => {
            let config = SearchConfig::with_depth(args.depth);
            config.validate()?;
            config
        }
    };

    let analysis = analyze(&state, &MinimaxAI::from_config(&config));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&state, &analysis);
    }
    Ok(())
}

fn parse_position(args: &AnalyzeArgs) -> Result<GameState> {
    let side: Side = args
        .to_move
        .parse()
        .with_context(|| format!("Invalid side to move: {}", args.to_move))?;

    let board = match &args.board {
        Some(text) => text.parse::<Board>().context("Invalid board notation")?,
        None => Board::starting(side),
    };

    Ok(GameState::from_board(board, side))
}

fn analyze(state: &GameState, ai: &MinimaxAI) -> Analysis {
    let side = state.side_to_move();
    let winner = state.winner();
    Analysis {
        board: state.board().to_notation(),
        to_move: side,
        legal_moves: state.legal_moves(),
        evaluation: ai.evaluate(state.board(), side),
        winner,
        suggestion: if winner.is_none() { ai.suggest_move(state) } else { None },
    }
}

fn print_analysis(state: &GameState, analysis: &Analysis) {
    println!("{}", state.board());
    println!("To move:    {}", analysis.to_move);
    println!("Evaluation: {:+.1}", analysis.evaluation);

    if let Some(winner) = analysis.winner {
        println!("Winner:     {}", winner);
        return;
    }

    let moves: Vec<String> = analysis.legal_moves.iter().map(Move::to_string).collect();
    println!("Legal moves ({}): {}", moves.len(), moves.join(" "));
    if let Some(mv) = analysis.suggestion {
        println!("Suggested:  {}", mv);
    }
}
