//! Sixteen Soldiers Core - Game engine and AI
//!
//! This crate provides the rules engine for Sixteen Soldiers (Sholo Guti):
//! - Board topology (fixed 37-point graph with reference coordinates)
//! - Move generation with compulsory, chained captures
//! - Game state transitions and winner detection
//! - Position evaluation with a mobility term
//! - Minimax AI with alpha-beta pruning

pub mod board;
pub mod position;
pub mod movegen;
pub mod game;
pub mod eval;
pub mod ai;
pub mod config;

// Re-exports for convenient access
pub use board::{Node, NodeSet, Point, NODE_COUNT, CENTER, JUMP_TOLERANCE_DEGREES};
pub use position::{Board, Side, ParseBoardError, PIECES_PER_SIDE};
pub use movegen::{Move, Jump, legal_moves};
pub use game::{GameState, GameResult, EngineError, Continuation};
pub use eval::{Heuristics, evaluate, WIN_VALUE};
pub use ai::{Decision, MinimaxAI, SEARCH_DEPTH};
pub use config::SearchConfig;
