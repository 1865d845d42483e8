//! Minimax AI with alpha-beta pruning

use crate::config::SearchConfig;
use crate::eval::{evaluate, evaluate_with_mobility, Heuristics, WIN_VALUE};
use crate::game::{winner_by_elimination, EngineError, GameResult, GameState};
use crate::movegen::{board_after, legal_moves, Move};
use crate::position::{Board, Side};

/// Default search horizon in plies
pub const SEARCH_DEPTH: u32 = 3;

/// What the computer does on its turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Apply this move
    Play(Move),
    /// Stop the capture sequence in progress
    EndTurn,
}

impl Decision {
    /// Carry out the decision on `state`
    pub fn apply(self, state: &GameState) -> Result<GameState, EngineError> {
        match self {
            Decision::Play(mv) => state.apply_move(mv),
            Decision::EndTurn => state.end_turn(),
        }
    }
}

// ============================================================================
// MINIMAX AI
// ============================================================================

/// Computer opponent. Deterministic: the same position always yields the
/// same decision.
#[derive(Clone, Debug)]
pub struct MinimaxAI {
    pub depth: u32,
    pub heuristics: Heuristics,
}

impl Default for MinimaxAI {
    fn default() -> Self {
        Self::new(SEARCH_DEPTH, Heuristics::default())
    }
}

impl MinimaxAI {
    pub fn new(depth: u32, heuristics: Heuristics) -> Self {
        Self { depth, heuristics }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.depth, config.heuristics.clone())
    }

    /// Best action for the side to move in `state`, or `None` when the game
    /// is over.
    ///
    /// Every candidate is scored as the end of the turn, with the opponent to
    /// move. In a capture sequence stopping is scored first, then each next
    /// hop. The first candidate with the strictly highest score wins ties, so
    /// a chain the AI cut short at the start of its turn is stopped at the
    /// same point when played hop by hop.
    pub fn decide(&self, state: &GameState) -> Option<Decision> {
        let side = state.side_to_move();
        let board = state.board();

        let mut best = None;
        let mut best_score = f32::NEG_INFINITY;

        if state.is_continuing() {
            best_score = self.minimax(board, side.opponent(), side, 1, f32::NEG_INFINITY, f32::INFINITY);
            best = Some(Decision::EndTurn);
            tracing::trace!(score = best_score, "stopping scored");
        }

        for mv in state.legal_moves() {
            let child = board_after(board, mv);
            let score = self.minimax(&child, side.opponent(), side, 1, best_score, f32::INFINITY);

            tracing::trace!(%mv, score, "root move scored");

            if score > best_score {
                best_score = score;
                best = Some(Decision::Play(mv));
            }
        }

        if let Some(decision) = best {
            tracing::debug!(side = %side, ?decision, score = best_score, "decision made");
        }
        best
    }

    /// Move half of `decide`. `None` means there is nothing to play: the game
    /// is over, or the capture sequence in progress should be stopped with
    /// `GameState::end_turn`.
    pub fn suggest_move(&self, state: &GameState) -> Option<Move> {
        match self.decide(state)? {
            Decision::Play(mv) => Some(mv),
            Decision::EndTurn => None,
        }
    }

    /// Evaluate a position for `side`
    pub fn evaluate(&self, board: &Board, side: Side) -> f32 {
        evaluate(board, side, &self.heuristics)
    }

    /// Play both sides until the game ends or `max_plies` turns pass
    pub fn play_game(&self, initial: GameState, max_plies: u32) -> (GameState, Vec<Move>) {
        let mut state = initial;
        let mut history = Vec::new();

        while state.result() == GameResult::Ongoing && state.ply() < max_plies {
            let Some(decision) = self.decide(&state) else {
                break;
            };
            // A chosen move is the whole turn
            let next = match decision {
                Decision::Play(mv) => state.play(mv).map(|next| {
                    history.push(mv);
                    next
                }),
                Decision::EndTurn => state.end_turn(),
            };
            match next {
                Ok(next) => state = next,
                Err(err) => {
                    tracing::warn!(%err, "engine rejected its own move");
                    break;
                }
            }
        }

        (state, history)
    }

    /// Score `board` for `ai_side` with `to_move` about to play.
    ///
    /// Wins score `WIN_VALUE - depth` and losses `-WIN_VALUE + depth`, so
    /// quicker wins and slower losses are preferred.
    fn minimax(&self, board: &Board, to_move: Side, ai_side: Side, depth: u32, mut alpha: f32, mut beta: f32) -> f32 {
        let terminal = |winner: Side| {
            if winner == ai_side {
                WIN_VALUE - depth as f32
            } else {
                -WIN_VALUE + depth as f32
            }
        };

        if let Some(winner) = winner_by_elimination(board) {
            return terminal(winner);
        }

        // Generated once: the blocked check, the leaf mobility and the children
        let moves = legal_moves(board, to_move);
        if moves.is_empty() {
            return terminal(to_move.opponent());
        }

        if depth >= self.depth {
            return evaluate_with_mobility(board, ai_side, &self.heuristics, to_move, moves.len());
        }

        let maximizing = to_move == ai_side;
        let mut best = if maximizing { f32::NEG_INFINITY } else { f32::INFINITY };

        for mv in moves {
            let child = board_after(board, mv);
            let score = self.minimax(&child, to_move.opponent(), ai_side, depth + 1, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if alpha >= beta {
                break;
            }
        }

        best
    }
}

// ============================================================================
// TESTS
// ============================================================================
