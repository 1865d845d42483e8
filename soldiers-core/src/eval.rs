//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::movegen::mobility;
use crate::position::{Board, Side};

/// Default weight per piece of material advantage
pub const MATERIAL_WEIGHT: f32 = 10.0;

/// Default weight per legal move of mobility advantage
pub const MOBILITY_WEIGHT: f32 = 0.5;

/// Score of a decided game, before the depth adjustment
pub const WIN_VALUE: f32 = 1000.0;

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Weight for piece count difference
    pub material_weight: f32,
    /// Weight for legal move count difference
    pub mobility_weight: f32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            material_weight: MATERIAL_WEIGHT,
            mobility_weight: MOBILITY_WEIGHT,
        }
    }
}

/// Evaluate `board` from `side`'s perspective
pub fn evaluate(board: &Board, side: Side, heuristics: &Heuristics) -> f32 {
    score(board, side, heuristics, |s| mobility(board, s))
}

/// `evaluate` when `counted` is already known to have `moves` legal moves
pub fn evaluate_with_mobility(board: &Board, side: Side, heuristics: &Heuristics, counted: Side, moves: usize) -> f32 {
    score(board, side, heuristics, |s| if s == counted { moves } else { mobility(board, s) })
}

fn score(board: &Board, side: Side, heuristics: &Heuristics, mobility_of: impl Fn(Side) -> usize) -> f32 {
    let opponent = side.opponent();

    let material = board.count(side) as f32 - board.count(opponent) as f32;
    let mut score = heuristics.material_weight * material;

    if heuristics.mobility_weight.abs() > f32::EPSILON {
        let moves = mobility_of(side) as f32 - mobility_of(opponent) as f32;
        score += heuristics.mobility_weight * moves;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Side::{Black, White};

    fn lopsided() -> Board {
        Board::with_pieces(&[(26, White), (30, White), (21, Black), (0, Black), (2, Black)])
    }

    #[test]
    fn test_evaluate_symmetric_start() {
        let board = Board::starting(White);
        let h = Heuristics::default();
        assert_eq!(evaluate(&board, White, &h), 0.0);
        assert_eq!(evaluate(&board, Black, &h), 0.0);
    }

    #[test]
    fn test_evaluate_antisymmetric() {
        let board = lopsided();
        let h = Heuristics::default();
        let white = evaluate(&board, White, &h);
        assert_eq!(evaluate(&board, Black, &h), -white);
        assert_eq!(evaluate(&board.mirrored(), White, &h), -white);
        assert_eq!(evaluate(&board.mirrored(), Black, &h), white);
    }

    #[test]
    fn test_evaluate_terms() {
        let board = lopsided();
        let h = Heuristics::default();
        // White: one forced capture. Black: 21 -> 16, 22; 0 -> 1, 3; 2 -> 1, 5
        let expected = 10.0 * (2.0 - 3.0) + 0.5 * (1.0 - 6.0);
        assert_eq!(evaluate(&board, White, &h), expected);

        let material_only = Heuristics {
            mobility_weight: 0.0,
            ..Heuristics::default()
        };
        assert_eq!(evaluate(&board, White, &material_only), -10.0);
    }

    #[test]
    fn test_known_mobility_matches_full_evaluation() {
        let h = Heuristics::default();
        for board in [lopsided(), Board::starting(Black)] {
            for side in [White, Black] {
                for counted in [White, Black] {
                    let moves = mobility(&board, counted);
                    assert_eq!(
                        evaluate_with_mobility(&board, side, &h, counted, moves),
                        evaluate(&board, side, &h)
                    );
                }
            }
        }
        // The supplied count is used as given
        assert_eq!(evaluate_with_mobility(&lopsided(), White, &h, White, 3), -10.0 + 0.5 * (3.0 - 6.0));
    }

    #[test]
    fn test_default_heuristics() {
        let h = Heuristics::default();
        assert_eq!(h.material_weight, 10.0);
        assert_eq!(h.mobility_weight, 0.5);
    }
}
