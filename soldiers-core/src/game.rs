//! Game state, turn bookkeeping and winner detection

use serde::{Deserialize, Serialize};

use crate::board::{Node, NodeSet};
use crate::movegen::{board_after, capture_jumps, legal_moves, Move};
use crate::position::{Board, Side};

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
}

impl GameResult {
    /// Winning side, if decided
    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::WhiteWins => Some(Side::White),
            GameResult::BlackWins => Some(Side::Black),
            GameResult::Ongoing => None,
        }
    }
}

impl From<Option<Side>> for GameResult {
    fn from(winner: Option<Side>) -> Self {
        match winner {
            Some(Side::White) => GameResult::WhiteWins,
            Some(Side::Black) => GameResult::BlackWins,
            None => GameResult::Ongoing,
        }
    }
}

/// Rejected requests. The state they were made against is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("no capture sequence is in progress")]
    NoContinuation,

    #[error("game is over")]
    GameOver,
}

/// A capture sequence the mover may extend or stop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Continuation {
    /// Piece that just landed
    pub piece: Node,
    /// Point it left on that hop; it may not jump straight back
    pub vacated: Node,
}

/// Winner by elimination: a side without pieces has lost regardless of whose
/// turn it is
pub fn winner_by_elimination(board: &Board) -> Option<Side> {
    [Side::White, Side::Black]
        .into_iter()
        .find(|&side| board.count(side) == 0)
        .map(Side::opponent)
}

/// Winner of `board` with `to_move` about to play. Besides elimination, a side
/// to move with no legal move is blocked and loses.
pub fn winner_on(board: &Board, to_move: Side) -> Option<Side> {
    winner_by_elimination(board).or_else(|| legal_moves(board, to_move).is_empty().then_some(to_move.opponent()))
}

/// Game state (transitions return a new value)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    side_to_move: Side,
    continuation: Option<Continuation>,
    /// Completed turns
    ply: u32,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Opening position with `first_mover` on the bottom zone and to move
    pub fn new(first_mover: Side) -> Self {
        Self::from_board(Board::starting(first_mover), first_mover)
    }

    /// Arbitrary position at the start of `side_to_move`'s turn
    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        Self {
            board,
            side_to_move,
            continuation: None,
            ply: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Pending capture sequence, if the mover may still extend it
    pub fn continuation(&self) -> Option<Continuation> {
        self.continuation
    }

    pub fn is_continuing(&self) -> bool {
        self.continuation.is_some()
    }

    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn winner(&self) -> Option<Side> {
        winner_on(&self.board, self.side_to_move)
    }

    pub fn result(&self) -> GameResult {
        self.winner().into()
    }

    // ========================================================================
    // MOVE QUERIES
    // ========================================================================

    /// Legal moves for the side to move. During a continuation only the
    /// continuing piece's next jumps are offered.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.continuation.is_some() {
            return self.continuation_options();
        }
        if winner_by_elimination(&self.board).is_some() {
            return vec![];
        }
        // Empty exactly when the side to move is blocked
        legal_moves(&self.board, self.side_to_move)
    }

    /// Legal moves starting at `origin`; empty when the side to move does not
    /// own it or must capture elsewhere
    pub fn legal_moves_from(&self, origin: Node) -> Vec<Move> {
        if self.board.get(origin) != Some(self.side_to_move) {
            return vec![];
        }
        self.legal_moves()
            .into_iter()
            .filter(|mv| mv.from() == origin)
            .collect()
    }

    /// Landing points reachable from `origin` (for highlighting)
    pub fn destinations(&self, origin: Node) -> NodeSet {
        self.legal_moves_from(origin).iter().map(Move::to).collect()
    }

    /// Next single jumps for the piece that just landed. A sequence is
    /// extended one hop at a time, so none of these land on the point the
    /// piece has just left.
    pub fn continuation_options(&self) -> Vec<Move> {
        let Some(c) = self.continuation else {
            return vec![];
        };
        capture_jumps(&self.board, c.piece, self.side_to_move, Some(c.vacated))
            .into_iter()
            .map(|jump| Move::Capture {
                from: c.piece,
                to: jump.landing,
                last_from: c.piece,
                captured: NodeSet::EMPTY.with(jump.captured),
            })
            .collect()
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Apply `mv` if legal.
    ///
    /// After a capture the mover keeps the turn while further jumps exist from
    /// the landing point; call `end_turn` to stop early.
    pub fn apply_move(&self, mv: Move) -> Result<Self, EngineError> {
        // A capture sequence always has at least one option, so no moves
        // means the game is decided
        let legal = self.legal_moves();
        if legal.is_empty() {
            return Err(EngineError::GameOver);
        }
        if !legal.contains(&mv) {
            return Err(EngineError::IllegalMove(mv));
        }

        let mut next = *self;
        next.board = board_after(&self.board, mv);
        next.continuation = None;

        if mv.is_capture()
            && !capture_jumps(&next.board, mv.to(), self.side_to_move, Some(mv.last_from())).is_empty()
        {
            next.continuation = Some(Continuation {
                piece: mv.to(),
                vacated: mv.last_from(),
            });
        } else {
            next.pass_turn();
        }

        Ok(next)
    }

    /// Stop an in-progress capture sequence and hand over the turn
    pub fn end_turn(&self) -> Result<Self, EngineError> {
        if self.continuation.is_none() {
            return Err(EngineError::NoContinuation);
        }
        let mut next = *self;
        next.continuation = None;
        next.pass_turn();
        Ok(next)
    }

    /// Apply `mv` as a whole turn, declining any further captures
    pub fn play(&self, mv: Move) -> Result<Self, EngineError> {
        let next = self.apply_move(mv)?;
        if next.is_continuing() {
            next.end_turn()
        } else {
            Ok(next)
        }
    }

    fn pass_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
        self.ply += 1;
    }
}
