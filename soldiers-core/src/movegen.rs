//! Move generation: steps, single jumps and multi-jump chains

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{is_straight_jump, neighbors, Node, NodeSet};
use crate::position::{Board, Side};

// ============================================================================
// MOVE TYPES
// ============================================================================

/// A legal move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Step to an empty neighbor
    Step { from: Node, to: Node },
    /// One or more chained jumps. `last_from` is the point the piece left on
    /// its final hop.
    Capture {
        from: Node,
        to: Node,
        last_from: Node,
        captured: NodeSet,
    },
}

impl Move {
    pub fn from(&self) -> Node {
        match *self {
            Move::Step { from, .. } | Move::Capture { from, .. } => from,
        }
    }

    pub fn to(&self) -> Node {
        match *self {
            Move::Step { to, .. } | Move::Capture { to, .. } => to,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Move::Capture { .. })
    }

    /// Opposing pieces removed by this move
    pub fn captured(&self) -> NodeSet {
        match *self {
            Move::Step { .. } => NodeSet::EMPTY,
            Move::Capture { captured, .. } => captured,
        }
    }

    /// Point vacated by the final hop (the origin for a step)
    pub fn last_from(&self) -> Node {
        match *self {
            Move::Step { from, .. } => from,
            Move::Capture { last_from, .. } => last_from,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Step { from, to } => write!(f, "{}-{}", from, to),
            Move::Capture { from, to, captured, .. } => {
                let taken: Vec<String> = captured.iter().map(|n| n.to_string()).collect();
                write!(f, "{}x{} [{}]", from, to, taken.join(","))
            }
        }
    }
}

/// A single jump: where the piece lands and which piece it removes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Jump {
    pub landing: Node,
    pub captured: Node,
}

// ============================================================================
// SIMPLE MOVES
// ============================================================================

/// Empty neighbors of `origin`, leaving out `exclude`
pub fn simple_moves(board: &Board, origin: Node, exclude: Option<Node>) -> NodeSet {
    neighbors(origin)
        .iter()
        .copied()
        .filter(|&n| board.is_empty_at(n) && Some(n) != exclude)
        .collect()
}

// ============================================================================
// CAPTURES
// ============================================================================

/// Single jumps available to the `side` piece on `origin`
pub fn capture_jumps(board: &Board, origin: Node, side: Side, exclude: Option<Node>) -> Vec<Jump> {
    let mut jumps = Vec::new();
    if board.get(origin) != Some(side) {
        return jumps;
    }

    let opponent = side.opponent();
    for &mid in neighbors(origin) {
        if board.get(mid) != Some(opponent) {
            continue;
        }
        for &landing in neighbors(mid) {
            if landing == origin || Some(landing) == exclude || !board.is_empty_at(landing) {
                continue;
            }
            if is_straight_jump(origin, mid, landing) {
                jumps.push(Jump { landing, captured: mid });
            }
        }
    }

    jumps
}

/// Every capture chain starting at `origin`, including each prefix.
///
/// `exclude` blocks the first hop from landing on that point (the square a
/// continuing piece has just left).
pub fn capture_chains(board: &Board, origin: Node, side: Side, exclude: Option<Node>) -> Vec<Move> {
    let mut chains = Vec::new();
    let mut seen = FxHashSet::default();
    extend_chains(board, origin, origin, side, NodeSet::EMPTY, exclude, &mut seen, &mut chains);
    chains
}

/// Depth-first chain search on private board copies.
///
/// A chain state is fully determined by (origin, landing, last hop, captured
/// set), so a repeated move means the subtree was already explored.
#[allow(clippy::too_many_arguments)]
fn extend_chains(
    board: &Board,
    from: Node,
    at: Node,
    side: Side,
    captured: NodeSet,
    exclude: Option<Node>,
    seen: &mut FxHashSet<Move>,
    chains: &mut Vec<Move>,
) {
    for jump in capture_jumps(board, at, side, exclude) {
        let captured = captured.with(jump.captured);
        let mv = Move::Capture {
            from,
            to: jump.landing,
            last_from: at,
            captured,
        };
        if !seen.insert(mv) {
            continue;
        }
        chains.push(mv);

        let mut next = *board;
        next.clear(at);
        next.clear(jump.captured);
        next.place(jump.landing, side);

        extend_chains(&next, from, jump.landing, side, captured, Some(at), seen, chains);
    }
}

/// Whether any `side` piece can capture
pub fn has_capture(board: &Board, side: Side) -> bool {
    board
        .nodes_of(side)
        .any(|origin| !capture_jumps(board, origin, side, None).is_empty())
}

// ============================================================================
// LEGAL MOVES
// ============================================================================

/// All legal moves for `side`. Captures are compulsory: when any exists, steps
/// are not offered.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut captures = Vec::new();
    let mut seen = FxHashSet::default();
    for origin in board.nodes_of(side) {
        extend_chains(board, origin, origin, side, NodeSet::EMPTY, None, &mut seen, &mut captures);
    }
    if !captures.is_empty() {
        return captures;
    }

    let mut steps = Vec::new();
    for origin in board.nodes_of(side) {
        for to in simple_moves(board, origin, None).iter() {
            steps.push(Move::Step { from: origin, to });
        }
    }
    steps
}

/// Number of legal moves for `side` (mobility heuristic)
pub fn mobility(board: &Board, side: Side) -> usize {
    legal_moves(board, side).len()
}

/// Board after `mv`, moved by whoever owns its origin. Does not check legality.
pub fn board_after(board: &Board, mv: Move) -> Board {
    let mut next = *board;
    if let Some(side) = board.get(mv.from()) {
        next.clear(mv.from());
        for node in mv.captured().iter() {
            next.clear(node);
        }
        next.place(mv.to(), side);
    }
    next
}
