//! Board occupancy and sides

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Node, NODE_COUNT};

/// Pieces each side starts with
pub const PIECES_PER_SIDE: usize = 16;

/// Home zone of the side that moves first
pub const BOTTOM_ZONE: RangeInclusive<Node> = 21..=36;

/// Home zone of the side that moves second
pub const TOP_ZONE: RangeInclusive<Node> = 0..=15;

/// Empty at the start of every game
pub const MIDDLE_ROW: RangeInclusive<Node> = 16..=20;

/// Grid rows of the diagram layout: (first node, node count)
const ROWS: [(Node, usize); 9] = [(0, 3), (3, 3), (6, 5), (11, 5), (16, 5), (21, 5), (26, 5), (31, 3), (34, 3)];

/// One of the two players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    fn symbol(self) -> char {
        match self {
            Side::White => 'W',
            Side::Black => 'B',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

impl FromStr for Side {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Side::White),
            "black" | "b" => Ok(Side::Black),
            _ => Err(ParseBoardError::UnknownSide(s.to_string())),
        }
    }
}

/// Errors from the text board notation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 37 points, found {0}")]
    WrongLength(usize),

    #[error("unexpected character '{0}' (use W, B or .)")]
    BadSymbol(char),

    #[error("unknown side: {0}")]
    UnknownSide(String),
}

/// Occupancy of every point (copy to mutate)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Side>; NODE_COUNT],
}

impl Board {
    /// Board with no pieces
    pub fn empty() -> Self {
        Self {
            cells: [None; NODE_COUNT],
        }
    }

    /// Opening layout: `first_mover` fills the bottom zone, the other side the
    /// top zone, the middle row stays empty
    pub fn starting(first_mover: Side) -> Self {
        let mut board = Self::empty();
        for node in BOTTOM_ZONE {
            board.place(node, first_mover);
        }
        for node in TOP_ZONE {
            board.place(node, first_mover.opponent());
        }
        board
    }

    /// Board from explicit placements
    pub fn with_pieces(pieces: &[(Node, Side)]) -> Self {
        let mut board = Self::empty();
        for &(node, side) in pieces {
            board.place(node, side);
        }
        board
    }

    pub fn get(&self, node: Node) -> Option<Side> {
        self.cells[node]
    }

    pub fn is_empty_at(&self, node: Node) -> bool {
        self.cells[node].is_none()
    }

    pub fn place(&mut self, node: Node, side: Side) {
        self.cells[node] = Some(side);
    }

    pub fn clear(&mut self, node: Node) {
        self.cells[node] = None;
    }

    /// Number of pieces owned by `side`
    pub fn count(&self, side: Side) -> usize {
        self.cells.iter().filter(|c| **c == Some(side)).count()
    }

    /// Points owned by `side`, ascending
    pub fn nodes_of(&self, side: Side) -> impl Iterator<Item = Node> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == Some(side))
            .map(|(node, _)| node)
    }

    /// Same layout with every piece changing owner
    pub fn mirrored(&self) -> Self {
        let mut cells = self.cells;
        for cell in cells.iter_mut() {
            *cell = cell.map(Side::opponent);
        }
        Self { cells }
    }

    /// Compact notation, one symbol per point in node order
    pub fn to_notation(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.map_or('.', Side::symbol))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parse 37 symbols (`W`, `B`, `.`) in node order; whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != NODE_COUNT {
            return Err(ParseBoardError::WrongLength(symbols.len()));
        }

        let mut board = Board::empty();
        for (node, symbol) in symbols.into_iter().enumerate() {
            match symbol {
                'W' | 'w' => board.place(node, Side::White),
                'B' | 'b' => board.place(node, Side::Black),
                '.' => {}
                other => return Err(ParseBoardError::BadSymbol(other)),
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(first, len) in &ROWS {
            let symbols: Vec<String> = (first..first + len)
                .map(|n| self.cells[n].map_or('.', Side::symbol).to_string())
                .collect();
            // Triangle rows are centered under the five-wide square
            let line = match len {
                3 if first == 0 || first == 34 => symbols.join("   "),
                3 => format!("  {}", symbols.join(" ")),
                _ => symbols.join(" "),
            };
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_notation())
    }
}
