//! Board topology: the fixed 37-point Sixteen Soldiers graph
//!
//! Nodes are numbered row by row, top to bottom:
//!
//! ```text
//!  0 ..... 1 ..... 2        top triangle (wide row)
//!      3   4   5            top triangle (narrow row)
//!  6   7   8   9  10
//! 11  12  13  14  15
//! 16  17  18  19  20        middle row
//! 21  22  23  24  25
//! 26  27  28  29  30
//!     31  32  33            bottom triangle (narrow row)
//! 34 .... 35 .... 36        bottom triangle (wide row)
//! ```
//!
//! The square carries orthogonal lines everywhere and diagonals from every
//! point whose grid `x + y` is even. The center point (18) is the exception:
//! it only links along its four diagonals.

use serde::{Deserialize, Serialize};

/// Index of a playable point, in `0..NODE_COUNT`
pub type Node = usize;

/// Number of playable points
pub const NODE_COUNT: usize = 37;

/// Center point, linked diagonally only
pub const CENTER: Node = 18;

/// Maximum bend (degrees) allowed between the two hops of a jump
pub const JUMP_TOLERANCE_DEGREES: f32 = 15.0;

// ============================================================================
// ADJACENCY
// ============================================================================

static NEIGHBORS: [&[Node]; NODE_COUNT] = [
    &[1, 3],                          // 0
    &[0, 2, 4],                       // 1
    &[1, 5],                          // 2
    &[0, 4, 8],                       // 3
    &[1, 3, 5, 8],                    // 4
    &[2, 4, 8],                       // 5
    &[7, 11, 12],                     // 6
    &[6, 8, 12],                      // 7
    &[3, 4, 5, 7, 9, 12, 13, 14],     // 8
    &[8, 10, 14],                     // 9
    &[9, 14, 15],                     // 10
    &[6, 12, 16],                     // 11
    &[6, 7, 8, 11, 13, 16, 17, 18],   // 12
    &[8, 12, 14],                     // 13
    &[8, 9, 10, 13, 15, 18, 19, 20],  // 14
    &[10, 14, 20],                    // 15
    &[11, 12, 17, 21, 22],            // 16
    &[12, 16, 22],                    // 17
    &[12, 14, 22, 24],                // 18
    &[14, 20, 24],                    // 19
    &[14, 15, 19, 24, 25],            // 20
    &[16, 22, 26],                    // 21
    &[16, 17, 18, 21, 23, 26, 27, 28], // 22
    &[22, 24, 28],                    // 23
    &[18, 19, 20, 23, 25, 28, 29, 30], // 24
    &[20, 24, 30],                    // 25
    &[21, 22, 27],                    // 26
    &[22, 26, 28],                    // 27
    &[22, 23, 24, 27, 29, 31, 32, 33], // 28
    &[24, 28, 30],                    // 29
    &[24, 25, 29],                    // 30
    &[28, 32, 34],                    // 31
    &[28, 31, 33, 35],                // 32
    &[28, 32, 36],                    // 33
    &[31, 35],                        // 34
    &[32, 34, 36],                    // 35
    &[33, 35],                        // 36
];

/// Points directly reachable from `node` by a single step
pub fn neighbors(node: Node) -> &'static [Node] {
    assert!(node < NODE_COUNT, "node {} is off the board", node);
    NEIGHBORS[node]
}

/// Whether a line joins `a` and `b`
pub fn is_adjacent(a: Node, b: Node) -> bool {
    neighbors(a).contains(&b)
}

// ============================================================================
// REFERENCE COORDINATES
// ============================================================================

/// Reference position of a point, used only for the straight-jump test
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The wide triangle rows flare outward, so lines such as 8-3-0 bend by about
/// six degrees and rely on `JUMP_TOLERANCE_DEGREES`.
const COORDINATES: [Point; NODE_COUNT] = [
    Point::new(-0.25, 0.0),
    Point::new(2.0, 0.0),
    Point::new(4.25, 0.0),
    Point::new(1.0, 1.0),
    Point::new(2.0, 1.0),
    Point::new(3.0, 1.0),
    Point::new(0.0, 2.0),
    Point::new(1.0, 2.0),
    Point::new(2.0, 2.0),
    Point::new(3.0, 2.0),
    Point::new(4.0, 2.0),
    Point::new(0.0, 3.0),
    Point::new(1.0, 3.0),
    Point::new(2.0, 3.0),
    Point::new(3.0, 3.0),
    Point::new(4.0, 3.0),
    Point::new(0.0, 4.0),
    Point::new(1.0, 4.0),
    Point::new(2.0, 4.0),
    Point::new(3.0, 4.0),
    Point::new(4.0, 4.0),
    Point::new(0.0, 5.0),
    Point::new(1.0, 5.0),
    Point::new(2.0, 5.0),
    Point::new(3.0, 5.0),
    Point::new(4.0, 5.0),
    Point::new(0.0, 6.0),
    Point::new(1.0, 6.0),
    Point::new(2.0, 6.0),
    Point::new(3.0, 6.0),
    Point::new(4.0, 6.0),
    Point::new(1.0, 7.0),
    Point::new(2.0, 7.0),
    Point::new(3.0, 7.0),
    Point::new(-0.25, 8.0),
    Point::new(2.0, 8.0),
    Point::new(4.25, 8.0),
];

/// Reference coordinate of `node`
pub fn coordinate(node: Node) -> Point {
    assert!(node < NODE_COUNT, "node {} is off the board", node);
    COORDINATES[node]
}

/// Check that origin -> mid -> landing keeps going the same way.
///
/// Rejects any path that doubles back (non-positive dot product), then accepts
/// when the angle between the two hops is within `JUMP_TOLERANCE_DEGREES`.
pub fn is_straight_jump(origin: Node, mid: Node, landing: Node) -> bool {
    let a = coordinate(origin);
    let m = coordinate(mid);
    let l = coordinate(landing);

    let (ux, uy) = (m.x - a.x, m.y - a.y);
    let (vx, vy) = (l.x - m.x, l.y - m.y);

    let dot = ux * vx + uy * vy;
    if dot <= 0.0 {
        return false;
    }

    let cos = dot / (ux.hypot(uy) * vx.hypot(vy));
    let angle = cos.clamp(-1.0, 1.0).acos().to_degrees();
    angle <= JUMP_TOLERANCE_DEGREES
}

/// Every (origin, mid, landing) triple that forms a legal jump line
pub fn jump_lines() -> impl Iterator<Item = (Node, Node, Node)> {
    (0..NODE_COUNT).flat_map(|origin| {
        neighbors(origin).iter().flat_map(move |&mid| {
            neighbors(mid)
                .iter()
                .filter(move |&&landing| landing != origin && is_straight_jump(origin, mid, landing))
                .map(move |&landing| (origin, mid, landing))
        })
    })
}

// ============================================================================
// NODE SET
// ============================================================================

/// Compact set of nodes (one bit per point)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeSet(u64);

impl NodeSet {
    pub const EMPTY: NodeSet = NodeSet(0);

    pub fn insert(&mut self, node: Node) {
        debug_assert!(node < NODE_COUNT);
        self.0 |= 1u64 << node;
    }

    /// Copy of this set with `node` added
    pub fn with(mut self, node: Node) -> Self {
        self.insert(node);
        self
    }

    pub fn contains(&self, node: Node) -> bool {
        node < NODE_COUNT && self.0 & (1u64 << node) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_subset(&self, other: &NodeSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Nodes in ascending order
    pub fn iter(&self) -> impl Iterator<Item = Node> {
        let bits = self.0;
        (0..NODE_COUNT).filter(move |&n| bits & (1u64 << n) != 0)
    }
}

impl FromIterator<Node> for NodeSet {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut set = NodeSet::EMPTY;
        for node in iter {
            set.insert(node);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_is_symmetric() {
        for a in 0..NODE_COUNT {
            for &b in neighbors(a) {
                assert!(is_adjacent(b, a), "{} -> {} has no way back", a, b);
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_neighbor_counts() {
        for node in 0..NODE_COUNT {
            let n = neighbors(node).len();
            assert!((2..=8).contains(&n), "node {} has {} neighbors", node, n);
        }
        let edges: usize = (0..NODE_COUNT).map(|n| neighbors(n).len()).sum::<usize>() / 2;
        assert_eq!(edges, 72);
    }

    #[test]
    fn test_center_links_diagonally_only() {
        assert_eq!(neighbors(CENTER), &[12, 14, 22, 24]);
        for orthogonal in [13, 17, 19, 23] {
            assert!(!is_adjacent(CENTER, orthogonal));
        }
    }

    #[test]
    fn test_straight_jump() {
        assert!(is_straight_jump(26, 21, 16)); // column
        assert!(is_straight_jump(6, 7, 8)); // row
        assert!(is_straight_jump(12, 18, 24)); // diagonal through the center
        assert!(is_straight_jump(13, 8, 4)); // into the triangle
    }

    #[test]
    fn test_bent_jump_rejected() {
        // 45 degree turn at the apex
        assert!(!is_straight_jump(12, 8, 4));
        // Doubling back
        assert!(!is_straight_jump(16, 21, 16));
        // Right angle
        assert!(!is_straight_jump(6, 7, 12));
    }

    #[test]
    fn test_flared_triangle_within_tolerance() {
        // Not collinear in the reference layout, but close enough
        assert!(is_straight_jump(8, 3, 0));
        assert!(is_straight_jump(0, 3, 8));
        assert!(is_straight_jump(28, 33, 36));
        // The narrow-row corner turns too sharply
        assert!(!is_straight_jump(0, 3, 4));
    }

    #[test]
    fn test_jump_line_count() {
        let lines: Vec<_> = jump_lines().collect();
        assert_eq!(lines.len(), 100);

        let bent = lines
            .iter()
            .filter(|&&(o, m, l)| {
                let (a, b, c) = (coordinate(o), coordinate(m), coordinate(l));
                let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
                cross.abs() > 1e-6
            })
            .count();
        assert_eq!(bent, 8);
    }

    #[test]
    fn test_node_set() {
        let set: NodeSet = [3, 0, 36].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains(36));
        assert!(!set.contains(1));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 3, 36]);
        assert!(NodeSet::EMPTY.with(3).is_subset(&set));
        assert!(!set.is_subset(&NodeSet::EMPTY.with(3)));
    }

    #[test]
    #[should_panic]
    fn test_off_board_node_panics() {
        neighbors(NODE_COUNT);
    }
}
