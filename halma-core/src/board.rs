//! Board state and move generation
//!
//! A piece either steps to an adjacent empty point or jumps over an adjacent
//! piece onto the empty point directly behind it. Jumps chain: one move may
//! land on any point reachable by repeated jumps. Jump landings only need the
//! relaxed entry rule, but the final resting point must satisfy the normal one.

use crate::geometry::Point;
use crate::layout::{Layout, PolygonLayout};
use crate::piece::Piece;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CORE TYPES
// ============================================================================

/// How a child point is reached from its parent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Step,
    Jump,
}

/// A candidate relocation of one piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub piece: Piece,
    pub destination: Point,
}

impl Move {
    pub fn new(piece: Piece, destination: Point) -> Self {
        Self { piece, destination }
    }

    /// Point the piece leaves
    pub fn source(&self) -> Point {
        self.piece.point
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.piece, self.destination)
    }
}

/// Result of one traversal of the jump graph
struct Reachability {
    /// Every point the piece can reach, origin excluded
    reached: FxHashSet<Point>,
    /// Point from which each reached point was first entered
    parent: FxHashMap<Point, Point>,
}

// ============================================================================
// BOARD STATE
// ============================================================================

/// Piece placement over an owned layout (clone to branch)
#[derive(Clone, Debug)]
pub struct BoardState<L = PolygonLayout> {
    layout: L,
    pieces: FxHashMap<Point, Piece>,
}

impl<L: Layout> BoardState<L> {
    /// Panics if any piece is off the board or outside its allowed regions
    pub fn new(layout: L, pieces: impl IntoIterator<Item = Piece>) -> Self {
        let mut board = Self {
            layout,
            pieces: FxHashMap::default(),
        };
        for piece in pieces {
            assert!(
                board.layout.is_valid_piece(&piece),
                "invalid initial placement: {}",
                piece
            );
            board.set_piece(piece);
        }
        board
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// All points of the underlying layout
    pub fn points(&self) -> Vec<Point> {
        self.layout.points()
    }

    /// Iterate pieces on board
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.pieces.values().copied()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn has_piece(&self, point: Point) -> bool {
        self.pieces.contains_key(&point)
    }

    /// Get piece at point
    pub fn piece_at(&self, point: Point) -> Option<&Piece> {
        self.pieces.get(&point)
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Place a piece at its own point, replacing any occupant
    pub fn set_piece(&mut self, piece: Piece) {
        assert!(
            self.layout.contains(piece.point),
            "invalid piece location: {}",
            piece.point
        );
        self.pieces.insert(piece.point, piece);
    }

    /// Remove and return the piece at `point`; panics if there is none
    pub fn remove_piece_at(&mut self, point: Point) -> Piece {
        self.pieces
            .remove(&point)
            .unwrap_or_else(|| panic!("no piece at {}", point))
    }

    /// Relocate the piece at `src` to `dst`. Legality is the caller's job.
    pub fn move_piece(&mut self, src: Point, dst: Point) {
        let piece = self.remove_piece_at(src);
        self.set_piece(piece.moved_to(dst));
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// The moving piece has already left its own point
    fn is_blocked(&self, piece: &Piece, point: Point) -> bool {
        point != piece.point && self.pieces.contains_key(&point)
    }

    /// Single steps and single jumps available to `piece` from `cur`
    pub fn children(&self, piece: &Piece, cur: Point) -> Vec<(Point, MoveKind)> {
        let mut children = Vec::new();
        for &delta in self.layout.directions() {
            let step = cur + delta;
            if !self.is_blocked(piece, step) {
                if self.layout.can_enter(piece, step, false) {
                    children.push((step, MoveKind::Step));
                }
            } else {
                let landing = step + delta;
                if !self.is_blocked(piece, landing) && self.layout.can_enter(piece, landing, true)
                {
                    children.push((landing, MoveKind::Jump));
                }
            }
        }
        children
    }

    /// Iterative DFS over the jump graph, then the plain steps from the origin
    fn explore(&self, piece: &Piece) -> Reachability {
        let origin = piece.point;
        let mut stack = vec![origin];
        let mut reached = FxHashSet::default();
        let mut parent = FxHashMap::default();
        reached.insert(origin);

        while let Some(cur) = stack.pop() {
            for (next, kind) in self.children(piece, cur) {
                if kind == MoveKind::Jump && reached.insert(next) {
                    parent.insert(next, cur);
                    stack.push(next);
                }
            }
        }

        for (next, kind) in self.children(piece, origin) {
            if kind == MoveKind::Step {
                reached.insert(next);
                parent.insert(next, origin);
            }
        }

        reached.remove(&origin);
        Reachability { reached, parent }
    }

    /// Every legal destination for `piece`, sorted
    pub fn valid_moves(&self, piece: &Piece) -> Vec<Point> {
        let mut moves: Vec<Point> = self
            .explore(piece)
            .reached
            .into_iter()
            .filter(|&point| self.layout.can_enter(piece, point, false))
            .collect();
        moves.sort_unstable();
        moves
    }

    /// Hop-by-hop path from the piece's point to `destination`.
    ///
    /// `[origin]` when the destination is the origin itself, empty when it
    /// cannot be reached.
    pub fn steps(&self, piece: &Piece, destination: Point) -> Vec<Point> {
        if destination == piece.point {
            return vec![destination];
        }
        let parent = self.explore(piece).parent;
        if !parent.contains_key(&destination) {
            return Vec::new();
        }

        let mut path = vec![destination];
        let mut cur = destination;
        while let Some(&prev) = parent.get(&cur) {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        path
    }

    /// Whether the piece stands in the region opposite its own
    pub fn piece_at_destination(&self, piece: &Piece) -> bool {
        match (
            self.layout.region(piece.point),
            self.layout.opposite_region(piece.region),
        ) {
            (Some(here), Some(goal)) => here == goal,
            _ => false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
