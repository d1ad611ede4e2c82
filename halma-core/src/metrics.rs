//! Distance measures used by the heuristics

use crate::geometry::Point;
use crate::layout::Layout;
use crate::piece::Piece;

/// Hex-grid distance on the even-sum lattice
pub fn distance(src: Point, dst: Point) -> i32 {
    let d = dst - src;
    let (dx, dy) = (d.x.abs(), d.y.abs());
    if dx > dy {
        dy + (dx - dy) / 2
    } else {
        dy
    }
}

/// Progress of a move along the piece's positive direction
pub fn positive_distance<L: Layout>(layout: &L, piece: &Piece, dst: Point) -> i32 {
    let d = dst - piece.point;
    let dir = layout.positive_direction(piece.region);
    d.x * dir.x + d.y * dir.y
}
