//! Pieces

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Region index: `0` is the shared centre, `1..=n` are player regions
pub type Region = u8;

/// Region of the shared central area
pub const CENTER: Region = 0;

/// A piece on the board, tagged with the region it started in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub point: Point,
    pub region: Region,
}

impl Piece {
    /// Panics on the centre region, which never owns pieces
    pub fn new(point: Point, region: Region) -> Self {
        assert!(
            region != CENTER,
            "piece regions start at 1; region 0 is the shared centre"
        );
        Self { point, region }
    }

    /// Same piece relocated to `point`
    pub fn moved_to(self, point: Point) -> Self {
        Self { point, ..self }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece[{}]@{}", self.region, self.point)
    }
}
