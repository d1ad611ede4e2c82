//! Error types

use crate::game::PlayerId;
use crate::geometry::{Line, Point};
use crate::piece::Region;

/// Setup and board-construction failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported region count {0} (expected 4, 6 or 8)")]
    UnsupportedRegionCount(usize),

    #[error("{requested} regions requested but the board only has {available}")]
    TooManyRegions { requested: usize, available: usize },

    #[error("at least one player is required")]
    NoPlayers,

    #[error("each player needs at least one region")]
    NoRegionsPerPlayer,

    #[error("region {0} is not a player region on this board")]
    InvalidRegion(Region),

    #[error("region {0} is assigned to more than one player")]
    DuplicateRegion(Region),

    #[error("{0} has no region assignment")]
    MissingRegions(PlayerId),

    #[error("lines {0} and {1} do not intersect")]
    ParallelLines(Line, Line),

    #[error("lines {l1} and {l2} meet at non-integral point ({x}, {y})")]
    NonIntegralIntersection { l1: Line, l2: Line, x: f64, y: f64 },

    #[error("no trapping lines close the wedge on edge {0} -> {1}")]
    NoTrappingLines(Point, Point),
}

/// Rejected move submitted through the validated turn API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no matching piece at {0}")]
    NoPiece(Point),

    #[error("piece at {point} does not belong to {player}")]
    NotOwned { point: Point, player: PlayerId },

    #[error("{to} is not reachable from {from}")]
    Unreachable { from: Point, to: Point },
}
