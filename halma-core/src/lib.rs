//! HALMA Core - Board geometry, move generation and AI
//!
//! This crate provides the core game logic for HALMA:
//! - Polygonal boards with 4, 6 or 8 wedge regions on a triangular lattice
//! - Step and chained-jump move generation with path reconstruction
//! - Game state with turn order, region ownership and win detection
//! - Greedy and minimax (alpha-beta) computer players
//! - A session loop driving controllers against a pluggable frontend

pub mod geometry;
pub mod piece;
pub mod layout;
pub mod board;
pub mod game;
pub mod setup;
pub mod metrics;
pub mod eval;
pub mod ai;
pub mod session;
pub mod config;
pub mod error;

#[cfg(test)]
mod testing;

// Re-exports for convenient access
pub use geometry::{Line, Point};
pub use piece::{Piece, Region, CENTER};
pub use layout::{Layout, PolygonLayout, DIRECTIONS, SUPPORTED_REGION_COUNTS};
pub use board::{BoardState, Move, MoveKind};
pub use game::{GameState, PlayerId, Turn};
pub use setup::{assign_regions, new_game};
pub use eval::{evaluate, MoveScore};
pub use ai::{minimax_ab, GreedyAi, MinimaxAi, RandomAi, SearchState, Strategy};
pub use session::{
    ComputerController, Controller, Decision, Frontend, HumanController, Input, Outcome, Session,
    TurnRecord,
};
pub use config::{GameConfig, PlayerKind};
pub use error::{ConfigError, MoveError};
