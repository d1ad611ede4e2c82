//! Game state: turn order, region ownership and win detection

use crate::board::{BoardState, Move};
use crate::error::{ConfigError, MoveError};
use crate::geometry::Point;
use crate::layout::{Layout, PolygonLayout};
use crate::piece::{Piece, Region, CENTER};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PLAYERS
// ============================================================================

/// Player identifier, numbered from 0 in turn order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Report of a move accepted by [`GameState::play`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub player: PlayerId,
    pub mv: Move,
    /// Hop-by-hop path, origin first
    pub path: Vec<Point>,
    /// The mover finished; the turn pointer stays on them
    pub won: bool,
}

// ============================================================================
// GAME STATE
// ============================================================================

#[derive(Clone, Debug)]
pub struct GameState<L = PolygonLayout> {
    players: Vec<PlayerId>,
    regions: FxHashMap<PlayerId, Vec<Region>>,
    current: usize,
    board: BoardState<L>,
}

impl<L: Layout> GameState<L> {
    /// Players move in the order given. Each region may belong to one player.
    pub fn new(
        board: BoardState<L>,
        assignments: Vec<(PlayerId, Vec<Region>)>,
    ) -> Result<Self, ConfigError> {
        if assignments.is_empty() {
            return Err(ConfigError::NoPlayers);
        }

        let mut seen = FxHashSet::default();
        let mut players = Vec::with_capacity(assignments.len());
        let mut regions = FxHashMap::default();
        for (player, owned) in assignments {
            if owned.is_empty() {
                return Err(ConfigError::MissingRegions(player));
            }
            for &region in &owned {
                if region == CENTER || !board.layout().is_valid_region(region) {
                    return Err(ConfigError::InvalidRegion(region));
                }
                if !seen.insert(region) {
                    return Err(ConfigError::DuplicateRegion(region));
                }
            }
            players.push(player);
            regions.insert(player, owned);
        }

        Ok(Self {
            players,
            regions,
            current: 0,
            board,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &BoardState<L> {
        &self.board
    }

    /// Direct board access for search branches; skips all validation
    pub fn board_mut(&mut self) -> &mut BoardState<L> {
        &mut self.board
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn current_player(&self) -> PlayerId {
        self.players[self.current]
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    /// Regions owned by `player`, empty for unknown players
    pub fn regions_of(&self, player: PlayerId) -> &[Region] {
        self.regions.get(&player).map_or(&[], Vec::as_slice)
    }

    /// Player owning the region the piece started in
    pub fn owner_of(&self, piece: &Piece) -> Option<PlayerId> {
        self.players
            .iter()
            .copied()
            .find(|&p| self.is_players_piece(piece, p))
    }

    pub fn is_players_piece(&self, piece: &Piece, player: PlayerId) -> bool {
        self.regions_of(player).contains(&piece.region)
    }

    pub fn is_current_players_piece(&self, piece: &Piece) -> bool {
        self.is_players_piece(piece, self.current_player())
    }

    /// Pieces of `player`, sorted by point
    pub fn player_pieces(&self, player: PlayerId) -> Vec<Piece> {
        let mut pieces: Vec<Piece> = self
            .board
            .pieces()
            .filter(|piece| self.is_players_piece(piece, player))
            .collect();
        pieces.sort_unstable_by_key(|piece| piece.point);
        pieces
    }

    /// Whether any piece of `player` can move at all
    pub fn has_any_move(&self, player: PlayerId) -> bool {
        self.player_pieces(player)
            .iter()
            .any(|piece| !self.board.valid_moves(piece).is_empty())
    }

    // ========================================================================
    // TURNS
    // ========================================================================

    pub fn next_turn(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    /// Pass the turn of a player with no legal move
    pub fn skip_turn(&mut self) {
        tracing::debug!(player = %self.current_player(), "skipping turn");
        self.next_turn();
    }

    // ========================================================================
    // WIN DETECTION
    // ========================================================================

    /// Every piece of `player` stands in its opposite region
    pub fn has_player_won(&self, player: PlayerId) -> bool {
        self.board
            .pieces()
            .filter(|piece| self.is_players_piece(piece, player))
            .all(|piece| self.board.piece_at_destination(&piece))
    }

    pub fn has_current_player_won(&self) -> bool {
        self.has_player_won(self.current_player())
    }

    // ========================================================================
    // VALIDATED MOVES
    // ========================================================================

    /// Apply a move for the current player.
    ///
    /// A winning move leaves the turn with the winner; otherwise the turn
    /// passes to the next player.
    pub fn play(&mut self, mv: &Move) -> Result<Turn, MoveError> {
        let source = mv.source();
        let piece = match self.board.piece_at(source) {
            Some(&piece) if piece == mv.piece => piece,
            _ => return Err(MoveError::NoPiece(source)),
        };

        let player = self.current_player();
        if !self.is_players_piece(&piece, player) {
            return Err(MoveError::NotOwned {
                point: source,
                player,
            });
        }

        let unreachable = MoveError::Unreachable {
            from: source,
            to: mv.destination,
        };
        if !self.board.valid_moves(&piece).contains(&mv.destination) {
            return Err(unreachable);
        }
        let path = self.board.steps(&piece, mv.destination);
        if path.len() < 2 {
            return Err(unreachable);
        }

        self.board.move_piece(source, mv.destination);
        let won = self.has_current_player_won();
        if !won {
            self.next_turn();
        }

        Ok(Turn {
            player,
            mv: *mv,
            path,
            won,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
