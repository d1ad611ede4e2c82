//! Computer players: greedy, minimax with alpha-beta, random

use crate::board::Move;
use crate::eval::{best_destination, evaluate, score_move, MoveScore};
use crate::game::{GameState, PlayerId};
use crate::layout::{Layout, PolygonLayout};
use crate::piece::Piece;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default search depth in plies
pub const DEFAULT_DEPTH: u32 = 3;

/// Default number of candidate moves expanded per node
pub const DEFAULT_TOP_K: usize = 5;

// ============================================================================
// STRATEGY
// ============================================================================

/// Picks a move for the current player of a game
pub trait Strategy<L: Layout> {
    fn name(&self) -> &'static str;

    /// `None` when the current player has no legal move
    fn choose_move(&mut self, game: &GameState<L>) -> Option<Move>;
}

// ============================================================================
// GREEDY AI
// ============================================================================

/// Takes the single move with the best [`MoveScore`], no lookahead
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAi;

impl GreedyAi {
    pub fn best_move<L: Layout>(game: &GameState<L>, player: PlayerId) -> Option<Move> {
        let mut best: Option<(Move, MoveScore)> = None;
        for piece in game.player_pieces(player) {
            if let Some((destination, score)) = best_destination(game.board(), &piece) {
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((Move::new(piece, destination), score));
                }
            }
        }
        best.map(|(mv, _)| mv)
    }
}

impl<L: Layout> Strategy<L> for GreedyAi {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_move(&mut self, game: &GameState<L>) -> Option<Move> {
        Self::best_move(game, game.current_player())
    }
}

// ============================================================================
// RANDOM AI
// ============================================================================

/// Uniform over every legal move of the current player
pub struct RandomAi {
    rng: ChaCha8Rng,
}

impl RandomAi {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<L: Layout> Strategy<L> for RandomAi {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_move(&mut self, game: &GameState<L>) -> Option<Move> {
        let moves: Vec<Move> = game
            .player_pieces(game.current_player())
            .into_iter()
            .flat_map(|piece| {
                game.board()
                    .valid_moves(&piece)
                    .into_iter()
                    .map(move |destination| Move::new(piece, destination))
            })
            .collect();
        moves.choose(&mut self.rng).copied()
    }
}

// ============================================================================
// SEARCH STATE
// ============================================================================

/// Disposable snapshot of a game, searched on behalf of `perspective`.
/// Every transition clones, so branches never share a board.
#[derive(Clone, Debug)]
pub struct SearchState<L = PolygonLayout> {
    game: GameState<L>,
    perspective: PlayerId,
}

impl<L: Layout> SearchState<L> {
    pub fn new(game: GameState<L>, perspective: PlayerId) -> Self {
        Self { game, perspective }
    }

    pub fn game(&self) -> &GameState<L> {
        &self.game
    }

    pub fn perspective(&self) -> PlayerId {
        self.perspective
    }

    pub fn current_player(&self) -> PlayerId {
        self.game.current_player()
    }

    /// Moves of one piece with their ordering score
    pub fn legal_moves_for_piece(&self, piece: &Piece) -> Vec<(Move, MoveScore)> {
        let layout = self.game.board().layout();
        self.game
            .board()
            .valid_moves(piece)
            .into_iter()
            .map(|destination| {
                (
                    Move::new(*piece, destination),
                    score_move(layout, piece, destination),
                )
            })
            .collect()
    }

    /// Moves of the current player, best-scoring first (stable on ties)
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut scored: Vec<(Move, MoveScore)> = self
            .game
            .player_pieces(self.current_player())
            .iter()
            .flat_map(|piece| self.legal_moves_for_piece(piece))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(mv, _)| mv).collect()
    }

    /// Child state with `mv` applied and the turn passed on
    pub fn apply_move(&self, mv: &Move) -> Self {
        let mut next = self.clone();
        next.game.board_mut().move_piece(mv.source(), mv.destination);
        next.game.next_turn();
        next
    }

    /// The player to move has already won or cannot move
    pub fn is_terminal(&self) -> bool {
        self.game.has_current_player_won() || !self.game.has_any_move(self.current_player())
    }

    pub fn evaluate(&self) -> i32 {
        evaluate(&self.game, self.perspective)
    }
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Alpha-beta search. The perspective player maximises, every other player
/// is pooled into one minimising opponent. Only the `top_k` best-ordered
/// moves are expanded at each node; ties go to the first move seen.
pub fn minimax_ab<L: Layout>(
    state: &SearchState<L>,
    depth: u32,
    top_k: usize,
    mut alpha: i32,
    mut beta: i32,
) -> (i32, Option<Move>) {
    if depth == 0 || state.is_terminal() {
        return (state.evaluate(), None);
    }

    let maximizing = state.current_player() == state.perspective();
    let moves = state.legal_moves();
    tracing::trace!(
        player = %state.current_player(),
        depth,
        moves = moves.len(),
        "expanding node"
    );

    let mut best_move = None;
    let mut value = if maximizing { i32::MIN } else { i32::MAX };

    for mv in moves.into_iter().take(top_k) {
        let (child, _) = minimax_ab(&state.apply_move(&mv), depth - 1, top_k, alpha, beta);
        if maximizing {
            if best_move.is_none() || child > value {
                value = child;
                best_move = Some(mv);
            }
            alpha = alpha.max(value);
        } else {
            if best_move.is_none() || child < value {
                value = child;
                best_move = Some(mv);
            }
            beta = beta.min(value);
        }
        if beta <= alpha {
            break;
        }
    }

    (value, best_move)
}

#[cfg(not(feature = "parallel"))]
fn search_root<L: Layout>(
    state: &SearchState<L>,
    depth: u32,
    top_k: usize,
) -> (i32, Option<Move>) {
    minimax_ab(state, depth, top_k, i32::MIN, i32::MAX)
}

/// Root candidates searched on the rayon pool, each with a full window
#[cfg(feature = "parallel")]
fn search_root<L: Layout>(
    state: &SearchState<L>,
    depth: u32,
    top_k: usize,
) -> (i32, Option<Move>) {
    use rayon::prelude::*;

    if depth == 0 || state.is_terminal() {
        return (state.evaluate(), None);
    }

    let moves: Vec<Move> = state.legal_moves().into_iter().take(top_k).collect();
    let values: Vec<i32> = moves
        .par_iter()
        .map(|mv| {
            let child = state.apply_move(mv);
            minimax_ab(&child, depth - 1, top_k, i32::MIN, i32::MAX).0
        })
        .collect();

    let mut best: Option<(i32, Move)> = None;
    for (value, mv) in values.into_iter().zip(moves) {
        if best.map_or(true, |(v, _)| value > v) {
            best = Some((value, mv));
        }
    }
    match best {
        Some((value, mv)) => (value, Some(mv)),
        None => (state.evaluate(), None),
    }
}

/// Depth-limited minimax player
#[derive(Clone, Copy, Debug)]
pub struct MinimaxAi {
    pub depth: u32,
    /// Search breadth per node; `usize::MAX` expands everything
    pub top_k: usize,
}

impl MinimaxAi {
    pub fn new(depth: u32, top_k: usize) -> Self {
        Self { depth, top_k }
    }
}

impl Default for MinimaxAi {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH, DEFAULT_TOP_K)
    }
}

impl<L: Layout> Strategy<L> for MinimaxAi {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn choose_move(&mut self, game: &GameState<L>) -> Option<Move> {
        let perspective = game.current_player();
        let state = SearchState::new(game.clone(), perspective);
        // A depth-0 or zero-breadth search never yields a move
        let (value, mv) = search_root(&state, self.depth.max(1), self.top_k.max(1));
        tracing::debug!(
            player = %perspective,
            depth = self.depth,
            top_k = self.top_k,
            value,
            chosen = ?mv.map(|m| m.to_string()),
            "minimax search finished"
        );
        mv
    }
}

// ============================================================================
// TESTS
// ============================================================================
