//! Move scoring and position evaluation

use crate::board::BoardState;
use crate::game::{GameState, PlayerId};
use crate::geometry::Point;
use crate::layout::Layout;
use crate::metrics::{distance, positive_distance};
use crate::piece::Piece;

/// Pieces further out than this fraction of their journey count as left behind
const LEFT_BEHIND_DIVISOR: i32 = 3;

/// Jump reach below which a left-behind piece is penalised
const MIN_JUMP_REACH: i32 = 3;

// ============================================================================
// MOVE SCORING
// ============================================================================

/// `(progress along the positive axis, raw distance travelled)`, compared
/// lexicographically
pub type MoveScore = (i32, i32);

pub fn score_move<L: Layout>(layout: &L, piece: &Piece, destination: Point) -> MoveScore {
    (
        positive_distance(layout, piece, destination),
        distance(piece.point, destination),
    )
}

/// Highest-scoring destination of one piece; the first one seen wins ties
pub fn best_destination<L: Layout>(
    board: &BoardState<L>,
    piece: &Piece,
) -> Option<(Point, MoveScore)> {
    let mut best: Option<(Point, MoveScore)> = None;
    for destination in board.valid_moves(piece) {
        let score = score_move(board.layout(), piece, destination);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((destination, score));
        }
    }
    best
}

// ============================================================================
// POSITION EVALUATION
// ============================================================================

/// Corner of the region the piece starts in
pub fn source_corner<L: Layout>(layout: &L, piece: &Piece) -> Option<Point> {
    layout.corner(piece.region)
}

/// Corner of the region the piece must reach
pub fn destination_corner<L: Layout>(layout: &L, piece: &Piece) -> Option<Point> {
    layout
        .opposite_region(piece.region)
        .and_then(|region| layout.corner(region))
}

/// Furthest forward progress among the piece's moves, 0 when it cannot move
pub fn max_jump_reach<L: Layout>(board: &BoardState<L>, piece: &Piece) -> i32 {
    board
        .valid_moves(piece)
        .into_iter()
        .map(|destination| positive_distance(board.layout(), piece, destination))
        .max()
        .unwrap_or(0)
}

/// Non-positive penalty for a straggler that has no long jump available
pub fn left_behind_penalty<L: Layout>(board: &BoardState<L>, piece: &Piece) -> i32 {
    (max_jump_reach(board, piece) - MIN_JUMP_REACH).min(0)
}

/// Static evaluation from `perspective`'s point of view (higher is better).
///
/// Own pieces count their remaining distance against the score, opponents'
/// remaining distance counts for it.
pub fn evaluate<L: Layout>(game: &GameState<L>, perspective: PlayerId) -> i32 {
    let board = game.board();
    let layout = board.layout();
    let mut score = 0;

    for piece in board.pieces() {
        let (Some(source), Some(destination)) = (
            source_corner(layout, &piece),
            destination_corner(layout, &piece),
        ) else {
            continue;
        };
        let distance_left = distance(piece.point, destination);

        if game.is_players_piece(&piece, perspective) {
            score -= distance_left;
            let total_distance = distance(source, destination);
            if LEFT_BEHIND_DIVISOR * distance_left > total_distance {
                score += left_behind_penalty(board, &piece);
            }
        } else {
            score += distance_left;
        }
    }

    score
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::new_game;
    use crate::testing::GridLayout;

    fn grid_game() -> GameState<GridLayout> {
        let board = BoardState::new(
            GridLayout::new(3, 3),
            [
                Piece::new(Point::new(0, 0), 1),
                Piece::new(Point::new(1, 1), 2),
            ],
        );
        GameState::new(board, vec![(PlayerId(0), vec![1]), (PlayerId(1), vec![2])]).unwrap()
    }

    #[test]
    fn test_score_move() {
        let game = grid_game();
        let piece = Piece::new(Point::new(0, 0), 1);
        assert_eq!(score_move(game.board().layout(), &piece, Point::new(1, 0)), (1, 0));
        assert_eq!(score_move(game.board().layout(), &piece, Point::new(0, 1)), (0, 1));
    }

    #[test]
    fn test_best_destination() {
        let game = grid_game();
        let piece = Piece::new(Point::new(0, 0), 1);
        assert_eq!(
            best_destination(game.board(), &piece),
            Some((Point::new(1, 0), (1, 0)))
        );

        let board = BoardState::new(
            GridLayout::new(2, 1),
            [
                Piece::new(Point::new(0, 0), 1),
                Piece::new(Point::new(1, 0), 2),
            ],
        );
        assert_eq!(best_destination(&board, &Piece::new(Point::new(0, 0), 1)), None);
    }

    #[test]
    fn test_corners() {
        let game = new_game(6, 2, 1).unwrap();
        let layout = game.board().layout();
        let piece = Piece::new(Point::new(1, 5), 1);
        assert_eq!(source_corner(layout, &piece), Some(Point::new(0, 8)));
        assert_eq!(destination_corner(layout, &piece), Some(Point::new(0, -8)));
    }

    #[test]
    fn test_left_behind_penalty() {
        let game = grid_game();
        // Best move advances one column: 1 - 3 = -2
        let piece = Piece::new(Point::new(0, 0), 1);
        assert_eq!(max_jump_reach(game.board(), &piece), 1);
        assert_eq!(left_behind_penalty(game.board(), &piece), -2);

        // Immobile piece gets the full penalty
        let board = BoardState::new(
            GridLayout::new(2, 1),
            [
                Piece::new(Point::new(0, 0), 1),
                Piece::new(Point::new(1, 0), 2),
            ],
        );
        assert_eq!(left_behind_penalty(&board, &Piece::new(Point::new(0, 0), 1)), -3);
    }

    #[test]
    fn test_evaluate_opening_is_symmetric() {
        for regions in [4, 6, 8] {
            let game = new_game(regions, 2, 1).unwrap();
            assert_eq!(evaluate(&game, PlayerId(0)), -20);
            assert_eq!(evaluate(&game, PlayerId(1)), -20);
        }
    }

    #[test]
    fn test_evaluate_rewards_progress() {
        let mut game = new_game(6, 2, 1).unwrap();
        game.board_mut()
            .move_piece(Point::new(-2, 6), Point::new(-4, 4));
        assert_eq!(evaluate(&game, PlayerId(0)), -14);
        assert_eq!(evaluate(&game, PlayerId(1)), -22);
    }

    #[test]
    fn test_evaluate_grid() {
        let game = grid_game();
        // Own piece: 1 left to (2, 0), penalty -2; opponent: 1 left to (0, 0)
        assert_eq!(evaluate(&game, PlayerId(0)), -1 - 2 + 1);
    }
}
