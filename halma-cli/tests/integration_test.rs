//! Integration tests for HALMA
//!
//! Tests the full stack: board setup, move generation, turn order, win
//! detection, computer players and the session loop

use halma_core::{
    evaluate, new_game, BoardState, Frontend, GameState, GreedyAi, Input, Layout, MinimaxAi,
    Move, MoveError, Outcome, Piece, PlayerId, PolygonLayout, Point, RandomAi, Session,
    Strategy, CENTER, DIRECTIONS,
};
use halma_core::{ComputerController, Controller};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

// ============================================================================
// TEST FIXTURES
// ============================================================================

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

/// Frontend for computer-only sessions
struct Headless;

impl<L: Layout> Frontend<L> for Headless {
    fn render(&mut self, _board: &BoardState<L>, _highlighted: &[Point]) {}

    fn next_input(&mut self) -> Input {
        Input::Quit
    }
}

fn computer<S>(strategy: S) -> Box<dyn Controller<PolygonLayout>>
where
    S: Strategy<PolygonLayout> + 'static,
{
    Box::new(ComputerController::new(strategy))
}

/// Board invariants that must hold after every move
fn assert_consistent(game: &GameState, expected_pieces: usize) {
    let board = game.board();
    let layout = board.layout();
    assert_eq!(board.piece_count(), expected_pieces);

    let mut seen = HashSet::new();
    for piece in board.pieces() {
        assert!(layout.is_valid_piece(&piece), "invalid piece {}", piece);
        assert!(seen.insert(piece.point), "two pieces on {}", piece.point);
    }
}

/// Play `turns` uniformly random legal moves, checking invariants as we go
fn random_playout(mut game: GameState, seed: u64, turns: usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pieces = game.board().piece_count();

    for _ in 0..turns {
        let player = game.current_player();
        let moves: Vec<Move> = game
            .player_pieces(player)
            .into_iter()
            .flat_map(|piece| {
                game.board()
                    .valid_moves(&piece)
                    .into_iter()
                    .map(move |dst| Move::new(piece, dst))
            })
            .collect();

        let Some(mv) = moves.choose(&mut rng) else {
            game.skip_turn();
            continue;
        };
        let turn = game.play(mv).unwrap();

        assert_eq!(turn.player, player);
        assert_eq!(turn.path.first(), Some(&mv.source()));
        assert_eq!(turn.path.last(), Some(&mv.destination));
        assert!(turn.path.len() >= 2);
        assert!(game.board().has_piece(mv.destination));
        assert!(!game.board().has_piece(mv.source()));
        assert_consistent(&game, pieces);

        if turn.won {
            assert_eq!(game.current_player(), player);
            return;
        }
    }
}

// ============================================================================
// SETUP TESTS
// ============================================================================

#[test]
fn test_new_game_setups() {
    let setups = [(4, 2, 1), (4, 4, 1), (6, 2, 1), (6, 3, 1), (6, 2, 3), (8, 4, 2)];
    for (regions, players, per_player) in setups {
        let game = new_game(regions, players, per_player).unwrap();
        assert_eq!(game.players().len(), players);
        assert_eq!(game.current_player(), P0);

        let per_region = game.player_pieces(P0).len() / per_player;
        assert!(per_region > 0);
        assert_consistent(&game, per_region * players * per_player);

        for &player in game.players() {
            assert_eq!(game.regions_of(player).len(), per_player);
            assert!(game.has_any_move(player));
            assert!(!game.has_player_won(player));
        }
    }
}

#[test]
fn test_unsupported_setups() {
    assert!(new_game(5, 2, 1).is_err());
    assert!(new_game(6, 0, 1).is_err());
    assert!(new_game(4, 3, 2).is_err());
}

#[test]
fn test_opening_evaluation_is_symmetric() {
    for regions in [4, 6, 8] {
        let game = new_game(regions, 2, 1).unwrap();
        assert_eq!(evaluate(&game, P0), evaluate(&game, P1));
    }
}

// ============================================================================
// TURN VALIDATION TESTS
// ============================================================================

#[test]
fn test_play_rejects_bad_moves() {
    let mut game = new_game(6, 2, 1).unwrap();
    let own = game.player_pieces(P0)[0];
    let theirs = game
        .player_pieces(P1)
        .into_iter()
        .find(|piece| !game.board().valid_moves(piece).is_empty())
        .unwrap();

    let empty = Point::ORIGIN;
    assert_eq!(
        game.play(&Move::new(Piece::new(empty, 1), Point::new(1, 1))),
        Err(MoveError::NoPiece(empty))
    );

    let dst = game.board().valid_moves(&theirs)[0];
    assert_eq!(
        game.play(&Move::new(theirs, dst)),
        Err(MoveError::NotOwned {
            point: theirs.point,
            player: P0
        })
    );

    assert_eq!(
        game.play(&Move::new(own, Point::ORIGIN)),
        Err(MoveError::Unreachable {
            from: own.point,
            to: Point::ORIGIN
        })
    );

    // Nothing changed and it is still P0's turn
    assert_eq!(game.current_player(), P0);
    assert!(game.board().has_piece(own.point));
}

#[test]
fn test_play_passes_turn() {
    let mut game = new_game(6, 3, 1).unwrap();
    for expected in [0, 1, 2, 0] {
        let player = game.current_player();
        assert_eq!(player, PlayerId(expected));
        let mv = GreedyAi::best_move(&game, player).unwrap();
        let turn = game.play(&mv).unwrap();
        assert!(!turn.won);
    }
}

// ============================================================================
// SCENARIO TESTS
// ============================================================================

/// A centre point with a neighbour in region 4 of the hexagon
fn step_into_region_four(layout: &PolygonLayout) -> (Point, Point) {
    layout
        .points()
        .into_iter()
        .filter(|&p| layout.region(p) == Some(CENTER))
        .find_map(|p| {
            DIRECTIONS
                .iter()
                .map(|&d| p + d)
                .find(|&q| layout.region(q) == Some(4))
                .map(|q| (p, q))
        })
        .unwrap()
}

fn lone_piece_game(pieces: Vec<Piece>) -> GameState {
    let layout = PolygonLayout::new(6).unwrap();
    let board = BoardState::new(layout, pieces);
    GameState::new(board, vec![(P0, vec![1]), (P1, vec![4])]).unwrap()
}

#[test]
fn test_step_into_opposite_region_wins() {
    let layout = PolygonLayout::new(6).unwrap();
    let (from, to) = step_into_region_four(&layout);
    let piece = Piece::new(from, 1);
    let mut game = lone_piece_game(vec![piece]);

    assert!(game.board().valid_moves(&piece).contains(&to));
    let turn = game.play(&Move::new(piece, to)).unwrap();

    assert_eq!(turn.path, vec![from, to]);
    assert!(turn.won);
    assert!(game.has_player_won(P0));
    assert_eq!(game.current_player(), P0);
}

#[test]
fn test_jump_into_opposite_region() {
    let layout = PolygonLayout::new(6).unwrap();
    let (from, over, to) = layout
        .points()
        .into_iter()
        .filter(|&p| layout.region(p) == Some(CENTER))
        .find_map(|p| {
            DIRECTIONS.iter().find_map(|&d| {
                let (over, to) = (p + d, p + d + d);
                (layout.contains(over) && layout.region(to) == Some(4)).then_some((p, over, to))
            })
        })
        .unwrap();

    let piece = Piece::new(from, 1);
    let blocker = Piece::new(over, 4);
    let mut game = lone_piece_game(vec![piece, blocker]);

    assert_eq!(game.board().steps(&piece, to), vec![from, to]);
    let turn = game.play(&Move::new(piece, to)).unwrap();
    assert_eq!(turn.path, vec![from, to]);
    assert!(turn.won);
}

// ============================================================================
// RANDOM PLAYOUT TESTS
// ============================================================================

#[test]
fn test_random_playouts_keep_invariants() {
    for (seed, (regions, players, per_player)) in
        [(4, 2, 1), (6, 2, 1), (6, 3, 1), (6, 2, 2), (8, 4, 2)].into_iter().enumerate()
    {
        let game = new_game(regions, players, per_player).unwrap();
        random_playout(game, seed as u64, 150);
    }
}

// ============================================================================
// AI TESTS
// ============================================================================

#[test]
fn test_strategies_pick_legal_moves() {
    let game = new_game(6, 2, 1).unwrap();
    let mut strategies: Vec<Box<dyn Strategy<PolygonLayout>>> = vec![
        Box::new(GreedyAi),
        Box::new(MinimaxAi::new(2, 4)),
        Box::new(RandomAi::new(3)),
    ];

    for strategy in &mut strategies {
        let mv = strategy.choose_move(&game).unwrap();
        assert!(game.is_current_players_piece(&mv.piece), "{}", strategy.name());
        assert!(game.board().valid_moves(&mv.piece).contains(&mv.destination));
        assert!(game.clone().play(&mv).is_ok());
    }
}

#[test]
fn test_greedy_opening_move() {
    let game = new_game(6, 2, 1).unwrap();
    let mv = GreedyAi::best_move(&game, P0).unwrap();
    assert_eq!(mv.source(), Point::new(-2, 6));
    assert_eq!(mv.destination, Point::new(-4, 4));
}

// ============================================================================
// FULL SESSION TESTS
// ============================================================================

#[test]
fn test_full_game_greedy_vs_greedy() {
    let game = new_game(6, 2, 1).unwrap();
    let pieces = game.board().piece_count();
    let mut session = Session::new(game, vec![computer(GreedyAi), computer(GreedyAi)])
        .with_max_turns(Some(300));

    let outcome = session.run(&mut Headless);

    println!("Greedy vs greedy: {:?} after {} turns", outcome, session.turns());
    assert!(session.turns() > 0);
    assert!(session.turns() <= 300);
    assert!(matches!(
        outcome,
        Outcome::Won(_) | Outcome::Stalemate | Outcome::TurnLimit
    ));
    assert_consistent(session.game(), pieces);
    if let Outcome::Won(player) = outcome {
        assert!(session.game().has_player_won(player));
    }
}

#[test]
fn test_full_game_minimax_vs_random() {
    let game = new_game(4, 2, 1).unwrap();
    let pieces = game.board().piece_count();
    let mut session = Session::new(
        game,
        vec![computer(MinimaxAi::new(2, 3)), computer(RandomAi::new(11))],
    )
    .with_max_turns(Some(30));

    let outcome = session.run(&mut Headless);

    assert!(session.turns() <= 30);
    assert!(!session.history().is_empty());
    assert_ne!(outcome, Outcome::Quit(P0));
    assert_consistent(session.game(), pieces);

    // History alternates between the seats and paths connect source to
    // destination
    for (i, record) in session.history().iter().enumerate() {
        assert_eq!(record.player, PlayerId((i % 2) as u8));
        assert_eq!(record.path.first(), Some(&record.mv.source()));
        assert_eq!(record.path.last(), Some(&record.mv.destination));
    }
}

#[test]
fn test_four_player_session() {
    let game = new_game(8, 4, 2).unwrap();
    let controllers = (0..4).map(|_| computer(GreedyAi)).collect();
    let mut session = Session::new(game, controllers).with_max_turns(Some(40));

    let outcome = session.run(&mut Headless);
    assert_eq!(outcome, Outcome::TurnLimit);
    assert_eq!(session.turns(), 40);

    let movers: HashSet<PlayerId> = session.history().iter().map(|r| r.player).collect();
    assert_eq!(movers.len(), 4);
}
