//! Turn-driving loop between controllers and a frontend
//!
//! The frontend draws the board and reports what the human selected; the
//! controllers decide moves; the session applies them through the validated
//! turn API and keeps the history.

use crate::ai::Strategy;
use crate::board::{BoardState, Move};
use crate::game::{GameState, PlayerId};
use crate::geometry::Point;
use crate::layout::{Layout, PolygonLayout};
use crate::piece::{Piece, Region};

// ============================================================================
// FRONTEND CONTRACT
// ============================================================================

/// A human's request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Select(Point),
    Quit,
}

/// Renderer plus input source
pub trait Frontend<L: Layout> {
    /// Redraw the board with `highlighted` points marked
    fn render(&mut self, board: &BoardState<L>, highlighted: &[Point]);

    /// Block until the human selects a point or asks to quit
    fn next_input(&mut self) -> Input;

    fn announce_turn(&mut self, _player: PlayerId, _regions: &[Region]) {}

    /// The hops of a move that was just applied
    fn show_path(&mut self, _board: &BoardState<L>, _path: &[Point]) {}

    fn announce_win(&mut self, _player: PlayerId, _regions: &[Region]) {}
}

// ============================================================================
// CONTROLLERS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Move(Move),
    Stuck,
    Quit,
}

/// Decides the move of one seat
pub trait Controller<L: Layout> {
    fn name(&self) -> &str;

    fn decide(&mut self, game: &GameState<L>, frontend: &mut dyn Frontend<L>) -> Decision;
}

/// Two-click selection: an own piece, then one of its highlighted
/// destinations. Any other second click drops the selection.
#[derive(Clone, Debug, Default)]
pub struct HumanController {
    selected: Option<Piece>,
    highlighted: Vec<Point>,
}

impl HumanController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one selection; returns the move once it is complete
    fn select<L: Layout>(&mut self, game: &GameState<L>, point: Point) -> Option<Move> {
        match self.selected.take() {
            None => {
                if let Some(&piece) = game.board().piece_at(point) {
                    if game.is_current_players_piece(&piece) {
                        self.highlighted = game.board().valid_moves(&piece);
                        self.selected = Some(piece);
                    }
                }
                None
            }
            Some(piece) => {
                let hit = self.highlighted.contains(&point);
                self.highlighted.clear();
                hit.then(|| Move::new(piece, point))
            }
        }
    }
}

impl<L: Layout> Controller<L> for HumanController {
    fn name(&self) -> &str {
        "human"
    }

    fn decide(&mut self, game: &GameState<L>, frontend: &mut dyn Frontend<L>) -> Decision {
        loop {
            match frontend.next_input() {
                Input::Quit => {
                    self.selected = None;
                    self.highlighted.clear();
                    return Decision::Quit;
                }
                Input::Select(point) => {
                    if let Some(mv) = self.select(game, point) {
                        return Decision::Move(mv);
                    }
                    frontend.render(game.board(), &self.highlighted);
                }
            }
        }
    }
}

/// Seat played by a [`Strategy`]
pub struct ComputerController<S> {
    strategy: S,
}

impl<S> ComputerController<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }
}

impl<L: Layout, S: Strategy<L>> Controller<L> for ComputerController<S> {
    fn name(&self) -> &str {
        self.strategy.name()
    }

    fn decide(&mut self, game: &GameState<L>, frontend: &mut dyn Frontend<L>) -> Decision {
        match self.strategy.choose_move(game) {
            Some(mv) => {
                frontend.render(game.board(), &[mv.source()]);
                Decision::Move(mv)
            }
            None => Decision::Stuck,
        }
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// How a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won(PlayerId),
    Quit(PlayerId),
    /// Every player was stuck in a row
    Stalemate,
    TurnLimit,
}

/// One applied move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    pub player: PlayerId,
    pub mv: Move,
    pub path: Vec<Point>,
}

pub struct Session<L = PolygonLayout> {
    game: GameState<L>,
    /// One per player, in turn order
    controllers: Vec<Box<dyn Controller<L>>>,
    max_turns: Option<usize>,
    turns: usize,
    history: Vec<TurnRecord>,
}

impl<L: Layout> Session<L> {
    /// Panics unless there is exactly one controller per player
    pub fn new(game: GameState<L>, controllers: Vec<Box<dyn Controller<L>>>) -> Self {
        assert_eq!(
            controllers.len(),
            game.players().len(),
            "one controller per player required"
        );
        Self {
            game,
            controllers,
            max_turns: None,
            turns: 0,
            history: Vec::new(),
        }
    }

    /// Stop after this many turns, skipped turns included
    pub fn with_max_turns(mut self, max_turns: Option<usize>) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn game(&self) -> &GameState<L> {
        &self.game
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Turns taken so far, skipped turns included
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Play until someone wins, quits, or the game can no longer progress
    pub fn run(&mut self, frontend: &mut dyn Frontend<L>) -> Outcome {
        frontend.render(self.game.board(), &[]);
        let mut stuck_in_a_row = 0;

        loop {
            if self.max_turns.is_some_and(|max| self.turns >= max) {
                tracing::info!(turns = self.turns, "turn limit reached");
                return Outcome::TurnLimit;
            }

            let player = self.game.current_player();
            let seat = self.game.current_player_index();
            frontend.announce_turn(player, self.game.regions_of(player));
            tracing::debug!(
                %player,
                controller = self.controllers[seat].name(),
                turn = self.turns,
                "turn started"
            );
            self.turns += 1;

            let decision = if self.game.has_any_move(player) {
                self.controllers[seat].decide(&self.game, frontend)
            } else {
                Decision::Stuck
            };

            let mv = match decision {
                Decision::Quit => {
                    tracing::info!(%player, "player quit");
                    return Outcome::Quit(player);
                }
                Decision::Move(mv) => mv,
                Decision::Stuck => {
                    tracing::warn!(%player, "no legal move, skipping turn");
                    stuck_in_a_row += 1;
                    if stuck_in_a_row >= self.game.players().len() {
                        tracing::info!("every player is stuck");
                        return Outcome::Stalemate;
                    }
                    self.game.skip_turn();
                    continue;
                }
            };

            match self.game.play(&mv) {
                Ok(turn) => {
                    stuck_in_a_row = 0;
                    frontend.show_path(self.game.board(), &turn.path);
                    frontend.render(self.game.board(), &[]);
                    self.history.push(TurnRecord {
                        player,
                        mv: turn.mv,
                        path: turn.path,
                    });
                    if turn.won {
                        tracing::info!(%player, turns = self.turns, "player won");
                        frontend.announce_win(player, self.game.regions_of(player));
                        return Outcome::Won(player);
                    }
                }
                Err(err) => {
                    tracing::warn!(%player, %err, "move rejected, skipping turn");
                    self.game.skip_turn();
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
