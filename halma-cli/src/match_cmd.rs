//! Match command - computer-only games between configured seats
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: resolve_config(), play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: headless frontend, formatting utilities

use anyhow::{bail, Result};
use clap::Args;

use halma_core::{BoardState, Frontend, GameConfig, Input, Layout, Outcome, PlayerKind, Point};

use crate::args::{describe_players, GameArgs};

/// Turn cap applied when neither the config nor the flags set one
const DEFAULT_MAX_TURNS: usize = 1000;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Number of games to play (seats rotate between games)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    outcome: Outcome,
    /// Index into the configured player list
    winner: Option<usize>,
    turns: usize,
    moves: usize,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    players: Vec<PlayerKind>,
    games: Vec<GameRecord>,
    wins: Vec<usize>,
    stalemates: usize,
    turn_limits: usize,
    avg_turns: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Resolve the game config (computer seats only)
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    tracing::info!(
        "Starting match: [{}] ({} games, {} regions, turn cap {:?})",
        describe_players(&config.players),
        args.games,
        config.regions,
        config.max_turns
    );

    let results = play_match(&config, args.games)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Config with match defaults: two computer seats and a turn cap
fn resolve_config(args: &MatchArgs) -> Result<GameConfig> {
    let mut game_args = args.game.clone();
    if game_args.config.is_none() && game_args.players.is_none() {
        game_args.players = Some(vec![PlayerKind::minimax(), PlayerKind::Greedy]);
    }

    let mut config = game_args.resolve()?;
    if config.has_human() {
        bail!(
            "match games are computer-only, got [{}]; choose seats with --players",
            describe_players(&config.players)
        );
    }
    config.max_turns = config.max_turns.or(Some(DEFAULT_MAX_TURNS));
    Ok(config)
}

/// Play all games in the match
fn play_match(config: &GameConfig, games: usize) -> Result<MatchResults> {
    let mut records = Vec::with_capacity(games);

    for game_number in 0..games {
        let record = play_single_game(config, game_number)?;

        tracing::info!(
            "Game {}: {} ({} turns, {} moves)",
            record.game_number,
            describe_outcome(record.outcome, record.winner, &config.players),
            record.turns,
            record.moves
        );

        records.push(record);
    }

    Ok(compute_match_statistics(config.players.clone(), records))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game; seats rotate by one per game so every entrant starts in
/// turn
fn play_single_game(config: &GameConfig, game_number: usize) -> Result<GameRecord> {
    let n = config.players.len();
    let rotation = game_number % n;
    let seated = GameConfig {
        players: (0..n).map(|seat| config.players[(seat + rotation) % n]).collect(),
        seed: config.seed.wrapping_add((game_number * n) as u64),
        ..config.clone()
    };

    let mut session = seated.build_session()?;
    let outcome = session.run(&mut Headless);
    let winner = match outcome {
        Outcome::Won(player) => Some((usize::from(player.0) + rotation) % n),
        _ => None,
    };

    Ok(GameRecord {
        game_number: game_number + 1,
        outcome,
        winner,
        turns: session.turns(),
        moves: session.history().len(),
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(players: Vec<PlayerKind>, games: Vec<GameRecord>) -> MatchResults {
    let mut wins = vec![0; players.len()];
    for winner in games.iter().filter_map(|g| g.winner) {
        wins[winner] += 1;
    }
    let stalemates = games
        .iter()
        .filter(|g| g.outcome == Outcome::Stalemate)
        .count();
    let turn_limits = games
        .iter()
        .filter(|g| g.outcome == Outcome::TurnLimit)
        .count();

    let total_turns: usize = games.iter().map(|g| g.turns).sum();
    let avg_turns = if games.is_empty() {
        0.0
    } else {
        total_turns as f32 / games.len() as f32
    };

    MatchResults {
        players,
        games,
        wins,
        stalemates,
        turn_limits,
        avg_turns,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Frontend for games without humans
struct Headless;

impl<L: Layout> Frontend<L> for Headless {
    fn render(&mut self, _board: &BoardState<L>, _highlighted: &[Point]) {}

    fn next_input(&mut self) -> Input {
        Input::Quit
    }
}

fn describe_outcome(outcome: Outcome, winner: Option<usize>, players: &[PlayerKind]) -> String {
    match (outcome, winner) {
        (Outcome::Won(_), Some(entrant)) => {
            format!("won by entrant {} ({})", entrant, players[entrant])
        }
        (Outcome::Stalemate, _) => "stalemate".to_string(),
        (Outcome::TurnLimit, _) => "turn limit".to_string(),
        (outcome, _) => format!("{:?}", outcome),
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: String,
        winner: Option<usize>,
        turns: usize,
        moves: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonEntrant {
        entrant: usize,
        player: String,
        wins: usize,
        win_rate: f32,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        entrants: Vec<JsonEntrant>,
        stalemates: usize,
        turn_limits: usize,
        avg_turns: f32,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        entrants: results
            .players
            .iter()
            .zip(&results.wins)
            .enumerate()
            .map(|(entrant, (player, &wins))| JsonEntrant {
                entrant,
                player: player.to_string(),
                wins,
                win_rate: win_rate(wins, total),
            })
            .collect(),
        stalemates: results.stalemates,
        turn_limits: results.turn_limits,
        avg_turns: results.avg_turns,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: describe_outcome(g.outcome, g.winner, &results.players),
                winner: g.winner,
                turns: g.turns,
                moves: g.moves,
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(err) => tracing::error!(%err, "failed to serialize results"),
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    for (entrant, (player, &wins)) in results.players.iter().zip(&results.wins).enumerate() {
        println!(
            "Entrant {} ({}): {} wins ({:.1}%)",
            entrant,
            player,
            wins,
            win_rate(wins, total) * 100.0
        );
    }
    println!("Stalemates:  {}", results.stalemates);
    println!("Turn limits: {}", results.turn_limits);
    println!("Avg turns:   {:.1}", results.avg_turns);
}

fn win_rate(wins: usize, total: usize) -> f32 {
    if total > 0 {
        wins as f32 / total as f32
    } else {
        0.0
    }
}
