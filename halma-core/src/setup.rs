//! Game setup: region assignment and the starting position

use crate::board::BoardState;
use crate::error::ConfigError;
use crate::game::{GameState, PlayerId};
use crate::layout::{Layout, PolygonLayout};
use crate::piece::{Piece, Region};

// ============================================================================
// REGION ASSIGNMENT
// ============================================================================

/// `k` indices spread as evenly as possible over `0..n`, centred
fn spaced_spots(n: usize, k: usize) -> Vec<usize> {
    if k == 1 {
        return vec![(n - 1) / 2];
    }
    let gap = (n - k) / (k - 1);
    let extras = n - (k + (k - 1) * gap);
    (extras / 2..n).step_by(gap + 1).take(k).collect()
}

/// Player 0's arc of `span` regions around region index 0, as 0-based
/// indices: a few from the end of the ring, then index 0 and its successors.
fn first_arc(span: usize, total: usize) -> Vec<usize> {
    let right = span / 2;
    let left = span - right - 1;
    (total - left..total).chain(0..=right).collect()
}

/// Regions for each of `players` players, `per_player` each.
///
/// Every player owns an arc of `total / players` consecutive regions and
/// receives `per_player` of them spread evenly inside it.
pub fn assign_regions(
    total: usize,
    players: usize,
    per_player: usize,
) -> Result<Vec<Vec<Region>>, ConfigError> {
    if players == 0 {
        return Err(ConfigError::NoPlayers);
    }
    if per_player == 0 {
        return Err(ConfigError::NoRegionsPerPlayer);
    }
    if players * per_player > total {
        return Err(ConfigError::TooManyRegions {
            requested: players * per_player,
            available: total,
        });
    }

    let span = total / players;
    let arc = first_arc(span, total);
    let offsets: Vec<usize> = spaced_spots(span, per_player)
        .into_iter()
        .map(|spot| arc[spot])
        .collect();

    Ok((0..players)
        .map(|i| {
            offsets
                .iter()
                .map(|&offset| ((offset + i * span) % total + 1) as Region)
                .collect()
        })
        .collect())
}

// ============================================================================
// STARTING POSITION
// ============================================================================

/// A piece on every point of every listed region
pub fn initial_pieces<L: Layout>(layout: &L, regions: &[Region]) -> Vec<Piece> {
    layout
        .points()
        .into_iter()
        .filter_map(|point| match layout.region(point) {
            Some(region) if regions.contains(&region) => Some(Piece::new(point, region)),
            _ => None,
        })
        .collect()
}

/// Fresh game on a `regions`-sided board with players `0..players`
pub fn new_game(
    regions: usize,
    players: usize,
    per_player: usize,
) -> Result<GameState<PolygonLayout>, ConfigError> {
    let layout = PolygonLayout::new(regions)?;
    let assignment = assign_regions(regions, players, per_player)?;

    let owned: Vec<Region> = assignment.iter().flatten().copied().collect();
    let pieces = initial_pieces(&layout, &owned);
    tracing::debug!(
        regions,
        players,
        pieces = pieces.len(),
        ?assignment,
        "setting up game"
    );

    let board = BoardState::new(layout, pieces);
    let assignments = assignment
        .into_iter()
        .enumerate()
        .map(|(i, owned)| (PlayerId(i as u8), owned))
        .collect();
    GameState::new(board, assignments)
}

// ============================================================================
// TESTS
// ============================================================================
