//! Game configuration

use crate::ai::{GreedyAi, MinimaxAi, RandomAi, DEFAULT_DEPTH, DEFAULT_TOP_K};
use crate::error::ConfigError;
use crate::game::GameState;
use crate::layout::{PolygonLayout, SUPPORTED_REGION_COUNTS};
use crate::session::{ComputerController, Controller, HumanController, Session};
use crate::setup::{assign_regions, new_game};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// PLAYER KINDS
// ============================================================================

/// Who sits in a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Greedy,
    Minimax { depth: u32, top_k: usize },
    Random,
}

impl PlayerKind {
    pub fn minimax() -> Self {
        PlayerKind::Minimax {
            depth: DEFAULT_DEPTH,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, PlayerKind::Human)
    }

    /// Controller for this seat; `seed` only matters for random players
    pub fn controller(&self, seed: u64) -> Box<dyn Controller<PolygonLayout>> {
        match *self {
            PlayerKind::Human => Box::new(HumanController::new()),
            PlayerKind::Greedy => Box::new(ComputerController::new(GreedyAi)),
            PlayerKind::Minimax { depth, top_k } => {
                Box::new(ComputerController::new(MinimaxAi::new(depth, top_k)))
            }
            PlayerKind::Random => Box::new(ComputerController::new(RandomAi::new(seed))),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::Greedy => write!(f, "greedy"),
            PlayerKind::Minimax { depth, top_k } => write!(f, "minimax:{}:{}", depth, top_k),
            PlayerKind::Random => write!(f, "random"),
        }
    }
}

/// Parses `human`, `greedy`, `random`, `minimax` or `minimax:DEPTH[:TOP_K]`
impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');
        let kind = parts.next().unwrap_or_default().to_ascii_lowercase();
        let mut number = |name: &str, default: usize| -> Result<usize, String> {
            match parts.next() {
                None => Ok(default),
                Some(raw) => raw
                    .parse()
                    .map_err(|_| format!("invalid {} '{}' in player '{}'", name, raw, s)),
            }
        };

        let parsed = match kind.as_str() {
            "human" => PlayerKind::Human,
            "greedy" => PlayerKind::Greedy,
            "random" => PlayerKind::Random,
            "minimax" => {
                let depth = number("depth", DEFAULT_DEPTH as usize)? as u32;
                let top_k = number("top_k", DEFAULT_TOP_K)?;
                PlayerKind::Minimax { depth, top_k }
            }
            other => return Err(format!("unknown player kind '{}'", other)),
        };
        if parts.next().is_some() {
            return Err(format!("too many fields in player '{}'", s));
        }
        Ok(parsed)
    }
}

// ============================================================================
// GAME CONFIG
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board size: 4, 6 or 8 regions
    pub regions: usize,
    pub regions_per_player: usize,
    /// Seats in turn order
    pub players: Vec<PlayerKind>,
    /// Stop after this many turns (None = play to the end)
    pub max_turns: Option<usize>,
    /// Base seed for random players
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            regions: 6,
            regions_per_player: 1,
            players: vec![PlayerKind::Human, PlayerKind::minimax()],
            max_turns: None,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_REGION_COUNTS.contains(&self.regions) {
            return Err(ConfigError::UnsupportedRegionCount(self.regions));
        }
        assign_regions(self.regions, self.players.len(), self.regions_per_player)?;
        Ok(())
    }

    pub fn has_human(&self) -> bool {
        self.players.iter().any(PlayerKind::is_human)
    }

    pub fn build_game(&self) -> Result<GameState<PolygonLayout>, ConfigError> {
        new_game(self.regions, self.players.len(), self.regions_per_player)
    }

    /// One controller per seat; random seats get distinct seeds
    pub fn build_controllers(&self) -> Vec<Box<dyn Controller<PolygonLayout>>> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, kind)| kind.controller(self.seed.wrapping_add(i as u64)))
            .collect()
    }

    pub fn build_session(&self) -> Result<Session<PolygonLayout>, ConfigError> {
        let game = self.build_game()?;
        Ok(Session::new(game, self.build_controllers()).with_max_turns(self.max_turns))
    }
}

// ============================================================================
// TESTS
// ============================================================================
