//! Game flags shared by every command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use halma_core::{GameConfig, PlayerKind};

#[derive(Args, Clone, Debug, Default)]
pub struct GameArgs {
    /// JSON game config; the flags below override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Board size: 4, 6 or 8 regions
    #[arg(long)]
    pub regions: Option<usize>,

    /// Comma-separated seats in turn order: human, greedy, random,
    /// minimax[:DEPTH[:TOP_K]]
    #[arg(long, value_delimiter = ',')]
    pub players: Option<Vec<PlayerKind>>,

    /// Regions owned by each player
    #[arg(long)]
    pub regions_per_player: Option<usize>,

    /// Search depth for every minimax seat
    #[arg(long)]
    pub depth: Option<u32>,

    /// Candidate moves expanded per node for every minimax seat
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Stop the game after this many turns
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Seed for random players
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GameArgs {
    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(regions) = self.regions {
            config.regions = regions;
        }
        if let Some(players) = &self.players {
            config.players = players.clone();
        }
        if let Some(per_player) = self.regions_per_player {
            config.regions_per_player = per_player;
        }
        if self.max_turns.is_some() {
            config.max_turns = self.max_turns;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        for kind in &mut config.players {
            if let PlayerKind::Minimax { depth, top_k } = kind {
                *depth = self.depth.unwrap_or(*depth);
                *top_k = self.top_k.unwrap_or(*top_k);
            }
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

/// `minimax:3:5, greedy`
pub fn describe_players(players: &[PlayerKind]) -> String {
    players
        .iter()
        .map(PlayerKind::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
