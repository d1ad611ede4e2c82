//! Play command - one interactive game in the terminal

use anyhow::Result;
use clap::Args;

use halma_core::Outcome;

use crate::args::{describe_players, GameArgs};
use crate::text::TextFrontend;

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub game: GameArgs,
}

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let config = args.game.resolve()?;
    tracing::info!(
        "Starting game: {} regions, players [{}]",
        config.regions,
        describe_players(&config.players)
    );

    let mut session = config.build_session()?;
    let mut frontend = TextFrontend::stdio();
    let outcome = session.run(&mut frontend);

    let players = &config.players;
    match outcome {
        Outcome::Won(player) => println!(
            "\n{} ({}) won after {} turns",
            player,
            players[usize::from(player.0)],
            session.turns()
        ),
        Outcome::Quit(player) => println!("\n{} quit the game", player),
        Outcome::Stalemate => println!("\nNo player can move; game drawn"),
        Outcome::TurnLimit => println!("\nTurn limit reached after {} turns", session.turns()),
    }
    Ok(())
}
