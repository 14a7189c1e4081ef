//! Console bowling: prompts for players and throws on stdin/stdout.

use std::io;

use anyhow::Result;
use crossterm::tty::IsTty;

use ancient_bowling::telemetry::init_tracing;
use ancient_bowling::term::ConsoleGame;

fn main() -> Result<()> {
    init_tracing("warn");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let styled = stdout.is_tty();

    let mut console = ConsoleGame::new(stdin.lock(), stdout.lock()).styled(styled);
    let game = console.run()?;
    tracing::info!(players = game.players().len(), "session finished");
    Ok(())
}
