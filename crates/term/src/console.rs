//! Line-oriented console game.
//!
//! Reads answers from any `BufRead` and writes prompts to any `Write`, so a
//! whole session can be scripted in tests. Styling uses crossterm colour
//! commands and is off unless requested.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::QueueableCommand;

use crate::core::{pins_from_raw, BowlingError, Game};
use crate::scorecard::render_scorecard;
use crate::types::{ErrorCategory, MAX_CONSOLE_PLAYERS, MIN_PLAYERS};

pub struct ConsoleGame<R, W> {
    input: R,
    output: W,
    styled: bool,
    line: String,
}

impl<R: BufRead, W: Write> ConsoleGame<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            styled: false,
            line: String::new(),
        }
    }

    /// Enable terminal colours.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Play one full game and return it in its final state.
    pub fn run(&mut self) -> Result<Game> {
        let mut game = Game::new();

        let count = self.read_player_count()?;
        for i in 1..=count {
            self.read_player(&mut game, i)?;
        }
        game.start()?;

        while !game.is_game_complete() {
            self.play_throw(&mut game)?;
        }

        self.print_results(&game)?;
        Ok(game)
    }

    fn read_player_count(&mut self) -> Result<usize> {
        loop {
            let prompt = format!("Number of players ({MIN_PLAYERS}-{MAX_CONSOLE_PLAYERS}): ");
            let answer = self.prompt(&prompt)?;
            match answer.parse::<usize>() {
                Ok(n) if (MIN_PLAYERS..=MAX_CONSOLE_PLAYERS).contains(&n) => return Ok(n),
                _ => self.warn(&format!(
                    "Please enter a number between {MIN_PLAYERS} and {MAX_CONSOLE_PLAYERS}"
                ))?,
            }
        }
    }

    fn read_player(&mut self, game: &mut Game, index: usize) -> Result<()> {
        loop {
            let name = self.prompt(&format!("Name of player {index}: "))?;
            match game.add_player(&name) {
                Ok(()) => return Ok(()),
                Err(e @ BowlingError::InvalidPlayer(_)) => self.warn(&e.to_string())?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn play_throw(&mut self, game: &mut Game) -> Result<()> {
        let Some(player) = game.current_player() else {
            bail!("no current player");
        };
        let header = format!(
            "{} - frame {} - score {}",
            player.name(),
            player.current_frame_number(),
            player.total_score()
        );
        let remaining = player.remaining_pins();
        self.emphasize(&header, Color::Cyan)?;

        loop {
            let answer = self.prompt(&format!("Pins knocked down (0 - {remaining}): "))?;
            let Ok(raw) = answer.parse::<i64>() else {
                self.warn("Please enter a whole number")?;
                continue;
            };

            match pins_from_raw(raw).and_then(|pins| game.add_throw(pins)) {
                Ok(outcome) => {
                    if outcome.strike {
                        self.emphasize("STRIKE!", Color::Green)?;
                    } else if outcome.spare {
                        self.emphasize("SPARE!", Color::Yellow)?;
                    } else {
                        self.say(&format!("Knocked down {} pins", outcome.pins))?;
                    }
                    return Ok(());
                }
                Err(e) if e.category() == ErrorCategory::BadInput => self.warn(&e.to_string())?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn print_results(&mut self, game: &Game) -> Result<()> {
        self.say("")?;
        self.emphasize("Final scores", Color::Cyan)?;
        for (rank, entry) in game.scoreboard().iter().enumerate() {
            self.say(&format!("{}. {} - {}", rank + 1, entry.name, entry.score))?;
        }
        self.say("")?;
        let card = render_scorecard(&game.snapshot());
        self.output.write_all(card.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;

        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            bail!("input closed before the game finished");
        }
        Ok(self.line.trim().to_string())
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn warn(&mut self, text: &str) -> Result<()> {
        self.paint(text, Color::Red, false)
    }

    fn emphasize(&mut self, text: &str, color: Color) -> Result<()> {
        self.paint(text, color, true)
    }

    fn paint(&mut self, text: &str, color: Color, bold: bool) -> Result<()> {
        if !self.styled {
            return self.say(text);
        }
        self.output.queue(SetForegroundColor(color))?;
        if bold {
            self.output.queue(SetAttribute(Attribute::Bold))?;
        }
        self.output
            .queue(Print(text))?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(ResetColor)?
            .queue(Print("\n"))?;
        self.output.flush()?;
        Ok(())
    }
}
