//! Interactive menu loop.

use crate::games::hanoi::{DiscBounds, TOWER_COUNT};
use crate::history::{GameError, HistoryManager};
use crate::render::paint;
use crossterm::style::Color;
use std::io::{BufRead, Write};
use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};

const BANNER: &str = r"
 _____                                       __   _   _                   _
|_   _|____      _____ _ __ ___    ___  / _| | | | | __ _ _ __   ___ (_)
  | |/ _ \ \ /\ / / _ \ '__/ __|  / _ \| |_  | |_| |/ _` | '_ \ / _ \| |
  | | (_) \ V  V /  __/ |  \__ \ | (_) |  _| |  _  | (_| | | | | (_) | |
  |_|\___/ \_/\_/ \___|_|  |___/  \___/|_|   |_| |_|\__,_|_| |_|\___/|_|
";

const COMPLETE: &str = "\n*** Puzzle solved! ***\n";

/// Menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum MenuOption {
    /// Move a disc.
    Move,
    /// Take back the last move.
    Undo,
    /// Replay the last undone move.
    Redo,
    /// Start over.
    NewGame,
    /// Leave the game.
    Exit,
}

impl MenuOption {
    /// Number the player types to pick this option.
    pub fn value(self) -> i64 {
        match self {
            MenuOption::Move => 1,
            MenuOption::Undo => 2,
            MenuOption::Redo => 3,
            MenuOption::NewGame => 4,
            MenuOption::Exit => 0,
        }
    }

    /// Label shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Move => "Perform Move",
            MenuOption::Undo => "Undo Move",
            MenuOption::Redo => "Redo Move",
            MenuOption::NewGame => "New Game",
            MenuOption::Exit => "Exit",
        }
    }

    /// Option picked by `value`.
    pub fn from_value(value: i64) -> Option<Self> {
        Self::iter().find(|option| option.value() == value)
    }
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The puzzle was solved.
    Completed,
    /// The player chose Exit or input ran out.
    Exited,
}

/// Menu-driven session over any line reader and writer.
///
/// Owns the [`HistoryManager`]; every menu choice maps to one invoker call.
pub struct GameRunner<R, W> {
    input: R,
    out: W,
    manager: HistoryManager,
    color: bool,
}

impl<R: BufRead, W: Write> GameRunner<R, W> {
    /// Creates a runner.
    pub fn new(input: R, out: W, manager: HistoryManager, color: bool) -> Self {
        Self {
            input,
            out,
            manager,
            color,
        }
    }

    /// The invoker driven by this runner.
    pub fn manager(&self) -> &HistoryManager {
        &self.manager
    }

    /// Returns the invoker and writer.
    pub fn into_parts(self) -> (HistoryManager, W) {
        (self.manager, self.out)
    }

    /// Runs until the puzzle is solved, the player exits or input ends.
    ///
    /// The session log is closed on every exit path.
    ///
    /// # Errors
    ///
    /// Fatal `GameError::Log` failures and I/O errors on `out`.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> anyhow::Result<RunOutcome> {
        let outcome = self.play();
        let closed = self.manager.close_log();
        let outcome = outcome?;
        closed?;
        info!(?outcome, "Session ended");
        Ok(outcome)
    }

    fn play(&mut self) -> anyhow::Result<RunOutcome> {
        let banner = self.paint(BANNER, Color::Magenta);
        writeln!(self.out, "{}", banner)?;

        let engine = self.manager.engine();
        if !engine.is_started() || engine.is_completed() {
            let Some(discs) = self.query_discs()? else {
                return Ok(RunOutcome::Exited);
            };
            self.manager.new_game(discs)?;
        }

        loop {
            self.manager.show()?;
            self.print_menu()?;

            let Some(choice) = self.read_number(0, 4)? else {
                return Ok(RunOutcome::Exited);
            };
            let Some(option) = MenuOption::from_value(choice) else {
                continue;
            };

            let result = match option {
                MenuOption::Move => {
                    let Some((from, to)) = self.query_move()? else {
                        return Ok(RunOutcome::Exited);
                    };
                    self.manager.make_move(from, to)
                }
                MenuOption::Undo => self.manager.undo().map(|_| ()),
                MenuOption::Redo => self.manager.redo().map(|_| ()),
                MenuOption::NewGame => {
                    let Some(discs) = self.query_discs()? else {
                        return Ok(RunOutcome::Exited);
                    };
                    self.manager.new_game(discs)
                }
                MenuOption::Exit => return Ok(RunOutcome::Exited),
            };
            self.report(result)?;

            if self.manager.engine().is_completed() {
                break;
            }
        }

        self.manager.show()?;
        let complete = self.paint(COMPLETE, Color::Yellow);
        writeln!(self.out, "{}", complete)?;
        Ok(RunOutcome::Completed)
    }

    fn report(&mut self, result: Result<(), GameError>) -> anyhow::Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => Err(e.into()),
            Err(e) => {
                let message = self.paint(&e.to_string(), Color::Red);
                writeln!(self.out, "{}", message)?;
                Ok(())
            }
        }
    }

    fn print_menu(&mut self) -> std::io::Result<()> {
        let items = MenuOption::iter()
            .map(|option| format!("{}. {}", option.value(), option.label()))
            .collect::<Vec<_>>()
            .join(" | ");
        let border = "─".repeat(items.chars().count() + 8);
        let menu = self.paint(&format!("    {}", items), Color::DarkMagenta);
        writeln!(
            self.out,
            "{}\n{}\n{}\nUndo: {}  Redo: {}",
            border,
            menu,
            border,
            self.manager.undo_count(),
            self.manager.redo_count()
        )
    }

    fn query_discs(&mut self) -> anyhow::Result<Option<u8>> {
        let bounds: DiscBounds = self.manager.engine().bounds();
        let prompt = format!("State amount of discs [{}..{}]", bounds.min(), bounds.max());
        let prompt = self.paint(&prompt, Color::Green);
        writeln!(self.out, "{}", prompt)?;
        let discs = self.read_number(i64::from(bounds.min()), i64::from(bounds.max()))?;
        Ok(discs.and_then(|n| u8::try_from(n).ok()))
    }

    fn query_move(&mut self) -> anyhow::Result<Option<(usize, usize)>> {
        let mut towers = [0usize; 2];
        for (slot, label) in towers.iter_mut().zip(["Origin", "Destination"]) {
            let prompt = format!("State {} Tower [1..{}]", label, TOWER_COUNT);
            let prompt = self.paint(&prompt, Color::Green);
            writeln!(self.out, "\n{}", prompt)?;
            let Some(number) = self.read_number(1, TOWER_COUNT as i64)? else {
                return Ok(None);
            };
            *slot = number as usize;
        }
        Ok(Some((towers[0], towers[1])))
    }

    /// Reads integers until one lies in `min..=max`. `None` at end of input.
    fn read_number(&mut self, min: i64, max: i64) -> anyhow::Result<Option<i64>> {
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.trim().parse::<i64>() {
                Ok(n) if (min..=max).contains(&n) => return Ok(Some(n)),
                _ => {
                    warn!(input = line.trim(), min, max, "Rejected input");
                    let message = format!(
                        "Sorry, only integer values between {} and {} are allowed!",
                        min, max
                    );
                    let message = self.paint(&message, Color::Red);
                    writeln!(self.out, "{}", message)?;
                }
            }
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        paint(text, color, self.color)
    }
}
