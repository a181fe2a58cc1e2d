//! Text rendering of the towers.

use crate::games::hanoi::{GameEngine, TowerId};
use crossterm::style::{Color, Stylize, style};
use std::io::Write;
use tracing::{instrument, warn};

/// Draws the board whenever a `Show` command is executed.
pub trait Renderer {
    /// Draws the current engine state.
    fn render(&mut self, engine: &GameEngine);
}

/// Renderer that draws nothing. Used for headless replay and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _engine: &GameEngine) {}
}

/// Renderer that writes the board as text, optionally with ANSI colours.
#[derive(Debug)]
pub struct AnsiRenderer<W> {
    out: W,
    color: bool,
}

impl AnsiRenderer<std::io::Stdout> {
    /// Renderer writing to stdout.
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }
}

impl<W: Write> AnsiRenderer<W> {
    /// Renderer writing to `out`.
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for AnsiRenderer<W> {
    #[instrument(skip_all)]
    fn render(&mut self, engine: &GameEngine) {
        let board = draw(engine, self.color);
        if let Err(e) = self
            .out
            .write_all(board.as_bytes())
            .and_then(|_| self.out.flush())
        {
            warn!(error = %e, "Failed to draw board");
        }
    }
}

pub(crate) fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        style(text).with(color).to_string()
    } else {
        text.to_string()
    }
}

fn centered(text: &str, glyphs: usize, width: usize) -> String {
    let pad = width.saturating_sub(glyphs);
    let left = pad / 2;
    let right = pad - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Draws the board: pillars with discs, bases, labels and the move counter.
///
/// Every tower column is `2 * discs + 1` characters wide (at least 3, so the
/// labels fit on an unstarted board); disc `n` is drawn `2n - 1` blocks wide,
/// centred on its pillar.
pub fn draw(engine: &GameEngine, color: bool) -> String {
    let discs = usize::from(engine.discs());
    let width = (2 * discs + 1).max(3);
    let stacks: Vec<Vec<u8>> = TowerId::all()
        .map(|id| engine.tower(id).top_down())
        .collect();

    let mut out = String::from("\n");

    // Pillar tips, one row above the tallest possible stack
    for _ in &stacks {
        out.push(' ');
        out.push_str(&paint(&centered("‖", 1, width), Color::Yellow, color));
    }
    out.push('\n');

    for row in 0..discs {
        for stack in &stacks {
            out.push(' ');
            let empty_rows = discs - stack.len();
            let cell = match row.checked_sub(empty_rows) {
                Some(depth) => {
                    let size = 2 * usize::from(stack[depth]) - 1;
                    paint(&centered(&"■".repeat(size), size, width), Color::Red, color)
                }
                None => paint(&centered("‖", 1, width), Color::Yellow, color),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }

    for _ in &stacks {
        out.push(' ');
        out.push_str(&paint(&"─".repeat(width), Color::Cyan, color));
    }
    out.push('\n');

    let mut labels = String::new();
    for id in TowerId::all() {
        labels.push(' ');
        labels.push_str(&centered(id.label(), 2, width));
    }
    labels.push_str(&format!("  Moves: {}", engine.moves()));
    out.push_str(&paint(&labels, Color::Blue, color));
    out.push('\n');

    out
}
