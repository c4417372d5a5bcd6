use std::io::{self, Write};

use crate::grid::Grid;
use crate::runner::Renderer;

const ALIVE_GLYPH: char = 'O';
const DEAD_GLYPH: char = '.';
/// ANSI: clear screen and move the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Prints each generation as text: a header line, then one line per grid row.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            clear_screen: false,
        }
    }

    /// Redraw in place instead of scrolling. Only useful on a terminal.
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, generation: u64, grid: &Grid) -> io::Result<()> {
        let mut frame = String::with_capacity((grid.cols() + 1) * (grid.rows() + 1) + 32);
        if self.clear_screen {
            frame.push_str(CLEAR_SCREEN);
        }
        frame.push_str(&format!(
            "Generation {generation} | population {}\n",
            grid.population()
        ));
        for row in grid.iter_rows() {
            frame.extend(
                row.iter()
                    .map(|cell| if cell.is_alive() { ALIVE_GLYPH } else { DEAD_GLYPH }),
            );
            frame.push('\n');
        }

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}
