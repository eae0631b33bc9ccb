//! Character-grid render sink
//!
//! Rasterizes each actor to one cell (text runs left to right from its
//! anchor). Draws that land outside the grid are dropped.

use scene_engine::foundation::math::{Mat3, Mat3Ext, Vec2};
use scene_engine::render::{Appearance, RenderSink};

pub struct ConsoleGrid {
    columns: usize,
    rows: usize,
    cell_size: f32,
    cells: Vec<char>,
    dropped: usize,
}

impl ConsoleGrid {
    pub fn new(columns: usize, rows: usize, cell_size: f32) -> Self {
        Self {
            columns,
            rows,
            cell_size,
            cells: vec![' '; columns * rows],
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
        self.dropped = 0;
    }

    /// Cells that fell outside the grid since the last clear
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    #[cfg(test)]
    fn cell(&self, column: usize, row: usize) -> Option<char> {
        (column < self.columns && row < self.rows).then(|| self.cells[row * self.columns + column])
    }

    /// Put `symbol` in the cell covering world `position`
    pub fn try_plot(&mut self, position: Vec2, symbol: char) -> bool {
        let column = (position.x / self.cell_size).floor();
        let row = (position.y / self.cell_size).floor();
        if column < 0.0 || row < 0.0 {
            self.dropped += 1;
            return false;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (column, row) = (column as usize, row as usize);
        if column >= self.columns || row >= self.rows {
            self.dropped += 1;
            return false;
        }
        self.cells[row * self.columns + column] = symbol;
        true
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.columns + 1) * self.rows);
        for row in self.cells.chunks(self.columns.max(1)) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl RenderSink for ConsoleGrid {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn draw(&mut self, world: &Mat3, appearance: &Appearance) {
        let anchor = world.translation_part();
        match appearance {
            Appearance::Glyph { symbol, .. } => {
                self.try_plot(anchor, *symbol);
            }
            Appearance::Circle { .. } => {
                self.try_plot(anchor, 'o');
            }
            Appearance::Rectangle { .. } => {
                self.try_plot(anchor, '#');
            }
            Appearance::Text { text, .. } => {
                let mut cursor = anchor;
                for symbol in text.chars() {
                    if symbol == '\n' {
                        cursor = Vec2::new(anchor.x, cursor.y + self.cell_size);
                        continue;
                    }
                    self.try_plot(cursor, symbol);
                    cursor.x += self.cell_size;
                }
            }
        }
    }
}
