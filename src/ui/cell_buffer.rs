//! Character cell buffer for the station drawings.
//!
//! Scenes draw into the buffer back to front, then flush it row by row as
//! styled spans, merging runs of equal colour.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use teacraft::assets::TRANSPARENT;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

pub struct CellBuffer {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl CellBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            rows: vec![vec![Cell::default(); width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Set one cell. Out-of-range coordinates are ignored.
    pub fn put(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(cell) = self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    pub fn put_str(&mut self, x: i32, y: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as i32, y, ch, fg);
        }
    }

    /// Draw text-art lines with the top-left corner at (x, y), skipping
    /// transparent cells.
    pub fn blit_lines(&mut self, x: i32, y: i32, lines: &[String], fg: Color) {
        for (dy, line) in lines.iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                if ch != TRANSPARENT {
                    self.put(x + dx as i32, y + dy as i32, ch, fg);
                }
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for (row_idx, row_data) in self.rows.iter().enumerate().take(area.height as usize) {
            let mut spans: Vec<Span> = Vec::new();
            let mut current_fg = Color::Reset;
            let mut current_bg = Color::Reset;
            let mut current_text = String::new();

            for &cell in row_data.iter() {
                if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current_text),
                        Style::default().fg(current_fg).bg(current_bg),
                    ));
                }
                current_fg = cell.fg;
                current_bg = cell.bg;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(
                    current_text,
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }

            let width = (self.width as u16).min(area.width);
            let row_area = Rect::new(area.x, area.y + row_idx as u16, width, 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_ignores_out_of_range() {
        let mut buffer = CellBuffer::new(4, 2);
        buffer.put(-1, 0, 'x', Color::White);
        buffer.put(4, 0, 'x', Color::White);
        buffer.put(0, 2, 'x', Color::White);
        assert!(buffer.rows.iter().flatten().all(|c| c.ch == ' '));
    }

    #[test]
    fn test_blit_skips_transparent_cells() {
        let mut buffer = CellBuffer::new(4, 2);
        buffer.put(1, 0, 'o', Color::White);
        buffer.blit_lines(0, 0, &["# #".to_string()], Color::Green);
        let row: String = buffer.rows[0].iter().map(|c| c.ch).collect();
        assert_eq!(row, "#o# ");
    }
}
