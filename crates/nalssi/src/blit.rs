//! Half-block blitting of the scene onto the terminal.
//!
//! Each terminal cell shows two scene pixels stacked vertically: the upper
//! half-block glyph takes the top pixel as its foreground and the bottom
//! pixel as its background, doubling the vertical resolution.

use nalssi_scene::{Rgba, SceneFrame};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use ratatui::widgets::Widget;

const UPPER_HALF_BLOCK: char = '▀';

/// Widget painting a [`SceneFrame`] over an opaque backdrop color.
pub struct SceneBlit<'a> {
    frame: &'a SceneFrame,
    backdrop: Rgba,
}

impl<'a> SceneBlit<'a> {
    pub fn new(frame: &'a SceneFrame, backdrop: Rgba) -> Self {
        Self { frame, backdrop }
    }
}

impl Widget for SceneBlit<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = area.width.min(self.frame.width() as u16);
        let rows = area.height.min((self.frame.height() / 2) as u16);

        for row in 0..rows {
            for col in 0..cols {
                let x = col as usize;
                let top = self.frame.composite(x, row as usize * 2, self.backdrop);
                let bottom = self.frame.composite(x, row as usize * 2 + 1, self.backdrop);

                if let Some(cell) =
                    buf.cell_mut(Position::new(area.x + col, area.y + row))
                {
                    cell.set_char(UPPER_HALF_BLOCK)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}

/// Convert a composited (opaque) pixel to a terminal color.
fn to_color(pixel: Rgba) -> Color {
    Color::Rgb(pixel.r, pixel.g, pixel.b)
}
