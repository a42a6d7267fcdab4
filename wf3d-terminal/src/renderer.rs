//! Blits an RGB pixel surface to the terminal, two pixels per character cell
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wf3d_core::surface::unpack_rgb;
use wf3d_core::PixelSurface;

/// Upper pixel in the foreground color, lower pixel in the background color
const UPPER_HALF_BLOCK: char = '\u{2580}';

/// Convert a packed `0xRRGGBB` color to a terminal true color
pub fn term_color(color: u32) -> Color {
    let [r, g, b] = unpack_rgb(color);
    Color::Rgb { r, g, b }
}

/// Pixel rows needed to fill a terminal with `rows` lines
pub fn pixel_rows(rows: u16) -> u32 {
    u32::from(rows) * 2
}

/// Renders surfaces as half-block characters
#[derive(Debug, Default)]
pub struct BlockRenderer;

impl BlockRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Queue the whole surface, starting at the top-left cell; the caller flushes.
    pub fn draw<W, B>(&self, surface: &PixelSurface<B>, writer: &mut W) -> std::io::Result<()>
    where
        W: Write,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let rows = surface.height().div_ceil(2);

        for row in 0..rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;

            // only emit color changes between runs
            let mut current = None;
            for x in 0..surface.width() as i32 {
                let y = 2 * row as i32;
                let cell = (surface.get_pixel(x, y), surface.get_pixel(x, y + 1));

                if current != Some(cell) {
                    writer.queue(SetForegroundColor(term_color(cell.0)))?;
                    writer.queue(SetBackgroundColor(term_color(cell.1)))?;
                    current = Some(cell);
                }
                writer.queue(Print(UPPER_HALF_BLOCK))?;
            }
        }

        writer.queue(ResetColor)?;
        Ok(())
    }
}
