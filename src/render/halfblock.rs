use crate::render::{draw_overlay_popup, write_hud_rows, Frame, Renderer};
use std::io::Write;

/// Truecolor half-block cells: each terminal cell shows two canvas samples,
/// the top half as foreground over the bottom half as background.
pub struct HalfBlockRenderer {
    last_fg: Option<(u8, u8, u8)>,
    last_bg: Option<(u8, u8, u8)>,
}

impl HalfBlockRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Renderer for HalfBlockRenderer {
    fn name(&self) -> &'static str {
        "halfblock"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let cols = frame.term_cols as usize;
        let visual_rows = frame.visual_rows as usize;
        if cols == 0 || visual_rows == 0 {
            return Ok(());
        }

        // Two vertical samples per cell.
        let grid_w = cols;
        let grid_h = visual_rows * 2;

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026h")?;
        }

        // Home, reset, and autowrap off while painting full-width rows; some
        // terminals otherwise wrap on the last column and leave visible gaps.
        out.write_all(b"\x1b[H\x1b[0m")?;
        out.write_all(b"\x1b[?7l")?;
        self.last_fg = None;
        self.last_bg = None;

        const HALF_BLOCK: char = '\u{2580}';

        for row in 0..visual_rows {
            for x in 0..cols {
                let top = frame.canvas.cell_rgb8(x, row * 2, grid_w, grid_h);
                let bot = frame.canvas.cell_rgb8(x, row * 2 + 1, grid_w, grid_h);

                if self.last_fg != Some(top) {
                    write!(out, "\x1b[38;2;{};{};{}m", top.0, top.1, top.2)?;
                    self.last_fg = Some(top);
                }
                if self.last_bg != Some(bot) {
                    write!(out, "\x1b[48;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    self.last_bg = Some(bot);
                }
                write!(out, "{HALF_BLOCK}")?;
            }
            out.write_all(b"\r\n")?;
        }

        write_hud_rows(out, frame)?;

        if let Some(text) = frame.overlay {
            draw_overlay_popup(out, frame.term_cols, frame.term_rows, text)?;
        }

        out.write_all(b"\x1b[?7h")?;

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026l")?;
        }
        out.flush()?;
        Ok(())
    }
}
