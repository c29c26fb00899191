use crate::render::{draw_overlay_popup, write_hud_rows, Frame, Renderer};
use std::io::Write;

/// Braille cells: each terminal cell covers a 2x4 grid of canvas samples.
/// Dots switch on for samples brighter than the cell's luminance midpoint,
/// foreground from the brightest sample, background from the dimmest.
pub struct BrailleRenderer {
    last_fg: Option<(u8, u8, u8)>,
    last_bg: Option<(u8, u8, u8)>,
}

impl BrailleRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Renderer for BrailleRenderer {
    fn name(&self) -> &'static str {
        "braille"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let cols = frame.term_cols as usize;
        let visual_rows = frame.visual_rows as usize;
        if cols == 0 || visual_rows == 0 {
            return Ok(());
        }

        let grid_w = cols * 2;
        let grid_h = visual_rows * 4;

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026h")?;
        }

        out.write_all(b"\x1b[H\x1b[0m")?;
        // Autowrap off while painting full-width rows.
        out.write_all(b"\x1b[?7l")?;
        self.last_fg = None;
        self.last_bg = None;

        // Braille dot bit per (dx, dy) subcell, row-major 2x4.
        const DOT_BITS: [u8; 8] = [0x01, 0x08, 0x02, 0x10, 0x04, 0x20, 0x40, 0x80];

        for row in 0..visual_rows {
            for col in 0..cols {
                let mut lum = [0u16; 8];
                let mut rgb = [(0u8, 0u8, 0u8); 8];
                for dy in 0..4usize {
                    for dx in 0..2usize {
                        let i = dy * 2 + dx;
                        let c = frame
                            .canvas
                            .cell_rgb8(col * 2 + dx, row * 4 + dy, grid_w, grid_h);
                        rgb[i] = c;
                        lum[i] = luma_u16(c.0, c.1, c.2);
                    }
                }

                let min_l = *lum.iter().min().unwrap_or(&0);
                let max_l = *lum.iter().max().unwrap_or(&0);
                let threshold = (min_l as u32 + max_l as u32 + 1) / 2;

                let mut bits = 0u8;
                let mut fg = rgb[0];
                let mut bg = rgb[0];
                let mut fg_l = 0u16;
                let mut bg_l = u16::MAX;
                for i in 0..8 {
                    if max_l > min_l && lum[i] as u32 >= threshold {
                        bits |= DOT_BITS[i];
                        if lum[i] >= fg_l {
                            fg_l = lum[i];
                            fg = rgb[i];
                        }
                    } else if lum[i] <= bg_l {
                        bg_l = lum[i];
                        bg = rgb[i];
                    }
                }

                if self.last_fg != Some(fg) {
                    write!(out, "\x1b[38;2;{};{};{}m", fg.0, fg.1, fg.2)?;
                    self.last_fg = Some(fg);
                }
                if self.last_bg != Some(bg) {
                    write!(out, "\x1b[48;2;{};{};{}m", bg.0, bg.1, bg.2)?;
                    self.last_bg = Some(bg);
                }

                let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                write!(out, "{ch}")?;
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

fn luma_u16(r: u8, g: u8, b: u8) -> u16 {
    // Integer Rec. 709 weights scaled by 256.
    ((54 * r as u32 + 183 * g as u32 + 19 * b as u32) >> 8) as u16
}
