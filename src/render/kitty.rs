use crate::render::{draw_overlay_popup, write_hud_rows, Frame, Renderer};
use base64::Engine;
use std::io::Write;

const CHUNK: usize = 4096;

/// Kitty graphics protocol, direct (inline base64) transport. The full
/// canvas is transmitted as an RGB image each frame and the terminal scales
/// it to the visual cell area. Image ids alternate so the previous frame is
/// deleted only after its replacement is placed, avoiding flicker.
pub struct KittyRenderer {
    image_id: u32,
    rgb_buf: Vec<u8>,
    b64_buf: String,
}

impl KittyRenderer {
    pub fn new() -> Self {
        Self {
            image_id: 1,
            rgb_buf: Vec::new(),
            b64_buf: String::new(),
        }
    }
}

impl Renderer for KittyRenderer {
    fn name(&self) -> &'static str {
        "kitty"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let cols = frame.term_cols as usize;
        let visual_rows = frame.visual_rows as usize;
        if cols == 0 || visual_rows == 0 {
            return Ok(());
        }

        let w = frame.canvas.width();
        let h = frame.canvas.height();

        frame.canvas.write_rgb8_top_down(&mut self.rgb_buf);
        self.b64_buf.clear();
        base64::engine::general_purpose::STANDARD
            .encode_string(&self.rgb_buf, &mut self.b64_buf);

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026h")?;
        }
        out.write_all(b"\x1b[H\x1b[0m")?;

        let prev_id = self.image_id;
        self.image_id = if self.image_id == 1 { 2 } else { 1 };
        let id = self.image_id;

        // Transmit + place in one action, chunked; q=2 suppresses replies so
        // the input stream stays clean for the key loop.
        let payload = self.b64_buf.as_bytes();
        let mut offset = 0usize;
        let mut first = true;
        while offset < payload.len() {
            let end = (offset + CHUNK).min(payload.len());
            let more = if end < payload.len() { 1 } else { 0 };
            if first {
                write!(
                    out,
                    "\x1b_Ga=T,f=24,s={},v={},c={},r={},i={},q=2,m={};",
                    w, h, cols, visual_rows, id, more
                )?;
                first = false;
            } else {
                write!(out, "\x1b_Gm={};", more)?;
            }
            out.write_all(&payload[offset..end])?;
            out.write_all(b"\x1b\\")?;
            offset = end;
        }

        // Drop last frame's image now that the new one is on screen.
        write!(out, "\x1b_Ga=d,d=i,i={},q=2\x1b\\", prev_id)?;

        write_hud_rows(out, frame)?;

        if let Some(text) = frame.overlay {
            draw_overlay_popup(out, frame.term_cols, frame.term_rows, text)?;
        }

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026l")?;
        }
        out.flush()?;
        Ok(())
    }
}
