mod glyph;

use crate::effects::EffectState;

pub use glyph::{Point, glyph_points, sample_anchor, tilt_about_centre, trail_points};

/// Linear RGB. Components normally sit in [0, 1] but the random-colour bias
/// can push them below zero; values stay unclamped until the presentation
/// boundary converts to 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const SKY_BLUE: Self = Self::new(0.529, 0.808, 0.922);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }
}

/// The two colors a frame resolves to: one for the plotted points, one for
/// the background clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePalette {
    pub draw: Color,
    pub clear: Color,
}

/// Abstract drawing surface the engine emits into. The clear color is sticky:
/// it is set every frame whether or not a clear happens, and the next
/// explicit `clear` (overlay mode defers them, reset forces one) uses it.
pub trait Surface {
    fn set_clear_color(&mut self, color: Color);
    fn clear(&mut self);
    fn plot(&mut self, point: Point, color: Color);
}

/// What a tick did, so the driver knows whether anything changed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub reset_applied: bool,
    pub drew: bool,
}

/// Resolve the frame's draw and clear colors from the toggle set.
///
/// The glyph's base color is a fresh biased random sample when
/// `random_colour` is on, else blue for waterworks, else red. Without
/// `inverse` that base draws and the daytime choice (sky blue or black)
/// clears; with `inverse` the two trade places, the base moving to the
/// background and the daytime choice becoming the glyph color. Random
/// sampling happens every frame it is enabled, inverse or not.
pub fn derive_palette(state: &EffectState, rng: &mut fastrand::Rng) -> FramePalette {
    let base = if state.random_colour {
        Color::new(rng.f32() - 0.1, rng.f32() - 0.1, rng.f32() - 0.1)
    } else if state.waterwork {
        Color::BLUE
    } else {
        Color::RED
    };

    let backdrop = if state.daytime {
        Color::SKY_BLUE
    } else {
        Color::BLACK
    };

    if state.inverse {
        FramePalette {
            draw: backdrop,
            clear: base,
        }
    } else {
        FramePalette {
            draw: base,
            clear: backdrop,
        }
    }
}

/// Assemble the frame's full point set: glyph, then trail, then the tilt
/// transform over everything. RNG draw order is fixed (anchor, then trail
/// lean) so seeded runs reproduce exact point sets.
pub fn frame_points(state: &EffectState, rng: &mut fastrand::Rng) -> Vec<Point> {
    let anchor = sample_anchor(state, rng);
    let mut points = glyph_points(state, anchor);
    if state.trails {
        let sign = if rng.bool() { 1 } else { -1 };
        points.extend(trail_points(anchor, sign));
    }
    if state.tilted {
        tilt_about_centre(&mut points, state.canvas_w, state.canvas_h);
    }
    points
}

/// Render one frame: derive the palette, clear unless overlaying, plot the
/// point cloud.
pub fn render_frame(state: &EffectState, rng: &mut fastrand::Rng, surface: &mut dyn Surface) {
    let palette = derive_palette(state, rng);
    let points = frame_points(state, rng);

    surface.set_clear_color(palette.clear);
    if !state.overlay {
        surface.clear();
    }
    for point in points {
        surface.plot(point, palette.draw);
    }
}

/// One timer tick: consume a pending reset first (forcing a clear back to the
/// default background), then render unless frozen. Frozen ticks are cheap
/// no-ops so the driver can keep its timer running and un-freeze instantly.
pub fn tick(
    state: &mut EffectState,
    rng: &mut fastrand::Rng,
    surface: &mut dyn Surface,
) -> TickReport {
    let reset_applied = state.apply_pending_reset();
    if reset_applied {
        surface.set_clear_color(Color::BLACK);
        surface.clear();
    }

    let drew = !state.frozen;
    if drew {
        render_frame(state, rng, surface);
    }

    TickReport {
        reset_applied,
        drew,
    }
}
