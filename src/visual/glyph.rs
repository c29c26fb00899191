use crate::effects::EffectState;
use std::f32::consts::FRAC_1_SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Droplet silhouette, relative to the anchor: a 7-point vertical spine,
/// 6-point columns at x±1 and 4-point columns at x±2. Emission order follows
/// the spine-then-left-then-right layout of the drawn shape.
const DROPLET_OFFSETS: [(i32, i32); 27] = [
    // spine
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (0, -1),
    (0, -2),
    (0, -3),
    // left columns
    (-1, 2),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (-1, -2),
    (-1, -3),
    (-2, 1),
    (-2, 0),
    (-2, -1),
    (-2, -2),
    // right columns
    (1, 2),
    (1, 1),
    (1, 0),
    (1, -1),
    (1, -2),
    (1, -3),
    (2, 1),
    (2, 0),
    (2, -1),
    (2, -2),
];

// Diagonal rings around the firework core, by half-extent.
const RING_STEPS: [(i32, i32); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];

/// Pick the glyph anchor. With `centre_only` the anchor lands in a quarter-size
/// region offset by the 2.66 divisor (roughly, not exactly, centered); otherwise
/// anywhere on the canvas. Consumes exactly two draws.
pub fn sample_anchor(state: &EffectState, rng: &mut fastrand::Rng) -> Point {
    let (w, h) = (state.canvas_w, state.canvas_h);
    if state.centre_only {
        let base_x = (w as f32 / 2.66) as i32;
        let base_y = (h as f32 / 2.66) as i32;
        Point::new(
            base_x + rng.i32(0..(w / 4).max(1)),
            base_y + rng.i32(0..(h / 4).max(1)),
        )
    } else {
        Point::new(rng.i32(0..w.max(1)), rng.i32(0..h.max(1)))
    }
}

/// Emit the glyph's own points. The droplet shape is fixed; the firework shape
/// grows and shrinks by ring: the ±5 core is always present, the ±10 ring is
/// suppressed by `small_size`, and `big_size` adds the ±20 ring independently.
pub fn glyph_points(state: &EffectState, anchor: Point) -> Vec<Point> {
    if state.waterwork {
        return DROPLET_OFFSETS
            .iter()
            .map(|&(dx, dy)| anchor.offset(dx, dy))
            .collect();
    }

    let mut points = Vec::with_capacity(13);
    points.push(anchor);
    points.extend(ring(anchor, 5));
    if !state.small_size {
        points.extend(ring(anchor, 10));
    }
    if state.big_size {
        points.extend(ring(anchor, 20));
    }
    points
}

fn ring(anchor: Point, extent: i32) -> impl Iterator<Item = Point> {
    RING_STEPS
        .into_iter()
        .map(move |(sx, sy)| anchor.offset(sx * extent, sy * extent))
}

/// Ten trail points descending from the anchor, leaning a consistent
/// direction for the whole frame. `sign` is +1 or -1 from a single per-frame
/// coin flip.
pub fn trail_points(anchor: Point, sign: i32) -> Vec<Point> {
    (0..10)
        .map(|i| anchor.offset(-10 * i * sign, -50 * i))
        .collect()
}

/// Rotate the frame's point set 45 degrees about the canvas center. Applied
/// once per frame after the full set is assembled; the transform holds no
/// state, so the next frame starts unrotated.
pub fn tilt_about_centre(points: &mut [Point], canvas_w: i32, canvas_h: i32) {
    let cx = canvas_w as f32 * 0.5;
    let cy = canvas_h as f32 * 0.5;
    for p in points {
        let dx = p.x as f32 - cx;
        let dy = p.y as f32 - cy;
        // cos 45 == sin 45 == 1/sqrt(2)
        let rx = (dx - dy) * FRAC_1_SQRT_2;
        let ry = (dx + dy) * FRAC_1_SQRT_2;
        p.x = (cx + rx).round() as i32;
        p.y = (cy + ry).round() as i32;
    }
}
