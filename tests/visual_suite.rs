use firework_visualizer::effects::{EffectState, Modifier};
use firework_visualizer::visual::{
    self, derive_palette, frame_points, glyph_points, sample_anchor, tilt_about_centre,
    trail_points, Color, Point, Surface,
};

fn state() -> EffectState {
    EffectState::new(500, 500)
}

fn rng(seed: u64) -> fastrand::Rng {
    fastrand::Rng::with_seed(seed)
}

/// Records surface calls so engine behavior is observable without a terminal.
#[derive(Default)]
struct SurfaceLog {
    clear_color: Option<Color>,
    clears: Vec<Color>,
    plots: Vec<(Point, Color)>,
}

impl Surface for SurfaceLog {
    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = Some(color);
    }

    fn clear(&mut self) {
        self.clears.push(self.clear_color.unwrap_or(Color::BLACK));
    }

    fn plot(&mut self, point: Point, color: Color) {
        self.plots.push((point, color));
    }
}

// ── color derivation ────────────────────────────────────────────────────────

#[test]
fn default_palette_is_red_on_black() {
    let p = derive_palette(&state(), &mut rng(1));
    assert_eq!(p.draw, Color::RED);
    assert_eq!(p.clear, Color::BLACK);
}

#[test]
fn waterwork_draws_blue_over_daytime_sky() {
    let mut s = state();
    s.waterwork = true;
    s.daytime = true;
    let p = derive_palette(&s, &mut rng(1));
    assert_eq!(p.draw, Color::BLUE);
    assert_eq!(p.clear, Color::SKY_BLUE);
}

#[test]
fn inverse_moves_waterwork_blue_to_the_background() {
    let mut s = state();
    s.inverse = true;
    s.waterwork = true;
    let p = derive_palette(&s, &mut rng(1));
    assert_eq!(p.clear, Color::BLUE);
    assert_eq!(p.draw, Color::BLACK);
}

#[test]
fn inverse_without_waterwork_moves_red_to_the_background() {
    let mut s = state();
    s.inverse = true;
    let p = derive_palette(&s, &mut rng(1));
    assert_eq!(p.clear, Color::RED);
    assert_eq!(p.draw, Color::BLACK);
}

#[test]
fn inverse_daytime_draws_sky_blue() {
    let mut s = state();
    s.inverse = true;
    s.daytime = true;
    let p = derive_palette(&s, &mut rng(1));
    assert_eq!(p.draw, Color::SKY_BLUE);
    assert_eq!(p.clear, Color::RED);
}

#[test]
fn random_colour_components_carry_the_bias_unclamped() {
    let mut s = state();
    s.random_colour = true;
    for seed in 0..64 {
        let p = derive_palette(&s, &mut rng(seed));
        for c in [p.draw.r, p.draw.g, p.draw.b] {
            assert!((-0.1..0.9).contains(&c), "component {c} out of biased range");
        }
    }
}

#[test]
fn random_colour_is_sampled_fresh_even_under_inverse() {
    let mut s = state();
    s.random_colour = true;
    s.inverse = true;

    let mut r = rng(7);
    let first = derive_palette(&s, &mut r);
    let second = derive_palette(&s, &mut r);
    assert_eq!(first.draw, Color::BLACK, "inverse glyph color is the backdrop");
    assert_ne!(
        first.clear, second.clear,
        "the background sample must be redrawn each frame"
    );
}

// ── placement ───────────────────────────────────────────────────────────────

#[test]
fn default_anchor_stays_on_the_canvas() {
    let s = state();
    let mut r = rng(3);
    for _ in 0..256 {
        let a = sample_anchor(&s, &mut r);
        assert!((0..500).contains(&a.x));
        assert!((0..500).contains(&a.y));
    }
}

#[test]
fn centre_only_anchor_stays_in_the_central_region() {
    let mut s = state();
    s.centre_only = true;
    let base = (500.0f32 / 2.66) as i32;
    let mut r = rng(4);
    for _ in 0..256 {
        let a = sample_anchor(&s, &mut r);
        assert!(
            (base..base + 125).contains(&a.x),
            "x {} outside [{}, {})",
            a.x,
            base,
            base + 125
        );
        assert!((base..base + 125).contains(&a.y));
    }
}

// ── shapes ──────────────────────────────────────────────────────────────────

#[test]
fn firework_has_core_and_medium_ring_by_default() {
    let anchor = Point::new(100, 200);
    let points = glyph_points(&state(), anchor);
    assert_eq!(points.len(), 9);
    assert!(points.contains(&anchor));
    for (dx, dy) in [(5, 5), (-5, -5), (5, -5), (-5, 5)] {
        assert!(points.contains(&Point::new(100 + dx, 200 + dy)));
    }
    for (dx, dy) in [(10, 10), (-10, -10), (10, -10), (-10, 10)] {
        assert!(points.contains(&Point::new(100 + dx, 200 + dy)));
    }
}

#[test]
fn small_size_suppresses_the_medium_ring() {
    let mut s = state();
    s.small_size = true;
    let points = glyph_points(&s, Point::new(0, 0));
    assert_eq!(points.len(), 5);
    assert!(!points.contains(&Point::new(10, 10)));
}

#[test]
fn big_size_adds_the_outer_ring() {
    let mut s = state();
    s.big_size = true;
    let points = glyph_points(&s, Point::new(0, 0));
    assert_eq!(points.len(), 13);
    assert!(points.contains(&Point::new(20, 20)));
    assert!(points.contains(&Point::new(-20, 20)));
}

#[test]
fn small_and_big_together_keep_core_plus_outer_ring() {
    let mut s = state();
    s.small_size = true;
    s.big_size = true;
    let points = glyph_points(&s, Point::new(0, 0));
    assert_eq!(points.len(), 9);
    assert!(!points.contains(&Point::new(10, 10)), "medium ring suppressed");
    assert!(points.contains(&Point::new(20, 20)));
}

#[test]
fn waterwork_droplet_matches_its_offset_table() {
    let mut s = state();
    s.waterwork = true;
    let anchor = Point::new(50, 60);
    let points = glyph_points(&s, anchor);
    assert_eq!(points.len(), 27);

    // Spine tips and column extents.
    assert!(points.contains(&Point::new(50, 63)));
    assert!(points.contains(&Point::new(50, 57)));
    assert!(points.contains(&Point::new(49, 62)));
    assert!(points.contains(&Point::new(51, 57)));
    assert!(points.contains(&Point::new(48, 58)));
    assert!(points.contains(&Point::new(52, 61)));
    // Nothing above the spine tip or beyond the outer columns.
    assert!(!points.contains(&Point::new(50, 64)));
    assert!(!points.contains(&Point::new(47, 60)));
    assert!(!points.contains(&Point::new(53, 60)));
}

#[test]
fn waterwork_ignores_size_modifiers() {
    let mut s = state();
    s.waterwork = true;
    let baseline = glyph_points(&s, Point::new(0, 0));

    s.small_size = true;
    s.big_size = true;
    let sized = glyph_points(&s, Point::new(0, 0));
    assert_eq!(baseline, sized);
    assert_eq!(sized.len(), 27);
}

// ── trails and tilt ─────────────────────────────────────────────────────────

#[test]
fn trail_descends_with_a_consistent_lean() {
    let anchor = Point::new(200, 400);
    for sign in [1, -1] {
        let points = trail_points(anchor, sign);
        assert_eq!(points.len(), 10);
        for (i, p) in points.iter().enumerate() {
            let i = i as i32;
            assert_eq!(p.x, 200 - 10 * i * sign);
            assert_eq!(p.y, 400 - 50 * i);
        }
    }
}

#[test]
fn frame_points_appends_a_ten_point_trail() {
    let mut s = state();
    s.trails = true;

    let seed = 11;
    let points = frame_points(&s, &mut rng(seed));
    assert_eq!(points.len(), 9 + 10);

    // Replay the engine's draw order: anchor first, then the lean flip.
    let mut replay = rng(seed);
    let anchor = sample_anchor(&s, &mut replay);
    let sign = if replay.bool() { 1 } else { -1 };
    assert_eq!(&points[9..], trail_points(anchor, sign).as_slice());
}

#[test]
fn tilt_fixes_the_canvas_centre() {
    let mut points = [Point::new(250, 250)];
    tilt_about_centre(&mut points, 500, 500);
    assert_eq!(points[0], Point::new(250, 250));
}

#[test]
fn tilt_rotates_45_degrees_about_the_centre() {
    // A point 100 px right of centre lands 100/sqrt(2) up and right.
    let mut points = [Point::new(350, 250)];
    tilt_about_centre(&mut points, 500, 500);
    assert_eq!(points[0], Point::new(321, 321));
}

#[test]
fn tilted_frame_is_the_rotation_of_the_untilted_frame() {
    let seed = 13;
    let mut s = state();
    let flat = frame_points(&s, &mut rng(seed));

    s.tilted = true;
    let tilted = frame_points(&s, &mut rng(seed));

    let mut expected = flat;
    tilt_about_centre(&mut expected, 500, 500);
    assert_eq!(tilted, expected);
}

// ── persistence and ticks ───────────────────────────────────────────────────

#[test]
fn render_clears_before_plotting_unless_overlaying() {
    let s = state();
    let mut surface = SurfaceLog::default();
    visual::render_frame(&s, &mut rng(2), &mut surface);
    assert_eq!(surface.clears, vec![Color::BLACK]);
    assert!(!surface.plots.is_empty());
    assert!(surface.plots.iter().all(|&(_, c)| c == Color::RED));
}

#[test]
fn overlay_skips_clearing_but_still_sets_the_clear_color() {
    let mut s = state();
    s.overlay = true;
    s.daytime = true;
    let mut surface = SurfaceLog::default();
    visual::render_frame(&s, &mut rng(2), &mut surface);
    assert!(surface.clears.is_empty(), "overlay must not clear");
    assert_eq!(
        surface.clear_color,
        Some(Color::SKY_BLUE),
        "sticky clear color still updates for the next explicit clear"
    );
}

#[test]
fn frozen_tick_draws_nothing() {
    let mut s = state();
    s.frozen = true;
    let mut surface = SurfaceLog::default();
    let report = visual::tick(&mut s, &mut rng(2), &mut surface);
    assert!(!report.drew);
    assert!(!report.reset_applied);
    assert!(surface.plots.is_empty());
    assert!(surface.clears.is_empty());
}

#[test]
fn reset_tick_forces_a_default_clear_then_renders_defaults() {
    let mut s = state();
    for m in Modifier::all() {
        s.toggle(m);
    }
    s.frozen = true;
    s.request_reset();

    let mut surface = SurfaceLog::default();
    let report = visual::tick(&mut s, &mut rng(2), &mut surface);
    assert!(report.reset_applied);
    assert!(report.drew, "reset also clears the frozen flag");
    assert_eq!(s, EffectState::new(500, 500));

    // One unconditional reset clear, then the frame's own clear.
    assert_eq!(surface.clears, vec![Color::BLACK, Color::BLACK]);
    assert!(surface.plots.iter().all(|&(_, c)| c == Color::RED));
}

#[test]
fn seeded_ticks_reproduce_identical_frames() {
    let mut a = SurfaceLog::default();
    let mut b = SurfaceLog::default();
    for surface in [&mut a, &mut b] {
        let mut s = state();
        s.trails = true;
        s.random_colour = true;
        let mut r = rng(99);
        for _ in 0..5 {
            visual::tick(&mut s, &mut r, &mut *surface);
        }
    }
    assert_eq!(a.plots, b.plots);
    assert_eq!(a.clears, b.clears);
}

#[test]
fn random_colour_frames_consume_colors_before_the_anchor() {
    let mut s = state();
    s.random_colour = true;

    let seed = 21;
    let mut surface = SurfaceLog::default();
    visual::render_frame(&s, &mut rng(seed), &mut surface);

    let mut replay = rng(seed);
    let palette = derive_palette(&s, &mut replay);
    let anchor = sample_anchor(&s, &mut replay);
    assert_eq!(surface.plots[0], (anchor, palette.draw));
}
