use crate::canvas::Canvas;
use crate::config::{Config, RendererMode, SpeedArg};
use crate::effects::{EffectState, Modifier, SpeedMode};
use crate::render::{BrailleRenderer, Frame, HalfBlockRenderer, KittyRenderer, Renderer};
use crate::terminal::TerminalGuard;
use crate::visual;
use anyhow::{anyhow, bail, Context};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::fmt::Write as _;
use std::io::BufWriter;
use std::time::{Duration, Instant};

pub fn run(cfg: Config) -> anyhow::Result<()> {
    if cfg.width <= 0 || cfg.height <= 0 {
        bail!(
            "canvas must be at least 1x1 (got {}x{})",
            cfg.width,
            cfg.height
        );
    }
    if cfg.fps == 0 {
        bail!("--fps must be >= 1");
    }

    let mut state = EffectState::new(cfg.width, cfg.height);
    match cfg.speed {
        SpeedArg::Slow => {}
        SpeedArg::Fast => state.set_speed(SpeedMode::Fast),
        SpeedArg::Max => state.set_speed(SpeedMode::Max),
    }
    for name in &cfg.effects {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let modifier = Modifier::parse(name).ok_or_else(|| {
            anyhow!(
                "unknown effect '{}' (expected one of: {})",
                name,
                Modifier::all().map(|m| m.as_str()).join(", ")
            )
        })?;
        if !state.is_active(modifier) {
            state.toggle(modifier);
        }
    }

    let mut rng = match cfg.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut canvas = Canvas::new(cfg.width, cfg.height);

    let mut renderer: Box<dyn Renderer> = match cfg.renderer {
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Braille => Box::new(BrailleRenderer::new()),
        RendererMode::Kitty => Box::new(KittyRenderer::new()),
    };

    let _term = TerminalGuard::new()?;
    let mut out = BufWriter::new(TerminalGuard::stdout());

    let mut last_size = crossterm::terminal::size().context("get terminal size")?;
    if last_size.1 < 2 || last_size.0 < 4 {
        return Err(anyhow!(
            "terminal too small (need at least 4x2, got {}x{})",
            last_size.0,
            last_size.1
        ));
    }

    let mut show_hud = true;
    let mut show_help = false;
    let mut fps = FpsCounter::new();
    let mut next_tick = Instant::now();

    loop {
        let now = Instant::now();

        // Drain input events (non-blocking).
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    if handle_key(k.code, k.modifiers, &mut state, &mut show_hud, &mut show_help)
                    {
                        return Ok(());
                    }
                }
                Event::Resize(c, r) => {
                    last_size = (c, r);
                }
                _ => {}
            }
        }

        // Size check once per frame (resize events can be missed in some terminals).
        let sz = crossterm::terminal::size()?;
        if sz != last_size {
            last_size = sz;
        }

        // The timer keeps running while frozen; tick() itself skips drawing,
        // so un-freezing never waits for a fresh interval to elapse.
        if now >= next_tick {
            visual::tick(&mut state, &mut rng, &mut canvas);
            next_tick = if state.tick_interval.is_zero() {
                now
            } else {
                now + state.tick_interval
            };
        }

        let (term_cols, term_rows) = last_size;
        let hud = if show_hud {
            build_hud(
                term_cols as usize,
                &state,
                renderer.name(),
                fps.fps(),
            )
        } else {
            String::new()
        };
        let hud_rows = hud_rows_for_text(term_rows, show_hud, &hud);
        let visual_rows = term_rows.saturating_sub(hud_rows).max(1);

        let frame = Frame {
            term_cols,
            term_rows,
            visual_rows,
            canvas: &canvas,
            hud: &hud,
            hud_rows,
            overlay: show_help.then(help_popup_text),
            sync_updates: cfg.sync_updates,
        };
        renderer.render(&frame, &mut out)?;
        fps.tick();

        // Presentation pacing; tick cadence is handled above.
        let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);
        let elapsed = now.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
    }
}

fn handle_key(
    code: KeyCode,
    mods: KeyModifiers,
    state: &mut EffectState,
    show_hud: &mut bool,
    show_help: &mut bool,
) -> bool {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return true;
    }

    match code {
        KeyCode::Esc => true,
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char(c) if c.is_ascii_digit() => {
            // '1'..'9' then '0' select the ten effects in menu order.
            let digit = c as usize - '0' as usize;
            let idx = (digit + 9) % 10;
            state.toggle(Modifier::all()[idx]);
            false
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            state.set_speed(SpeedMode::Slow);
            false
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            state.set_speed(SpeedMode::Fast);
            false
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            state.set_speed(SpeedMode::Max);
            false
        }
        KeyCode::Char('f') | KeyCode::Char('F') => {
            state.toggle_frozen();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            state.request_reset();
            false
        }
        KeyCode::Char('i') | KeyCode::Char('I') => {
            *show_hud = !*show_hud;
            false
        }
        KeyCode::Char('?')
        | KeyCode::Char('/')
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::F(1)
        | KeyCode::Tab => {
            *show_help = !*show_help;
            false
        }
        _ => false,
    }
}

fn build_hud(cols: usize, state: &EffectState, renderer_name: &str, fps: f32) -> String {
    let mut toggles = String::new();
    for m in Modifier::all() {
        let mark = if state.is_active(m) { 'x' } else { ' ' };
        let _ = write!(&mut toggles, "{}[{}] ", m.as_str(), mark);
    }

    let logical_lines = vec![
        format!("Effects: {}", toggles.trim_end()),
        format!(
            "Speed: {} ({} ms) | Frozen: {} | Canvas: {}x{} | Renderer: {} | FPS: {:>4.1}",
            state.speed_label(),
            state.tick_interval.as_millis(),
            if state.frozen { "yes" } else { "no" },
            state.canvas_w,
            state.canvas_h,
            renderer_name,
            fps,
        ),
        "Keys: 1-9,0 effects | s/d/m slow/fast/max | f freeze | r reset | i HUD | ?/h help | q quit"
            .to_string(),
    ];

    wrap_hud_lines(cols, &logical_lines).join("\n")
}

fn hud_rows_for_text(term_rows: u16, show_hud: bool, hud: &str) -> u16 {
    if !show_hud {
        return 0;
    }
    let max_rows = term_rows.saturating_sub(1);
    let wanted = hud.lines().count() as u16;
    wanted.min(max_rows)
}

fn wrap_hud_lines(cols: usize, lines: &[String]) -> Vec<String> {
    let width = cols.max(1);
    let mut out = Vec::new();
    for line in lines {
        out.extend(hard_wrap_line(line, width));
    }
    out
}

fn hard_wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }

    let mut out = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;
    for ch in line.chars() {
        cur.push(ch);
        cur_len += 1;
        if cur_len >= width {
            out.push(cur);
            cur = String::new();
            cur_len = 0;
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn help_popup_text() -> &'static str {
    "Firework Visualizer Hotkeys\n\
1  random colour\n\
2  small fireworks (suppress the medium ring)\n\
3  big fireworks (add the outer ring)\n\
4  overlay (accumulate frames, no clearing)\n\
5  centre only\n\
6  daytime (sky blue background)\n\
7  waterworks (droplet glyph)\n\
8  tilted (45 degree sky)\n\
9  inverse (swap glyph and background colours)\n\
0  trails\n\
s/d/m  speed: slow (1000 ms) / fast (500 ms) / max\n\
f  freeze/unfreeze\n\
r  reset everything to defaults\n\
i  show/hide HUD\n\
? or / or h or F1 or tab  toggle this help\n\
q or esc  quit"
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        if dt >= 0.5 {
            self.fps = (self.frames as f32) / dt;
            self.frames = 0;
            self.last = now;
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}
