use std::time::Duration;

pub const DEFAULT_CANVAS_W: i32 = 500;
pub const DEFAULT_CANVAS_H: i32 = 500;

pub const SLOW_INTERVAL: Duration = Duration::from_millis(1000);
pub const FAST_INTERVAL: Duration = Duration::from_millis(500);
pub const MAX_INTERVAL: Duration = Duration::from_millis(0);

/// The ten stackable effect toggles, in keyboard order (`1`..`0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    RandomColour,
    SmallSize,
    BigSize,
    Overlay,
    CentreOnly,
    Daytime,
    Waterwork,
    Tilted,
    Inverse,
    Trails,
}

impl Modifier {
    pub const fn all() -> [Self; 10] {
        [
            Self::RandomColour,
            Self::SmallSize,
            Self::BigSize,
            Self::Overlay,
            Self::CentreOnly,
            Self::Daytime,
            Self::Waterwork,
            Self::Tilted,
            Self::Inverse,
            Self::Trails,
        ]
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "random-colour" | "random-color" | "colour" => Some(Self::RandomColour),
            "small" | "small-size" => Some(Self::SmallSize),
            "big" | "big-size" => Some(Self::BigSize),
            "overlay" => Some(Self::Overlay),
            "centre" | "centre-only" | "center-only" => Some(Self::CentreOnly),
            "daytime" => Some(Self::Daytime),
            "waterworks" | "waterwork" => Some(Self::Waterwork),
            "tilted" => Some(Self::Tilted),
            "inverse" => Some(Self::Inverse),
            "trails" => Some(Self::Trails),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RandomColour => "random-colour",
            Self::SmallSize => "small",
            Self::BigSize => "big",
            Self::Overlay => "overlay",
            Self::CentreOnly => "centre",
            Self::Daytime => "daytime",
            Self::Waterwork => "waterworks",
            Self::Tilted => "tilted",
            Self::Inverse => "inverse",
            Self::Trails => "trails",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedMode {
    Slow,
    Fast,
    Max,
    Freeze,
}

impl SpeedMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Fast => "Fast",
            Self::Max => "Max",
            Self::Freeze => "Freeze",
        }
    }
}

/// The full toggle set plus timing state. Owned by the driver and handed to
/// the frame engine by reference each tick; mutated only by discrete events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectState {
    pub canvas_w: i32,
    pub canvas_h: i32,
    pub tick_interval: Duration,
    pub frozen: bool,
    pub pending_reset: bool,

    pub random_colour: bool,
    pub small_size: bool,
    pub big_size: bool,
    pub overlay: bool,
    pub centre_only: bool,
    pub daytime: bool,
    pub waterwork: bool,
    pub tilted: bool,
    pub inverse: bool,
    pub trails: bool,
}

impl EffectState {
    pub fn new(canvas_w: i32, canvas_h: i32) -> Self {
        Self {
            canvas_w: canvas_w.max(1),
            canvas_h: canvas_h.max(1),
            tick_interval: SLOW_INTERVAL,
            frozen: false,
            pending_reset: false,
            random_colour: false,
            small_size: false,
            big_size: false,
            overlay: false,
            centre_only: false,
            daytime: false,
            waterwork: false,
            tilted: false,
            inverse: false,
            trails: false,
        }
    }

    pub fn toggle(&mut self, modifier: Modifier) {
        let flag = self.flag_mut(modifier);
        *flag = !*flag;
    }

    pub fn is_active(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::RandomColour => self.random_colour,
            Modifier::SmallSize => self.small_size,
            Modifier::BigSize => self.big_size,
            Modifier::Overlay => self.overlay,
            Modifier::CentreOnly => self.centre_only,
            Modifier::Daytime => self.daytime,
            Modifier::Waterwork => self.waterwork,
            Modifier::Tilted => self.tilted,
            Modifier::Inverse => self.inverse,
            Modifier::Trails => self.trails,
        }
    }

    fn flag_mut(&mut self, modifier: Modifier) -> &mut bool {
        match modifier {
            Modifier::RandomColour => &mut self.random_colour,
            Modifier::SmallSize => &mut self.small_size,
            Modifier::BigSize => &mut self.big_size,
            Modifier::Overlay => &mut self.overlay,
            Modifier::CentreOnly => &mut self.centre_only,
            Modifier::Daytime => &mut self.daytime,
            Modifier::Waterwork => &mut self.waterwork,
            Modifier::Tilted => &mut self.tilted,
            Modifier::Inverse => &mut self.inverse,
            Modifier::Trails => &mut self.trails,
        }
    }

    /// Slow/Fast/Max resume drawing at the named cadence; Freeze suspends
    /// drawing while leaving the configured interval untouched, so a later
    /// un-freeze picks up where it left off.
    pub fn set_speed(&mut self, mode: SpeedMode) {
        match mode {
            SpeedMode::Slow => {
                self.frozen = false;
                self.tick_interval = SLOW_INTERVAL;
            }
            SpeedMode::Fast => {
                self.frozen = false;
                self.tick_interval = FAST_INTERVAL;
            }
            SpeedMode::Max => {
                self.frozen = false;
                self.tick_interval = MAX_INTERVAL;
            }
            SpeedMode::Freeze => {
                self.frozen = true;
            }
        }
    }

    pub fn toggle_frozen(&mut self) {
        self.frozen = !self.frozen;
    }

    pub fn speed_label(&self) -> &'static str {
        if self.tick_interval == MAX_INTERVAL {
            SpeedMode::Max.label()
        } else if self.tick_interval == FAST_INTERVAL {
            SpeedMode::Fast.label()
        } else {
            SpeedMode::Slow.label()
        }
    }

    /// Resets are deferred to the start of the next tick so a mid-frame menu
    /// event never observes a half-reset toggle set.
    pub fn request_reset(&mut self) {
        self.pending_reset = true;
    }

    /// Returns whether a reset was consumed; the driver uses this to force
    /// one unconditional clear of the drawing surface.
    pub fn apply_pending_reset(&mut self) -> bool {
        if !self.pending_reset {
            return false;
        }
        let (w, h) = (self.canvas_w, self.canvas_h);
        *self = Self::new(w, h);
        true
    }
}
