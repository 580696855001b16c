//! Cat Pounce - an adaptive-difficulty cat toy game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (prey behavior, difficulty director, game state)
//! - `game`: Host-facing facade wiring sim, stats, audio and haptics together
//! - `stats`: Persisted play statistics and the prey confidence scalar
//! - `audio`: Procedural Web Audio sound effects
//! - `haptics`: Vibration API pulses
//! - `render`: Canvas 2D rendering (wasm only)

pub mod audio;
pub mod game;
pub mod haptics;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod sim;
pub mod stats;

pub use game::Game;
pub use stats::{PlayStats, StatsStore};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Maximum delta time fed to the simulation (seconds).
    /// Clamping keeps the sim sane after tab backgrounding or long stalls.
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Kill radius as a multiple of prey size (strict `<` comparison)
    pub const KILL_RADIUS_MULT: f32 = 1.5;
    /// Near-miss radius as a multiple of prey size; startles instead of kills
    pub const FLEE_RADIUS_MULT: f32 = 2.5;

    /// How long a dead prey lingers before removal + replacement (seconds)
    pub const DEATH_LINGER_SECS: f32 = 0.1;
    /// Chance of a second replacement spawn while under the population cap
    pub const BONUS_SPAWN_CHANCE: f64 = 0.5;

    /// Speed boost applied when a prey with `can_flee` is startled
    pub const FLEE_SPEED_MULT: f32 = 2.5;
    /// Seconds of uninterrupted fleeing before an escape is reported
    pub const FLEE_ESCAPE_SECS: f32 = 3.0;

    /// Stop-and-go base intervals (seconds); jitter is added per cycle
    pub const STOP_INTERVAL_SECS: f32 = 1.0;
    pub const MOVE_INTERVAL_SECS: f32 = 2.5;

    /// Confidence delta applied when the cat scores a kill
    pub const CONFIDENCE_KILL_DELTA: f32 = -2.0;
    /// Confidence delta applied when a prey escapes
    pub const CONFIDENCE_ESCAPE_DELTA: f32 = 5.0;

    /// Playtime is persisted in whole chunks of this many seconds
    pub const PLAYTIME_FLUSH_SECS: f32 = 30.0;
    /// Remainders below this threshold are dropped on stop
    pub const PLAYTIME_MIN_FLUSH_SECS: f32 = 1.0;

    /// Demo mode forces an easy configuration after this much sim time
    pub const DEMO_DURATION_SECS: f32 = 60.0;
    /// Forced spawn speed once the demo window has expired
    pub const DEMO_SPEED_MULT: f32 = 0.8;

    /// Responsive scale tiers selected by canvas width
    pub const MOBILE_MAX_WIDTH: f32 = 600.0;
    pub const TABLET_MAX_WIDTH: f32 = 1024.0;
    pub const MOBILE_SCALE: f32 = 0.5;
    pub const TABLET_SCALE: f32 = 0.7;
    pub const DESKTOP_SCALE: f32 = 1.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Unit vector for a heading angle (radians)
#[inline]
pub fn heading_to_dir(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
