//! Live game state and supporting types
//!
//! Everything the per-frame loop mutates lives here. The sim clock is the
//! only time base; deferred effects (dead-prey removal, demo expiry) are
//! expressed against it so tests can fast-forward without wall-clock waits.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::prey::{Prey, PreyKind};
use crate::consts::*;

/// RNG seed wrapper, kept for reproducibility logging
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Discrete outcomes surfaced to the host for audio/haptics/callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Direct hit on a prey
    Kill { kind: PreyKind },
    /// Touch inside the startle ring; prey flees
    NearMiss,
    /// A fleeing prey survived long enough to count as escaped
    Escape,
    /// A replacement entity entered the arena
    Spawn { kind: PreyKind },
}

/// A decorative particle: no gameplay effect, destroyed when life runs out
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub spin: f32,
    /// 1.0 at spawn, decreases to 0
    pub life: f32,
    pub size: f32,
    pub color: &'static str,
}

/// Maximum particles kept alive at once
pub const MAX_PARTICLES: usize = 256;

/// Complete live simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Canvas size in logical pixels
    pub bounds: Vec2,
    /// Current responsive scale tier
    pub scale: f32,
    /// Live prey list (dead entries linger briefly before removal)
    pub prey: Vec<Prey>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Sim clock in seconds, advanced by clamped frame dt
    pub clock: f32,
    /// Active-play seconds not yet flushed to the stats store
    pub playtime_acc: f32,
    /// Outcomes since the last host drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            rng: RngState::new(seed).to_rng(),
            bounds: Vec2::new(width, height),
            scale: scale_for_width(width),
            prey: Vec::new(),
            particles: Vec::new(),
            score: 0,
            clock: 0.0,
            playtime_acc: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Live (non-dead) prey count; the population cap applies to this
    pub fn live_count(&self) -> usize {
        self.prey.iter().filter(|p| p.is_alive()).count()
    }

    /// Apply a new viewport size: pick the scale tier and rescale every
    /// entity in place. Nothing is destroyed or respawned.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
        let scale = scale_for_width(width);
        if scale != self.scale {
            self.scale = scale;
            for prey in &mut self.prey {
                prey.resize(scale);
            }
        }
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Discrete responsive scale tier for a viewport width
pub fn scale_for_width(width: f32) -> f32 {
    if width < MOBILE_MAX_WIDTH {
        MOBILE_SCALE
    } else if width < TABLET_MAX_WIDTH {
        TABLET_SCALE
    } else {
        DESKTOP_SCALE
    }
}
