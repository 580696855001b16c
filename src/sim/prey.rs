//! Prey entity behavior model
//!
//! Movement is driven by smooth value noise sampled at a per-entity time
//! offset, which gives organic scurrying paths without pathfinding. Startles
//! and wall bounces jump the offset to decorrelate direction.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::noise::noise_2d;
use crate::consts::*;
use crate::heading_to_dir;

/// Noise-field traversal rate (lattice cells per second of offset)
const NOISE_RATE: f32 = 0.35;
/// Time-offset jump applied on wall bounce / startle to break up the path
const NOISE_JUMP: f32 = 7.31;

/// Closed set of huntable creatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreyKind {
    Mouse,
    Insect,
    Worm,
}

impl PreyKind {
    /// Base body size in logical pixels (also the hit-radius basis)
    pub fn base_size(&self) -> f32 {
        match self {
            PreyKind::Mouse => 20.0,
            PreyKind::Insect => 12.0,
            PreyKind::Worm => 16.0,
        }
    }

    /// Base wander speed in logical pixels per second
    pub fn base_speed(&self) -> f32 {
        match self {
            PreyKind::Mouse => 90.0,
            PreyKind::Insect => 140.0,
            PreyKind::Worm => 45.0,
        }
    }

    /// Body fill color
    pub fn color(&self) -> &'static str {
        match self {
            PreyKind::Mouse => "#9e9484",
            PreyKind::Insect => "#7fb85c",
            PreyKind::Worm => "#d87ca0",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PreyKind::Mouse => "mouse",
            PreyKind::Insect => "insect",
            PreyKind::Worm => "worm",
        }
    }
}

/// Behavioral state of a prey entity.
///
/// `Stalk` and `Pounce` are reserved in the model and never produced by the
/// current transition logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreyState {
    Search,
    Stalk,
    Flee,
    Pounce,
    Dead,
}

/// Per-spawn behavior switches, immutable after construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorFlags {
    /// Whether a startle boosts speed (vs. only changing state)
    pub can_flee: bool,
    /// Whether the noise offset advances at double rate (more erratic path)
    pub is_evasive: bool,
}

/// One-shot construction instruction produced by the director
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub kind: PreyKind,
    pub speed_multiplier: f32,
    pub flags: BehaviorFlags,
}

/// A single hunted organism
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prey {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PreyKind,
    pub state: PreyState,
    /// Current scaled body size; hit radii derive from this
    pub size: f32,
    pub flags: BehaviorFlags,
    /// From the spawn config, fixed for the entity's lifetime
    speed_multiplier: f32,
    /// Wander speed after display scaling
    target_speed: f32,
    /// Speed while fleeing, captured at the startle transition.
    /// Deliberately not recomputed on resize.
    flee_speed: f32,
    /// Noise lattice row for this entity
    noise_seed: f32,
    /// Noise time offset, advanced every tick
    noise_t: f32,
    /// Stop-and-go freeze flag (non-flee states only)
    stopped: bool,
    /// Counts down to the next stopped/moving toggle
    phase_timer: f32,
    /// Seconds spent fleeing, drives escape reporting
    flee_timer: f32,
    escape_reported: bool,
    /// Sim timestamp at which this (dead) entity leaves the live list
    pub remove_at: Option<f32>,
}

impl Prey {
    /// Construct a prey at a random position inside `bounds`
    pub fn spawn(
        id: u32,
        config: &SpawnConfig,
        bounds: Vec2,
        scale: f32,
        rng: &mut Pcg32,
    ) -> Self {
        let size = config.kind.base_size() * scale;
        let x = rng.random_range(size..(bounds.x - size).max(size + 1.0));
        let y = rng.random_range(size..(bounds.y - size).max(size + 1.0));
        Self {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            kind: config.kind,
            state: PreyState::Search,
            size,
            flags: config.flags,
            speed_multiplier: config.speed_multiplier,
            target_speed: config.kind.base_speed() * config.speed_multiplier * scale,
            flee_speed: 0.0,
            noise_seed: id as f32 * 13.7 + rng.random_range(0.0..100.0),
            noise_t: rng.random_range(0.0..50.0),
            stopped: false,
            phase_timer: MOVE_INTERVAL_SECS * rng.random_range(0.5..1.5),
            flee_timer: 0.0,
            escape_reported: false,
            remove_at: None,
        }
    }

    /// Advance the entity by `dt` seconds.
    ///
    /// Returns `true` the single time this prey survives long enough while
    /// fleeing to count as an escape.
    pub fn update(&mut self, dt: f32, bounds: Vec2, rng: &mut Pcg32) -> bool {
        if self.state == PreyState::Dead {
            return false;
        }

        let fleeing = self.state == PreyState::Flee;
        let mut escaped = false;

        if fleeing {
            self.flee_timer += dt;
            if self.flee_timer > FLEE_ESCAPE_SECS && !self.escape_reported {
                self.escape_reported = true;
                escaped = true;
            }
        } else {
            // Stop-and-go: freeze/move cycle with per-cycle jitter
            self.phase_timer -= dt;
            if self.phase_timer <= 0.0 {
                self.stopped = !self.stopped;
                let base = if self.stopped {
                    STOP_INTERVAL_SECS
                } else {
                    MOVE_INTERVAL_SECS
                };
                self.phase_timer = base * rng.random_range(0.5..1.5);
            }
        }

        let rate = if self.flags.is_evasive { 2.0 } else { 1.0 };
        self.noise_t += dt * NOISE_RATE * rate;

        // Heading from the noise field: two full turns of range so the
        // direction can wrap freely as the offset drifts
        let heading = noise_2d(self.noise_seed, self.noise_t) * std::f32::consts::TAU * 2.0;
        let speed = if fleeing { self.flee_speed } else { self.target_speed };
        self.vel = heading_to_dir(heading) * speed;

        let frozen = self.stopped && !fleeing;
        if !frozen {
            self.pos += self.vel * dt;
        }

        self.reflect_at_bounds(bounds);
        escaped
    }

    /// Hard reflection at the canvas edges, inset by the current radius
    fn reflect_at_bounds(&mut self, bounds: Vec2) {
        let inset = self.size;
        let mut bounced = false;

        if self.pos.x < inset {
            self.pos.x = inset;
            self.vel.x = -self.vel.x;
            bounced = true;
        } else if self.pos.x > bounds.x - inset {
            self.pos.x = bounds.x - inset;
            self.vel.x = -self.vel.x;
            bounced = true;
        }
        if self.pos.y < inset {
            self.pos.y = inset;
            self.vel.y = -self.vel.y;
            bounced = true;
        } else if self.pos.y > bounds.y - inset {
            self.pos.y = bounds.y - inset;
            self.vel.y = -self.vel.y;
            bounced = true;
        }

        // Jump the offset so the entity doesn't re-approach the same wall
        if bounced {
            self.noise_t += NOISE_JUMP;
        }
    }

    /// Near-miss response: transition to flee, boosting speed when allowed.
    /// Flee speed is captured from the current target speed, once.
    pub fn startle(&mut self) {
        if matches!(self.state, PreyState::Dead | PreyState::Flee) {
            return;
        }
        self.state = PreyState::Flee;
        self.flee_speed = if self.flags.can_flee {
            self.target_speed * FLEE_SPEED_MULT
        } else {
            self.target_speed
        };
        self.flee_timer = 0.0;
        self.stopped = false;
        self.noise_t += NOISE_JUMP;
    }

    /// Direct hit: terminal state, schedule removal after a short linger
    pub fn kill(&mut self, now: f32) {
        self.state = PreyState::Dead;
        self.remove_at = Some(now + DEATH_LINGER_SECS);
    }

    /// Rescale visual size and wander speed for a new display tier.
    /// An entity mid-flee keeps its captured flee speed.
    pub fn resize(&mut self, scale: f32) {
        self.size = self.kind.base_size() * scale;
        self.target_speed = self.kind.base_speed() * self.speed_multiplier * scale;
    }

    /// Strict kill radius
    pub fn kill_radius(&self) -> f32 {
        self.size * KILL_RADIUS_MULT
    }

    /// Outer near-miss radius
    pub fn flee_radius(&self) -> f32 {
        self.size * FLEE_RADIUS_MULT
    }

    pub fn is_alive(&self) -> bool {
        self.state != PreyState::Dead
    }

    /// Whether the freeze flag currently suppresses motion
    pub fn is_stopped(&self) -> bool {
        self.stopped && self.state != PreyState::Flee
    }

    /// Current effective movement speed (test/render helper)
    pub fn effective_speed(&self) -> f32 {
        if self.state == PreyState::Flee {
            self.flee_speed
        } else {
            self.target_speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_config(kind: PreyKind, flags: BehaviorFlags) -> SpawnConfig {
        SpawnConfig {
            kind,
            speed_multiplier: 1.0,
            flags,
        }
    }

    fn spawn_one(flags: BehaviorFlags) -> (Prey, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(7);
        let prey = Prey::spawn(
            1,
            &test_config(PreyKind::Mouse, flags),
            Vec2::new(800.0, 600.0),
            1.0,
            &mut rng,
        );
        (prey, rng)
    }

    #[test]
    fn test_stays_within_bounds() {
        let (mut prey, mut rng) = spawn_one(BehaviorFlags::default());
        let bounds = Vec2::new(800.0, 600.0);
        for _ in 0..5000 {
            prey.update(1.0 / 60.0, bounds, &mut rng);
            assert!(prey.pos.x >= prey.size - 0.01 && prey.pos.x <= bounds.x - prey.size + 0.01);
            assert!(prey.pos.y >= prey.size - 0.01 && prey.pos.y <= bounds.y - prey.size + 0.01);
        }
    }

    #[test]
    fn test_stop_and_go_toggles() {
        let (mut prey, mut rng) = spawn_one(BehaviorFlags::default());
        let bounds = Vec2::new(800.0, 600.0);
        let mut saw_stopped = false;
        let mut saw_moving = false;
        for _ in 0..(60 * 20) {
            prey.update(1.0 / 60.0, bounds, &mut rng);
            if prey.is_stopped() {
                saw_stopped = true;
            } else {
                saw_moving = true;
            }
        }
        assert!(saw_stopped && saw_moving);
    }

    #[test]
    fn test_frozen_prey_does_not_move() {
        let (mut prey, mut rng) = spawn_one(BehaviorFlags::default());
        let bounds = Vec2::new(800.0, 600.0);
        // Run until we catch a stopped phase
        for _ in 0..(60 * 20) {
            prey.update(1.0 / 60.0, bounds, &mut rng);
            if prey.is_stopped() {
                let before = prey.pos;
                prey.update(1.0 / 60.0, bounds, &mut rng);
                if prey.is_stopped() {
                    assert_eq!(before, prey.pos);
                    return;
                }
            }
        }
        panic!("never observed a stopped phase");
    }

    #[test]
    fn test_startle_boosts_speed_when_can_flee() {
        let (mut prey, _) = spawn_one(BehaviorFlags {
            can_flee: true,
            is_evasive: false,
        });
        let before = prey.effective_speed();
        prey.startle();
        assert_eq!(prey.state, PreyState::Flee);
        assert!((prey.effective_speed() - before * FLEE_SPEED_MULT).abs() < 1e-4);
    }

    #[test]
    fn test_startle_without_can_flee_keeps_speed() {
        let (mut prey, _) = spawn_one(BehaviorFlags::default());
        let before = prey.effective_speed();
        prey.startle();
        assert_eq!(prey.state, PreyState::Flee);
        assert!((prey.effective_speed() - before).abs() < 1e-4);
    }

    #[test]
    fn test_fleeing_suspends_stop_and_go() {
        let (mut prey, mut rng) = spawn_one(BehaviorFlags {
            can_flee: true,
            is_evasive: false,
        });
        let bounds = Vec2::new(800.0, 600.0);
        prey.startle();
        for _ in 0..(60 * 10) {
            prey.update(1.0 / 60.0, bounds, &mut rng);
            assert!(!prey.is_stopped());
        }
    }

    #[test]
    fn test_escape_reported_exactly_once() {
        let (mut prey, mut rng) = spawn_one(BehaviorFlags {
            can_flee: true,
            is_evasive: false,
        });
        let bounds = Vec2::new(800.0, 600.0);
        prey.startle();
        let mut escapes = 0;
        for _ in 0..(60 * 10) {
            if prey.update(1.0 / 60.0, bounds, &mut rng) {
                escapes += 1;
            }
        }
        assert_eq!(escapes, 1);
    }

    #[test]
    fn test_kill_schedules_removal() {
        let (mut prey, _) = spawn_one(BehaviorFlags::default());
        prey.kill(5.0);
        assert_eq!(prey.state, PreyState::Dead);
        assert_eq!(prey.remove_at, Some(5.0 + DEATH_LINGER_SECS));
        assert!(!prey.is_alive());
    }

    #[test]
    fn test_resize_round_trip_restores_speed() {
        let (mut prey, _) = spawn_one(BehaviorFlags::default());
        let size0 = prey.size;
        let speed0 = prey.effective_speed();
        prey.resize(0.5);
        assert!((prey.size - size0 * 0.5).abs() < 1e-4);
        assert!((prey.effective_speed() - speed0 * 0.5).abs() < 1e-3);
        prey.resize(1.0);
        assert!((prey.size - size0).abs() < 1e-4);
        assert!((prey.effective_speed() - speed0).abs() < 1e-3);
    }

    #[test]
    fn test_resize_does_not_touch_flee_speed() {
        let (mut prey, _) = spawn_one(BehaviorFlags {
            can_flee: true,
            is_evasive: false,
        });
        prey.startle();
        let flee_speed = prey.effective_speed();
        prey.resize(0.5);
        assert!((prey.effective_speed() - flee_speed).abs() < 1e-4);
    }

    #[test]
    fn test_evasive_advances_noise_faster() {
        let mut rng = Pcg32::seed_from_u64(3);
        // Bounds large enough that neither entity can reach a wall
        let bounds = Vec2::new(10_000.0, 10_000.0);
        let mut plain = Prey::spawn(
            1,
            &test_config(PreyKind::Insect, BehaviorFlags::default()),
            bounds,
            1.0,
            &mut rng,
        );
        plain.pos = bounds / 2.0;
        let mut evasive = plain.clone();
        evasive.flags.is_evasive = true;
        let (t0_plain, t0_evasive) = (plain.noise_t, evasive.noise_t);
        let mut rng2 = rng.clone();
        plain.update(1.0, bounds, &mut rng);
        evasive.update(1.0, bounds, &mut rng2);
        let d_plain = plain.noise_t - t0_plain;
        let d_evasive = evasive.noise_t - t0_evasive;
        assert!((d_evasive - 2.0 * d_plain).abs() < 1e-4);
    }
}
