//! Per-frame simulation advance and touch resolution
//!
//! One logical tick per displayed frame. Touch input is resolved against the
//! current entity list between ticks; removal is deferred via sim-time
//! stamps, so iteration never mutates the list mid-scan.

use glam::Vec2;
use rand::Rng;

use super::director::GameDirector;
use super::prey::{Prey, PreyKind};
use super::state::{GameEvent, GameState, Particle, MAX_PARTICLES};
use crate::consts::*;
use crate::distance;
use crate::stats::StatsStore;

/// Particles emitted per kill burst
const BURST_PARTICLES: usize = 12;

/// Advance the simulation by one frame.
///
/// `dt` is clamped to [`MAX_FRAME_DT`] so a backgrounded tab cannot explode
/// the integration when frames resume.
pub fn tick(state: &mut GameState, director: &mut GameDirector, stats: &mut StatsStore, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);
    state.clock += dt;
    director.advance(dt);

    // Entity updates; escapes feed back into confidence
    let bounds = state.bounds;
    let mut escapes = 0u32;
    for prey in &mut state.prey {
        if prey.update(dt, bounds, &mut state.rng) {
            escapes += 1;
        }
    }
    for _ in 0..escapes {
        director.on_escape(stats);
        state.events.push(GameEvent::Escape);
    }

    // Deferred removal of lingering dead prey, then replacements
    let now = state.clock;
    let before = state.prey.len();
    state.prey.retain(|p| match p.remove_at {
        Some(t) => t > now,
        None => true,
    });
    let removed = before - state.prey.len();
    for _ in 0..removed {
        spawn_prey(state, director, stats);
        // Population drifts toward the cap rather than snapping to it
        if state.live_count() < director.max_population(stats)
            && state.rng.random_bool(BONUS_SPAWN_CHANCE)
        {
            spawn_prey(state, director, stats);
        }
    }

    // Particle physics
    for particle in &mut state.particles {
        particle.pos += particle.vel * dt;
        particle.vel *= 0.96;
        particle.rotation += particle.spin * dt;
        particle.life -= dt * 1.5;
    }
    state.particles.retain(|p| p.life > 0.0);

    // Persist whole 30-second chunks of active play
    state.playtime_acc += dt;
    while state.playtime_acc >= PLAYTIME_FLUSH_SECS {
        stats.update_playtime(PLAYTIME_FLUSH_SECS as f64);
        state.playtime_acc -= PLAYTIME_FLUSH_SECS;
    }
}

/// Resolve one input point against the live entity list.
///
/// Kill inside a strict `1.5 x size` radius, startle inside `2.5 x size`.
/// Several entities can be hit by the same point when their radii overlap.
pub fn handle_touch(
    state: &mut GameState,
    director: &GameDirector,
    stats: &mut StatsStore,
    x: f32,
    y: f32,
) {
    let point = Vec2::new(x, y);
    let now = state.clock;
    let mut kills: Vec<(PreyKind, Vec2, f32)> = Vec::new();

    for prey in &mut state.prey {
        if !prey.is_alive() {
            continue;
        }
        let d = distance(point, prey.pos);
        if d < prey.kill_radius() {
            prey.kill(now);
            kills.push((prey.kind, prey.pos, prey.size));
        } else if d < prey.flee_radius() {
            let already_fleeing = prey.state == super::prey::PreyState::Flee;
            prey.startle();
            if !already_fleeing {
                state.events.push(GameEvent::NearMiss);
            }
        }
    }

    for (kind, pos, size) in kills {
        state.score += 1;
        stats.record_kill(kind);
        director.on_kill(stats);
        spawn_burst(state, pos, size, kind.color());
        state.events.push(GameEvent::Kill { kind });
    }
}

/// Spawn one prey from the director's current policy
pub fn spawn_prey(state: &mut GameState, director: &GameDirector, stats: &mut StatsStore) {
    let config = director.next_spawn(stats, &mut state.rng);
    let id = state.next_entity_id();
    let prey = Prey::spawn(id, &config, state.bounds, state.scale, &mut state.rng);
    state.events.push(GameEvent::Spawn { kind: prey.kind });
    state.prey.push(prey);
    director.on_spawn(stats);
}

/// Fill the arena up to the current population cap (session start)
pub fn populate(state: &mut GameState, director: &GameDirector, stats: &mut StatsStore) {
    let cap = director.max_population(stats);
    while state.live_count() < cap {
        spawn_prey(state, director, stats);
    }
}

/// Flush the partial playtime interval at session end.
///
/// Remainders at or below one second are dropped to avoid spurious
/// near-zero writes.
pub fn stop_session(state: &mut GameState, stats: &mut StatsStore) {
    if state.playtime_acc > PLAYTIME_MIN_FLUSH_SECS {
        stats.update_playtime(state.playtime_acc as f64);
    }
    state.playtime_acc = 0.0;
}

/// Scatter a short-lived particle burst at a kill site
fn spawn_burst(state: &mut GameState, pos: Vec2, size: f32, color: &'static str) {
    for _ in 0..BURST_PARTICLES {
        if state.particles.len() >= MAX_PARTICLES {
            break;
        }
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(40.0..160.0);
        state.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            rotation: angle,
            spin: state.rng.random_range(-6.0..6.0),
            life: 1.0,
            size: size * state.rng.random_range(0.15..0.35),
            color,
        });
    }
}
