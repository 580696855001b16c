//! Canvas 2D rendering
//!
//! Draws the live sim state each frame. Purely read-only over `GameState`;
//! draw call failures are ignored (`.ok()`) since a dropped primitive is
//! cosmetic.

use std::f64::consts::{PI, TAU};

use web_sys::CanvasRenderingContext2d;

use crate::consts::DEATH_LINGER_SECS;
use crate::sim::{GameState, Particle, Prey, PreyKind, PreyState};

const BACKGROUND: &str = "#1c1a17";
const GLOW_BLUR: f64 = 12.0;

/// Render one frame of the simulation
pub fn draw_frame(ctx: &CanvasRenderingContext2d, state: &GameState) {
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, state.bounds.x as f64, state.bounds.y as f64);

    for prey in &state.prey {
        draw_prey(ctx, prey, state.clock);
    }
    for particle in &state.particles {
        draw_particle(ctx, particle);
    }
}

/// Draw a single prey, oriented along its velocity unless stopped
pub fn draw_prey(ctx: &CanvasRenderingContext2d, prey: &Prey, clock: f32) {
    ctx.save();
    ctx.translate(prey.pos.x as f64, prey.pos.y as f64).ok();

    // Neutral orientation while frozen; otherwise face the travel direction
    let angle = if prey.is_stopped() || prey.vel.length_squared() < 1e-6 {
        0.0
    } else {
        prey.vel.y.atan2(prey.vel.x) as f64
    };
    ctx.rotate(angle).ok();

    // Dead prey fade out over the removal linger
    if prey.state == PreyState::Dead {
        let fade = prey
            .remove_at
            .map(|t| ((t - clock) / DEATH_LINGER_SECS).clamp(0.0, 1.0))
            .unwrap_or(0.0);
        ctx.set_global_alpha(fade as f64);
    }

    ctx.set_shadow_blur(GLOW_BLUR);
    ctx.set_shadow_color(prey.kind.color());
    ctx.set_fill_style_str(prey.kind.color());

    let s = prey.size as f64;
    match prey.kind {
        PreyKind::Mouse => draw_mouse(ctx, s),
        PreyKind::Insect => draw_insect(ctx, s),
        PreyKind::Worm => draw_worm(ctx, s),
    }

    ctx.restore();
}

/// Ellipse body, round ears, trailing tail
fn draw_mouse(ctx: &CanvasRenderingContext2d, s: f64) {
    // Body
    ctx.begin_path();
    ctx.ellipse(0.0, 0.0, s, s * 0.6, 0.0, 0.0, TAU).ok();
    ctx.fill();

    // Ears
    ctx.begin_path();
    ctx.arc(s * 0.6, -s * 0.5, s * 0.28, 0.0, TAU).ok();
    ctx.fill();
    ctx.begin_path();
    ctx.arc(s * 0.6, s * 0.5, s * 0.28, 0.0, TAU).ok();
    ctx.fill();

    // Tail
    ctx.set_stroke_style_str("#b8aa94");
    ctx.set_line_width((s * 0.12).max(1.0));
    ctx.begin_path();
    ctx.move_to(-s, 0.0);
    ctx.quadratic_curve_to(-s * 1.6, s * 0.4, -s * 2.1, -s * 0.2);
    ctx.stroke();
}

/// Round body with translucent wings
fn draw_insect(ctx: &CanvasRenderingContext2d, s: f64) {
    // Wings behind the body
    ctx.set_global_alpha(0.45);
    ctx.begin_path();
    ctx.ellipse(-s * 0.2, -s * 0.7, s * 0.8, s * 0.35, -PI / 5.0, 0.0, TAU)
        .ok();
    ctx.fill();
    ctx.begin_path();
    ctx.ellipse(-s * 0.2, s * 0.7, s * 0.8, s * 0.35, PI / 5.0, 0.0, TAU)
        .ok();
    ctx.fill();
    ctx.set_global_alpha(1.0);

    // Body
    ctx.begin_path();
    ctx.arc(0.0, 0.0, s * 0.6, 0.0, TAU).ok();
    ctx.fill();
}

/// Segmented blob, shrinking toward the tail
fn draw_worm(ctx: &CanvasRenderingContext2d, s: f64) {
    for i in 0..4 {
        let r = s * (0.55 - i as f64 * 0.08);
        ctx.begin_path();
        ctx.arc(-(i as f64) * s * 0.55, 0.0, r, 0.0, TAU).ok();
        ctx.fill();
    }
}

fn draw_particle(ctx: &CanvasRenderingContext2d, particle: &Particle) {
    ctx.save();
    ctx.translate(particle.pos.x as f64, particle.pos.y as f64)
        .ok();
    ctx.rotate(particle.rotation as f64).ok();
    ctx.set_global_alpha(particle.life.clamp(0.0, 1.0) as f64);
    ctx.set_fill_style_str(particle.color);
    let s = particle.size as f64;
    ctx.fill_rect(-s / 2.0, -s / 2.0, s, s);
    ctx.restore();
}
