//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied delta time only (no wall clock)
//! - Seeded RNG only
//! - Deferred effects expressed as sim-time stamps, never host timers
//! - No rendering or platform dependencies

pub mod director;
pub mod noise;
pub mod prey;
pub mod state;
pub mod tick;

pub use director::{DeviceClass, DirectorMode, GameDirector, Mood};
pub use noise::noise_2d;
pub use prey::{BehaviorFlags, Prey, PreyKind, PreyState, SpawnConfig};
pub use state::{GameEvent, GameState, Particle, RngState};
pub use tick::{handle_touch, populate, stop_session, tick};
