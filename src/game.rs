//! Host-facing game facade
//!
//! Owns the simulation state, the difficulty director, the persisted stats
//! and the feedback channels (audio, haptics, kill callback). This is the
//! complete surface a UI layer may depend on; everything below it stays
//! deterministic and platform-free.

use crate::audio::{AudioManager, SoundEffect};
use crate::haptics::Haptics;
use crate::sim::{
    handle_touch, populate, stop_session, tick, DeviceClass, DirectorMode, GameDirector,
    GameEvent, GameState, PreyKind,
};
use crate::stats::StatsStore;

/// Observer invoked once per kill with the victim's kind
pub type KillCallback = Box<dyn FnMut(PreyKind)>;

pub struct Game {
    state: GameState,
    director: GameDirector,
    stats: StatsStore,
    audio: AudioManager,
    haptics: Haptics,
    on_kill: Option<KillCallback>,
    running: bool,
}

impl Game {
    /// Construct a game for a viewport. `mode` is the only external
    /// configuration the simulation core accepts.
    pub fn new(mode: DirectorMode, seed: u64, width: f32, height: f32) -> Self {
        let state = GameState::new(seed, width, height);
        let director = GameDirector::new(mode, DeviceClass::from_scale(state.scale));
        let stats = StatsStore::load();
        log::info!(
            "Game created: mode {:?}, seed {}, {}x{}, confidence {:.1}",
            mode,
            seed,
            width,
            height,
            stats.confidence()
        );
        Self {
            state,
            director,
            stats,
            audio: AudioManager::new(),
            haptics: Haptics::new(),
            on_kill: None,
            running: false,
        }
    }

    /// Begin a session: record it, fill the arena to the population cap
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.stats.record_session(now_ms());
        self.audio.resume();
        populate(&mut self.state, &self.director, &mut self.stats);
        self.dispatch_events();
        self.stats.save();
        log::info!("Session started with {} prey", self.state.live_count());
    }

    /// End the session: flush partial playtime, persist best score
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        stop_session(&mut self.state, &mut self.stats);
        self.stats.maybe_record_high_score(self.state.score);
        if self.stats.is_dirty() {
            self.stats.save();
        }
        log::info!("Session stopped at score {}", self.state.score);
    }

    /// Advance one frame. No-op while stopped.
    pub fn frame(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        tick(&mut self.state, &mut self.director, &mut self.stats, dt);
        self.dispatch_events();
    }

    /// Resolve one input point (call once per active touch contact)
    pub fn handle_touch(&mut self, x: f32, y: f32) {
        if !self.running {
            return;
        }
        handle_touch(&mut self.state, &self.director, &mut self.stats, x, y);
        self.dispatch_events();
    }

    /// Apply a new viewport size; entities rescale in place
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
        self.director
            .set_device_class(DeviceClass::from_scale(self.state.scale));
    }

    pub fn get_score(&self) -> u32 {
        self.state.score
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio.set_enabled(enabled);
    }

    pub fn set_haptics_enabled(&mut self, enabled: bool) {
        self.haptics.set_enabled(enabled);
    }

    pub fn set_on_kill(&mut self, callback: KillCallback) {
        self.on_kill = Some(callback);
    }

    /// For host upsell UI when running the demo-bounded director
    pub fn is_demo_expired(&self) -> bool {
        self.director.is_demo_expired()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Read access for the renderer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    /// Map sim outcomes to the fire-and-forget feedback channels
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Kill { kind } => {
                    self.audio.play(SoundEffect::Kill);
                    self.haptics.trigger_kill();
                    if let Some(callback) = &mut self.on_kill {
                        callback(kind);
                    }
                }
                GameEvent::NearMiss => {
                    self.audio.play(SoundEffect::Squeak);
                    self.haptics.trigger_pounce();
                }
                GameEvent::Escape => {
                    log::debug!("Prey escaped, confidence {:.1}", self.stats.confidence());
                }
                GameEvent::Spawn { kind } => {
                    log::debug!("Spawned {}", kind.as_str());
                }
            }
        }
    }
}

/// Wall-clock ms, for session bookkeeping only (never simulation logic)
#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
