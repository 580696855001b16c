//! Persisted play statistics and the prey confidence scalar
//!
//! Persisted to LocalStorage as JSON. Confidence is the single hidden-state
//! variable driving adaptive difficulty and is never stored outside [0, 100].

use serde::{Deserialize, Serialize};

use crate::sim::PreyKind;

/// Inclusive confidence bounds
pub const CONFIDENCE_MIN: f32 = 0.0;
pub const CONFIDENCE_MAX: f32 = 100.0;

/// Per-kind cumulative kill counters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct KillCounts {
    pub mouse: u32,
    pub insect: u32,
    pub worm: u32,
}

impl KillCounts {
    pub fn total(&self) -> u32 {
        self.mouse + self.insect + self.worm
    }

    pub fn get(&self, kind: PreyKind) -> u32 {
        match kind {
            PreyKind::Mouse => self.mouse,
            PreyKind::Insect => self.insect,
            PreyKind::Worm => self.worm,
        }
    }
}

/// Cumulative play statistics for this device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayStats {
    /// 0 = maximally fearful/easy, 100 = maximally apex/hard
    pub prey_confidence: f32,
    pub kills: KillCounts,
    pub total_playtime_secs: f64,
    pub sessions: u32,
    /// Unix timestamp (ms) of the last session start
    pub last_played_ms: f64,
    pub high_score: u32,
}

impl Default for PlayStats {
    fn default() -> Self {
        Self {
            prey_confidence: 0.0,
            kills: KillCounts::default(),
            total_playtime_secs: 0.0,
            sessions: 0,
            last_played_ms: 0.0,
            high_score: 0,
        }
    }
}

/// Owned handle to the persisted stats. All mutation funnels through the
/// methods here so confidence clamping cannot be bypassed.
#[derive(Debug, Clone, Default)]
pub struct StatsStore {
    stats: PlayStats,
    dirty: bool,
}

impl StatsStore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "cat_pounce_stats";

    pub fn new(stats: PlayStats) -> Self {
        Self {
            stats,
            dirty: false,
        }
    }

    pub fn stats(&self) -> &PlayStats {
        &self.stats
    }

    pub fn confidence(&self) -> f32 {
        self.stats.prey_confidence
    }

    /// Apply a confidence delta, clamped to [0, 100]
    pub fn adjust_confidence(&mut self, delta: f32) {
        self.stats.prey_confidence =
            (self.stats.prey_confidence + delta).clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);
        self.dirty = true;
    }

    pub fn record_kill(&mut self, kind: PreyKind) {
        match kind {
            PreyKind::Mouse => self.stats.kills.mouse += 1,
            PreyKind::Insect => self.stats.kills.insect += 1,
            PreyKind::Worm => self.stats.kills.worm += 1,
        }
        self.dirty = true;
    }

    pub fn update_playtime(&mut self, seconds: f64) {
        self.stats.total_playtime_secs += seconds;
        self.dirty = true;
    }

    pub fn record_session(&mut self, now_ms: f64) {
        self.stats.sessions += 1;
        self.stats.last_played_ms = now_ms;
        self.dirty = true;
    }

    /// Keep the best score seen so far
    pub fn maybe_record_high_score(&mut self, score: u32) {
        if score > self.stats.high_score {
            self.stats.high_score = score;
            self.dirty = true;
        }
    }

    /// Whether there are unsaved mutations
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Load stats from LocalStorage (WASM only); corrupt or missing data
    /// falls back to defaults, never an error
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<PlayStats>(&json) {
                    Ok(mut stats) => {
                        // Old saves may predate clamping
                        stats.prey_confidence =
                            stats.prey_confidence.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);
                        log::info!(
                            "Loaded stats: confidence {:.1}, {} kills",
                            stats.prey_confidence,
                            stats.kills.total()
                        );
                        return Self::new(stats);
                    }
                    Err(e) => log::warn!("Corrupt stats, starting fresh: {e}"),
                }
            }
        }

        log::info!("No stats found, starting fresh");
        Self::default()
    }

    /// Save stats to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&mut self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(&self.stats) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                self.dirty = false;
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&mut self) {
        self.dirty = false;
    }
}
