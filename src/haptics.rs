//! Vibration feedback via the Vibration API
//!
//! Best-effort, fire-and-forget: unsupported devices and blocked calls
//! silently degrade to no-ops.

/// Vibration durations in milliseconds
const KILL_PULSE_MS: u32 = 40;
const POUNCE_PULSE_MS: u32 = 12;

/// Haptic feedback manager
#[derive(Debug, Clone)]
pub struct Haptics {
    enabled: bool,
}

impl Default for Haptics {
    fn default() -> Self {
        Self::new()
    }
}

impl Haptics {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Strong pulse on a successful kill
    pub fn trigger_kill(&self) {
        self.vibrate(KILL_PULSE_MS);
    }

    /// Light pulse on a near miss
    pub fn trigger_pounce(&self) {
        self.vibrate(POUNCE_PULSE_MS);
    }

    #[cfg(target_arch = "wasm32")]
    fn vibrate(&self, duration_ms: u32) {
        if !self.enabled {
            return;
        }
        // Returns false when vibration is unsupported or blocked; either way
        // there is nothing to do about it
        if let Some(window) = web_sys::window() {
            let _ = window.navigator().vibrate_with_duration(duration_ms);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn vibrate(&self, _duration_ms: u32) {}
}
