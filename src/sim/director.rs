//! Adaptive difficulty director
//!
//! Translates the persisted prey confidence scalar into spawn configurations
//! and a population cap. Difficulty is two-axis: the speed multiplier scales
//! continuously with confidence while the discrete mood bands switch the
//! behavioral character (type mix, flee, evasiveness).

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::prey::{BehaviorFlags, PreyKind, SpawnConfig};
use crate::consts::*;
use crate::stats::StatsStore;

/// Confidence band boundaries for behavioral character
const FEARFUL_MAX: f32 = 30.0;
const BALANCED_MAX: f32 = 70.0;

/// Confidence band boundaries for the population cap
const CAP_LOW_MAX: f32 = 20.0;
const CAP_MID_MAX: f32 = 60.0;

/// Named confidence bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Fearful,
    Balanced,
    Apex,
}

impl Mood {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence < FEARFUL_MAX {
            Mood::Fearful
        } else if confidence < BALANCED_MAX {
            Mood::Balanced
        } else {
            Mood::Apex
        }
    }
}

/// Coarse device class, selects the population cap table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// Mobile-tier scale means a mobile cap table; tablet shares desktop's
    pub fn from_scale(scale: f32) -> Self {
        if scale <= MOBILE_SCALE {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Standard play or the time-boxed demo override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorMode {
    Standard,
    Demo,
}

/// Stateful spawn-policy controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDirector {
    mode: DirectorMode,
    device: DeviceClass,
    /// Sim time since construction; drives the demo expiry
    elapsed: f32,
}

impl GameDirector {
    pub fn new(mode: DirectorMode, device: DeviceClass) -> Self {
        Self {
            mode,
            device,
            elapsed: 0.0,
        }
    }

    pub fn mode(&self) -> DirectorMode {
        self.mode
    }

    pub fn set_device_class(&mut self, device: DeviceClass) {
        self.device = device;
    }

    /// Advance the director's own clock (demo expiry timer)
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// True once a demo director has passed its free window
    pub fn is_demo_expired(&self) -> bool {
        self.mode == DirectorMode::Demo && self.elapsed >= DEMO_DURATION_SECS
    }

    /// Continuous speed scaling: 0.6x at confidence 0 up to 1.6x at 100,
    /// with an extra 1.2x boost inside the Apex band
    pub fn speed_multiplier(confidence: f32) -> f32 {
        let base = 0.6 + confidence / 100.0;
        if Mood::from_confidence(confidence) == Mood::Apex {
            base * 1.2
        } else {
            base
        }
    }

    /// Produce the construction parameters for the next prey
    pub fn next_spawn(&self, stats: &StatsStore, rng: &mut Pcg32) -> SpawnConfig {
        if self.is_demo_expired() {
            return SpawnConfig {
                kind: PreyKind::Mouse,
                speed_multiplier: DEMO_SPEED_MULT,
                flags: BehaviorFlags::default(),
            };
        }

        let confidence = stats.confidence();
        let speed_multiplier = Self::speed_multiplier(confidence);

        match Mood::from_confidence(confidence) {
            Mood::Fearful => SpawnConfig {
                kind: if rng.random::<f64>() < 0.8 {
                    PreyKind::Mouse
                } else {
                    PreyKind::Worm
                },
                speed_multiplier,
                flags: BehaviorFlags::default(),
            },
            Mood::Balanced => {
                let roll = rng.random::<f64>();
                SpawnConfig {
                    kind: if roll < 0.6 {
                        PreyKind::Mouse
                    } else if roll < 0.9 {
                        PreyKind::Insect
                    } else {
                        PreyKind::Worm
                    },
                    speed_multiplier,
                    flags: BehaviorFlags {
                        can_flee: true,
                        is_evasive: rng.random_bool(0.5),
                    },
                }
            }
            Mood::Apex => SpawnConfig {
                kind: if rng.random::<f64>() < 0.4 {
                    PreyKind::Insect
                } else {
                    PreyKind::Mouse
                },
                speed_multiplier,
                flags: BehaviorFlags {
                    can_flee: true,
                    is_evasive: true,
                },
            },
        }
    }

    /// Maximum simultaneous live prey for the current confidence and device
    pub fn max_population(&self, stats: &StatsStore) -> usize {
        let confidence = stats.confidence();
        let tier = if confidence < CAP_LOW_MAX {
            0
        } else if confidence < CAP_MID_MAX {
            1
        } else {
            2
        };
        match self.device {
            DeviceClass::Mobile => [1, 2, 3][tier],
            DeviceClass::Desktop => [2, 3, 4][tier],
        }
    }

    /// Predator success: prey grows warier, game gets easier
    pub fn on_kill(&self, stats: &mut StatsStore) {
        stats.adjust_confidence(CONFIDENCE_KILL_DELTA);
    }

    /// Prey survived a flee: prey grows bolder, game gets harder
    pub fn on_escape(&self, stats: &mut StatsStore) {
        stats.adjust_confidence(CONFIDENCE_ESCAPE_DELTA);
    }

    /// Reserved for passive drift; intentionally inert
    pub fn on_spawn(&self, _stats: &mut StatsStore) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::PlayStats;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn store_with_confidence(confidence: f32) -> StatsStore {
        StatsStore::new(PlayStats {
            prey_confidence: confidence,
            ..Default::default()
        })
    }

    fn standard() -> GameDirector {
        GameDirector::new(DirectorMode::Standard, DeviceClass::Desktop)
    }

    #[test]
    fn test_mood_bands() {
        assert_eq!(Mood::from_confidence(0.0), Mood::Fearful);
        assert_eq!(Mood::from_confidence(29.9), Mood::Fearful);
        assert_eq!(Mood::from_confidence(30.0), Mood::Balanced);
        assert_eq!(Mood::from_confidence(69.9), Mood::Balanced);
        assert_eq!(Mood::from_confidence(70.0), Mood::Apex);
        assert_eq!(Mood::from_confidence(100.0), Mood::Apex);
    }

    #[test]
    fn test_fresh_stats_first_spawn() {
        let director = standard();
        let stats = StatsStore::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let config = director.next_spawn(&stats, &mut rng);
            assert!((0.6..=0.61).contains(&config.speed_multiplier));
            assert!(!config.flags.can_flee);
            assert!(!config.flags.is_evasive);
            assert_ne!(config.kind, PreyKind::Insect);
        }
    }

    #[test]
    fn test_no_insect_below_thirty() {
        let director = standard();
        let mut rng = Pcg32::seed_from_u64(2);
        for c in [0.0, 10.0, 20.0, 29.9] {
            let stats = store_with_confidence(c);
            for _ in 0..500 {
                assert_ne!(director.next_spawn(&stats, &mut rng).kind, PreyKind::Insect);
            }
        }
    }

    #[test]
    fn test_apex_insect_frequency() {
        let director = standard();
        let stats = store_with_confidence(85.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let n = 10_000;
        let insects = (0..n)
            .filter(|_| director.next_spawn(&stats, &mut rng).kind == PreyKind::Insect)
            .count();
        let freq = insects as f64 / n as f64;
        assert!((0.36..0.44).contains(&freq), "insect frequency {freq}");
    }

    #[test]
    fn test_apex_flags_always_on() {
        let director = standard();
        let stats = store_with_confidence(90.0);
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..200 {
            let config = director.next_spawn(&stats, &mut rng);
            assert!(config.flags.can_flee);
            assert!(config.flags.is_evasive);
        }
    }

    #[test]
    fn test_balanced_evasion_is_coin_flip() {
        let director = standard();
        let stats = store_with_confidence(50.0);
        let mut rng = Pcg32::seed_from_u64(5);
        let n = 4_000;
        let evasive = (0..n)
            .filter(|_| director.next_spawn(&stats, &mut rng).flags.is_evasive)
            .count();
        let freq = evasive as f64 / n as f64;
        assert!((0.45..0.55).contains(&freq), "evasive frequency {freq}");
    }

    #[test]
    fn test_population_cap_tables() {
        let mobile = GameDirector::new(DirectorMode::Standard, DeviceClass::Mobile);
        let desktop = standard();
        for (c, mob, desk) in [
            (0.0, 1, 2),
            (19.9, 1, 2),
            (20.0, 2, 3),
            (59.9, 2, 3),
            (60.0, 3, 4),
            (100.0, 3, 4),
        ] {
            let stats = store_with_confidence(c);
            assert_eq!(mobile.max_population(&stats), mob, "mobile cap at {c}");
            assert_eq!(desktop.max_population(&stats), desk, "desktop cap at {c}");
        }
    }

    #[test]
    fn test_feedback_asymmetry() {
        let director = standard();
        let mut stats = store_with_confidence(50.0);
        director.on_kill(&mut stats);
        assert_eq!(stats.confidence(), 48.0);
        director.on_escape(&mut stats);
        assert_eq!(stats.confidence(), 53.0);
        // on_spawn is reserved and must not drift confidence
        director.on_spawn(&mut stats);
        assert_eq!(stats.confidence(), 53.0);
    }

    #[test]
    fn test_fifty_kills_clamp_to_fearful_floor() {
        let director = standard();
        let mut stats = store_with_confidence(50.0);
        for _ in 0..50 {
            director.on_kill(&mut stats);
        }
        assert_eq!(stats.confidence(), 0.0);
        assert_eq!(director.max_population(&stats), 2);
        let mobile = GameDirector::new(DirectorMode::Standard, DeviceClass::Mobile);
        assert_eq!(mobile.max_population(&stats), 1);
    }

    #[test]
    fn test_demo_forces_easy_config_after_expiry() {
        let mut director = GameDirector::new(DirectorMode::Demo, DeviceClass::Desktop);
        let stats = store_with_confidence(95.0);
        let mut rng = Pcg32::seed_from_u64(6);

        assert!(!director.is_demo_expired());
        // Inside the window the demo delegates to standard policy
        let config = director.next_spawn(&stats, &mut rng);
        assert!(config.flags.can_flee);

        director.advance(DEMO_DURATION_SECS + 0.1);
        assert!(director.is_demo_expired());
        for _ in 0..50 {
            let config = director.next_spawn(&stats, &mut rng);
            assert_eq!(config.kind, PreyKind::Mouse);
            assert_eq!(config.speed_multiplier, DEMO_SPEED_MULT);
            assert!(!config.flags.can_flee);
            assert!(!config.flags.is_evasive);
        }
    }

    #[test]
    fn test_standard_never_expires() {
        let mut director = standard();
        director.advance(10_000.0);
        assert!(!director.is_demo_expired());
    }

    proptest! {
        #[test]
        fn prop_speed_multiplier_in_range(c in 0.0f32..=100.0) {
            let m = GameDirector::speed_multiplier(c);
            prop_assert!((0.6..=1.92).contains(&m), "multiplier {} at confidence {}", m, c);
        }

        #[test]
        fn prop_speed_multiplier_monotone(a in 0.0f32..=100.0, b in 0.0f32..=100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                GameDirector::speed_multiplier(lo) <= GameDirector::speed_multiplier(hi)
            );
        }

        #[test]
        fn prop_confidence_never_leaves_bounds(
            start in 0.0f32..=100.0,
            events in proptest::collection::vec(any::<bool>(), 0..200)
        ) {
            let director = standard();
            let mut stats = store_with_confidence(start);
            for is_kill in events {
                if is_kill {
                    director.on_kill(&mut stats);
                } else {
                    director.on_escape(&mut stats);
                }
                prop_assert!((0.0..=100.0).contains(&stats.confidence()));
            }
        }
    }
}
