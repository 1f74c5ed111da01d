//! Challenge evaluation thresholds.
//!
//! Every geometric threshold and timer count the session uses lives
//! here so tests and deployments can tune them without touching code.

use serde::{Deserialize, Serialize};

/// Tunable thresholds for gesture evaluation and session timing.
///
/// Counts are in evaluation ticks, not wall-clock time; the runtime
/// layer decides how long a tick is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeConfig {
    /// Both-eyes EAR below this classifies a blink.
    pub blink_ear_threshold: f32,
    /// Outer-lip middle-point rise above this classifies a smile.
    pub smile_height_threshold: f32,
    /// Nose-to-eye-midpoint angle magnitude (degrees) beyond this
    /// classifies a left/right head turn.
    pub turn_angle_threshold: f32,
    /// Nose-to-eye-midpoint vertical offset magnitude beyond this
    /// classifies an up/down head tilt.
    pub vertical_tilt_threshold: f32,
    /// Overall session budget in timeout ticks.
    pub timeout_ticks: u32,
    /// Matching evaluation ticks required before a non-blink gesture
    /// succeeds. Blink always succeeds on its first matching tick.
    pub stability_threshold: u32,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            blink_ear_threshold: 0.2,
            smile_height_threshold: 0.32,
            turn_angle_threshold: 10.0,
            vertical_tilt_threshold: 0.05,
            timeout_ticks: 30,
            stability_threshold: 1,
        }
    }
}

impl ChallengeConfig {
    /// Load thresholds from `VIGIL_*` environment variables, falling
    /// back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            blink_ear_threshold: env_f32("VIGIL_BLINK_EAR_THRESHOLD", defaults.blink_ear_threshold),
            smile_height_threshold: env_f32(
                "VIGIL_SMILE_HEIGHT_THRESHOLD",
                defaults.smile_height_threshold,
            ),
            turn_angle_threshold: env_f32(
                "VIGIL_TURN_ANGLE_THRESHOLD",
                defaults.turn_angle_threshold,
            ),
            vertical_tilt_threshold: env_f32(
                "VIGIL_VERTICAL_TILT_THRESHOLD",
                defaults.vertical_tilt_threshold,
            ),
            timeout_ticks: env_u32("VIGIL_TIMEOUT_TICKS", defaults.timeout_ticks),
            stability_threshold: env_u32("VIGIL_STABILITY_THRESHOLD", defaults.stability_threshold),
        }
    }
}

fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let cfg = ChallengeConfig::default();
        assert_eq!(cfg.blink_ear_threshold, 0.2);
        assert_eq!(cfg.smile_height_threshold, 0.32);
        assert_eq!(cfg.turn_angle_threshold, 10.0);
        assert_eq!(cfg.vertical_tilt_threshold, 0.05);
        assert_eq!(cfg.timeout_ticks, 30);
        assert_eq!(cfg.stability_threshold, 1);
    }

    #[test]
    fn toml_partial_override_keeps_other_defaults() {
        let cfg: ChallengeConfig =
            toml::from_str("blink_ear_threshold = 0.25\ntimeout_ticks = 15\n").unwrap();
        assert_eq!(cfg.blink_ear_threshold, 0.25);
        assert_eq!(cfg.timeout_ticks, 15);
        assert_eq!(cfg.smile_height_threshold, 0.32);
        assert_eq!(cfg.stability_threshold, 1);
    }
}
