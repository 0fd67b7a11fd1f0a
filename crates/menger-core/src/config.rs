use serde::Deserialize;

use crate::constants::{MAX_LEVEL, MIN_LEVEL};

/// Immutable viewer tuning. Parsed once at startup from the embedded
/// RON source; the defaults below are the reference values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Radians applied per drag step when orbiting.
    pub rotation_speed: f32,
    /// World units per W/S key press.
    pub zoom_speed: f32,
    /// Radians per arrow-key roll step.
    pub roll_speed: f32,
    /// World units per A/D/arrow pan step.
    pub pan_speed: f32,
    /// Sponge level built before the first frame.
    pub initial_level: i32,
    /// Highest level the digit keys may request.
    pub max_level: i32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 0.05,
            zoom_speed: 0.1,
            roll_speed: 0.1,
            pan_speed: 0.1,
            initial_level: MIN_LEVEL,
            max_level: MAX_LEVEL,
        }
    }
}

impl ViewerConfig {
    /// Whether `level` is one the GUI should forward to the sponge.
    pub fn level_in_range(&self, level: i32) -> bool {
        (MIN_LEVEL..=self.max_level).contains(&level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_range() {
        let cfg = ViewerConfig::default();
        assert!(cfg.level_in_range(1));
        assert!(cfg.level_in_range(4));
        assert!(!cfg.level_in_range(0));
        assert!(!cfg.level_in_range(5));
    }
}
