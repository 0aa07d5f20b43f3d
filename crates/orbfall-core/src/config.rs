//! Arena configuration.
//!
//! All tuning constants live in [`ArenaConfig`]. The defaults reproduce the
//! reference game: a 960x540 arena, 50px collision cells and one obstacle per
//! second.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::transform::Extent;

/// Configuration for an arena and the simulation driving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Arena width in pixels
    pub width: f32,
    /// Arena height in pixels
    pub height: f32,
    /// Side of one collision grid cell
    pub cell_size: u32,
    /// Attraction constant `K` for pickups
    pub pickup_attraction: f32,
    /// Speed constant used to aim new obstacles
    pub obstacle_speed: f32,
    /// Time between obstacle spawns
    #[serde(with = "duration_millis")]
    pub spawn_interval: Duration,
    /// Where the agent starts
    pub agent_start: Vec2,
    /// Agent extent
    pub agent_size: Extent,
    /// Heading change per rotate input, in radians
    pub rotate_step: f32,
    /// Projectile velocity as a multiple of the agent heading
    pub projectile_speed: f32,
    /// Projectile extent
    pub projectile_size: Extent,
    /// Velocity retained by a pickup each tick
    pub pickup_damping: f32,
    /// Multiplier applied to a destroyed obstacle's velocity for its pickups
    pub pickup_burst: f32,
    /// Master seed for spawn placement and sizing
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
            cell_size: 50,
            pickup_attraction: 5.0,
            obstacle_speed: 0.9,
            spawn_interval: Duration::from_secs(1),
            agent_start: Vec2::new(475.0, 265.0),
            agent_size: Extent::new(10, 10),
            rotate_step: 0.1,
            projectile_speed: 1.3,
            projectile_size: Extent::new(1, 3),
            pickup_damping: 0.9,
            pickup_burst: 20.0,
            seed: 0,
        }
    }
}

impl ArenaConfig {
    /// Default config with a different arena size.
    #[must_use]
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Default config with a different seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Checks that every field describes a playable arena.
    ///
    /// # Errors
    ///
    /// Returns the first rejected field as a [`ConfigError`].
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(ConfigError::InvalidArenaSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.spawn_interval.is_zero() {
            return Err(ConfigError::ZeroSpawnInterval);
        }

        let constants = [
            ("pickup_attraction", self.pickup_attraction),
            ("obstacle_speed", self.obstacle_speed),
            ("rotate_step", self.rotate_step),
            ("projectile_speed", self.projectile_speed),
            ("pickup_damping", self.pickup_damping),
            ("pickup_burst", self.pickup_burst),
        ];
        for (name, value) in constants {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidConstant { name, value });
            }
        }

        for (name, extent) in [("agent", self.agent_size), ("projectile", self.projectile_size)] {
            if extent.is_empty() {
                return Err(ConfigError::ZeroExtent {
                    name,
                    width: extent.width,
                    height: extent.height,
                });
            }
        }
        Ok(())
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(ArenaConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_arena_size() {
        let config = ArenaConfig::with_size(0.0, 540.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidArenaSize { .. })
        ));

        let config = ArenaConfig::with_size(f32::NAN, 540.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_cell_size() {
        let config = ArenaConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCellSize));
    }

    #[test]
    fn rejects_non_positive_constants() {
        let config = ArenaConfig {
            obstacle_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidConstant {
                name: "obstacle_speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_empty_extents() {
        let config = ArenaConfig {
            projectile_size: Extent::new(1, 0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroExtent {
                name: "projectile",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_spawn_interval() {
        let config = ArenaConfig {
            spawn_interval: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnInterval));
    }

    #[test]
    fn json_roundtrip_uses_millis() {
        let config = ArenaConfig {
            spawn_interval: Duration::from_millis(750),
            seed: 9,
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["spawn_interval"], 750);

        let back: ArenaConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ArenaConfig = serde_json::from_str(r#"{ "seed": 7, "cell_size": 32 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.width, 960.0);
    }
}
