//! Error types for the simulation core.
//!
//! The tick itself has no recoverable failure modes. Errors only arise when a
//! simulation is built from a configuration that cannot describe a playable
//! arena.

use thiserror::Error;

/// A rejected [`ArenaConfig`](crate::config::ArenaConfig) field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Arena width or height is zero or not finite.
    #[error("arena dimensions must be positive and finite, got {width}x{height}")]
    InvalidArenaSize {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },

    /// The collision grid cell size is zero.
    #[error("collision grid cell size must be non-zero")]
    ZeroCellSize,

    /// A tuning constant is zero, negative, or not finite.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidConstant {
        /// Name of the offending field.
        name: &'static str,
        /// Configured value.
        value: f32,
    },

    /// An entity extent has a zero side.
    #[error("{name} extent must be non-zero on both axes, got {width}x{height}")]
    ZeroExtent {
        /// Which extent was rejected.
        name: &'static str,
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },

    /// The obstacle spawn interval is zero.
    #[error("obstacle spawn interval must be non-zero")]
    ZeroSpawnInterval,
}

/// Result alias for fallible construction.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ConfigError::InvalidConstant {
            name: "pickup_attraction",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "pickup_attraction must be positive and finite, got -1"
        );

        let err = ConfigError::ZeroExtent {
            name: "agent",
            width: 0,
            height: 10,
        };
        assert!(err.to_string().contains("agent extent"));
    }
}
