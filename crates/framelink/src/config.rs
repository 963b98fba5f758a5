//! Session configuration, loaded once at startup.

use serde::Deserialize;

use framelink_core::InputKey;

use crate::error::{SessionError, SessionResult};

/// Display width in pixels.
pub const DISPLAY_WIDTH: usize = 128;
/// Display height in pixels.
pub const DISPLAY_HEIGHT: usize = 64;
/// Bytes in one monochrome frame (one bit per pixel).
pub const FRAME_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT / 8;

/// Configuration for one session.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Logical steps per second.
    pub target_fps: u32,
    /// Pending-event capacity of the input queue.
    pub input_queue_capacity: usize,
    /// Overshoot beyond this many periods counts as a stall.
    pub stall_threshold_periods: u32,
    /// A long press of this key requests exit (when the game permits it).
    pub exit_key: InputKey,
    /// Sleep between polls while waiting for callbacks to drain, in ms.
    pub drain_poll_interval_ms: u64,
    /// Bytes in one frame.
    pub frame_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            input_queue_capacity: 32,
            stall_threshold_periods: 2,
            exit_key: InputKey::Back,
            drain_poll_interval_ms: 1,
            frame_size: FRAME_SIZE,
        }
    }
}

impl SessionConfig {
    /// Parses a configuration from TOML and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfig`] on parse or validation
    /// failure.
    pub fn from_toml_str(input: &str) -> SessionResult<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| SessionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the session cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfig`] when a field is out of range.
    pub fn validate(&self) -> SessionResult<()> {
        if self.target_fps == 0 {
            return Err(SessionError::InvalidConfig("target_fps must be > 0".into()));
        }
        if self.input_queue_capacity == 0 {
            return Err(SessionError::InvalidConfig(
                "input_queue_capacity must be > 0".into(),
            ));
        }
        if self.frame_size == 0 {
            return Err(SessionError::InvalidConfig("frame_size must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.frame_size, 1024);
        assert_eq!(config.exit_key, InputKey::Back);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SessionConfig::from_toml_str(
            r#"
            target_fps = 60
            input_queue_capacity = 16
            exit_key = "Back"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.target_fps, 60);
        assert_eq!(config.input_queue_capacity, 16);
        // Unspecified fields keep their defaults.
        assert_eq!(config.stall_threshold_periods, 2);
    }

    #[test]
    fn test_zero_fps_rejected() {
        let err = SessionConfig::from_toml_str("target_fps = 0").unwrap_err();
        assert!(matches!(err, SessionError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(SessionConfig::from_toml_str("frames_per_sec = 30").is_err());
    }
}
