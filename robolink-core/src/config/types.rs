//! Configuration type definitions
//!
//! Servo limits default to the arm this controller was built for: six
//! joints restricted to 10-170° and a gripper with the full 0-180° range.

use robolink_protocol::{MIN_FRAME_LEN, SERVO_COUNT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors from configuration validation or persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (buffer too small)
    Encode,
    /// Stored bytes could not be decoded
    Decode,
    /// Values out of range
    Invalid,
}

/// Remote control driver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RemoteConfig {
    /// Upper bound on bytes consumed by one `update_serial` pass
    pub max_bytes_per_poll: u16,
    /// Time without a dispatched frame before the link is reported inactive
    pub link_timeout_ms: u32,
}

impl RemoteConfig {
    /// Default per-poll byte budget
    pub const DEFAULT_MAX_BYTES_PER_POLL: u16 = 64;

    /// Upper bound on frames one `update_serial` pass can dispatch
    pub const fn max_frames_per_poll(&self) -> usize {
        (self.max_bytes_per_poll as usize).div_ceil(MIN_FRAME_LEN)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            max_bytes_per_poll: Self::DEFAULT_MAX_BYTES_PER_POLL,
            link_timeout_ms: 2000,
        }
    }
}

/// Mechanical limits of one servo, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoLimits {
    pub min_angle: f32,
    pub max_angle: f32,
    /// Pose used by `HOME`
    pub initial_angle: f32,
}

impl ServoLimits {
    pub const fn new(min_angle: f32, max_angle: f32, initial_angle: f32) -> Self {
        Self {
            min_angle,
            max_angle,
            initial_angle,
        }
    }

    /// Restrict an angle to this servo's range
    pub fn clamp(&self, angle: f32) -> f32 {
        angle.max(self.min_angle).min(self.max_angle)
    }

    /// Check that the limits are finite and ordered
    pub fn is_valid(&self) -> bool {
        self.min_angle.is_finite()
            && self.max_angle.is_finite()
            && self.initial_angle.is_finite()
            && self.min_angle <= self.initial_angle
            && self.initial_angle <= self.max_angle
    }
}

/// Default limits for the arm, base first, gripper last
pub const DEFAULT_SERVOS: [ServoLimits; SERVO_COUNT] = [
    ServoLimits::new(10.0, 170.0, 90.0),
    ServoLimits::new(10.0, 170.0, 170.0),
    ServoLimits::new(10.0, 170.0, 35.0),
    ServoLimits::new(10.0, 170.0, 90.0),
    ServoLimits::new(10.0, 170.0, 90.0),
    ServoLimits::new(10.0, 170.0, 90.0),
    ServoLimits::new(0.0, 180.0, 0.0),
];

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobotConfig {
    pub servos: [ServoLimits; SERVO_COUNT],
    pub remote: RemoteConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            servos: DEFAULT_SERVOS,
            remote: RemoteConfig::default(),
        }
    }
}

impl RobotConfig {
    /// Check every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.max_bytes_per_poll == 0 {
            return Err(ConfigError::Invalid);
        }
        if !self.servos.iter().all(ServoLimits::is_valid) {
            return Err(ConfigError::Invalid);
        }
        Ok(())
    }

    /// Serialize into `buf` with postcard, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Deserialize and validate a stored configuration
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RobotConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.remote.max_bytes_per_poll, 64);
        assert_eq!(config.servos[1].initial_angle, 170.0);
        assert_eq!(config.servos[6].max_angle, 180.0);
    }

    #[test]
    fn test_max_frames_per_poll() {
        assert_eq!(RemoteConfig::default().max_frames_per_poll(), 11);
        let config = RemoteConfig {
            max_bytes_per_poll: 12,
            ..Default::default()
        };
        assert_eq!(config.max_frames_per_poll(), 2);
    }

    #[test]
    fn test_clamp() {
        let limits = ServoLimits::new(10.0, 170.0, 90.0);
        assert_eq!(limits.clamp(0.0), 10.0);
        assert_eq!(limits.clamp(200.0), 170.0);
        assert_eq!(limits.clamp(42.0), 42.0);
    }

    #[test]
    fn test_invalid_limits() {
        let mut config = RobotConfig::default();
        config.servos[3] = ServoLimits::new(100.0, 50.0, 75.0);
        assert_eq!(config.validate(), Err(ConfigError::Invalid));

        let mut config = RobotConfig::default();
        config.remote.max_bytes_per_poll = 0;
        assert_eq!(config.validate(), Err(ConfigError::Invalid));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_persistence() {
        let mut config = RobotConfig::default();
        config.remote.link_timeout_ms = 5000;
        config.servos[6] = ServoLimits::new(5.0, 120.0, 60.0);

        let mut buf = [0u8; 256];
        let used = config.to_bytes(&mut buf).unwrap().len();
        let loaded = RobotConfig::from_bytes(&buf[..used]).unwrap();
        assert_eq!(loaded, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_rejects_garbage() {
        assert_eq!(RobotConfig::from_bytes(&[0xFF]), Err(ConfigError::Decode));

        let mut buf = [0u8; 4];
        assert_eq!(
            RobotConfig::default().to_bytes(&mut buf).map(|b| b.len()),
            Err(ConfigError::Encode)
        );
    }
}
