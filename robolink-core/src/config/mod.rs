//! Configuration types
//!
//! Board-agnostic configuration structures. With the `serde` feature they
//! can be persisted as postcard binary data.

pub mod types;

pub use types::{ConfigError, RemoteConfig, RobotConfig, ServoLimits, DEFAULT_SERVOS};
