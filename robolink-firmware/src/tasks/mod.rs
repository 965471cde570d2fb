//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod remote;
pub mod servo;

pub use remote::remote_task;
pub use servo::{servo_task, ServoBank};
