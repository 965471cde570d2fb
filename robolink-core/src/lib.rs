//! Board-agnostic core logic for the robolink remote control
//!
//! This crate contains everything between the UART and the servos that
//! does not depend on specific hardware:
//!
//! - The [`Timeline`] trait, the capability surface commands are dispatched to
//! - The command dispatcher
//! - The [`RemoteControl`] polling driver (UART bytes in, Timeline calls out)
//! - Link statistics bookkeeping
//! - Configuration type definitions
//! - A keyframe [`Sequencer`](timeline::Sequencer) implementing [`Timeline`]

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod remote;
pub mod stats;
pub mod timeline;
pub mod traits;

#[cfg(test)]
mod testing;

pub use dispatch::dispatch;
pub use remote::{RemoteControl, RemoteError};
pub use stats::LinkStats;
pub use traits::Timeline;
