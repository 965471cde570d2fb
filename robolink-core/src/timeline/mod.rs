//! Reference timeline
//!
//! A hardware-free [`Timeline`](crate::traits::Timeline) implementation that
//! turns commands into servo angle targets. Firmware ticks it and writes
//! the angles to PWM; host tests use it to check dispatch end to end.

pub mod sequencer;

pub use sequencer::{Sequencer, MAX_KEYFRAMES};
