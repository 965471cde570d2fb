//! Collaborator traits
//!
//! These traits define the interface between the remote control logic
//! and whatever executes the commands.

pub mod timeline;

pub use timeline::Timeline;
