//! Robolink Hardware Abstraction Layer
//!
//! This crate defines the transport traits the remote control core polls.
//! Chip-specific code (the RP2040 firmware, host test doubles) implements
//! them so the same framing and dispatch logic runs everywhere.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  robolink-core (RemoteControl driver)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  robolink-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ RP2040 UART0  │       │ host mocks    │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{UartConfig, UartRx};
