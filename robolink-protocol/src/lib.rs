//! Robolink Serial Command Protocol
//!
//! This crate defines the text protocol a host (PC tool or remote) uses to
//! drive the arm over UART. Each command is one frame:
//!
//! ```text
//! ┌───────┬────────────┬───┬──────┬───┬─────┬───┬──────┬─────┐
//! │ START │ IDENTIFIER │ : │ ARG0 │ : │ ... │ : │ ARGn │ END │
//! │  '#'  │  "MOVE"    │   │ "10" │   │     │   │ "20" │ '%' │
//! └───────┴────────────┴───┴──────┴───┴─────┴───┴──────┴─────┘
//! ```
//!
//! The body between START and END is at most [`MAX_FRAME_BODY`] bytes. There
//! is no checksum and no acknowledgement: bad frames are dropped and the
//! receiver resynchronizes on the next START symbol.
//!
//! - [`FrameAssembler`] consumes bytes one at a time and reports complete frames
//! - [`ParsedCommand`] tokenizes a frame body into identifier and arguments
//! - [`Command`] is the typed, validated form handed to the dispatcher

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod command;
pub mod frame;

pub use buffer::{RxBuffer, MAX_FRAME_BODY, RX_BUFFER_SIZE};
pub use command::{
    Command, CommandError, CommandId, EncodeError, KeyFrame, ParsedCommand, FRAME_NAME_LEN,
    MAX_FIELDS, MAX_FRAME_LEN, MIN_FRAME_LEN, SERVO_COUNT,
};
pub use frame::{
    AssemblerState, FeedStatus, FrameAssembler, FrameError, END_SYMBOL, SPLIT_SYMBOL,
    START_SYMBOL,
};
