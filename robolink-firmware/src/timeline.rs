//! Channel-backed timeline handle
//!
//! The remote task cannot own the sequencer (the servo task does), so it
//! dispatches into this handle instead. Each call becomes a [`Command`]
//! on [`TIMELINE_CMD`] and is replayed against the real sequencer by the
//! servo task.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;

use robolink_core::Timeline;
use robolink_protocol::{Command, KeyFrame};

use crate::channels::{TIMELINE_CHANNEL_SIZE, TIMELINE_CMD};

/// Forwards timeline operations to the servo task
pub struct ChannelTimeline {
    sender: Sender<'static, CriticalSectionRawMutex, Command, TIMELINE_CHANNEL_SIZE>,
}

impl ChannelTimeline {
    pub fn new() -> Self {
        Self {
            sender: TIMELINE_CMD.sender(),
        }
    }

    fn send(&mut self, command: Command) {
        let id = command.id();
        if self.sender.try_send(command).is_err() {
            warn!("Timeline queue full, dropping {:?}", id);
        }
    }
}

impl Default for ChannelTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline for ChannelTimeline {
    fn ping(&mut self) {
        self.send(Command::Ping);
    }

    fn home(&mut self) {
        self.send(Command::Home);
    }

    fn play(&mut self) {
        self.send(Command::Play);
    }

    fn stop(&mut self) {
        self.send(Command::Stop);
    }

    fn clear(&mut self) {
        self.send(Command::Clear);
    }

    fn set_servo_angle(&mut self, index: u8, angle: f32) {
        self.send(Command::Servo { index, angle });
    }

    fn move_to(&mut self, frame_id: u16, duration_ms: u32) {
        self.send(Command::Move {
            frame_id,
            duration_ms,
        });
    }

    fn remove_frame(&mut self, frame_id: u16) {
        self.send(Command::Delete { frame_id });
    }

    fn set_frame(&mut self, frame: KeyFrame) {
        self.send(Command::Frame(frame));
    }
}
