//! Test doubles shared by the unit tests

use std::vec::Vec;

use robolink_hal::UartRx;
use robolink_protocol::KeyFrame;

use crate::traits::Timeline;

/// One recorded Timeline call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Ping,
    Home,
    Play,
    Stop,
    Clear,
    SetServoAngle(u8, f32),
    MoveTo(u16, u32),
    RemoveFrame(u16),
    SetFrame(KeyFrame),
}

/// Timeline that records every call in order
#[derive(Debug, Default)]
pub struct RecordingTimeline {
    pub calls: Vec<Call>,
}

impl Timeline for RecordingTimeline {
    fn ping(&mut self) {
        self.calls.push(Call::Ping);
    }

    fn home(&mut self) {
        self.calls.push(Call::Home);
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn set_servo_angle(&mut self, index: u8, angle: f32) {
        self.calls.push(Call::SetServoAngle(index, angle));
    }

    fn move_to(&mut self, frame_id: u16, duration_ms: u32) {
        self.calls.push(Call::MoveTo(frame_id, duration_ms));
    }

    fn remove_frame(&mut self, frame_id: u16) {
        self.calls.push(Call::RemoveFrame(frame_id));
    }

    fn set_frame(&mut self, frame: KeyFrame) {
        self.calls.push(Call::SetFrame(frame));
    }
}

/// Transport error injected by [`MockUart`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineError;

/// UART double fed from a queue of scripted reads
#[derive(Debug, Default)]
pub struct MockUart {
    pending: std::collections::VecDeque<Result<u8, LineError>>,
}

impl MockUart {
    /// Queue bytes to be returned by later polls
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes.iter().copied().map(Ok));
    }

    /// Queue a read error
    pub fn push_error(&mut self) {
        self.pending.push_back(Err(LineError));
    }

    /// Bytes not yet read
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl UartRx for MockUart {
    type Error = LineError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, LineError> {
        match self.pending.pop_front() {
            Some(Ok(byte)) => Ok(Some(byte)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }
}
