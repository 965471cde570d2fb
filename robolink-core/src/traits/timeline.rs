//! Timeline capability surface
//!
//! One operation per supported command identifier. Calls are
//! fire-and-forget: the remote control never needs a result back, and an
//! implementation that cannot honor a request (unknown frame, full store)
//! simply ignores it.

use robolink_protocol::KeyFrame;

/// Robot motion sequencer driven by remote commands
pub trait Timeline {
    /// Link check from the host (`PING`)
    fn ping(&mut self);

    /// Move every servo to its initial angle (`HOME`)
    fn home(&mut self);

    /// Start playing stored keyframes in id order (`PLAY`)
    fn play(&mut self);

    /// Stop playback or motion, holding the current pose (`STOP`)
    fn stop(&mut self);

    /// Forget all stored keyframes (`CLEAR`)
    fn clear(&mut self);

    /// Drive one servo directly (`SERVO`)
    ///
    /// `index` is always below [`SERVO_COUNT`](robolink_protocol::SERVO_COUNT).
    fn set_servo_angle(&mut self, index: u8, angle: f32);

    /// Travel to a stored keyframe over `duration_ms` (`MOVE`)
    fn move_to(&mut self, frame_id: u16, duration_ms: u32);

    /// Remove a stored keyframe (`DEL`)
    fn remove_frame(&mut self, frame_id: u16);

    /// Store a keyframe, replacing one with the same id (`FRAME`)
    fn set_frame(&mut self, frame: KeyFrame);
}
