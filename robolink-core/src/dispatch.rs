//! Command dispatch
//!
//! Maps a validated [`Command`] onto exactly one [`Timeline`] call.

use robolink_protocol::Command;

use crate::traits::Timeline;

/// Invoke the Timeline operation selected by `command`
pub fn dispatch<T: Timeline + ?Sized>(timeline: &mut T, command: Command) {
    match command {
        Command::Ping => timeline.ping(),
        Command::Home => timeline.home(),
        Command::Play => timeline.play(),
        Command::Stop => timeline.stop(),
        Command::Clear => timeline.clear(),
        Command::Servo { index, angle } => timeline.set_servo_angle(index, angle),
        Command::Move {
            frame_id,
            duration_ms,
        } => timeline.move_to(frame_id, duration_ms),
        Command::Delete { frame_id } => timeline.remove_frame(frame_id),
        Command::Frame(frame) => timeline.set_frame(frame),
    }
}
