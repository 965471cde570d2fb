//! Keyframe sequencer
//!
//! Holds the current arm pose and a sorted store of keyframes. Motions are
//! linear in joint space: every servo travels from its current angle to the
//! target angle over the motion's duration.
//!
//! Timeline calls carry no timestamp, so a motion's start time is latched
//! by the first [`Sequencer::tick`] after the command arrives.

use heapless::Vec;

use robolink_protocol::{KeyFrame, SERVO_COUNT};

use crate::config::ServoLimits;
use crate::traits::Timeline;

/// Maximum number of stored keyframes
pub const MAX_KEYFRAMES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Motion {
    from: [f32; SERVO_COUNT],
    to: [f32; SERVO_COUNT],
    duration_ms: u32,
    started_ms: Option<u32>,
}

/// Keyframe store plus motion interpolation
#[derive(Debug, Clone)]
pub struct Sequencer {
    limits: [ServoLimits; SERVO_COUNT],
    angles: [f32; SERVO_COUNT],
    frames: Vec<KeyFrame, MAX_KEYFRAMES>,
    motion: Option<Motion>,
    /// Index of the frame being approached during playback
    playing: Option<usize>,
    pings: u32,
}

impl Sequencer {
    /// Create a sequencer resting at the initial pose
    pub fn new(limits: [ServoLimits; SERVO_COUNT]) -> Self {
        Self {
            limits,
            angles: initial_pose(&limits),
            frames: Vec::new(),
            motion: None,
            playing: None,
            pings: 0,
        }
    }

    /// Current servo angles in degrees
    pub fn angles(&self) -> [f32; SERVO_COUNT] {
        self.angles
    }

    /// Stored keyframes in ascending id order
    pub fn frames(&self) -> &[KeyFrame] {
        &self.frames
    }

    /// Look up a stored keyframe
    pub fn frame(&self, id: u16) -> Option<&KeyFrame> {
        self.frames.iter().find(|frame| frame.id == id)
    }

    /// Check whether a motion is in progress
    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    /// Check whether keyframe playback is running
    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    /// Number of pings received
    pub fn pings(&self) -> u32 {
        self.pings
    }

    /// Advance motion to `now_ms` and return the resulting angles
    pub fn tick(&mut self, now_ms: u32) -> [f32; SERVO_COUNT] {
        while let Some(motion) = self.motion.as_mut() {
            let started = *motion.started_ms.get_or_insert(now_ms);
            let elapsed = now_ms.wrapping_sub(started);

            if elapsed < motion.duration_ms {
                let progress = elapsed as f32 / motion.duration_ms as f32;
                for (angle, (from, to)) in self
                    .angles
                    .iter_mut()
                    .zip(motion.from.iter().zip(motion.to.iter()))
                {
                    *angle = from + (to - from) * progress;
                }
                break;
            }

            // Motion finished: land exactly on target, chain the next frame
            self.angles = motion.to;
            let finished_at = started.wrapping_add(motion.duration_ms);
            self.motion = None;

            if let Some(index) = self.playing {
                let next = index + 1;
                if next < self.frames.len() {
                    self.playing = Some(next);
                    let frame = &self.frames[next];
                    self.motion = Some(Motion {
                        from: self.angles,
                        to: self.clamp_pose(&frame.angles),
                        duration_ms: frame.duration_ms,
                        started_ms: Some(finished_at),
                    });
                } else {
                    self.playing = None;
                }
            }
        }

        self.angles
    }

    fn clamp_pose(&self, angles: &[f32; SERVO_COUNT]) -> [f32; SERVO_COUNT] {
        let mut pose = *angles;
        for (angle, limits) in pose.iter_mut().zip(self.limits.iter()) {
            *angle = limits.clamp(*angle);
        }
        pose
    }

    fn start_motion(&mut self, target: [f32; SERVO_COUNT], duration_ms: u32) {
        self.motion = Some(Motion {
            from: self.angles,
            to: self.clamp_pose(&target),
            duration_ms,
            started_ms: None,
        });
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SERVOS)
    }
}

fn initial_pose(limits: &[ServoLimits; SERVO_COUNT]) -> [f32; SERVO_COUNT] {
    let mut pose = [0.0; SERVO_COUNT];
    for (angle, limits) in pose.iter_mut().zip(limits.iter()) {
        *angle = limits.initial_angle;
    }
    pose
}

impl Timeline for Sequencer {
    fn ping(&mut self) {
        self.pings = self.pings.wrapping_add(1);
    }

    fn home(&mut self) {
        self.stop();
        self.angles = initial_pose(&self.limits);
    }

    fn play(&mut self) {
        let Some(first) = self.frames.first() else {
            return;
        };
        let (target, duration_ms) = (first.angles, first.duration_ms);
        self.playing = Some(0);
        self.start_motion(target, duration_ms);
    }

    fn stop(&mut self) {
        self.motion = None;
        self.playing = None;
    }

    fn clear(&mut self) {
        self.frames.clear();
        self.stop();
    }

    fn set_servo_angle(&mut self, index: u8, angle: f32) {
        let index = usize::from(index);
        if index >= SERVO_COUNT {
            return;
        }
        self.stop();
        self.angles[index] = self.limits[index].clamp(angle);
    }

    fn move_to(&mut self, frame_id: u16, duration_ms: u32) {
        let Some(frame) = self.frame(frame_id) else {
            return;
        };
        let target = frame.angles;
        self.playing = None;
        self.start_motion(target, duration_ms);
    }

    fn remove_frame(&mut self, frame_id: u16) {
        if let Ok(index) = self.frames.binary_search_by_key(&frame_id, |frame| frame.id) {
            self.frames.remove(index);
            // Indices shifted; let the current motion finish but end playback
            self.playing = None;
        }
    }

    fn set_frame(&mut self, frame: KeyFrame) {
        match self.frames.binary_search_by_key(&frame.id, |stored| stored.id) {
            Ok(index) => self.frames[index] = frame,
            Err(index) => {
                if self.frames.insert(index, frame).is_err() {
                    return;
                }
                self.playing = None;
            }
        }
    }
}
