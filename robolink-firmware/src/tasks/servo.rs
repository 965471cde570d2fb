//! Servo output task
//!
//! Owns the keyframe sequencer. Commands queued by the remote task are
//! applied through the same dispatcher the host tests use as soon as they
//! arrive; every servo period the sequencer is ticked and its angles
//! written out as servo pulses.
//!
//! Seven hobby servos sit on GPIO2..GPIO8, which map to PWM slices 1-4
//! (A/B pairs, slice 4 only uses channel A). Each slice counts at 1 MHz
//! so compare values are pulse widths in microseconds.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Duration, Instant, Ticker};
use fixed::traits::ToFixed;

use robolink_core::config::ServoLimits;
use robolink_core::dispatch;
use robolink_core::timeline::Sequencer;
use robolink_protocol::SERVO_COUNT;

use crate::channels::TIMELINE_CMD;

/// Sequencer update interval in milliseconds (one servo period)
pub const SERVO_INTERVAL_MS: u64 = 20;

/// PWM slices driving the servos
pub const SERVO_SLICES: usize = SERVO_COUNT.div_ceil(2);

/// 125 MHz system clock / 125 = 1 MHz counter
const PWM_DIVIDER: u8 = 125;

/// 20 ms period at 1 MHz (50 Hz)
const PWM_TOP: u16 = 19_999;

/// Pulse width at 0°
const MIN_PULSE_US: f32 = 500.0;

/// Pulse width at 180°
const MAX_PULSE_US: f32 = 2500.0;

/// Convert an angle in degrees to a pulse width in microseconds
///
/// Angles outside 0-180° are clamped.
pub fn pulse_us(angle: f32) -> u16 {
    let angle = angle.max(0.0).min(180.0);
    (MIN_PULSE_US + angle * (MAX_PULSE_US - MIN_PULSE_US) / 180.0) as u16
}

/// PWM outputs for all servos
pub struct ServoBank {
    slices: [Pwm<'static>; SERVO_SLICES],
    configs: [PwmConfig; SERVO_SLICES],
}

impl ServoBank {
    /// Slice configuration: 1 MHz counter, 50 Hz period, outputs low
    pub fn slice_config() -> PwmConfig {
        let mut config = PwmConfig::default();
        config.divider = PWM_DIVIDER.to_fixed();
        config.top = PWM_TOP;
        config.compare_a = 0;
        config.compare_b = 0;
        config
    }

    /// Wrap PWM slices built with [`slice_config`](Self::slice_config)
    ///
    /// Servo `2n` is on channel A of slice `n`, servo `2n + 1` on channel B.
    pub fn new(slices: [Pwm<'static>; SERVO_SLICES]) -> Self {
        let config = Self::slice_config();
        Self {
            slices,
            configs: core::array::from_fn(|_| config.clone()),
        }
    }

    /// Update every servo pulse
    pub fn write(&mut self, angles: &[f32; SERVO_COUNT]) {
        for (servo, &angle) in angles.iter().enumerate() {
            let config = &mut self.configs[servo / 2];
            if servo % 2 == 0 {
                config.compare_a = pulse_us(angle);
            } else {
                config.compare_b = pulse_us(angle);
            }
        }

        for (pwm, config) in self.slices.iter_mut().zip(self.configs.iter()) {
            pwm.set_config(config);
        }
    }
}

/// Servo task - applies timeline commands and drives the servo pulses
#[embassy_executor::task]
pub async fn servo_task(mut bank: ServoBank, limits: [ServoLimits; SERVO_COUNT]) {
    info!("Servo task started");

    let mut sequencer = Sequencer::new(limits);
    let receiver = TIMELINE_CMD.receiver();

    // Hold the initial pose before anything arrives
    bank.write(&sequencer.angles());

    let mut ticker = Ticker::every(Duration::from_millis(SERVO_INTERVAL_MS));
    let start = Instant::now();
    let mut pings = 0u32;

    loop {
        match select(ticker.next(), receiver.receive()).await {
            Either::First(()) => {
                if sequencer.pings() != pings {
                    pings = sequencer.pings();
                    debug!("Ping #{}", pings);
                }

                let now_ms = start.elapsed().as_millis() as u32;
                let angles = sequencer.tick(now_ms);
                bank.write(&angles);
            }
            Either::Second(command) => {
                debug!("Timeline command: {:?}", command.id());
                dispatch(&mut sequencer, command);
            }
        }
    }
}
