//! Serial remote control task
//!
//! Drains the UART every few milliseconds and forwards parsed commands to
//! the servo task through [`ChannelTimeline`].

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{Duration, Instant, Ticker};

use robolink_core::config::RemoteConfig;
use robolink_core::RemoteControl;

use crate::timeline::ChannelTimeline;
use crate::uart::SerialRx;

/// Poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 5;

/// Remote task - polls the serial link and dispatches commands
#[embassy_executor::task]
pub async fn remote_task(rx: BufferedUartRx, config: RemoteConfig) {
    info!("Remote task started");

    let mut timeline = ChannelTimeline::new();
    let mut remote = RemoteControl::new(&mut timeline, SerialRx::new(rx), config);

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let start = Instant::now();
    let mut link_active = false;

    loop {
        ticker.next().await;

        let now_ms = start.elapsed().as_millis() as u32;
        let dispatched = remote.update(now_ms);
        if dispatched > 0 {
            trace!("Dispatched {} commands", dispatched);
        }

        let stats = remote.stats();
        if stats.link_active != link_active {
            link_active = stats.link_active;
            if link_active {
                info!("Host link up");
            } else {
                info!(
                    "Host link down ({} frames, {} rejected, {} overflows)",
                    stats.frames_dispatched, stats.frames_rejected, stats.overflows
                );
            }
        }
    }
}
