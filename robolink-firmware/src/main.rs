//! Robolink - Robot Arm Remote Control Firmware
//!
//! Main firmware binary for RP2040-based robot arms. A host sends
//! `#ID:ARG:...%` frames over UART0; the remote task parses them and the
//! servo task plays them back on seven hobby servos.
//!
//! ```text
//! UART0 ─► remote_task ─► TIMELINE_CMD ─► servo_task ─► PWM slices 1-4
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use robolink_core::config::RobotConfig;
use robolink_hal::UartConfig;

mod channels;
mod tasks;
mod timeline;
mod uart;

use tasks::ServoBank;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Robolink firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = RobotConfig::default();
    info!(
        "Config: poll {} bytes, link timeout {}ms",
        config.remote.max_bytes_per_poll, config.remote.link_timeout_ms
    );
    if config.remote.max_frames_per_poll() > channels::TIMELINE_CHANNEL_SIZE {
        warn!("Poll budget exceeds timeline queue, commands may be dropped");
    }

    // Host link: UART0 on GPIO0 (TX) / GPIO1 (RX)
    let link = UartConfig::default();
    info!("Host link: {} baud", link.baudrate);
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let serial = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart::rp_config(&link))
        .into_buffered(Irqs, tx_buf, rx_buf);
    // Nothing is sent back to the host
    let (_tx, rx) = serial.split();

    // Servos on GPIO2..GPIO8
    let slice = ServoBank::slice_config;
    let bank = ServoBank::new([
        Pwm::new_output_ab(p.PWM_SLICE1, p.PIN_2, p.PIN_3, slice()),
        Pwm::new_output_ab(p.PWM_SLICE2, p.PIN_4, p.PIN_5, slice()),
        Pwm::new_output_ab(p.PWM_SLICE3, p.PIN_6, p.PIN_7, slice()),
        Pwm::new_output_a(p.PWM_SLICE4, p.PIN_8, slice()),
    ]);

    // Spawn tasks
    spawner.spawn(tasks::servo_task(bank, config.servos)).unwrap();
    spawner.spawn(tasks::remote_task(rx, config.remote)).unwrap();

    info!("All tasks spawned");
}

