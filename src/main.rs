//! Synthesizer Panel Main Application
//!
//! Entry point for the STM32G474 synthesizer front panel.
//! Brings up the peripherals, applies the boot frequency and hands the
//! CPU to the control loop, which never returns.

#![no_std]
#![no_main]

use defmt::{error, info, unwrap};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::Uart;
use {defmt_rtt as _, panic_probe as _};

use synth_panel::prelude::*;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Synth Panel Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // I2C1 for the Si5351A: PB8 = SCL, PB9 = SDA
    let i2c = I2c::new_blocking(
        p.I2C1,
        p.PB8,
        p.PB9,
        Hertz(I2C_FREQUENCY_HZ),
        i2c::Config::default(),
    );
    let synth = Si5351::new(I2cBus::new(i2c), CrystalLoad::default(), DriveStrength::default());

    info!("I2C1 initialized at {} Hz", I2C_FREQUENCY_HZ);

    // USART1 to the host: PA10 = RX, PA9 = TX
    let uart = unwrap!(Uart::new_blocking(p.USART1, p.PA10, p.PA9, cat_config()));
    let link = HostUart::new(uart);

    info!("CAT link at {} baud", CAT_BAUD_RATE);

    let buttons = PanelButtons::new(
        Input::new(p.PC0, Pull::Down),
        Input::new(p.PC1, Pull::Down),
        Input::new(p.PC2, Pull::Up),
        Input::new(p.PC3, Pull::Down),
        Input::new(p.PA8, Pull::Down),
    );
    let tx = TxEnable::new(Output::new(p.PB0, Level::Low, Speed::Low));

    let controls = Controls::new(ControlState::default(), synth, tx);
    let mut controller = Controller::new(link, buttons, controls);

    if let Err(e) = controller.start() {
        error!("Si5351 bring-up failed: {}", e);
    }

    info!("Entering control loop at {}", controller.controls().state().frequency());
    controller.run()
}
