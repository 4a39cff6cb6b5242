//! Duotherm - Dual-source temperature comparison firmware
//!
//! Reads an AM2320 and a 10 kΩ NTC thermistor side by side on a
//! Nucleo-F401RE, shows both averages on an SSD1306 OLED and the deviation
//! between them on a TM1637 4-digit display.

#![no_std]
#![no_main]

mod board;

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, AdcChannel};
use embassy_stm32::gpio::{Flex, Level, Output, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use duotherm_core::AcquisitionCycle;
use duotherm_drivers::display::{Ssd1306, TextScreen};
use duotherm_drivers::segment::Tm1637;
use duotherm_drivers::sensor::{Am2320, NtcThermistor};
use duotherm_hal_stm32::i2c::peripheral_config;
use duotherm_hal_stm32::{AnalogPin, BlockingI2c, FlexLine, PushPull};

/// Main entry point
///
/// The acquisition cycle blocks on its own delays; the executor only
/// provides the entry point and the time driver.
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Duotherm firmware starting...");

    let p = embassy_stm32::init(Default::default());
    let config = board::station_config();

    // Shared I2C1 (PB8=SCL, PB9=SDA)
    let i2c = I2c::new_blocking(p.I2C1, p.PB8, p.PB9, peripheral_config(&board::I2C));
    let bus = RefCell::new(BlockingI2c::new(i2c));

    let mut panel = Ssd1306::new(&bus, board::OLED_ADDRESS);
    if let Err(e) = panel.init() {
        error!("Failed to initialize OLED: {:?}", e);
    } else {
        info!("OLED initialized");
    }
    let screen = TextScreen::new(panel);

    let sensor = Am2320::new(&bus, Delay, config.sensor);

    // Thermistor divider on PA0
    let adc = Adc::new(p.ADC1);
    let thermistor = NtcThermistor::new(
        AnalogPin::new(adc, p.PA0.degrade_adc()),
        &config.thermistor,
    );

    // TM1637 (PA10=CLK, PB3=DIO)
    let clk = PushPull::new(Output::new(p.PA10, Level::High, Speed::Low));
    let dio = FlexLine::new(Flex::new(p.PB3), Pull::Up, Speed::Low);
    let segment = Tm1637::new(clk, dio, Delay, &config.segment);

    info!("Peripherals initialized");

    let mut cycle = AcquisitionCycle::new(sensor, thermistor, screen, segment, Delay, config.cycle);
    cycle.run()
}
