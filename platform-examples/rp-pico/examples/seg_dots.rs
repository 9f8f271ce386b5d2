//! Flips a chain of two 7-segment modules with a dots module in between on a Raspberry Pico
//!
//! Pin layout and connection for this example
//!
//! flip-disc | Pico pin |  Pico function       | purpose
//!  DIN         pin 5      GP3 (SPI0 TX)         serial data into the first module
//!  CLK         pin 4      GP2 (SPI0 SCK)        serial clock
//!  PL          pin 9      GP6 (gpio6)           latch of the module chain
//!  EN          pin 10     GP7 (gpio7)           release the pulse, power supply module
//!  CH          pin 11     GP8 (gpio8)           charge the capacitors, power supply module
//!  GND         pin 38     GND
//!
//! PLEASE: double check EN and CH before powering the supply. Swapped lines release the pulse
//! while charging, which the coils and the supply do not survive for long.

#![deny(unsafe_code)]
#![deny(warnings)]
#![no_std]
#![no_main]

use panic_halt as _;
use cortex_m_rt::entry;
use embedded_time::rate::*;
use core::fmt::Write;
use rp_pico as bsp;
use bsp::hal::{
    prelude::*,
    pac,
    sio::Sio,
    watchdog::Watchdog,
};

use flipdisc::{FlipDisc, Glyph, ModuleKind::*};

#[entry]
fn main() -> ! {

    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    let clocks = bsp::hal::clocks::init_clocks_and_plls(
        bsp::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let sio = Sio::new(pac.SIO);
    let pins = bsp::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let _spi_sclk = pins.gpio2.into_mode::<bsp::hal::gpio::FunctionSpi>();
    let _spi_mosi = pins.gpio3.into_mode::<bsp::hal::gpio::FunctionSpi>();
    let spi = bsp::hal::Spi::<_, _, 8>::new(pac.SPI0);

    // the shift registers latch on the rising edge, MODE_0, and long cables want it slow
    let flip_spi = spi.init(
        &mut pac.RESETS,
        clocks.peripheral_clock.freq(),
        1_000_000u32.Hz(),
        &embedded_hal::spi::MODE_0,
    );

    let flip_pl = pins.gpio6.into_push_pull_output();
    let flip_en = pins.gpio7.into_push_pull_output();
    let flip_ch = pins.gpio8.into_push_pull_output();

    let delay = cortex_m::delay::Delay::new(core.SYST, clocks.system_clock.freq().integer());

    let mut display = FlipDisc::new(flip_spi, flip_en, flip_ch, flip_pl, delay).unwrap();
    display.init(&[Seg, Dots, Seg]).unwrap();

    // flip everything once, so we know where all discs are
    display.test().unwrap();

    loop {
        display.all().unwrap();
        display.clear().unwrap();

        // slow "running" effect over the dots
        display.set_delay(50);
        display.to_dot(0, 0, true).unwrap();
        display.to_dot(0, 1, true).unwrap();
        display.dot(0, &[false, false]).unwrap();
        display.set_delay(0);

        for n in 0..10 {
            display.to_seg(0, Glyph::digit(n).unwrap()).unwrap();
            display.to_seg(1, Glyph::digit(9 - n).unwrap()).unwrap();
        }

        display.seg(&[Glyph::MINUS, Glyph::MINUS]).unwrap();
        display.set_cursor(0);
        write!(display, "2°").unwrap();
    }
}

// End of file
