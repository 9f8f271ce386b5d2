//! Flips a chain of three 2x1 indicator modules on a Raspberry Pico
//!
//! Wiring is the same as in the seg_dots example, see there. The data line is bit-banged here
//! to show BitBangSpi, so GP2/GP3 are plain outputs.

#![deny(unsafe_code)]
#![deny(warnings)]
#![no_std]
#![no_main]

use panic_halt as _;
use cortex_m_rt::entry;
use embedded_hal::blocking::delay::DelayUs;
use rp_pico as bsp;
use bsp::hal::{
    prelude::*,
    pac,
    sio::Sio,
    watchdog::Watchdog,
};

use flipdisc::{spi::BitBangSpi, FlipDisc, ModuleKind::*};

const MODULES: usize = 3;

// busy wait on the core clock, 125 cycles per µs
struct SpinDelay;

impl DelayUs<u8> for SpinDelay {
    fn delay_us(&mut self, us: u8) {
        cortex_m::asm::delay(125 * us as u32);
    }
}

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

    let flip_clk = pins.gpio2.into_push_pull_output();
    let flip_din = pins.gpio3.into_push_pull_output();
    let flip_pl = pins.gpio6.into_push_pull_output();
    let flip_en = pins.gpio7.into_push_pull_output();
    let flip_ch = pins.gpio8.into_push_pull_output();

    // at 125 MHz the pins toggle faster than the registers see over a ribbon cable
    let flip_spi = BitBangSpi::new_with_delay(flip_clk, flip_din, SpinDelay, 2).unwrap();
    let delay = cortex_m::delay::Delay::new(core.SYST, clocks.system_clock.freq().integer());

    let mut display = FlipDisc::new(flip_spi, flip_en, flip_ch, flip_pl, delay).unwrap();
    display.init(&[D2x1; MODULES]).unwrap();
    display.test().unwrap();

    loop {
        // one disc after the other, slow enough to follow
        display.set_delay(100);
        for module in 0..MODULES {
            display.disc_2x1(module, 0, true).unwrap();
            display.disc_2x1(module, 1, true).unwrap();
        }

        // whole modules at once, the longest flip delay doubles as the pause between steps
        display.set_delay(255);
        for module in 0..MODULES {
            display.display_2x1(module, &[false, false]).unwrap();
        }
        display.display_2x1(1, &[true, false]).unwrap();
        display.clear().unwrap();
    }
}
