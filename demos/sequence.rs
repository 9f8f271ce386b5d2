//! Runs the two demonstration sequences on the host against dummy pins.
//!
//! Every flip is logged at trace level, so run it with
//! `RUST_LOG=trace cargo run --example sequence` to follow what would be sent to the chain.
use std::fmt::Write;

use flipdisc::dummypins::{DummyOutputPin, NoWait};
use flipdisc::spi::BitBangSpi;
use flipdisc::{FlipDisc, FlipError, Glyph, ModuleKind::*};

type Demo = FlipDisc<
    BitBangSpi<std::convert::Infallible, DummyOutputPin, DummyOutputPin, flipdisc::spi::NoDelay>,
    DummyOutputPin,
    DummyOutputPin,
    DummyOutputPin,
    NoWait,
>;

// 7-segment modules with a separator in between
fn seg_and_dots(display: &mut Demo) -> Result<(), FlipError> {
    display.init(&[Seg, Dots, Seg])?;
    display.test()?;

    display.all()?;
    display.clear()?;

    display.set_delay(50);
    display.to_dot(0, 0, true)?;
    display.to_dot(0, 1, true)?;
    display.dot(0, &[false, false])?;

    display.set_delay(0);
    for n in 0..10 {
        if let Some(glyph) = Glyph::digit(n) {
            display.to_seg(0, glyph)?;
            display.to_seg(1, glyph)?;
        }
    }
    display.seg(&[Glyph::MINUS, Glyph::DEGREE])?;

    display.clear()
}

// a row of 2x1 modules flipped disc by disc, then as whole modules
fn disc_2x1(display: &mut Demo) -> Result<(), FlipError> {
    display.init(&[D2x1, D2x1, D2x1])?;
    display.test()?;

    display.set_delay(100);
    for module in 0..3 {
        display.disc_2x1(module, 0, true)?;
        display.disc_2x1(module, 1, true)?;
    }
    for module in 0..3 {
        display.display_2x1(module, &[false, false])?;
    }
    display.display_2x1(1, &[true, false])?;

    display.clear()
}

fn main() {
    env_logger::init();

    let spi = BitBangSpi::new(DummyOutputPin, DummyOutputPin).expect("Infallible cannot fail");
    let mut display = FlipDisc::new(spi, DummyOutputPin, DummyOutputPin, DummyOutputPin, NoWait)
        .expect("Infallible cannot fail");

    seg_and_dots(&mut display).expect("seg and dots sequence");
    disc_2x1(&mut display).expect("2x1 sequence");

    display.init(&[Seg, Seg, Seg, Seg]).expect("4 digit chain");
    write!(display, "{:>4}", 2024).expect("fits on 4 digits");
    println!("final state: {:?}", (0..4).map(|m| display.module_state(m)).collect::<Vec<_>>());
}
