//! Presscount Firmware
//!
//! Counts debounced button presses on PA0 and shows the running total on a
//! 16x2 character LCD behind a PCF8574 I2C backpack (STM32F407VG).
//!
//! Two contexts share the count: the EXTI0 handler writes it, the main loop
//! reads it and redraws the display when it changes.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Pull};
use embassy_stm32::i2c::I2c;
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use presscount_core::{AppConfig, EdgeCounter, EdgeOutcome, RenderLoop, SharedCounter};
use presscount_drivers::lcd::Lcd1602;
use presscount_hal::{EdgeInterrupt, MonotonicClock};
use presscount_hal_stm32::i2c::peripheral_config;
use presscount_hal_stm32::{BlockingI2c, EmbassyClock, ExtiLine, Port};

/// EXTI line the button is wired to (PA0)
const BUTTON_LINE: usize = 0;

/// Press count, written from EXTI0 and read by the render loop
static COUNTER: SharedCounter = SharedCounter::new();

/// Interrupt-side debounce state, installed once before EXTI0 is unmasked
static EDGES: Mutex<CriticalSectionRawMutex, RefCell<Option<EdgeCounter<'static>>>> =
    Mutex::new(RefCell::new(None));

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Presscount firmware starting...");

    let p = embassy_stm32::init(Default::default());
    let config = AppConfig::default();

    // Button: PA0, pulled down, pressed = high
    let _button = Input::new(p.PA0, Pull::Down);

    let Some(writer) = COUNTER.take_writer() else {
        error!("Counter writer already claimed");
        halt();
    };
    let edges = EdgeCounter::new(writer, EmbassyClock.now_ms());
    EDGES.lock(|cell| *cell.borrow_mut() = Some(edges));

    ExtiLine::configure_rising(Port::A, BUTTON_LINE);
    interrupt::EXTI0.set_priority(Priority::P0);
    // SAFETY: the handler only touches EDGES and COUNTER, both initialized above
    unsafe { interrupt::EXTI0.enable() };
    info!("Button armed on PA0");

    // LCD on I2C1 (PB6=SCL, PB7=SDA)
    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, peripheral_config(&config.bus));
    let mut lcd = Lcd1602::new(BlockingI2c::new(i2c), Delay, config.lcd_address);

    if let Err(e) = lcd.init() {
        error!("Failed to initialize LCD at {=u8:#x}: {:?}", config.lcd_address, e);
        halt();
    }
    info!("LCD initialized");

    Timer::after_millis(u64::from(config.post_init_settle_ms)).await;

    RenderLoop::with_config(COUNTER.reader(), config.render).run(
        &mut lcd,
        || {},
        |e| warn!("LCD update failed: {:?}", e),
    )
}

#[interrupt]
fn EXTI0() {
    EDGES.lock(|cell| {
        let mut line = ExtiLine::new(BUTTON_LINE);
        match cell.borrow_mut().as_mut() {
            Some(edges) => match edges.on_interrupt(&mut line, &EmbassyClock) {
                EdgeOutcome::Accepted(count) => debug!("Press {}", count),
                EdgeOutcome::Rejected => trace!("Bounce rejected"),
            },
            None => line.clear_pending(),
        }
    });
}

/// Stop for good: mask interrupts and spin
fn halt() -> ! {
    cortex_m::interrupt::disable();
    loop {
        cortex_m::asm::nop();
    }
}
