//! Presscount Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the counter core and the display
//! driver are written against, so both can be exercised on the host with
//! mocks and run on the board with chip-specific implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  presscount-core / presscount-drivers   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  presscount-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ presscount-hal-   │
//!           │      stm32        │
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Blocking I2C master writes
//! - [`gpio::EdgeInterrupt`] - External interrupt line acknowledgement
//! - [`time::MonotonicClock`] - Millisecond uptime clock

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::EdgeInterrupt;
pub use i2c::{I2cBus, I2cConfig};
pub use time::MonotonicClock;
