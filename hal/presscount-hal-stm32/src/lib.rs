//! STM32-specific HAL for the Presscount firmware
//!
//! This crate provides STM32 implementations of the `presscount-hal` traits
//! on top of embassy-stm32, targeting the STM32F407VG on the Discovery
//! board (F4-series EXTI register layout).
//!
//! # Features
//!
//! - `stm32f407vg` - Chip selection (enabled by the firmware)
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! Peripheral bring-up (clock tree, pin mux) stays with `embassy_stm32::init`.
//! This crate wraps the resulting peripherals so the core and drivers can
//! use them through the HAL traits.

#![no_std]

pub mod exti;
pub mod i2c;
pub mod time;

pub use exti::{ExtiLine, Port};
pub use i2c::{BlockingI2c, I2cBusError};
pub use time::EmbassyClock;
