//! Board-agnostic core logic for the button counter firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Integer to text conversion
//! - Shared press counter and the debouncing edge counter
//! - Render loop that mirrors the count onto a character display
//! - Character display trait
//! - Configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod counter;
pub mod render;
pub mod text;
pub mod traits;

pub use config::{AppConfig, FieldPolicy, RenderConfig};
pub use counter::{CounterReader, CounterWriter, EdgeCounter, EdgeOutcome, SharedCounter};
pub use render::{RenderLoop, RenderOutcome};
pub use traits::{CharacterDisplay, DisplayCommand};
