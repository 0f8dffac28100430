//! Foundation module - Core utilities shared by the rest of the crate
//!
//! - Logging setup
//! - Frame timing

pub mod logging;
pub mod time;
