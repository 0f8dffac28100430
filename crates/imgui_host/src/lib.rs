//! # imgui_host
//!
//! Native top-level windows that each drive an immediate-mode GUI context.
//!
//! ## Features
//!
//! - **Frame lifecycle**: enter/begin/end frame protocol per window, with a
//!   watchdog heartbeat that completes stalled frames and retires idle windows
//! - **Input normalization**: sub-frame clicks, mouse capture, wheel scaling,
//!   modifiers, text filtering, cursor shapes and accelerator interception
//! - **Shared resources**: one font atlas and one host timer per UI thread,
//!   released with the last window
//! - **Safe handles**: generation-checked window handles that can travel
//!   through binding layers as plain integers
//!
//! The host windowing system, the renderer and the IMGUI library are
//! collaborators behind the [`Host`], [`Backend`] and [`GuiContext`] traits.
//! The [`headless`] module implements all three in memory.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imgui_host::prelude::*;
//!
//! fn main() -> Result<(), WindowError> {
//!     let headless = Headless::new();
//!     let window = Window::open(&headless.platform(), "Demo", 0, 0, 400, 300)?;
//!
//!     Window::with(window, |window| {
//!         window.enter_frame();
//!         // draw widgets into window.context()
//!     });
//!
//!     // the host timer presents the frame
//!     headless.host.run_timers();
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod foundation;
pub mod gui;
pub mod headless;
pub mod host;
pub mod platform;
pub mod resource;
pub mod watchdog;
pub mod window;

#[cfg(test)]
mod tests;

pub use backend::{Backend, BackendFactory};
pub use color::Color;
pub use config::{Config, ConfigError, ContextConfig};
pub use error::{BackendError, WindowError};
pub use gui::{GuiContext, GuiFactory};
pub use host::{Host, HostPlatform, NativeHandle};
pub use platform::Platform;
pub use window::{Window, WindowId};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        backend::{Backend, BackendFactory},
        color::Color,
        config::{Config, ContextConfig},
        error::{BackendError, WindowError},
        gui::{DrawData, GuiContext, GuiFactory, GuiStyle, Io, MouseButton, MouseCursor},
        headless::Headless,
        host::{Host, HostPlatform, NativeHandle, Rect},
        platform::Platform,
        window::{dispatch, translate_accel, Accel, KeyMessage, Message, MessageResult, WheelAxis, Window, WindowId},
    };
}
