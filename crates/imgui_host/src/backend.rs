//! Rendering backend contract
//!
//! A backend turns a frame's draw data into presented pixels for one native
//! window, and reports timing and scale back to the frame loop. Backends are
//! implemented per platform/renderer outside this crate; the window only ever
//! sees them as `Box<dyn Backend>`.

use crate::color::Color;
use crate::error::BackendError;
use crate::gui::{DrawData, Io};
use crate::host::{Host, NativeHandle};
use crate::window::message::{Accel, KeyMessage, Message};

/// Per-window renderer
pub trait Backend {
    /// Prepare for a new frame (called before the library frame starts)
    fn begin_frame(&mut self);

    /// Present the frame's draw data over `clear_color`
    fn draw_frame(&mut self, draw_data: &DrawData, clear_color: Color);

    /// Finish the frame, whether or not it was drawn
    fn end_frame(&mut self);

    /// Physical pixels per logical unit for the window
    fn scale_factor(&self) -> f32;

    /// Seconds since the previous frame started
    fn delta_time(&mut self) -> f32;

    /// Offer a window message to the backend first
    ///
    /// Returning `true` consumes the message and bypasses the window's own
    /// handling.
    fn handle_message(&mut self, message: &Message) -> bool;

    /// Decide whether the library consumes an intercepted keystroke
    ///
    /// Eaten keystrokes do not reach the host's own shortcut handling.
    fn translate_accel(&mut self, message: &KeyMessage, io: &Io) -> Accel;
}

/// Creates backends for freshly created native windows
pub trait BackendFactory {
    /// Bind a backend to `window`
    ///
    /// # Errors
    /// Returns a [`BackendError`] when no renderer can be set up for the
    /// window. The caller rolls back the window entirely.
    fn create(&self, window: NativeHandle, host: &dyn Host) -> Result<Box<dyn Backend>, BackendError>;
}
