//! Host window messages

use crate::gui::MouseButton;
use crate::host::{NativeHandle, VirtualKey};

/// Wheel axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelAxis {
    /// Regular wheel
    Vertical,
    /// Tilt wheel or horizontal scroll
    Horizontal,
}

/// Message delivered by the host to a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The user asked to close the window
    Close,
    /// The native window is being destroyed
    Destroy,
    /// The pointer moved over the client area
    MouseMove,
    /// The host asks which cursor to show
    SetCursor {
        /// Whether the pointer is over the client area
        client: bool,
    },
    /// Wheel rotation in host-native units
    MouseWheel {
        /// Axis of the rotation
        axis: WheelAxis,
        /// Signed delta (one notch is 120 on most hosts)
        delta: i16,
    },
    /// A mouse button went down
    ButtonDown(MouseButton),
    /// A mouse button went up
    ButtonUp(MouseButton),
    /// A key changed state
    Key {
        /// Virtual key code
        key: VirtualKey,
        /// Whether it is now down
        down: bool,
    },
    /// A character was typed
    Char(u32),
    /// Anything else, passed through untouched
    Other {
        /// Host message identifier
        id: u32,
        /// First message parameter
        wparam: usize,
        /// Second message parameter
        lparam: isize,
    },
}

/// Outcome of [`crate::window::dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageResult {
    /// The message was consumed
    Handled,
    /// The host should run its default handling
    Default,
}

/// Keystroke offered to an accelerator interceptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMessage {
    /// Window or view the keystroke targets
    pub target: NativeHandle,
    /// Virtual key code
    pub key: VirtualKey,
    /// Whether this is a key-down
    pub down: bool,
}

/// Decision of an accelerator interceptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accel {
    /// The keystroke is not for this window; keep looking
    NotOurs,
    /// Consume the keystroke before the host's shortcuts see it
    Eat,
    /// The keystroke targets this window but should still trigger host shortcuts
    PassToHost,
}
