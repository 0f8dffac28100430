//! Host platform interface
//!
//! The host is the application that owns the message pump and the native
//! windowing system. Everything this crate needs from it (timers, keyboard
//! accelerators, native windows, cursor and capture, key state, coordinate
//! conversion, theme colors) goes through the [`Host`] trait.
//!
//! The host calls back into the crate through [`crate::window::dispatch`]
//! for window messages, [`crate::window::translate_accel`] for registered
//! accelerator interceptors, and the [`TimerCallback`] it was given by the
//! watchdog.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Opaque native window handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeHandle(pub u64);

/// Token returned by [`Host::register_timer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Recurring timer callback registered with the host
pub type TimerCallback = fn();

/// Screen or client coordinates in host units
pub type Point = Point2<i32>;

/// Host virtual key code
pub type VirtualKey = u8;

/// Windowing flavor of the host
///
/// Several input rules differ between hosts: capture is not used on macOS,
/// wheel notches are smaller there, and Windows theme colors are stored in
/// blue-green-red order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostPlatform {
    /// Win32 host
    Windows,
    /// Cocoa host
    MacOs,
    /// GTK/X11 style host
    Linux,
}

impl HostPlatform {
    /// Platform this crate was compiled for
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::current()
    }
}

/// Rectangle in host units (right and bottom are exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge
    pub right: i32,
    /// Bottom edge
    pub bottom: i32,
}

impl Rect {
    /// Build a rectangle from a position and a size
    pub const fn from_pos_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { left: x, top: y, right: x.saturating_add(width), bottom: y.saturating_add(height) }
    }

    /// Width of the rectangle
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// Height of the rectangle
    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Whether the point lies inside the rectangle
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// Parameters for creating a native top-level window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDesc {
    /// Title bar text
    pub title: String,
    /// Initial screen rectangle
    pub rect: Rect,
}

/// Native cursor resources a window can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeCursor {
    /// Standard arrow
    Arrow,
    /// Text insertion beam
    IBeam,
    /// Four-way move
    SizeAll,
    /// Vertical resize
    SizeNS,
    /// Horizontal resize
    SizeWE,
    /// Diagonal resize (bottom-left to top-right)
    SizeNESW,
    /// Diagonal resize (top-left to bottom-right)
    SizeNWSE,
    /// Pointing hand
    Hand,
    /// Slashed circle
    No,
}

/// Host theme color slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    /// Main window background
    WindowBackground,
    /// Main window text
    WindowText,
}

/// Virtual key codes used by the default mappings
pub mod vk {
    use super::VirtualKey;

    /// Backspace
    pub const BACK: VirtualKey = 0x08;
    /// Tab
    pub const TAB: VirtualKey = 0x09;
    /// Enter
    pub const RETURN: VirtualKey = 0x0D;
    /// Shift (either side)
    pub const SHIFT: VirtualKey = 0x10;
    /// Control (either side)
    pub const CONTROL: VirtualKey = 0x11;
    /// Alt (either side)
    pub const MENU: VirtualKey = 0x12;
    /// Escape
    pub const ESCAPE: VirtualKey = 0x1B;
    /// Space bar
    pub const SPACE: VirtualKey = 0x20;
    /// Page up
    pub const PRIOR: VirtualKey = 0x21;
    /// Page down
    pub const NEXT: VirtualKey = 0x22;
    /// End
    pub const END: VirtualKey = 0x23;
    /// Home
    pub const HOME: VirtualKey = 0x24;
    /// Left arrow
    pub const LEFT: VirtualKey = 0x25;
    /// Up arrow
    pub const UP: VirtualKey = 0x26;
    /// Right arrow
    pub const RIGHT: VirtualKey = 0x27;
    /// Down arrow
    pub const DOWN: VirtualKey = 0x28;
    /// Insert
    pub const INSERT: VirtualKey = 0x2D;
    /// Delete
    pub const DELETE: VirtualKey = 0x2E;
    /// Left Windows / Command key
    pub const LWIN: VirtualKey = 0x5B;
}

/// Services the hosting application provides
///
/// All methods are called on the host UI thread. Implementations may deliver
/// [`crate::window::Message::Destroy`] synchronously from
/// [`Host::destroy_window`]; the crate never holds a window borrow across
/// that call.
pub trait Host {
    /// Windowing flavor of this host
    fn platform(&self) -> HostPlatform {
        HostPlatform::current()
    }

    /// Register a recurring timer callback
    fn register_timer(&self, callback: TimerCallback) -> TimerId;

    /// Remove a timer registered with [`Host::register_timer`]
    fn unregister_timer(&self, timer: TimerId);

    /// Route keyboard accelerators for `window` through
    /// [`crate::window::translate_accel`] before normal shortcut handling
    fn register_accelerator(&self, window: NativeHandle);

    /// Stop intercepting accelerators for `window`
    fn unregister_accelerator(&self, window: NativeHandle);

    /// Create a visible top-level window
    ///
    /// Returns `None` when the host cannot create windows at all.
    fn create_window(&self, desc: &WindowDesc) -> Option<NativeHandle>;

    /// Destroy a native window
    fn destroy_window(&self, window: NativeHandle);

    /// Title bar text
    fn window_text(&self, window: NativeHandle) -> String;

    /// Replace the title bar text
    fn set_window_text(&self, window: NativeHandle, text: &str);

    /// Outer window rectangle in screen coordinates
    fn window_rect(&self, window: NativeHandle) -> Rect;

    /// Move and resize the window
    fn set_window_rect(&self, window: NativeHandle, rect: Rect);

    /// Size of the client area
    fn client_size(&self, window: NativeHandle) -> (i32, i32);

    /// Show or hide the window
    fn show_window(&self, window: NativeHandle, visible: bool);

    /// Current theme color in host byte order
    fn theme_color(&self, color: ThemeColor) -> u32;

    /// Select the cursor shown over the client area (`None` hides it)
    fn set_cursor(&self, cursor: Option<NativeCursor>);

    /// Window currently holding mouse capture
    fn capture(&self) -> Option<NativeHandle>;

    /// Route further mouse events to `window`
    fn set_capture(&self, window: NativeHandle);

    /// Release mouse capture
    fn release_capture(&self);

    /// Whether a key is physically down right now
    fn async_key_state(&self, key: VirtualKey) -> bool;

    /// Pointer position in screen coordinates
    fn cursor_pos(&self) -> Point;

    /// Window or view under a screen point
    fn window_from_point(&self, point: Point) -> Option<NativeHandle>;

    /// Convert screen coordinates to `window` client coordinates
    fn screen_to_client(&self, window: NativeHandle, point: Point) -> Point;

    /// Whether `child` is a (possibly nested) child view of `parent`
    fn is_child(&self, parent: NativeHandle, child: NativeHandle) -> bool;

    /// Report a recoverable error to the user
    fn report_error(&self, message: &str);
}
