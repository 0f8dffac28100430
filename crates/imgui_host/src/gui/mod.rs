//! Immediate-mode GUI library boundary
//!
//! The IMGUI library itself lives outside this crate. A window talks to its
//! context only through [`GuiContext`], passing the context explicitly as the
//! receiver of every per-frame operation instead of switching a global
//! "current context".
//!
//! [`Io`] is the normalized input state the window fills in before each
//! frame and the library reads while building it.

pub mod draw;
pub mod font_atlas;

pub use draw::{DrawCmd, DrawData, DrawList, DrawVert, TextureId};
pub use font_atlas::{FontAtlas, FontSource, SharedFontAtlas};

use crate::host::VirtualKey;
use bitflags::bitflags;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Number of mouse buttons tracked by the library
pub const MOUSE_BUTTON_COUNT: usize = 5;

/// Size of the key-down table (one slot per virtual key)
pub const KEY_COUNT: usize = 512;

/// Mouse position reported when the pointer is not over the window
pub const MOUSE_POS_OFFSCREEN: Vector2<f32> = Vector2::new(-f32::MAX, -f32::MAX);

/// Mouse buttons in library order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button
    Left = 0,
    /// Secondary button
    Right = 1,
    /// Wheel button
    Middle = 2,
}

impl MouseButton {
    /// Slot of this button in [`Io::mouse_down`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Cursor shape requested by the library for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseCursor {
    /// Hide the cursor
    None,
    /// Default arrow
    #[default]
    Arrow,
    /// Over a text field
    TextInput,
    /// Moving a window or a splitter in both directions
    ResizeAll,
    /// Vertical border
    ResizeNS,
    /// Horizontal border
    ResizeEW,
    /// Bottom-left corner
    ResizeNESW,
    /// Bottom-right corner
    ResizeNWSE,
    /// Over a link or button
    Hand,
    /// Disabled interaction
    NotAllowed,
}

/// Navigation and editing keys the library needs mapped to virtual keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum NavKey {
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Space,
    Enter,
    Escape,
    KeyPadEnter,
    A,
    C,
    V,
    X,
    Y,
    Z,
}

/// Built-in color styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GuiStyle {
    /// Dark theme
    #[default]
    Dark,
    /// Light theme
    Light,
    /// Classic theme
    Classic,
}

bitflags! {
    /// Capabilities the platform side advertises to the library
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BackendFlags: u32 {
        /// The platform honors [`MouseCursor`] requests
        const HAS_MOUSE_CURSORS = 1 << 0;
    }
}

/// Normalized per-frame input and display state
#[derive(Debug, Clone)]
pub struct Io {
    /// Client area size in logical units
    pub display_size: Vector2<f32>,
    /// Framebuffer pixels per logical unit
    pub display_framebuffer_scale: Vector2<f32>,
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Pointer position in client coordinates, or [`MOUSE_POS_OFFSCREEN`]
    pub mouse_pos: Vector2<f32>,
    /// Button state for the frame
    pub mouse_down: [bool; MOUSE_BUTTON_COUNT],
    /// Vertical wheel notches accumulated since the previous frame
    pub mouse_wheel: f32,
    /// Horizontal wheel notches accumulated since the previous frame
    pub mouse_wheel_h: f32,
    /// Control modifier
    pub key_ctrl: bool,
    /// Shift modifier
    pub key_shift: bool,
    /// Alt modifier
    pub key_alt: bool,
    /// Super / Command modifier
    pub key_super: bool,
    /// Key-down table indexed by virtual key
    pub keys_down: Vec<bool>,
    /// Virtual key bound to each navigation key
    pub key_map: HashMap<NavKey, VirtualKey>,
    /// Text input queued for the next frame
    pub input_queue: Vec<char>,
    /// Layout persistence file (`None` disables persistence)
    pub ini_filename: Option<PathBuf>,
    /// Name of the platform integration
    pub backend_platform_name: Option<String>,
    /// Platform capabilities
    pub backend_flags: BackendFlags,
    /// Set by the library when a widget wants keyboard input
    pub want_capture_keyboard: bool,
}

impl Default for Io {
    fn default() -> Self {
        Self {
            display_size: Vector2::zeros(),
            display_framebuffer_scale: Vector2::new(1.0, 1.0),
            delta_time: 1.0 / 60.0,
            mouse_pos: MOUSE_POS_OFFSCREEN,
            mouse_down: [false; MOUSE_BUTTON_COUNT],
            mouse_wheel: 0.0,
            mouse_wheel_h: 0.0,
            key_ctrl: false,
            key_shift: false,
            key_alt: false,
            key_super: false,
            keys_down: vec![false; KEY_COUNT],
            key_map: HashMap::new(),
            input_queue: Vec::new(),
            ini_filename: Some(PathBuf::from("imgui.ini")),
            backend_platform_name: None,
            backend_flags: BackendFlags::empty(),
            want_capture_keyboard: false,
        }
    }
}

impl Io {
    /// Queue a character for text input
    pub fn add_input_character(&mut self, character: char) {
        self.input_queue.push(character);
    }

    /// Whether a virtual key is currently recorded as down
    pub fn is_key_down(&self, key: VirtualKey) -> bool {
        self.keys_down.get(usize::from(key)).copied().unwrap_or(false)
    }
}

/// One IMGUI library context
pub trait GuiContext {
    /// Input state
    fn io(&self) -> &Io;

    /// Mutable input state
    fn io_mut(&mut self) -> &mut Io;

    /// Font atlas the context was created with
    fn font_atlas(&self) -> &SharedFontAtlas;

    /// Apply one of the built-in color styles
    fn style_colors(&mut self, style: GuiStyle);

    /// Start a frame from the current [`Io`]
    fn new_frame(&mut self);

    /// Recover from unbalanced scopes left open by the frame's draw code
    ///
    /// Each recovered inconsistency is passed to `report`.
    fn end_frame_recover(&mut self, report: &mut dyn FnMut(&str));

    /// Finish the frame and produce its draw data
    fn render(&mut self) -> &DrawData;

    /// Finish the frame without producing draw data
    fn end_frame(&mut self);

    /// Cursor the frame asked for
    fn mouse_cursor(&self) -> MouseCursor;
}

/// Creates library contexts bound to a font atlas
pub trait GuiFactory {
    /// Create a context sharing `atlas`
    fn create_context(&self, atlas: SharedFontAtlas) -> Box<dyn GuiContext>;
}
