//! Input buffering between host messages and frames
//!
//! Host messages arrive at arbitrary times while the library reads input once
//! per frame. Button transitions and wheel deltas are buffered here and
//! consumed at the next frame start.

use crate::gui::{MouseButton, MOUSE_BUTTON_COUNT};
use crate::host::HostPlatform;
use crate::window::message::WheelAxis;
use bitflags::bitflags;

bitflags! {
    /// Two-bit state of one mouse button
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonState: u8 {
        /// The button is physically down
        const DOWN = 1 << 0;
        /// The button went down and no frame has seen it yet
        const DOWN_UNREAD = 1 << 1;
    }
}

/// Buffered mouse button state
///
/// `DOWN_UNREAD` outlives the release so a click shorter than a frame still
/// reads as down once.
#[derive(Debug, Clone, Default)]
pub struct MouseButtons {
    states: [ButtonState; MOUSE_BUTTON_COUNT],
}

impl MouseButtons {
    /// Record a native button-down
    pub fn press(&mut self, button: MouseButton) {
        self.states[button.index()] = ButtonState::DOWN | ButtonState::DOWN_UNREAD;
    }

    /// Record a native button-up
    pub fn release(&mut self, button: MouseButton) {
        self.states[button.index()].remove(ButtonState::DOWN);
    }

    /// Whether any button is physically down
    pub fn any_down(&self) -> bool {
        self.states.iter().any(|state| state.contains(ButtonState::DOWN))
    }

    /// State of one button
    pub fn state(&self, button: MouseButton) -> ButtonState {
        self.states[button.index()]
    }

    /// Per-frame read: down if either bit is set, then forget unread presses
    pub fn read(&mut self) -> [bool; MOUSE_BUTTON_COUNT] {
        let mut down = [false; MOUSE_BUTTON_COUNT];
        for (slot, state) in down.iter_mut().zip(self.states.iter_mut()) {
            *slot = !state.is_empty();
            state.remove(ButtonState::DOWN_UNREAD);
        }
        down
    }
}

/// Host-native wheel units per notch
pub const fn wheel_notch(platform: HostPlatform) -> f32 {
    match platform {
        HostPlatform::MacOs => 60.0,
        HostPlatform::Windows | HostPlatform::Linux => 120.0,
    }
}

/// Buffered wheel deltas in notches
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelDelta {
    /// Vertical notches
    pub vertical: f32,
    /// Horizontal notches
    pub horizontal: f32,
}

impl WheelDelta {
    /// Accumulate one wheel message
    pub fn accumulate(&mut self, axis: WheelAxis, delta: i16, notch: f32) {
        let notches = f32::from(delta) / notch;
        match axis {
            WheelAxis::Vertical => self.vertical += notches,
            WheelAxis::Horizontal => self.horizontal += notches,
        }
    }
}

/// Filter a typed codepoint down to printable text
///
/// Control characters (below 32) and the C1 control range (127 to 159) never
/// reach the text input queue.
pub fn text_input(codepoint: u32) -> Option<char> {
    if codepoint < 32 || (127..160).contains(&codepoint) {
        return None;
    }

    char::from_u32(codepoint)
}
