//! Library cursor shapes to native cursors

use crate::gui::MouseCursor;
use crate::host::NativeCursor;

/// Native cursor for a library cursor, `None` meaning hidden
///
/// Some host toolkits ignore a request to hide the cursor. That is a known
/// limitation of those hosts.
pub const fn native_cursor(cursor: MouseCursor) -> Option<NativeCursor> {
    match cursor {
        MouseCursor::None => None,
        MouseCursor::Arrow => Some(NativeCursor::Arrow),
        MouseCursor::TextInput => Some(NativeCursor::IBeam),
        MouseCursor::ResizeAll => Some(NativeCursor::SizeAll),
        MouseCursor::ResizeNS => Some(NativeCursor::SizeNS),
        MouseCursor::ResizeEW => Some(NativeCursor::SizeWE),
        MouseCursor::ResizeNESW => Some(NativeCursor::SizeNESW),
        MouseCursor::ResizeNWSE => Some(NativeCursor::SizeNWSE),
        MouseCursor::Hand => Some(NativeCursor::Hand),
        MouseCursor::NotAllowed => Some(NativeCursor::No),
    }
}
