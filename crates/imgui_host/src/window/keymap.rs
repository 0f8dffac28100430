//! Default key bindings per host platform

use crate::gui::NavKey;
use crate::host::{vk, HostPlatform, VirtualKey};
use std::collections::HashMap;

const VIRTUAL_KEY_MAP: [(NavKey, VirtualKey); 22] = [
    (NavKey::Tab, vk::TAB),
    (NavKey::LeftArrow, vk::LEFT),
    (NavKey::RightArrow, vk::RIGHT),
    (NavKey::UpArrow, vk::UP),
    (NavKey::DownArrow, vk::DOWN),
    (NavKey::PageUp, vk::PRIOR),
    (NavKey::PageDown, vk::NEXT),
    (NavKey::Home, vk::HOME),
    (NavKey::End, vk::END),
    (NavKey::Insert, vk::INSERT),
    (NavKey::Delete, vk::DELETE),
    (NavKey::Backspace, vk::BACK),
    (NavKey::Space, vk::SPACE),
    (NavKey::Enter, vk::RETURN),
    (NavKey::Escape, vk::ESCAPE),
    (NavKey::KeyPadEnter, vk::RETURN),
    (NavKey::A, b'A'),
    (NavKey::C, b'C'),
    (NavKey::V, b'V'),
    (NavKey::X, b'X'),
    (NavKey::Y, b'Y'),
    (NavKey::Z, b'Z'),
];

/// Navigation key bindings for `platform`
///
/// macOS hosts feed keys to the library through their own input view, so
/// they get no virtual key bindings.
pub fn default_key_map(platform: HostPlatform) -> HashMap<NavKey, VirtualKey> {
    match platform {
        HostPlatform::MacOs => HashMap::new(),
        HostPlatform::Windows | HostPlatform::Linux => VIRTUAL_KEY_MAP.into_iter().collect(),
    }
}
