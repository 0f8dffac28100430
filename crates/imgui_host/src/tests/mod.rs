//! Cross-module scenarios run against the headless collaborators

mod shared_resources;
mod window_lifecycle;

use crate::gui::Io;
use crate::headless::Headless;
use crate::host::NativeHandle;
use crate::window::{Window, WindowId};

/// Open a 400x300 window at the screen origin
fn open(headless: &Headless, title: &str) -> WindowId {
    open_at(headless, title, 0, 0)
}

fn open_at(headless: &Headless, title: &str, x: i32, y: i32) -> WindowId {
    Window::open(&headless.platform(), title, x, y, 400, 300).unwrap()
}

fn native(id: WindowId) -> NativeHandle {
    Window::with(id, |window| window.native()).unwrap()
}

/// Enter a frame and snapshot the input the library sees
fn enter_frame(id: WindowId) -> Io {
    Window::with(id, |window| {
        window.enter_frame();
        window.io().clone()
    })
    .unwrap()
}

fn end_frame(id: WindowId, render: bool) {
    Window::with(id, |window| window.end_frame(render)).unwrap();
}

fn in_frame(id: WindowId) -> bool {
    Window::with(id, |window| window.is_in_frame()).unwrap()
}
