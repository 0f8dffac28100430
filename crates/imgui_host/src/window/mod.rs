//! Native window hosting one IMGUI context
//!
//! # Frame state machine
//!
//! ```text
//!             open()                 enter_frame()
//!  (Closed) ─────────▶ Idle ◀──────────────────────▶ InFrame
//!      ▲                 │        end_frame(render)      │
//!      │   Destroy       │                               │
//!      └─────────────────┴───────────────────────────────┘
//! ```
//!
//! A window is driven from two directions. The application enters a frame,
//! draws into the context and leaves the frame open. The watchdog heartbeat
//! closes that frame on its next tick (presenting it), or retires the window
//! once the application stopped driving it.
//!
//! # Message dispatch
//!
//! The host routes native messages through [`dispatch`], keyed by native
//! handle. Input is buffered in the window and handed to the library as one
//! consistent snapshot when the next frame begins.
//!
//! No window borrow is ever held across [`Host::destroy_window`], so hosts
//! are free to deliver [`Message::Destroy`] synchronously.

pub mod cursor;
pub mod input;
pub mod keymap;
pub mod message;

pub use message::{Accel, KeyMessage, Message, MessageResult, WheelAxis};

use crate::backend::Backend;
use crate::color::Color;
use crate::config::ContextConfig;
use crate::error::WindowError;
use crate::gui::{font_atlas, BackendFlags, GuiContext, Io, MouseButton, SharedFontAtlas, MOUSE_POS_OFFSCREEN};
use crate::host::{vk, Host, HostPlatform, NativeHandle, Rect, ThemeColor, VirtualKey, WindowDesc};
use crate::platform::Platform;
use crate::resource::{self, Heartbeat, Resource, ResourceHandle};
use crate::watchdog::Watchdog;
use input::{MouseButtons, WheelDelta};
use nalgebra::Vector2;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Generation-checked handle to a live [`Window`]
pub type WindowId = ResourceHandle<Window>;

thread_local! {
    static WINDOW_SET: RefCell<HashMap<NativeHandle, WindowId>> = RefCell::new(HashMap::new());
}

/// One native top-level window and its IMGUI context
pub struct Window {
    native: NativeHandle,
    platform: HostPlatform,
    in_frame: bool,
    close_requested: bool,
    keep_alive: bool,
    clear_color: Color,
    mouse_buttons: MouseButtons,
    wheel: WheelDelta,
    wheel_notch: f32,
    // field order matters: the backend must go before the context it renders
    backend: Box<dyn Backend>,
    gui: Box<dyn GuiContext>,
    font_atlas: SharedFontAtlas,
    host: Rc<dyn Host>,
    _watchdog: Rc<Watchdog>,
}

enum Dispatched {
    Done(MessageResult),
    Destroy,
}

impl Window {
    /// Create a native window with its own context and backend
    ///
    /// # Errors
    /// Returns [`WindowError::Backend`] when the backend cannot be created.
    /// The context and native window are torn down before returning.
    ///
    /// # Panics
    /// Panics if the host cannot create a native window at all.
    pub fn open(
        platform: &Platform,
        title: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<WindowId, WindowError> {
        let host = Rc::clone(&platform.host);
        let host_platform = host.platform();
        let watchdog = Watchdog::get(&host);

        let font_atlas = font_atlas::acquire();
        let mut gui = platform.gui.create_context(Rc::clone(&font_atlas));
        setup_context(gui.as_mut(), &platform.config, host_platform);
        let clear_color = Color::from_theme(host.theme_color(ThemeColor::WindowBackground), host_platform);

        let desc = WindowDesc {
            title: title.to_string(),
            rect: Rect::from_pos_size(x, y, width, height),
        };
        let native = host.create_window(&desc).expect("native window creation failed");

        let backend = match platform.backends.create(native, &*host) {
            Ok(backend) => backend,
            Err(err) => {
                log::warn!("Backend creation failed for \"{}\": {}", title, err);
                drop(gui);
                host.destroy_window(native);
                return Err(err.into());
            }
        };

        let window = Self {
            native,
            platform: host_platform,
            in_frame: false,
            close_requested: false,
            keep_alive: true,
            clear_color,
            mouse_buttons: MouseButtons::default(),
            wheel: WheelDelta::default(),
            wheel_notch: platform.config.wheel_delta.unwrap_or_else(|| input::wheel_notch(host_platform)),
            backend,
            gui,
            font_atlas,
            host: Rc::clone(&host),
            _watchdog: watchdog,
        };

        let id = resource::register(window);
        WINDOW_SET.with(|set| set.borrow_mut().insert(native, id));
        host.register_accelerator(native);

        log::info!("Opened window {:?} \"{}\" ({}x{} at {},{})", native, title, width, height, x, y);
        Ok(id)
    }

    /// Whether `id` still refers to a live window
    pub fn exists(id: WindowId) -> bool {
        resource::exists(id)
    }

    /// Number of live windows
    pub fn count() -> usize {
        resource::count::<Self>()
    }

    /// Handles of every live window
    pub fn all() -> Vec<WindowId> {
        resource::handles::<Self>()
    }

    /// Window owning a native handle
    pub fn find(native: NativeHandle) -> Option<WindowId> {
        WINDOW_SET
            .with(|set| set.borrow().get(&native).copied())
            .filter(|&id| resource::exists(id))
    }

    /// Run `f` on a live window
    ///
    /// Returns `None` if the window is gone or already borrowed.
    pub fn with<R>(id: WindowId, f: impl FnOnce(&mut Self) -> R) -> Option<R> {
        resource::with(id, f)
    }

    /// Heartbeat every live window
    ///
    /// A window with a pending close request is destroyed. A window left in a
    /// frame gets that frame ended and presented. An idle window that did not
    /// enter a frame since the previous heartbeat is retired.
    pub fn heartbeat() {
        resource::heartbeat::<Self>();
    }

    /// Ask the host to destroy the native window
    ///
    /// Returns `false` if the window is already gone.
    pub fn close(id: WindowId) -> bool {
        let Some((host, native)) = Self::with(id, |window| (Rc::clone(&window.host), window.native)) else {
            return false;
        };

        host.destroy_window(native);
        true
    }

    /// Native handle
    pub const fn native(&self) -> NativeHandle {
        self.native
    }

    /// Whether a frame is open
    pub const fn is_in_frame(&self) -> bool {
        self.in_frame
    }

    /// Whether the user asked to close the window since the last heartbeat
    pub const fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    /// Flag the window for destruction on the next heartbeat
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Background color presented under the frame
    pub const fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Replace the background color
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Shared font atlas
    pub const fn font_atlas(&self) -> &SharedFontAtlas {
        &self.font_atlas
    }

    /// Library context for the application's draw code
    pub fn context(&mut self) -> &mut dyn GuiContext {
        self.gui.as_mut()
    }

    /// Current input state
    pub fn io(&self) -> &Io {
        self.gui.io()
    }

    /// Title bar text
    pub fn title(&self) -> String {
        self.host.window_text(self.native)
    }

    /// Replace the title bar text
    pub fn set_title(&self, title: &str) {
        self.host.set_window_text(self.native, title);
    }

    /// Screen rectangle of the window
    pub fn rect(&self) -> Rect {
        self.host.window_rect(self.native)
    }

    /// Move and resize the window
    pub fn set_rect(&self, rect: Rect) {
        self.host.set_window_rect(self.native, rect);
    }

    /// Show or hide the window
    pub fn set_visible(&self, visible: bool) {
        self.host.show_window(self.native, visible);
    }

    /// Make sure a frame is open, starting one if needed
    ///
    /// Call before any per-frame drawing. Also marks the window as driven so
    /// the next heartbeat does not retire it.
    pub fn enter_frame(&mut self) {
        self.keep_alive = true;

        if !self.in_frame {
            self.begin_frame();
        }
    }

    /// Close the open frame, presenting it if `render`
    ///
    /// Does nothing when no frame is open. Inconsistencies left by the draw
    /// code are reported as warnings and recovered from.
    pub fn end_frame(&mut self, render: bool) {
        if !self.in_frame {
            log::trace!("end_frame on idle window {:?}", self.native);
            return;
        }

        self.gui
            .end_frame_recover(&mut |message| report_recovery(self.host.as_ref(), self.native, message));

        if render {
            let draw_data = self.gui.render();
            self.backend.draw_frame(draw_data, self.clear_color);
        } else {
            self.gui.end_frame();
        }

        self.backend.end_frame();
        self.in_frame = false;
    }

    fn begin_frame(&mut self) {
        debug_assert!(!self.in_frame);

        self.in_frame = true;
        self.update_frame_info(); // before calling the backend
        self.backend.begin_frame();
        self.update_mouse_down();
        self.update_mouse_pos();
        self.update_key_mods();
        self.update_wheel();
        self.gui.new_frame();
    }

    fn update_frame_info(&mut self) {
        let (width, height) = self.host.client_size(self.native);
        let scale = self.backend.scale_factor();
        let delta_time = self.backend.delta_time();

        let io = self.gui.io_mut();
        io.display_size = Vector2::new(width as f32, height as f32);
        io.display_framebuffer_scale = Vector2::new(scale, scale);
        io.delta_time = delta_time;
    }

    fn update_mouse_down(&mut self) {
        self.gui.io_mut().mouse_down = self.mouse_buttons.read();
    }

    fn update_mouse_pos(&mut self) {
        let screen = self.host.cursor_pos();
        let over_window = self
            .host
            .window_from_point(screen)
            .is_some_and(|view| view == self.native || self.host.is_child(self.native, view));

        // macOS sends button-up from outside the window without capture
        let tracking = match self.platform {
            HostPlatform::MacOs => self.mouse_buttons.any_down(),
            HostPlatform::Windows | HostPlatform::Linux => self.host.capture() == Some(self.native),
        };

        let mouse_pos = if over_window || tracking {
            let client = self.host.screen_to_client(self.native, screen);
            Vector2::new(client.x as f32, client.y as f32)
        } else {
            MOUSE_POS_OFFSCREEN
        };

        self.gui.io_mut().mouse_pos = mouse_pos;
    }

    fn update_key_mods(&mut self) {
        let host = self.host.as_ref();
        let io = self.gui.io_mut();
        io.key_ctrl = host.async_key_state(vk::CONTROL);
        io.key_shift = host.async_key_state(vk::SHIFT);
        io.key_alt = host.async_key_state(vk::MENU);
        io.key_super = host.async_key_state(vk::LWIN);
    }

    fn update_wheel(&mut self) {
        let wheel = std::mem::take(&mut self.wheel);
        let io = self.gui.io_mut();
        io.mouse_wheel += wheel.vertical;
        io.mouse_wheel_h += wheel.horizontal;
    }

    const fn uses_capture(&self) -> bool {
        !matches!(self.platform, HostPlatform::MacOs)
    }

    /// Native button-down
    pub fn mouse_down(&mut self, button: MouseButton) {
        if self.uses_capture() && !self.mouse_buttons.any_down() && self.host.capture().is_none() {
            self.host.set_capture(self.native);
        }

        self.mouse_buttons.press(button);
    }

    /// Native button-up
    pub fn mouse_up(&mut self, button: MouseButton) {
        // DOWN_UNREAD stays set to catch clicks shorter than one frame
        self.mouse_buttons.release(button);

        if self.uses_capture() && !self.mouse_buttons.any_down() && self.host.capture() == Some(self.native) {
            self.host.release_capture();
        }
    }

    /// Native wheel rotation, applied at the next frame
    pub fn mouse_wheel(&mut self, axis: WheelAxis, delta: i16) {
        self.wheel.accumulate(axis, delta, self.wheel_notch);
    }

    /// Native key transition
    pub fn key_input(&mut self, key: VirtualKey, down: bool) {
        if let Some(slot) = self.gui.io_mut().keys_down.get_mut(usize::from(key)) {
            *slot = down;
        }
    }

    /// Typed character
    pub fn char_input(&mut self, codepoint: u32) {
        if let Some(character) = input::text_input(codepoint) {
            self.gui.io_mut().add_input_character(character);
        }
    }

    /// Show the cursor the library asked for
    pub fn update_cursor(&self) {
        self.host.set_cursor(cursor::native_cursor(self.gui.mouse_cursor()));
    }

    fn handle_message(&mut self, message: &Message) -> Dispatched {
        if self.backend.handle_message(message) {
            return Dispatched::Done(MessageResult::Handled);
        }

        let result = match *message {
            Message::Close => {
                self.close_requested = true;
                MessageResult::Handled
            }
            Message::Destroy => return Dispatched::Destroy,
            Message::MouseMove => {
                self.update_cursor();
                MessageResult::Default
            }
            Message::SetCursor { client: true } => {
                self.update_cursor();
                MessageResult::Handled
            }
            Message::MouseWheel { axis, delta } => {
                self.mouse_wheel(axis, delta);
                MessageResult::Default
            }
            Message::ButtonDown(button) => {
                self.mouse_down(button);
                MessageResult::Handled
            }
            Message::ButtonUp(button) => {
                self.mouse_up(button);
                MessageResult::Handled
            }
            Message::Key { key, down } => {
                self.key_input(key, down);
                MessageResult::Default
            }
            Message::Char(codepoint) => {
                self.char_input(codepoint);
                MessageResult::Handled
            }
            Message::SetCursor { client: false } | Message::Other { .. } => MessageResult::Default,
        };

        Dispatched::Done(result)
    }

    fn retire_task(&self) -> Heartbeat {
        let host = Rc::clone(&self.host);
        let native = self.native;
        Heartbeat::Retire(Box::new(move || host.destroy_window(native)))
    }
}

impl Resource for Window {
    fn heartbeat(&mut self) -> Heartbeat {
        let retire = if self.close_requested {
            self.close_requested = false;
            true
        } else if self.in_frame {
            self.end_frame(true);
            false
        } else {
            !self.keep_alive
        };

        self.keep_alive = false;

        if retire {
            log::debug!("Retiring window {:?}", self.native);
            self.retire_task()
        } else {
            Heartbeat::Keep
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.host.unregister_accelerator(self.native);

        if self.in_frame {
            self.end_frame(false);
        }

        if self.host.capture() == Some(self.native) {
            self.host.release_capture();
        }
    }
}

/// Host window procedure
///
/// Unknown handles get [`MessageResult::Default`]: the message is not for
/// one of our windows. A destroy notification is never deferred; a window
/// that is borrowed when it arrives is unregistered at once and dropped when
/// the borrow ends.
pub fn dispatch(native: NativeHandle, message: &Message) -> MessageResult {
    let Some(id) = Window::find(native) else {
        return MessageResult::Default;
    };

    log::trace!("Dispatching {:?} to window {:?}", message, native);

    match Window::with(id, |window| window.handle_message(message)) {
        Some(Dispatched::Done(result)) => result,
        Some(Dispatched::Destroy) => {
            destroy(native);
            MessageResult::Handled
        }
        // the borrower's handle on the window keeps it alive until it lets go
        None if matches!(message, Message::Destroy) => {
            log::debug!("Window {:?} destroyed while busy, dropping it once released", native);
            destroy(native);
            MessageResult::Handled
        }
        None => {
            log::debug!("Window {:?} is busy, deferring {:?} to the host", native, message);
            MessageResult::Default
        }
    }
}

/// Accelerator interceptor registered for `registered`
///
/// Keystrokes aimed at another window are [`Accel::NotOurs`]. For ours, the
/// backend decides whether the library consumes them.
pub fn translate_accel(registered: NativeHandle, message: &KeyMessage) -> Accel {
    let Some(id) = Window::find(registered) else {
        return Accel::NotOurs;
    };

    Window::with(id, |window| {
        if message.target != window.native && !window.host.is_child(window.native, message.target) {
            return Accel::NotOurs;
        }

        window.backend.translate_accel(message, window.gui.io())
    })
    .unwrap_or(Accel::NotOurs)
}

fn destroy(native: NativeHandle) {
    let Some(id) = WINDOW_SET.with(|set| set.borrow_mut().remove(&native)) else {
        return;
    };

    if resource::unregister(id) {
        log::info!("Destroyed window {:?}", native);
    }
}

fn setup_context(gui: &mut dyn GuiContext, config: &ContextConfig, platform: HostPlatform) {
    gui.style_colors(config.style);

    let io = gui.io_mut();
    io.ini_filename = None;
    io.backend_flags |= BackendFlags::HAS_MOUSE_CURSORS;
    io.backend_platform_name = Some(config.platform_name.clone());
    io.key_map = keymap::default_key_map(platform);
}

fn report_recovery(host: &dyn Host, native: NativeHandle, message: &str) {
    host.report_error(message);
    log::warn!("Window {:?} recovered from frame error: {}", native, message);
}
