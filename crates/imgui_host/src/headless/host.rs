//! In-memory host with a simulated window manager

use crate::host::{
    Host, HostPlatform, NativeCursor, NativeHandle, Point, Rect, ThemeColor, TimerCallback, TimerId, VirtualKey,
    WindowDesc,
};
use crate::window::{self, KeyMessage, Message, MessageResult};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

/// Theme background reported by default (`0x00BBGGRR` on Windows hosts)
pub const DEFAULT_THEME_BACKGROUND: u32 = 0x0033_2211;

/// Theme text color reported by default
pub const DEFAULT_THEME_TEXT: u32 = 0x00EE_DDCC;

#[derive(Debug, Clone)]
struct NativeWindow {
    title: String,
    rect: Rect,
    visible: bool,
    parent: Option<NativeHandle>,
}

#[derive(Debug)]
struct HostState {
    platform: HostPlatform,
    next_handle: u64,
    next_timer: u64,
    windows: BTreeMap<NativeHandle, NativeWindow>,
    timers: Vec<(TimerId, TimerCallback)>,
    accelerators: Vec<NativeHandle>,
    cursor: Option<NativeCursor>,
    cursor_pos: Point,
    capture: Option<NativeHandle>,
    keys_down: HashSet<VirtualKey>,
    theme_background: u32,
    theme_text: u32,
    errors: Vec<String>,
    refuse_windows: bool,
}

/// Host whose windows, timers and input devices only exist in memory
///
/// Destroying a window delivers [`Message::Destroy`] synchronously, the way a
/// native window manager does.
#[derive(Debug)]
pub struct HeadlessHost {
    state: RefCell<HostState>,
}

impl HeadlessHost {
    /// Host matching the compile target
    pub fn new() -> Rc<Self> {
        Self::with_platform(HostPlatform::current())
    }

    /// Host behaving like `platform`
    pub fn with_platform(platform: HostPlatform) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(HostState {
                platform,
                next_handle: 1,
                next_timer: 1,
                windows: BTreeMap::new(),
                timers: Vec::new(),
                accelerators: Vec::new(),
                cursor: Some(NativeCursor::Arrow),
                cursor_pos: Point::new(-1, -1),
                capture: None,
                keys_down: HashSet::new(),
                theme_background: DEFAULT_THEME_BACKGROUND,
                theme_text: DEFAULT_THEME_TEXT,
                errors: Vec::new(),
                refuse_windows: false,
            }),
        })
    }

    /// Number of registered timers
    pub fn timer_count(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Fire every registered timer once
    pub fn run_timers(&self) {
        let callbacks: Vec<TimerCallback> = self.state.borrow().timers.iter().map(|&(_, callback)| callback).collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Whether accelerators of `window` are intercepted
    pub fn has_accelerator(&self, window: NativeHandle) -> bool {
        self.state.borrow().accelerators.contains(&window)
    }

    /// Offer a keystroke to every registered interceptor, first answer wins
    pub fn send_accelerator(&self, message: &KeyMessage) -> window::Accel {
        let registered = self.state.borrow().accelerators.clone();
        registered
            .into_iter()
            .map(|window| window::translate_accel(window, message))
            .find(|&accel| accel != window::Accel::NotOurs)
            .unwrap_or(window::Accel::NotOurs)
    }

    /// Deliver a message the way the message pump would
    pub fn send(&self, window: NativeHandle, message: &Message) -> MessageResult {
        window::dispatch(window, message)
    }

    /// Whether a native window (or child view) exists
    pub fn is_window(&self, window: NativeHandle) -> bool {
        self.state.borrow().windows.contains_key(&window)
    }

    /// Number of live top-level windows
    pub fn window_count(&self) -> usize {
        self.state.borrow().windows.values().filter(|window| window.parent.is_none()).count()
    }

    /// Whether a window is shown
    pub fn is_visible(&self, window: NativeHandle) -> bool {
        self.state.borrow().windows.get(&window).is_some_and(|window| window.visible)
    }

    /// Create a child view covering `rect` (screen coordinates) inside `parent`
    pub fn add_child(&self, parent: NativeHandle, rect: Rect) -> NativeHandle {
        let mut state = self.state.borrow_mut();
        let handle = state.allocate_handle();
        state.windows.insert(handle, NativeWindow { title: String::new(), rect, visible: true, parent: Some(parent) });
        handle
    }

    /// Move the pointer to a screen position
    pub fn set_cursor_pos(&self, point: Point) {
        self.state.borrow_mut().cursor_pos = point;
    }

    /// Press or release a physical key
    pub fn set_key(&self, key: VirtualKey, down: bool) {
        let mut state = self.state.borrow_mut();
        if down {
            state.keys_down.insert(key);
        } else {
            state.keys_down.remove(&key);
        }
    }

    /// Cursor currently shown over client areas
    pub fn cursor(&self) -> Option<NativeCursor> {
        self.state.borrow().cursor
    }

    /// Replace a theme color
    pub fn set_theme_color(&self, color: ThemeColor, value: u32) {
        let mut state = self.state.borrow_mut();
        match color {
            ThemeColor::WindowBackground => state.theme_background = value,
            ThemeColor::WindowText => state.theme_text = value,
        }
    }

    /// Errors reported through [`Host::report_error`]
    pub fn errors(&self) -> Vec<String> {
        self.state.borrow().errors.clone()
    }

    /// Make [`Host::create_window`] fail from now on
    pub fn refuse_windows(&self, refuse: bool) {
        self.state.borrow_mut().refuse_windows = refuse;
    }
}

impl HostState {
    fn allocate_handle(&mut self) -> NativeHandle {
        let handle = NativeHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn origin(&self, window: NativeHandle) -> Point {
        self.windows
            .get(&window)
            .map_or_else(|| Point::new(0, 0), |window| Point::new(window.rect.left, window.rect.top))
    }
}

impl Host for HeadlessHost {
    fn platform(&self) -> HostPlatform {
        self.state.borrow().platform
    }

    fn register_timer(&self, callback: TimerCallback) -> TimerId {
        let mut state = self.state.borrow_mut();
        let timer = TimerId(state.next_timer);
        state.next_timer += 1;
        state.timers.push((timer, callback));
        timer
    }

    fn unregister_timer(&self, timer: TimerId) {
        self.state.borrow_mut().timers.retain(|&(id, _)| id != timer);
    }

    fn register_accelerator(&self, window: NativeHandle) {
        let mut state = self.state.borrow_mut();
        if !state.accelerators.contains(&window) {
            state.accelerators.push(window);
        }
    }

    fn unregister_accelerator(&self, window: NativeHandle) {
        self.state.borrow_mut().accelerators.retain(|&registered| registered != window);
    }

    fn create_window(&self, desc: &WindowDesc) -> Option<NativeHandle> {
        let mut state = self.state.borrow_mut();
        if state.refuse_windows {
            return None;
        }

        let handle = state.allocate_handle();
        let window = NativeWindow { title: desc.title.clone(), rect: desc.rect, visible: true, parent: None };
        state.windows.insert(handle, window);
        Some(handle)
    }

    fn destroy_window(&self, window: NativeHandle) {
        if !self.is_window(window) {
            return;
        }

        window::dispatch(window, &Message::Destroy);

        let mut state = self.state.borrow_mut();
        state.windows.retain(|&handle, native| handle != window && native.parent != Some(window));
        if state.capture == Some(window) {
            state.capture = None;
        }
    }

    fn window_text(&self, window: NativeHandle) -> String {
        self.state.borrow().windows.get(&window).map(|window| window.title.clone()).unwrap_or_default()
    }

    fn set_window_text(&self, window: NativeHandle, text: &str) {
        if let Some(window) = self.state.borrow_mut().windows.get_mut(&window) {
            window.title = text.to_string();
        }
    }

    fn window_rect(&self, window: NativeHandle) -> Rect {
        self.state.borrow().windows.get(&window).map(|window| window.rect).unwrap_or_default()
    }

    fn set_window_rect(&self, window: NativeHandle, rect: Rect) {
        if let Some(window) = self.state.borrow_mut().windows.get_mut(&window) {
            window.rect = rect;
        }
    }

    fn client_size(&self, window: NativeHandle) -> (i32, i32) {
        let rect = self.window_rect(window);
        (rect.width(), rect.height())
    }

    fn show_window(&self, window: NativeHandle, visible: bool) {
        if let Some(window) = self.state.borrow_mut().windows.get_mut(&window) {
            window.visible = visible;
        }
    }

    fn theme_color(&self, color: ThemeColor) -> u32 {
        let state = self.state.borrow();
        match color {
            ThemeColor::WindowBackground => state.theme_background,
            ThemeColor::WindowText => state.theme_text,
        }
    }

    fn set_cursor(&self, cursor: Option<NativeCursor>) {
        self.state.borrow_mut().cursor = cursor;
    }

    fn capture(&self) -> Option<NativeHandle> {
        self.state.borrow().capture
    }

    fn set_capture(&self, window: NativeHandle) {
        self.state.borrow_mut().capture = Some(window);
    }

    fn release_capture(&self) {
        self.state.borrow_mut().capture = None;
    }

    fn async_key_state(&self, key: VirtualKey) -> bool {
        self.state.borrow().keys_down.contains(&key)
    }

    fn cursor_pos(&self) -> Point {
        self.state.borrow().cursor_pos
    }

    fn window_from_point(&self, point: Point) -> Option<NativeHandle> {
        // children were created after their parents, so the newest hit is topmost
        self.state
            .borrow()
            .windows
            .iter()
            .rev()
            .find(|(_, window)| window.visible && window.rect.contains(point))
            .map(|(&handle, _)| handle)
    }

    fn screen_to_client(&self, window: NativeHandle, point: Point) -> Point {
        let origin = self.state.borrow().origin(window);
        Point::new(point.x.saturating_sub(origin.x), point.y.saturating_sub(origin.y))
    }

    fn is_child(&self, parent: NativeHandle, child: NativeHandle) -> bool {
        let state = self.state.borrow();
        let mut current = state.windows.get(&child).and_then(|window| window.parent);
        while let Some(ancestor) = current {
            if ancestor == parent {
                return true;
            }
            current = state.windows.get(&ancestor).and_then(|window| window.parent);
        }
        false
    }

    fn report_error(&self, message: &str) {
        self.state.borrow_mut().errors.push(message.to_string());
    }
}
