//! Backend that records frames instead of presenting them

use crate::backend::{Backend, BackendFactory};
use crate::color::Color;
use crate::error::BackendError;
use crate::foundation::time::FrameClock;
use crate::gui::{DrawData, Io};
use crate::host::{Host, NativeHandle};
use crate::window::{Accel, KeyMessage, Message};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// What every backend created by one factory has done so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendStats {
    /// Backends created
    pub created: usize,
    /// Backends dropped
    pub dropped: usize,
    /// `begin_frame` calls
    pub frames_begun: usize,
    /// Frames handed to `draw_frame`
    pub frames_presented: usize,
    /// `end_frame` calls
    pub frames_ended: usize,
    /// Clear color of the latest presented frame
    pub last_clear_color: Option<Color>,
    /// Vertex count of the latest presented frame
    pub last_vertex_count: usize,
    /// Window of the latest presented frame
    pub last_window: Option<NativeHandle>,
}

/// Creates [`HeadlessBackend`]s sharing one [`BackendStats`]
#[derive(Debug)]
pub struct HeadlessBackendFactory {
    stats: Rc<RefCell<BackendStats>>,
    scale_factor: f32,
    failure: Cell<bool>,
}

impl Default for HeadlessBackendFactory {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl HeadlessBackendFactory {
    /// Factory whose backends report `scale_factor`
    pub fn new(scale_factor: f32) -> Self {
        Self { stats: Rc::new(RefCell::new(BackendStats::default())), scale_factor, failure: Cell::new(false) }
    }

    /// Make the next creations fail
    pub fn fail_creation(&self, fail: bool) {
        self.failure.set(fail);
    }

    /// Snapshot of the shared statistics
    pub fn stats(&self) -> BackendStats {
        self.stats.borrow().clone()
    }
}

impl BackendFactory for HeadlessBackendFactory {
    fn create(&self, window: NativeHandle, host: &dyn Host) -> Result<Box<dyn Backend>, BackendError> {
        if self.failure.get() {
            return Err(BackendError::InitializationFailed(format!(
                "no renderer for window {:?} on {:?}",
                window,
                host.platform()
            )));
        }

        self.stats.borrow_mut().created += 1;
        log::debug!("Headless backend bound to {:?}", window);

        Ok(Box::new(HeadlessBackend {
            window,
            scale_factor: self.scale_factor,
            clock: FrameClock::new(),
            stats: Rc::clone(&self.stats),
        }))
    }
}

/// Backend for one headless window
#[derive(Debug)]
pub struct HeadlessBackend {
    window: NativeHandle,
    scale_factor: f32,
    clock: FrameClock,
    stats: Rc<RefCell<BackendStats>>,
}

impl Backend for HeadlessBackend {
    fn begin_frame(&mut self) {
        self.stats.borrow_mut().frames_begun += 1;
    }

    fn draw_frame(&mut self, draw_data: &DrawData, clear_color: Color) {
        let mut stats = self.stats.borrow_mut();
        stats.frames_presented += 1;
        stats.last_clear_color = Some(clear_color);
        stats.last_vertex_count = draw_data.total_vertex_count();
        stats.last_window = Some(self.window);
    }

    fn end_frame(&mut self) {
        self.stats.borrow_mut().frames_ended += 1;
    }

    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    fn delta_time(&mut self) -> f32 {
        self.clock.tick()
    }

    fn handle_message(&mut self, _message: &Message) -> bool {
        false
    }

    fn translate_accel(&mut self, _message: &KeyMessage, io: &Io) -> Accel {
        if io.want_capture_keyboard {
            Accel::Eat
        } else {
            Accel::PassToHost
        }
    }
}

impl Drop for HeadlessBackend {
    fn drop(&mut self) {
        self.stats.borrow_mut().dropped += 1;
    }
}
