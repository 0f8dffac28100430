//! Minimal library context driven by a shared script

use crate::gui::{DrawCmd, DrawData, DrawList, DrawVert, GuiContext, GuiFactory, GuiStyle, Io, MouseCursor, SharedFontAtlas};
use std::cell::RefCell;
use std::rc::Rc;

/// What the contexts of one factory do on their next frames
#[derive(Debug, Clone, Default)]
pub struct GuiScript {
    /// Cursor every context asks for
    pub cursor: MouseCursor,
    /// Consistency errors the next frame end recovers from
    pub pending_errors: Vec<String>,
    /// Whether widgets claim the keyboard
    pub capture_keyboard: bool,
    /// Frames completed by any context
    pub frames: usize,
    /// Frames finished through `render`
    pub rendered: usize,
    /// Contexts created
    pub contexts: usize,
}

/// Creates [`HeadlessGui`] contexts
#[derive(Debug, Default)]
pub struct HeadlessGuiFactory {
    script: Rc<RefCell<GuiScript>>,
}

impl HeadlessGuiFactory {
    /// Factory with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for `cursor` from now on
    pub fn set_cursor(&self, cursor: MouseCursor) {
        self.script.borrow_mut().cursor = cursor;
    }

    /// Leave a scope open in the next frame to be ended
    pub fn inject_error(&self, message: &str) {
        self.script.borrow_mut().pending_errors.push(message.to_string());
    }

    /// Make widgets claim the keyboard
    pub fn capture_keyboard(&self, capture: bool) {
        self.script.borrow_mut().capture_keyboard = capture;
    }

    /// Snapshot of the shared script
    pub fn script(&self) -> GuiScript {
        self.script.borrow().clone()
    }
}

impl GuiFactory for HeadlessGuiFactory {
    fn create_context(&self, atlas: SharedFontAtlas) -> Box<dyn GuiContext> {
        self.script.borrow_mut().contexts += 1;

        Box::new(HeadlessGui {
            io: Io::default(),
            atlas,
            style: GuiStyle::default(),
            script: Rc::clone(&self.script),
            draw_data: DrawData::default(),
            in_frame: false,
        })
    }
}

/// Context that emits one textured quad per frame
#[derive(Debug)]
pub struct HeadlessGui {
    io: Io,
    atlas: SharedFontAtlas,
    style: GuiStyle,
    script: Rc<RefCell<GuiScript>>,
    draw_data: DrawData,
    in_frame: bool,
}

impl HeadlessGui {
    /// Applied color style
    pub const fn style(&self) -> GuiStyle {
        self.style
    }

    fn finish(&mut self) {
        self.in_frame = false;
        self.io.mouse_wheel = 0.0;
        self.io.mouse_wheel_h = 0.0;
        self.io.input_queue.clear();
        self.script.borrow_mut().frames += 1;
    }

    fn build_draw_data(&mut self) {
        let size = self.io.display_size;
        let texture_id = self.atlas.borrow().texture_id().unwrap_or_default();
        let col = 0xFFFF_FFFF;

        let vertices = vec![
            DrawVert { pos: [0.0, 0.0], uv: [0.0, 0.0], col },
            DrawVert { pos: [size.x, 0.0], uv: [1.0, 0.0], col },
            DrawVert { pos: [size.x, size.y], uv: [1.0, 1.0], col },
            DrawVert { pos: [0.0, size.y], uv: [0.0, 1.0], col },
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];
        let command = DrawCmd { elem_count: 6, idx_offset: 0, clip_rect: [0.0, 0.0, size.x, size.y], texture_id };

        self.draw_data = DrawData {
            display_size: size,
            framebuffer_scale: self.io.display_framebuffer_scale,
            lists: vec![DrawList { vertices, indices, commands: vec![command] }],
            ..DrawData::default()
        };
    }
}

impl GuiContext for HeadlessGui {
    fn io(&self) -> &Io {
        &self.io
    }

    fn io_mut(&mut self) -> &mut Io {
        &mut self.io
    }

    fn font_atlas(&self) -> &SharedFontAtlas {
        &self.atlas
    }

    fn style_colors(&mut self, style: GuiStyle) {
        self.style = style;
    }

    fn new_frame(&mut self) {
        debug_assert!(!self.in_frame, "new_frame called twice");
        self.in_frame = true;
        self.draw_data = DrawData::default();
        self.io.want_capture_keyboard = self.script.borrow().capture_keyboard;
    }

    fn end_frame_recover(&mut self, report: &mut dyn FnMut(&str)) {
        let errors = std::mem::take(&mut self.script.borrow_mut().pending_errors);
        for error in &errors {
            report(error);
        }
    }

    fn render(&mut self) -> &DrawData {
        self.build_draw_data();
        self.finish();
        self.script.borrow_mut().rendered += 1;
        &self.draw_data
    }

    fn end_frame(&mut self) {
        self.finish();
    }

    fn mouse_cursor(&self) -> MouseCursor {
        self.script.borrow().cursor
    }
}
