//! Font atlas shared by every window on the UI thread
//!
//! Rasterizing glyphs and uploading the atlas texture is expensive, so all
//! contexts reuse one atlas. Nobody owns it exclusively: each window keeps a
//! strong reference and the thread-wide slot only keeps a weak one, so the
//! atlas goes away together with the last window.
//!
//! Mutating the atlas is only safe between frames.

use super::draw::TextureId;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::{Rc, Weak};

/// Reference-counted handle to the shared atlas
pub type SharedFontAtlas = Rc<RefCell<FontAtlas>>;

thread_local! {
    static SHARED_ATLAS: RefCell<Weak<RefCell<FontAtlas>>> = RefCell::new(Weak::new());
}

/// Where a font's glyphs come from
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    /// The library's built-in font
    Default {
        /// Pixel size
        size: f32,
    },
    /// A font file on disk
    File {
        /// Path to a TTF/OTF file
        path: PathBuf,
        /// Pixel size
        size: f32,
    },
}

/// Fonts and the texture they were rasterized into
#[derive(Debug, Default)]
pub struct FontAtlas {
    fonts: Vec<FontSource>,
    texture: Option<TextureId>,
}

impl FontAtlas {
    /// Empty atlas
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font and return its index
    ///
    /// Invalidates the uploaded texture.
    pub fn add_font(&mut self, source: FontSource) -> usize {
        self.fonts.push(source);
        self.texture = None;
        self.fonts.len() - 1
    }

    /// Fonts in insertion order
    pub fn fonts(&self) -> &[FontSource] {
        &self.fonts
    }

    /// Texture holding the rasterized glyphs, once built
    pub const fn texture_id(&self) -> Option<TextureId> {
        self.texture
    }

    /// Record the texture a backend uploaded the atlas into
    pub fn set_texture_id(&mut self, texture: TextureId) {
        self.texture = Some(texture);
    }

    /// Whether the atlas has an up to date texture
    pub const fn is_built(&self) -> bool {
        self.texture.is_some()
    }

    /// Drop every font and the texture
    pub fn clear(&mut self) {
        self.fonts.clear();
        self.texture = None;
    }
}

/// Get the shared atlas, creating it if no window holds it anymore
pub fn acquire() -> SharedFontAtlas {
    SHARED_ATLAS.with(|slot| {
        if let Some(atlas) = slot.borrow().upgrade() {
            return atlas;
        }

        log::debug!("Creating shared font atlas");
        let atlas = Rc::new(RefCell::new(FontAtlas::new()));
        *slot.borrow_mut() = Rc::downgrade(&atlas);
        atlas
    })
}

/// The shared atlas, if any window still holds it
pub fn current() -> Option<SharedFontAtlas> {
    SHARED_ATLAS.with(|slot| slot.borrow().upgrade())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_shares_live_instance() {
        let first = acquire();
        let second = acquire();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(Rc::strong_count(&first), 2);
    }

    #[test]
    fn test_atlas_released_with_last_reference() {
        let atlas = acquire();
        atlas.borrow_mut().add_font(FontSource::Default { size: 13.0 });
        assert!(current().is_some());

        drop(atlas);
        assert!(current().is_none());

        // a fresh atlas starts empty
        assert!(acquire().borrow().fonts().is_empty());
    }

    #[test]
    fn test_adding_font_invalidates_texture() {
        let mut atlas = FontAtlas::new();
        atlas.set_texture_id(TextureId(7));
        assert!(atlas.is_built());

        let index = atlas.add_font(FontSource::File { path: PathBuf::from("fonts/mono.ttf"), size: 15.0 });
        assert_eq!(index, 0);
        assert!(!atlas.is_built());
    }
}
