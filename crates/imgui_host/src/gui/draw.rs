//! Draw command buffer produced by the library at the end of a frame

use bytemuck::{Pod, Zeroable};
use nalgebra::Vector2;

/// Backend texture identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u64);

/// Vertex as laid out in library vertex buffers
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawVert {
    /// Position in display coordinates
    pub pos: [f32; 2],
    /// Texture coordinates
    pub uv: [f32; 2],
    /// Packed `0xAABBGGRR` color
    pub col: u32,
}

/// One indexed draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCmd {
    /// Number of indices consumed
    pub elem_count: u32,
    /// First index in the list's index buffer
    pub idx_offset: u32,
    /// Clip rectangle (min x, min y, max x, max y)
    pub clip_rect: [f32; 4],
    /// Texture sampled by the call
    pub texture_id: TextureId,
}

/// Vertices, indices and commands for one library window
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawList {
    /// Vertex buffer
    pub vertices: Vec<DrawVert>,
    /// Index buffer
    pub indices: Vec<u16>,
    /// Draw calls into the buffers
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    /// Raw bytes of the vertex buffer, ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Everything needed to present one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DrawData {
    /// Top-left of the displayed area
    pub display_pos: Vector2<f32>,
    /// Size of the displayed area
    pub display_size: Vector2<f32>,
    /// Framebuffer pixels per display unit
    pub framebuffer_scale: Vector2<f32>,
    /// Command lists in back-to-front order
    pub lists: Vec<DrawList>,
}

impl Default for DrawData {
    fn default() -> Self {
        Self {
            display_pos: Vector2::zeros(),
            display_size: Vector2::zeros(),
            framebuffer_scale: Vector2::new(1.0, 1.0),
            lists: Vec::new(),
        }
    }
}

impl DrawData {
    /// Total vertices over all lists
    pub fn total_vertex_count(&self) -> usize {
        self.lists.iter().map(|list| list.vertices.len()).sum()
    }

    /// Total indices over all lists
    pub fn total_index_count(&self) -> usize {
        self.lists.iter().map(|list| list.indices.len()).sum()
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(|list| list.commands.is_empty())
    }
}
