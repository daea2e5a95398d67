//! Data shared with the GPU: the static quad and the uniform blocks.
//!
//! Field order and padding follow the std140 blocks in the demo shaders.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::camera::Camera;

/// Vertices in the screen-filling quad: two non-indexed triangles.
pub const QUAD_VERTEX_COUNT: u32 = 6;

/// Records in the `octree` uniform block.
pub const OCTREE_CAPACITY: usize = 8;

/// Interleaved vertex: RGBA color (`i_color`) then XY position
/// (`i_position`), six floats per vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub color: [f32; 4],
    pub position: [f32; 2],
}

impl Vertex {
    const fn new(color: [f32; 4], position: [f32; 2]) -> Self {
        Self { color, position }
    }
}

/// Screen-filling quad in pixel coordinates for a `width` x `height` window.
pub fn quad_vertices(width: u32, height: u32) -> [Vertex; QUAD_VERTEX_COUNT as usize] {
    let (w, h) = (width as f32, height as f32);
    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    #[rustfmt::skip]
    let vertices = [
        Vertex::new(RED,   [0.0, 0.0]),
        Vertex::new(GREEN, [w,   0.0]),
        Vertex::new(BLUE,  [w,   h  ]),

        Vertex::new(RED,   [0.0, 0.0]),
        Vertex::new(BLUE,  [w,   h  ]),
        Vertex::new(WHITE, [0.0, h  ]),
    ];
    vertices
}

/// The `Globals` uniform block.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Globals {
    /// `u_projection_matrix`
    pub projection: [[f32; 4]; 4],
    /// `iCameraDirection`
    pub camera_direction: [f32; 3],
    /// `iTime`
    pub time: f32,
    /// `iCameraPosition`
    pub camera_position: [f32; 3],
    _pad: f32,
    /// `iResolution`
    pub resolution: [f32; 2],
    /// `iMouse`
    pub mouse: [f32; 2],
}

impl Globals {
    pub fn new(projection: Mat4, resolution: Vec2, camera: &Camera) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            camera_direction: camera.direction.to_array(),
            time: 0.0,
            camera_position: camera.position.to_array(),
            _pad: 0.0,
            resolution: resolution.to_array(),
            mouse: [0.0; 2],
        }
    }

    pub fn set_camera_direction(&mut self, direction: Vec3) {
        self.camera_direction = direction.to_array();
    }

    pub fn set_camera_position(&mut self, position: Vec3) {
        self.camera_position = position.to_array();
    }
}

/// One `{color, index}` record of the `octree` block.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct OctreeNode {
    pub color: [f32; 4],
    pub index: u32,
    _pad: [u32; 3],
}

impl OctreeNode {
    pub fn new(index: u32, color: [f32; 4]) -> Self {
        Self {
            color,
            index,
            _pad: [0; 3],
        }
    }
}

/// The `octree` uniform block: a fixed array of voxel records.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct OctreeBlock {
    pub nodes: [OctreeNode; OCTREE_CAPACITY],
}

impl OctreeBlock {
    /// Placeholder tree: a single root voxel, every other record zeroed.
    pub fn stub() -> Self {
        let mut block = Self::zeroed();
        block.nodes[0] = OctreeNode::new(1, [1.0, 0.5, 0.2, 1.0]);
        block
    }
}
