//! GPU-free core of the quadray demos.
//!
//! Everything the two demo binaries decide per frame lives here: the
//! orthographic projection, the free-look camera, the input model, the
//! uniform layouts shared with the GLSL shaders, and the frame loop itself.
//! The wgpu backend only implements [`FrameSink`].
//!
//! # Invariants
//! - Camera direction is unit length after every rotation.
//! - The frame loop never draws or presents once quit has been observed.
//! - Uniform structs match the std140 blocks declared by the shaders.

pub mod camera;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod input;
pub mod projection;
pub mod uniforms;

pub use camera::{Camera, Motion};
pub use config::{DemoConfig, Variant};
pub use error::DemoError;
pub use frame_loop::{FrameCall, FrameLoop, FrameSink, LoopState, RecordingSink};
pub use input::{InputEvent, Key, KeyState, PointerTracker, QuitTrigger, quit_requested};
pub use projection::{ViewVolume, orthographic};
pub use uniforms::{Globals, OCTREE_CAPACITY, OctreeBlock, OctreeNode, QUAD_VERTEX_COUNT, Vertex};
