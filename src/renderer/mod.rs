//! WebGPU rendering module
//!
//! `scene` turns a simulation snapshot into colored triangles in grid units;
//! `pipeline` maps them to the canvas and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
