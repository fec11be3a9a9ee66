//! WebGPU rendering module
//!
//! Shapes are built as vertex-colored triangle lists in court pixels and
//! mapped to the viewport on upload.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, court_to_ndc};
pub use scene::build_frame;
pub use vertex::Vertex;
