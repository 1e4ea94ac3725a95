//! Construction-time errors for the scene model.
//!
//! Everything here is fatal: a scene with malformed geometry, lights, or
//! camera axes is unusable as a whole, so no partially-built scene escapes.
//! Numeric edge cases during tracing (parallel rays, degenerate triangles,
//! zero discriminants) are NOT errors - intersection code reports them as
//! "no hit" and carries on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("mesh has no triangles")]
    EmptyMesh,

    #[error("face {face} references vertex {index} but the mesh has {count} vertices")]
    VertexIndexOutOfRange {
        face: usize,
        index: u32,
        count: usize,
    },

    #[error("face {face} references texcoord {index} but the mesh has {count} texcoords")]
    TexcoordIndexOutOfRange {
        face: usize,
        index: u32,
        count: usize,
    },

    #[error("point light falloff must be positive, got {0}")]
    InvalidFalloff(f32),

    #[error("camera direction and up must be non-zero and non-parallel")]
    DegenerateCamera,

    #[error("transform matrix is not invertible")]
    SingularTransform,
}
