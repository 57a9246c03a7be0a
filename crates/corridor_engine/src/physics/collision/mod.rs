//! Ray-vs-triangle-soup collision
//!
//! # Architecture
//!
//! - **Model Space Storage**: collision triangles stay in local coordinates
//! - **On-Demand Transformation**: the ray is moved into model space for the
//!   test and the hit point moved back out, so no per-frame mesh copies
//! - **World-Space Distances**: every reported distance is world space, so
//!   hits on differently scaled objects compare correctly
//!
//! # Module Organization
//!
//! - [`primitives`] - Rays, ray queries, triangles
//! - [`mesh`] - Triangle store and nearest-hit intersection

pub mod primitives;
pub mod mesh;

// Re-export commonly used types
pub use primitives::{Ray, RayHit, RayQuery, Triangle};
pub use mesh::{TriangleStore, RaggedVertexStream, vertex_extents};
