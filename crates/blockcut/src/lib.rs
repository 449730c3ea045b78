//! Convex-polytope cutting kernel for jointed rock masses.
//!
//! A rock volume enters as a single convex block (an intersection of
//! half-spaces anchored to a movable local origin) and is subdivided by a
//! stream of joints: oriented planes, each optionally bounded in-plane by a
//! polygon. The engine decides joint/block intersection and face redundancy
//! with a small dense LP, enumerates vertices analytically, and measures
//! blocks by triangulating their faces and applying the divergence theorem.
//!
//! The driver owns joint generation, input parsing, and serialization; this
//! crate is purely the geometric core and holds no state between calls.

pub mod block;
pub mod delaunay;
pub mod lp;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::block::{Block, Face, Hs3, Joint, ShapeLine};
    pub use crate::delaunay::triangulate;
    pub use crate::lp::{Lp, LpSolution, Relation, Sense};
    pub use nalgebra::{Matrix3 as Mat3, Vector2 as Vec2, Vector3 as Vec3};
}
