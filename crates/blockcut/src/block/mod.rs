//! Convex blocks and the joint-cutting engine.
//!
//! Purpose
//! - Represent a rock block as an intersection of half-spaces anchored to a
//!   movable local origin, and split it recursively along joints.
//! - Keep the operation set small and numerically explicit: intersection
//!   test, cut, redundancy elimination, vertex enumeration, face meshing,
//!   centroid/volume.
//!
//! Conventions
//! - Face offsets are measured from the owning block's origin; cutting
//!   re-anchors children to a fresh origin on the cut plane.
//! - Degenerate numerics (parallel face triples, uncertifiable LPs) are
//!   "no contribution", never errors; zero normals and mismatched buffer
//!   lengths are upstream bugs and panic.

mod cfg;
mod convert;
mod cut;
mod joint;
mod types;
mod util;
mod volume;

pub use joint::{Joint, ShapeLine};
pub use types::{Block, Face, Hs3};
