//! Tolerance defaults for the cutting engine (internal).
//!
//! Policy
//! - Fixed constants, no runtime tolerance juggling. The coarse snap is the
//!   user-visible one applied to face coefficients; the fine epsilon backs
//!   geometric predicates only.

/// Coefficient snap: |x| below this collapses to exactly 0 (user-visible).
pub(crate) const SNAP_EPS: f64 = 1e-6;
/// Predicate epsilon: redundancy certificates, coplanarity of face triples,
/// rotation triviality.
pub(crate) const GEOM_EPS: f64 = 1e-12;
/// Geometric dedup distance for enumerated vertices.
pub(crate) const MERGE_EPS: f64 = 1e-9;
