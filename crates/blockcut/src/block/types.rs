//! Core block types: attributed faces, plain half-spaces, and the block.
//!
//! Invariants:
//! - A `Face` is the half-space `n·(x − O) ≤ d` relative to the origin `O`
//!   of the block that owns it; `n` is non-zero.
//! - A `Block` is non-empty and bounded; the driver seeds it with a bounded
//!   domain and the engine only ever shrinks it.

use nalgebra::Vector3;

use super::cfg::GEOM_EPS;
use super::util::snap;

/// Bounding half-space of a block, with inert shear attributes.
///
/// Friction angle and cohesion ride along from the joint that created the
/// face; nothing in the kernel computes with them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub n: Vector3<f64>,
    pub d: f64,
    pub friction_angle: f64,
    pub cohesion: f64,
}

impl Face {
    #[inline]
    pub fn new(n: Vector3<f64>, d: f64, friction_angle: f64, cohesion: f64) -> Self {
        Self {
            n,
            d,
            friction_angle,
            cohesion,
        }
    }

    /// Copy with every scalar inside the face tolerance snapped to 0.
    pub fn apply_tolerance(&self) -> Self {
        Self {
            n: Vector3::new(snap(self.n.x), snap(self.n.y), snap(self.n.z)),
            d: snap(self.d),
            friction_angle: snap(self.friction_angle),
            cohesion: snap(self.cohesion),
        }
    }

    /// Membership with signed slack: positive `eps` enlarges the half-space,
    /// negative shrinks it. `p` is in the owning block's local frame.
    #[inline]
    pub fn satisfies_eps(&self, p: Vector3<f64>, eps: f64) -> bool {
        self.n.dot(&p) <= self.d + eps
    }
}

/// Plain half-space `n·x ≤ c`; the world-frame form of a joint's in-plane
/// polygonal bound.
#[derive(Clone, Copy, Debug)]
pub struct Hs3 {
    pub n: Vector3<f64>,
    pub c: f64,
}

impl Hs3 {
    #[inline]
    pub fn new(n: Vector3<f64>, c: f64) -> Self {
        Self { n, c }
    }
}

/// Convex region `{ x : ∀f, f.n·(x − origin) ≤ f.d }`.
///
/// Face offsets are measured from the block's own origin, not the world
/// origin; cutting moves the origin so offsets stay small. Every operation
/// that "modifies" a block returns a fresh one.
#[derive(Clone, Debug)]
pub struct Block {
    pub origin: Vector3<f64>,
    pub faces: Vec<Face>,
}

impl Block {
    #[inline]
    pub fn new(origin: Vector3<f64>, faces: Vec<Face>) -> Self {
        Self { origin, faces }
    }

    /// Axis-aligned seed block `[lo, hi]`, anchored at `lo`.
    pub fn bounding_box(lo: Vector3<f64>, hi: Vector3<f64>) -> Self {
        let ext = hi - lo;
        let faces = vec![
            Face::new(Vector3::x(), ext.x, 0.0, 0.0),
            Face::new(-Vector3::x(), 0.0, 0.0, 0.0),
            Face::new(Vector3::y(), ext.y, 0.0, 0.0),
            Face::new(-Vector3::y(), 0.0, 0.0, 0.0),
            Face::new(Vector3::z(), ext.z, 0.0, 0.0),
            Face::new(-Vector3::z(), 0.0, 0.0, 0.0),
        ];
        Self::new(lo, faces)
    }

    /// Membership of a world point, signed-eps convention as in
    /// [`Face::satisfies_eps`].
    pub fn contains_eps(&self, p: Vector3<f64>, eps: f64) -> bool {
        let local = p - self.origin;
        self.faces.iter().all(|f| f.satisfies_eps(local, eps))
    }

    /// Re-express every face offset relative to `new_origin` (world frame)
    /// without moving any plane.
    ///
    /// The witness point on each plane is placed along the axis with the
    /// largest usable normal component, priority z, y, x; the first with
    /// |component| ≥ the predicate epsilon wins. A zero normal is an
    /// upstream bug and panics.
    pub fn update_faces(&self, new_origin: Vector3<f64>) -> Vec<Face> {
        self.faces
            .iter()
            .map(|f| {
                let axis_point = if f.n.z.abs() >= GEOM_EPS {
                    Vector3::new(0.0, 0.0, f.d / f.n.z)
                } else if f.n.y.abs() >= GEOM_EPS {
                    Vector3::new(0.0, f.d / f.n.y, 0.0)
                } else if f.n.x.abs() >= GEOM_EPS {
                    Vector3::new(f.d / f.n.x, 0.0, 0.0)
                } else {
                    panic!("face has a zero normal vector");
                };
                let w = self.origin + axis_point;
                Face {
                    d: f.n.dot(&(w - new_origin)) / f.n.norm(),
                    ..*f
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_snaps_all_fields() {
        let f = Face::new(Vector3::new(1.0, 1e-8, -1e-9), 1e-7, 1e-12, 0.3);
        let s = f.apply_tolerance();
        assert_eq!(s.n, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(s.d, 0.0);
        assert_eq!(s.friction_angle, 0.0);
        assert_eq!(s.cohesion, 0.3);
    }

    #[test]
    fn bounding_box_contains_interior() {
        let b = Block::bounding_box(Vector3::zeros(), Vector3::new(1.0, 2.0, 3.0));
        assert!(b.contains_eps(Vector3::new(0.5, 1.0, 1.5), 0.0));
        assert!(!b.contains_eps(Vector3::new(1.5, 1.0, 1.5), 0.0));
        assert!(b.contains_eps(Vector3::new(1.0 + 1e-12, 1.0, 1.5), 1e-9));
    }

    #[test]
    fn update_faces_keeps_world_planes() {
        let b = Block::bounding_box(Vector3::zeros(), Vector3::new(2.0, 2.0, 2.0));
        let new_origin = Vector3::new(1.0, 1.0, 1.0);
        let moved = Block::new(new_origin, b.update_faces(new_origin));
        // Signed distance to each plane is unchanged at sample world points.
        for p in [
            Vector3::new(0.3, 1.7, 0.2),
            Vector3::new(2.0, 2.0, 2.0),
            Vector3::new(-1.0, 0.5, 3.0),
        ] {
            for (f_old, f_new) in b.faces.iter().zip(&moved.faces) {
                let old = f_old.n.dot(&(p - b.origin)) - f_old.d;
                let new = f_new.n.dot(&(p - moved.origin)) - f_new.d;
                assert!((old - new).abs() < 1e-12);
            }
        }
    }

    #[test]
    #[should_panic]
    fn zero_normal_panics() {
        let b = Block::new(
            Vector3::zeros(),
            vec![Face::new(Vector3::zeros(), 1.0, 0.0, 0.0)],
        );
        let _ = b.update_faces(Vector3::new(1.0, 0.0, 0.0));
    }
}
