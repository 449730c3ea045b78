//! Face meshing and centroid/volume by the divergence theorem.
//!
//! Each face is rotated flat (normal onto +z), triangulated in 2-D, and the
//! resulting boundary mesh is integrated. Orientation is the load-bearing
//! detail: the triangulation is clockwise in every face's rotated frame, and
//! the integrator reads each triple reversed so all triangles run
//! anti-clockwise seen from outside the block.

use nalgebra::{Matrix3, Vector2, Vector3};

use crate::delaunay::triangulate;

use super::cfg::GEOM_EPS;
use super::types::{Block, Face};

/// Rotation taking `n` onto +z, built as `T_z · T_xz`: first spin about z
/// until the normal's horizontal part lies on +x, then tilt that onto z.
/// A normal already parallel to ±z leaves the identity.
pub(crate) fn rotation_to_z(n: Vector3<f64>) -> Matrix3<f64> {
    if n.cross(&Vector3::z()).norm() < GEOM_EPS {
        return Matrix3::identity();
    }
    let h = n.x.hypot(n.y);
    let len = n.norm();
    let t_xz = Matrix3::new(
        n.x / h, n.y / h, 0.0, //
        -n.y / h, n.x / h, 0.0, //
        0.0, 0.0, 1.0,
    );
    let t_z = Matrix3::new(
        n.z / len, 0.0, -h / len, //
        0.0, 1.0, 0.0, //
        h / len, 0.0, n.z / len,
    );
    t_z * t_xz
}

impl Block {
    /// Triangulate every face in its own plane; returns, per face, index
    /// triples into that face's vertex list, clockwise in the rotated frame
    /// where the face normal points along +z.
    ///
    /// The one exception is a normal exactly antiparallel to +z: there the
    /// rotation degenerates to the identity, the mesh comes out clockwise
    /// seen from below, and both the triples and their order are reversed
    /// to restore the shared convention.
    pub fn mesh_faces(&self, vertices: &[Vec<Vector3<f64>>]) -> Vec<Vec<[usize; 3]>> {
        assert_eq!(
            vertices.len(),
            self.faces.len(),
            "vertex lists do not match faces"
        );
        self.faces
            .iter()
            .zip(vertices)
            .map(|(f, verts)| {
                let r = rotation_to_z(f.n);
                let flat: Vec<Vector2<f64>> = verts
                    .iter()
                    .map(|v| {
                        let p = r * v;
                        Vector2::new(p.x, p.y)
                    })
                    .collect();
                let mut tris = triangulate(&flat);
                if f.n.cross(&Vector3::z()).norm() < GEOM_EPS && f.n.z < 0.0 {
                    for t in tris.iter_mut() {
                        t.reverse();
                    }
                    tris.reverse();
                }
                tris
            })
            .collect()
    }

    /// Centroid (world frame) and volume of the block from its boundary
    /// mesh. Requires the mesh produced by [`Block::mesh_faces`] on the
    /// vertex lists of [`Block::find_vertices`], after redundant faces have
    /// been eliminated.
    pub fn centroid(
        &self,
        vertices: &[Vec<Vector3<f64>>],
        mesh: &[Vec<[usize; 3]>],
    ) -> (Vector3<f64>, f64) {
        assert!(!self.faces.is_empty(), "block has no faces");
        assert_eq!(mesh.len(), vertices.len(), "mesh does not match vertices");

        let mut volume = 0.0;
        let mut acc = Vector3::zeros();
        for (face_verts, tris) in vertices.iter().zip(mesh) {
            for t in tris {
                // Clockwise triple read back-to-front: (c, b, a) is
                // anti-clockwise from outside, so n_tri points outward.
                let a = face_verts[t[2]];
                let b = face_verts[t[1]];
                let c = face_verts[t[0]];
                let n_tri = (b - a).cross(&(c - a));
                volume += a.dot(&n_tri) / 6.0;
                for k in 0..3 {
                    let squares = (a[k] + b[k]).powi(2)
                        + (b[k] + c[k]).powi(2)
                        + (c[k] + a[k]).powi(2);
                    acc[k] += n_tri[k] / 24.0 * squares;
                }
            }
        }
        (acc / (2.0 * volume) + self.origin, volume)
    }

    /// Volume via the full enumeration pipeline.
    pub fn volume(&self) -> f64 {
        let reduced = Block::new(self.origin, self.non_redundant_faces());
        let verts = reduced.find_vertices();
        let mesh = reduced.mesh_faces(&verts);
        reduced.centroid(&verts, &mesh).1
    }

    /// Canonical form: redundant faces dropped, origin moved to the
    /// centroid, every face re-anchored there and snapped at the face
    /// tolerance.
    pub fn canonical(&self) -> Block {
        let reduced = Block::new(self.origin, self.non_redundant_faces());
        let verts = reduced.find_vertices();
        let mesh = reduced.mesh_faces(&verts);
        let (center, _) = reduced.centroid(&verts, &mesh);
        let faces = reduced
            .update_faces(center)
            .iter()
            .map(Face::apply_tolerance)
            .collect();
        Block::new(center, faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_maps_normal_to_z() {
        for n in [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(1.0, 2.0, 3.0).normalize(),
            Vector3::new(-0.3, 0.4, -0.5).normalize(),
        ] {
            let r = rotation_to_z(n);
            let mapped = r * n;
            assert!((mapped - Vector3::new(0.0, 0.0, n.norm())).norm() < 1e-12);
            assert!((r.determinant() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn rotation_is_identity_for_vertical_normals() {
        assert_eq!(rotation_to_z(Vector3::z()), Matrix3::identity());
        assert_eq!(rotation_to_z(-Vector3::z()), Matrix3::identity());
    }

    #[test]
    fn cube_volume_and_centroid() {
        let b = Block::bounding_box(Vector3::zeros(), Vector3::new(2.0, 1.0, 1.0));
        let verts = b.find_vertices();
        let mesh = b.mesh_faces(&verts);
        let (c, v) = b.centroid(&verts, &mesh);
        assert!((v - 2.0).abs() < 1e-9, "volume {v}");
        assert!((c - Vector3::new(1.0, 0.5, 0.5)).norm() < 1e-9, "centroid {c:?}");
    }

    #[test]
    fn offset_cube_centroid_is_world_frame() {
        let b = Block::bounding_box(Vector3::new(3.0, -1.0, 2.0), Vector3::new(4.0, 0.0, 3.0));
        assert!((b.volume() - 1.0).abs() < 1e-9);
        let canon = b.canonical();
        assert!((canon.origin - Vector3::new(3.5, -0.5, 2.5)).norm() < 1e-9);
    }

    #[test]
    fn tetrahedron_volume() {
        // x, y, z ≥ 0 and x + y + z ≤ 1: volume 1/6, centroid at 1/4.
        let s = 3.0_f64.sqrt().recip();
        let b = Block::new(
            Vector3::zeros(),
            vec![
                Face::new(-Vector3::x(), 0.0, 0.0, 0.0),
                Face::new(-Vector3::y(), 0.0, 0.0, 0.0),
                Face::new(-Vector3::z(), 0.0, 0.0, 0.0),
                Face::new(Vector3::new(s, s, s), s, 0.0, 0.0),
            ],
        );
        let verts = b.find_vertices();
        let mesh = b.mesh_faces(&verts);
        let (c, v) = b.centroid(&verts, &mesh);
        assert!((v - 1.0 / 6.0).abs() < 1e-9, "volume {v}");
        assert!((c - Vector3::new(0.25, 0.25, 0.25)).norm() < 1e-9);
    }

    #[test]
    fn canonical_cube_faces_are_centred() {
        let b = Block::bounding_box(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let canon = b.canonical();
        assert!((canon.origin - Vector3::new(0.5, 0.5, 0.5)).norm() < 1e-9);
        for f in &canon.faces {
            assert!((f.d - 0.5).abs() < 1e-9);
        }
    }
}
