//! Vertex enumeration from the H-representation.

use nalgebra::{Matrix3, Vector3};

use super::cfg::{GEOM_EPS, MERGE_EPS};
use super::types::Block;
use super::util::dedup_points_in_place;

impl Block {
    /// Per-face vertices: for each face i, every intersection of face i
    /// with two further faces j, k whose normals span a full frame
    /// (|n_i · (n_j × n_k)| above the predicate epsilon), solved as a 3×3
    /// system. Points are local to the block origin and deduped per face.
    ///
    /// Candidates violating any half-space of the block (beyond the merge
    /// slack) are discarded, so each face list is exactly that facet's
    /// polygon; the boundary mesh built on top of it integrates cleanly
    /// even for obliquely cut blocks.
    pub fn find_vertices(&self) -> Vec<Vec<Vector3<f64>>> {
        let m = self.faces.len();
        let mut out = Vec::with_capacity(m);
        for i in 0..m {
            let fi = &self.faces[i];
            let mut verts: Vec<Vector3<f64>> = Vec::new();
            for j in 0..m {
                for k in (j + 1)..m {
                    let fj = &self.faces[j];
                    let fk = &self.faces[k];
                    if fi.n.dot(&fj.n.cross(&fk.n)).abs() <= GEOM_EPS {
                        continue;
                    }
                    let a = Matrix3::from_rows(&[
                        fi.n.transpose(),
                        fj.n.transpose(),
                        fk.n.transpose(),
                    ]);
                    // The triple product already certified invertibility;
                    // a failed inverse is numerical noise, not a vertex.
                    let Some(inv) = a.try_inverse() else {
                        continue;
                    };
                    let p = inv * Vector3::new(fi.d, fj.d, fk.d);
                    if self.faces.iter().all(|f| f.satisfies_eps(p, MERGE_EPS)) {
                        verts.push(p);
                    }
                }
            }
            dedup_points_in_place(&mut verts, MERGE_EPS);
            out.push(verts);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_faces_have_four_vertices_each() {
        let b = Block::bounding_box(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let verts = b.find_vertices();
        assert_eq!(verts.len(), 6);
        for face_verts in &verts {
            assert_eq!(face_verts.len(), 4);
        }
        // The +x face carries exactly the x = 1 corners.
        for v in &verts[0] {
            assert!((v.x - 1.0).abs() < 1e-12);
            assert!(v.y > -1e-12 && v.y < 1.0 + 1e-12);
            assert!(v.z > -1e-12 && v.z < 1.0 + 1e-12);
        }
    }

    #[test]
    fn clipped_face_keeps_only_its_polygon() {
        use super::super::types::Face;
        // Slice a corner column off the cube: x + y ≤ 1.5. The top face
        // becomes a pentagon; the cut-away corner and the out-of-block
        // line crossings must not survive enumeration.
        let mut b = Block::bounding_box(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let s = 2.0_f64.sqrt().recip();
        b.faces.push(Face::new(Vector3::new(s, s, 0.0), 1.5 * s, 0.0, 0.0));
        let verts = b.find_vertices();
        let top = &verts[4];
        assert_eq!(top.len(), 5, "top facet should be a pentagon");
        for v in top {
            assert!((v.z - 1.0).abs() < 1e-9);
            assert!(v.x + v.y <= 1.5 + 1e-9);
        }
    }

    #[test]
    fn parallel_triples_contribute_nothing() {
        // Two parallel planes and one crossing plane span no vertex.
        use super::super::types::Face;
        let b = Block::new(
            Vector3::zeros(),
            vec![
                Face::new(Vector3::x(), 1.0, 0.0, 0.0),
                Face::new(-Vector3::x(), 0.0, 0.0, 0.0),
                Face::new(Vector3::y(), 1.0, 0.0, 0.0),
            ],
        );
        let verts = b.find_vertices();
        assert!(verts.iter().all(|v| v.is_empty()));
    }
}
