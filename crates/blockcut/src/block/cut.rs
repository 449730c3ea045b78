//! Joint/block intersection, the cut itself, and redundancy elimination.
//!
//! All three reduce to small linear programs over the H-representation:
//! intersection minimizes the worst half-space violation along the joint
//! plane, redundancy maximizes each face functional over the block. The LP
//! returning `None` is information ("does not cut", "cannot certify"),
//! never an error.

use nalgebra::Vector3;

use crate::lp::{Lp, Relation, Sense};

use super::cfg::GEOM_EPS;
use super::joint::Joint;
use super::types::{Block, Face};
use super::util::snap;

impl Block {
    /// Does the joint plane, restricted to its in-plane bound, meet the
    /// interior of this block? Returns a witness point in the local frame.
    ///
    /// Formulation: minimize the slack `s` over `(x, y, z, s)` subject to
    /// the joint plane as an equality and every half-space relaxed by `−s`;
    /// a strictly negative optimum certifies an interior point. Touching
    /// contact counts as no intersection. Coefficients are snapped at the
    /// face tolerance before submission.
    pub fn intersects(&self, joint: &Joint) -> Option<Vector3<f64>> {
        let local = joint.translate_to(self.origin);
        let mut lp = Lp::new(4);
        lp.set_objective(&[0.0, 0.0, 0.0, 1.0], Sense::Minimize);
        lp.add_constraint(
            &[snap(local.n.x), snap(local.n.y), snap(local.n.z), 0.0],
            Relation::Eq,
            snap(local.d),
        );
        for f in &self.faces {
            lp.add_constraint(
                &[snap(f.n.x), snap(f.n.y), snap(f.n.z), -1.0],
                Relation::Le,
                snap(f.d),
            );
        }
        for hs in local.global_coordinates() {
            lp.add_constraint(
                &[snap(hs.n.x), snap(hs.n.y), snap(hs.n.z), -1.0],
                Relation::Le,
                snap(hs.c),
            );
        }
        let sol = lp.solve()?;
        if sol.value >= -GEOM_EPS {
            return None;
        }
        Some(Vector3::new(sol.x[0], sol.x[1], sol.x[2]))
    }

    /// Split across a joint. A joint that misses the block returns the
    /// block unchanged; otherwise two children sharing a fresh origin on
    /// the joint plane, each carrying the joint as a zero-offset face with
    /// the joint's shear attributes.
    pub fn cut(&self, joint: &Joint) -> Vec<Block> {
        let Some(w) = self.intersects(joint) else {
            tracing::debug!("joint does not cut block");
            return vec![self.clone()];
        };
        let origin = self.origin + w;
        tracing::debug!(x = origin.x, y = origin.y, z = origin.z, "cutting block");
        let moved = self.update_faces(origin);

        let mut above = Vec::with_capacity(moved.len() + 1);
        above.push(Face::new(joint.n, 0.0, joint.friction_angle, joint.cohesion));
        above.extend_from_slice(&moved);
        let mut below = Vec::with_capacity(moved.len() + 1);
        below.push(Face::new(-joint.n, 0.0, joint.friction_angle, joint.cohesion));
        below.extend(moved);

        vec![Block::new(origin, above), Block::new(origin, below)]
    }

    /// Faces that actually bound the block, in their original order.
    ///
    /// After a structural dedup (snapped values), a face is kept iff
    /// maximizing its functional over the whole block still attains its
    /// offset: redundant faces are slack at every optimum. A face the LP
    /// cannot certify either way is kept.
    pub fn non_redundant_faces(&self) -> Vec<Face> {
        let mut unique: Vec<Face> = Vec::new();
        for f in &self.faces {
            let s = f.apply_tolerance();
            if !unique.iter().any(|g| g.apply_tolerance() == s) {
                unique.push(*f);
            }
        }

        let mut kept = Vec::with_capacity(unique.len());
        for f in &unique {
            let mut lp = Lp::new(3);
            lp.set_objective(&[f.n.x, f.n.y, f.n.z], Sense::Maximize);
            for g in &unique {
                lp.add_constraint(&[g.n.x, g.n.y, g.n.z], Relation::Le, g.d);
            }
            match lp.solve() {
                Some(sol) if (sol.value - f.d).abs() > GEOM_EPS => {}
                _ => kept.push(*f),
            }
        }
        if kept.len() != self.faces.len() {
            tracing::debug!(
                before = self.faces.len(),
                after = kept.len(),
                "dropped redundant faces"
            );
        }
        kept
    }
}
