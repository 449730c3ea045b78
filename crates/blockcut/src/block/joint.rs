//! Joints: oriented cut planes with optional in-plane polygonal limits.
//!
//! A joint's plane is `n·(p − C) = d` in whatever frame the joint is
//! currently anchored to; `translate_to` re-anchors it to a block origin.
//! The optional `shape` bounds the plane by straight lines expressed in the
//! joint's own strike/dip frame; `global_coordinates` rotates them out into
//! world-frame half-spaces.

use std::f64::consts::{FRAC_PI_2, TAU};

use nalgebra::{Matrix3, Vector2, Vector3};

use super::types::Hs3;

/// One in-plane bounding line: `n·q ≤ dist` for points `q` in the joint's
/// 2-D strike/dip coordinates centred on the joint centre.
#[derive(Clone, Copy, Debug)]
pub struct ShapeLine {
    pub n: Vector2<f64>,
    pub dist: f64,
}

impl ShapeLine {
    #[inline]
    pub fn new(n: Vector2<f64>, dist: f64) -> Self {
        Self { n, dist }
    }
}

/// An oriented discontinuity plane. Empty `shape` means the plane is
/// unbounded.
#[derive(Clone, Debug)]
pub struct Joint {
    pub n: Vector3<f64>,
    pub center: Vector3<f64>,
    pub d: f64,
    pub dip: f64,
    pub dip_direction: f64,
    pub friction_angle: f64,
    pub cohesion: f64,
    pub shape: Vec<ShapeLine>,
}

impl Joint {
    /// Joint from an explicit plane normal; the dip pair is derived from it.
    pub fn new(
        n: Vector3<f64>,
        center: Vector3<f64>,
        d: f64,
        friction_angle: f64,
        cohesion: f64,
        shape: Vec<ShapeLine>,
    ) -> Self {
        let norm = n.norm();
        assert!(norm > 0.0, "joint normal is zero");
        let dip = (n.z / norm).acos();
        let dip_direction = n.y.atan2(n.x).rem_euclid(TAU);
        Self {
            n,
            center,
            d,
            dip,
            dip_direction,
            friction_angle,
            cohesion,
            shape,
        }
    }

    /// Joint from survey angles: dip `δ` (0 horizontal, π/2 vertical) and
    /// dip direction `α`, with the unit normal
    /// `n = (sin δ cos α, sin δ sin α, cos δ)`.
    pub fn from_orientation(
        dip: f64,
        dip_direction: f64,
        center: Vector3<f64>,
        d: f64,
        friction_angle: f64,
        cohesion: f64,
        shape: Vec<ShapeLine>,
    ) -> Self {
        let n = Vector3::new(
            dip.sin() * dip_direction.cos(),
            dip.sin() * dip_direction.sin(),
            dip.cos(),
        );
        Self {
            n,
            center,
            d,
            dip,
            dip_direction: dip_direction.rem_euclid(TAU),
            friction_angle,
            cohesion,
            shape,
        }
    }

    /// Re-anchor to `origin`: the world plane is unchanged, but both `d` and
    /// the centre are measured from `origin` afterwards.
    pub fn translate_to(&self, origin: Vector3<f64>) -> Self {
        let center = self.center - origin;
        Self {
            d: self.d + self.n.dot(&center),
            center,
            ..self.clone()
        }
    }

    /// Strike/dip frame `Q = [N_strike | N_dip | N_plane]`.
    fn rotation(&self) -> Matrix3<f64> {
        let s = (self.dip_direction + FRAC_PI_2).rem_euclid(TAU);
        let strike = Vector3::new(s.cos(), s.sin(), 0.0);
        let plane = self.n / self.n.norm();
        let dip = plane.cross(&strike);
        Matrix3::from_columns(&[strike, dip, plane])
    }

    /// The shape lines as world-frame half-spaces bounding the joint within
    /// its own plane. Empty for an unbounded joint.
    pub fn global_coordinates(&self) -> Vec<Hs3> {
        let q = self.rotation();
        self.shape
            .iter()
            .map(|line| {
                let n = q * Vector3::new(line.n.x, line.n.y, 0.0);
                Hs3::new(n, line.dist + n.dot(&self.center))
            })
            .collect()
    }
}
