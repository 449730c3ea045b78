//! Small utilities: coefficient snapping and geometric point dedup.

use nalgebra::Vector3;

use super::cfg::SNAP_EPS;

/// Snap a scalar to exactly 0 when inside the face tolerance.
#[inline]
pub(crate) fn snap(x: f64) -> f64 {
    if x.abs() < SNAP_EPS {
        0.0
    } else {
        x
    }
}

pub(crate) fn dedup_points_in_place(points: &mut Vec<Vector3<f64>>, tol: f64) {
    if points.len() < 2 {
        return;
    }
    points.sort_by(|a, b| {
        a[0].partial_cmp(&b[0])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a[1].partial_cmp(&b[1]).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| a[2].partial_cmp(&b[2]).unwrap_or(std::cmp::Ordering::Equal))
    });
    points.dedup_by(|a, b| (*a - *b).norm() < tol);
}
