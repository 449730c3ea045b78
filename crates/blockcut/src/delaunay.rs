//! Incremental 2-D Delaunay triangulation (Bowyer–Watson).
//!
//! Purpose
//! - Block faces are triangulated in 2-D after being rotated flat so the
//!   centroid integration can walk a consistent boundary mesh. Inputs are
//!   tiny (a face rarely has more than a couple dozen vertices), so the
//!   plain O(n²) insertion scheme is the right tool; mesh quality beyond
//!   covering the convex hull is irrelevant here.
//!
//! Contract
//! - Duplicate points must be removed by the caller.
//! - Fewer than 3 points yield an empty triangulation.
//! - Every returned triangle lists its vertex indices in **clockwise** order
//!   as seen in the input frame; downstream integration relies on this.

use nalgebra::Vector2;

/// In-circle slack; relative to the squared circumradius so large and small
/// faces behave alike. Cocircular rings (e.g. rectangular faces) must land
/// on the inclusive side or insertion stalls.
const CIRCLE_EPS: f64 = 1e-9;

/// Triangulate a point set; returns index triples into `points`.
pub fn triangulate(points: &[Vector2<f64>]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    // Working copy extended with a super-triangle enclosing every input point.
    let mut pts = points.to_vec();
    let mut lo = points[0];
    let mut hi = points[0];
    for p in points {
        lo.x = lo.x.min(p.x);
        lo.y = lo.y.min(p.y);
        hi.x = hi.x.max(p.x);
        hi.y = hi.y.max(p.y);
    }
    let center = (lo + hi) * 0.5;
    let span = (hi.x - lo.x).max(hi.y - lo.y).max(1.0);
    pts.push(Vector2::new(center.x - 20.0 * span, center.y - span));
    pts.push(Vector2::new(center.x + 20.0 * span, center.y - span));
    pts.push(Vector2::new(center.x, center.y + 20.0 * span));

    let mut tris: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];
    for p in 0..n {
        // Cavity: every triangle whose circumcircle admits the new point.
        let mut bad: Vec<usize> = Vec::new();
        for (ti, t) in tris.iter().enumerate() {
            if in_circumcircle(pts[t[0]], pts[t[1]], pts[t[2]], pts[p]) {
                bad.push(ti);
            }
        }
        // Cavity boundary = edges owned by exactly one bad triangle.
        let mut boundary: Vec<(usize, usize)> = Vec::new();
        for &ti in &bad {
            let t = tris[ti];
            for e in 0..3 {
                let edge = (t[e], t[(e + 1) % 3]);
                if let Some(pos) = boundary
                    .iter()
                    .position(|&(a, b)| (a, b) == (edge.1, edge.0) || (a, b) == edge)
                {
                    boundary.swap_remove(pos);
                } else {
                    boundary.push(edge);
                }
            }
        }
        for &ti in bad.iter().rev() {
            tris.remove(ti);
        }
        for (a, b) in boundary {
            tris.push([a, b, p]);
        }
    }

    // Drop everything attached to the super-triangle, then force clockwise.
    tris.retain(|t| t.iter().all(|&i| i < n));
    for t in tris.iter_mut() {
        let ab = pts[t[1]] - pts[t[0]];
        let ac = pts[t[2]] - pts[t[0]];
        if ab.x * ac.y - ab.y * ac.x > 0.0 {
            t.swap(1, 2);
        }
    }
    tris
}

/// Inclusive circumcircle membership; collinear triangles admit nothing.
fn in_circumcircle(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, p: Vector2<f64>) -> bool {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < f64::EPSILON * 16.0 {
        return false;
    }
    let a2 = a.norm_squared();
    let b2 = b.norm_squared();
    let c2 = c.norm_squared();
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    let center = Vector2::new(ux, uy);
    let r2 = (a - center).norm_squared();
    (p - center).norm_squared() <= r2 * (1.0 + CIRCLE_EPS)
}
