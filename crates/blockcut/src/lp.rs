//! Dense linear programming for small constraint systems.
//!
//! Purpose
//! - The cutting engine decides joint/block intersection and face redundancy
//!   by optimizing linear functionals over an H-representation. Systems are
//!   tiny (n ≤ 4 variables, a few dozen rows), so a dense two-phase simplex
//!   is simpler and fast enough; no external solver is warranted.
//!
//! Contract
//! - Variables range over all reals. Internally each variable is split as
//!   `x = x⁺ − x⁻` with `x⁺, x⁻ ≥ 0` so the tableau stays in standard form.
//! - `Eq`/`Le`/`Ge` rows are honored as written; `Minimize`/`Maximize` both
//!   supported.
//! - Infeasible, unbounded, or numerically broken problems yield `None`;
//!   callers treat that as "no useful information", never as an error.
//! - Dimension mismatches are programming errors and panic.

use nalgebra::DMatrix;

/// Optimization direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// Constraint relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

#[derive(Clone, Debug)]
struct Row {
    coeffs: Vec<f64>,
    rel: Relation,
    rhs: f64,
}

/// A linear program over `n` free real variables.
///
/// Built incrementally, solved once, then discarded.
#[derive(Clone, Debug)]
pub struct Lp {
    n: usize,
    objective: Vec<f64>,
    sense: Sense,
    rows: Vec<Row>,
}

/// Optimal assignment and objective value.
#[derive(Clone, Debug)]
pub struct LpSolution {
    pub x: Vec<f64>,
    pub value: f64,
}

/// Pivot / reduced-cost threshold.
const PIVOT_EPS: f64 = 1e-9;
/// Phase-1 residual above which the program is declared infeasible.
const FEAS_EPS: f64 = 1e-7;

enum SimplexStatus {
    Optimal,
    Unbounded,
    /// Iteration cap hit (cycling or numerical stall).
    Breakdown,
}

impl Lp {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            objective: vec![0.0; n],
            sense: Sense::Minimize,
            rows: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coeffs: &[f64], sense: Sense) {
        assert_eq!(coeffs.len(), self.n, "objective length != variable count");
        self.objective = coeffs.to_vec();
        self.sense = sense;
    }

    pub fn add_constraint(&mut self, coeffs: &[f64], rel: Relation, rhs: f64) {
        assert_eq!(coeffs.len(), self.n, "constraint length != variable count");
        self.rows.push(Row {
            coeffs: coeffs.to_vec(),
            rel,
            rhs,
        });
    }

    /// Solve with the two-phase simplex method.
    ///
    /// Column layout: `2n` split variables (x⁺ at `2j`, x⁻ at `2j+1`), then
    /// one slack/surplus per inequality row, then one artificial per `Ge`/`Eq`
    /// row; the right-hand side is the last column.
    pub fn solve(&self) -> Option<LpSolution> {
        let m = self.rows.len();

        // Normalize rows to non-negative rhs (flips Le↔Ge).
        let mut rows: Vec<Row> = self.rows.clone();
        for r in rows.iter_mut() {
            if r.rhs < 0.0 {
                for c in r.coeffs.iter_mut() {
                    *c = -*c;
                }
                r.rhs = -r.rhs;
                r.rel = match r.rel {
                    Relation::Le => Relation::Ge,
                    Relation::Ge => Relation::Le,
                    Relation::Eq => Relation::Eq,
                };
            }
        }

        let n_split = 2 * self.n;
        let n_slack = rows
            .iter()
            .filter(|r| matches!(r.rel, Relation::Le | Relation::Ge))
            .count();
        let n_art = rows
            .iter()
            .filter(|r| matches!(r.rel, Relation::Ge | Relation::Eq))
            .count();
        let ncols = n_split + n_slack + n_art;
        let art_start = n_split + n_slack;

        let mut t = DMatrix::<f64>::zeros(m, ncols + 1);
        let mut basis = vec![0usize; m];
        let mut slack_at = n_split;
        let mut art_at = art_start;
        for (i, r) in rows.iter().enumerate() {
            for (j, &c) in r.coeffs.iter().enumerate() {
                t[(i, 2 * j)] = c;
                t[(i, 2 * j + 1)] = -c;
            }
            t[(i, ncols)] = r.rhs;
            match r.rel {
                Relation::Le => {
                    t[(i, slack_at)] = 1.0;
                    basis[i] = slack_at;
                    slack_at += 1;
                }
                Relation::Ge => {
                    t[(i, slack_at)] = -1.0;
                    slack_at += 1;
                    t[(i, art_at)] = 1.0;
                    basis[i] = art_at;
                    art_at += 1;
                }
                Relation::Eq => {
                    t[(i, art_at)] = 1.0;
                    basis[i] = art_at;
                    art_at += 1;
                }
            }
        }

        // Phase 1: minimize the sum of artificials down to zero.
        if n_art > 0 {
            let mut cost1 = vec![0.0; ncols];
            for c in cost1[art_start..].iter_mut() {
                *c = 1.0;
            }
            match run_simplex(&mut t, &mut basis, &cost1, ncols) {
                SimplexStatus::Optimal => {}
                SimplexStatus::Unbounded | SimplexStatus::Breakdown => return None,
            }
            let residual: f64 = basis
                .iter()
                .enumerate()
                .filter(|(_, &b)| b >= art_start)
                .map(|(i, _)| t[(i, ncols)])
                .sum();
            if residual > FEAS_EPS {
                tracing::trace!(residual, "lp infeasible");
                return None;
            }
            drive_out_artificials(&mut t, &mut basis, art_start);
        }

        // Phase 2: original objective over the non-artificial columns.
        let mut cost2 = vec![0.0; ncols];
        let flip = if self.sense == Sense::Maximize { -1.0 } else { 1.0 };
        for (j, &c) in self.objective.iter().enumerate() {
            cost2[2 * j] = flip * c;
            cost2[2 * j + 1] = -flip * c;
        }
        match run_simplex(&mut t, &mut basis, &cost2, art_start) {
            SimplexStatus::Optimal => {}
            SimplexStatus::Unbounded | SimplexStatus::Breakdown => return None,
        }

        let mut split = vec![0.0; ncols];
        for (i, &b) in basis.iter().enumerate() {
            split[b] = t[(i, ncols)];
        }
        let x: Vec<f64> = (0..self.n)
            .map(|j| split[2 * j] - split[2 * j + 1])
            .collect();
        let value = self
            .objective
            .iter()
            .zip(&x)
            .map(|(c, xj)| c * xj)
            .sum::<f64>();
        Some(LpSolution { x, value })
    }
}

/// Bland-rule simplex on a dictionary-form tableau.
///
/// Basic columns are unit vectors; `entering_limit` excludes columns at or
/// beyond it from entering (used to lock artificials out in phase 2).
fn run_simplex(
    t: &mut DMatrix<f64>,
    basis: &mut [usize],
    cost: &[f64],
    entering_limit: usize,
) -> SimplexStatus {
    let m = t.nrows();
    let ncols = cost.len();
    let rhs = ncols;
    let max_iter = 100 * (m + ncols).max(1);

    for _ in 0..max_iter {
        // Reduced costs r_j = c_j − c_B · B⁻¹ a_j; Bland: smallest eligible j.
        let mut entering = None;
        for j in 0..entering_limit {
            if basis.contains(&j) {
                continue;
            }
            let mut r = cost[j];
            for i in 0..m {
                r -= cost[basis[i]] * t[(i, j)];
            }
            if r < -PIVOT_EPS {
                entering = Some(j);
                break;
            }
        }
        let Some(j) = entering else {
            return SimplexStatus::Optimal;
        };

        // Ratio test; ties resolved toward the smallest basis index (Bland).
        let mut leave: Option<(usize, f64)> = None;
        for i in 0..m {
            let a = t[(i, j)];
            if a > PIVOT_EPS {
                let ratio = t[(i, rhs)] / a;
                let better = match leave {
                    None => true,
                    Some((li, lr)) => {
                        ratio < lr - PIVOT_EPS
                            || (ratio < lr + PIVOT_EPS && basis[i] < basis[li])
                    }
                };
                if better {
                    leave = Some((i, ratio));
                }
            }
        }
        let Some((i, _)) = leave else {
            return SimplexStatus::Unbounded;
        };
        pivot(t, basis, i, j);
    }
    tracing::debug!("simplex iteration cap reached");
    SimplexStatus::Breakdown
}

fn pivot(t: &mut DMatrix<f64>, basis: &mut [usize], row: usize, col: usize) {
    let p = t[(row, col)];
    let ncols = t.ncols();
    for j in 0..ncols {
        t[(row, j)] /= p;
    }
    for i in 0..t.nrows() {
        if i == row {
            continue;
        }
        let f = t[(i, col)];
        if f != 0.0 {
            for j in 0..ncols {
                t[(i, j)] -= f * t[(row, j)];
            }
        }
    }
    basis[row] = col;
}

/// Pivot zero-valued artificials out of the basis where a structural column
/// allows it. Rows with no structural coefficient are redundant and keep
/// their artificial at zero; phase 2 never lets it re-enter elsewhere.
fn drive_out_artificials(t: &mut DMatrix<f64>, basis: &mut [usize], art_start: usize) {
    for i in 0..t.nrows() {
        if basis[i] < art_start {
            continue;
        }
        let Some(j) = (0..art_start)
            .find(|&j| !basis.contains(&j) && t[(i, j)].abs() > PIVOT_EPS)
        else {
            continue;
        };
        pivot(t, basis, i, j);
    }
}
