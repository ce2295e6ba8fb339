use nalgebra::{DMatrix, DVector};

/// Linear-algebra method used to solve the least-squares problem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FitMethod {
    /// Householder QR factorization of the design matrix.
    ///
    /// Avoids forming `XᵀX`, so it is the best conditioned of the three.
    #[default]
    Qr,

    /// Cholesky factorization of the normal equations `XᵀX β = Xᵀy`.
    Cholesky,

    /// Explicit inverse of the normal matrix, `β = (XᵀX)⁻¹ Xᵀy`.
    Inverse,
}

impl FitMethod {
    /// Solves `design · β ≈ rhs` in the least-squares sense.
    ///
    /// Returns `None` if the factorization breaks down.
    pub(super) fn solve(self, design: &DMatrix<f64>, rhs: &DVector<f64>) -> Option<DVector<f64>> {
        match self {
            Self::Qr => {
                let qr = design.clone().qr();
                let q_t_y = qr.q().transpose() * rhs;
                qr.r().solve_upper_triangular(&q_t_y)
            }
            Self::Cholesky => {
                let x_t = design.transpose();
                let x_t_y = &x_t * rhs;
                (x_t * design).cholesky().map(|chol| chol.solve(&x_t_y))
            }
            Self::Inverse => {
                let x_t = design.transpose();
                (&x_t * design)
                    .try_inverse()
                    .map(|inverse| inverse * x_t * rhs)
            }
        }
    }
}

/// Configuration for a log-linear power-law fit.
#[derive(Debug, Clone, Copy)]
pub struct FitConfig {
    /// Method used to solve the least-squares problem.
    pub method: FitMethod,

    /// Relative tolerance below which the log-speeds are treated as identical.
    ///
    /// The fit is rejected as singular when all `ln(x)` are equal, or when
    /// their squared spread about the mean is at most `rank_tol` times the
    /// sum of `ln(x)²`. The default sits just above rounding noise in the
    /// mean, so any two distinct speeds fit.
    pub rank_tol: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            method: FitMethod::default(),
            rank_tol: 1e-24,
        }
    }
}
