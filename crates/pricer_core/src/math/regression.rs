//! Least-squares polynomial regression.
//!
//! Fits `y ≈ β₀ + β₁x + β₂x²` by accumulating the normal equations
//! `XᵀX β = Xᵀy` and solving them with a Cholesky factorisation.
//!
//! The accumulator only stores power sums, so partial fits computed over
//! disjoint blocks of observations can be merged before solving. Merging in
//! a fixed block order makes the fitted coefficients independent of how the
//! blocks were scheduled.
//!
//! # Example
//!
//! ```
//! use pricer_core::math::regression::QuadraticRegression;
//!
//! let mut reg = QuadraticRegression::new();
//! for i in 0..10 {
//!     let x = i as f64;
//!     reg.observe(x, 1.0 + 2.0 * x + 0.5 * x * x);
//! }
//!
//! let fit = reg.solve().unwrap();
//! assert!((fit.evaluate(4.0) - 17.0).abs() < 1e-9);
//! ```

/// Relative pivot floor below which a matrix is treated as not positive definite.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Normal-equation accumulator for a degree-2 polynomial fit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuadraticRegression {
    count: usize,
    /// Σxᵏ for k = 1..=4
    sx: [f64; 4],
    /// Σxᵏy for k = 0..=2
    sxy: [f64; 3],
}

/// Coefficients of a fitted quadratic `β₀ + β₁x + β₂x²`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadraticFit {
    /// `[β₀, β₁, β₂]`
    pub coefficients: [f64; 3],
}

impl QuadraticFit {
    /// Evaluate the fitted polynomial at `x`.
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        let [b0, b1, b2] = self.coefficients;
        b0 + x * (b1 + x * b2)
    }
}

impl QuadraticRegression {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation `(x, y)`.
    #[inline]
    pub fn observe(&mut self, x: f64, y: f64) {
        let x2 = x * x;
        self.count += 1;
        self.sx[0] += x;
        self.sx[1] += x2;
        self.sx[2] += x2 * x;
        self.sx[3] += x2 * x2;
        self.sxy[0] += y;
        self.sxy[1] += x * y;
        self.sxy[2] += x2 * y;
    }

    /// Fold another accumulator's sums into this one.
    pub fn merge(&mut self, other: &Self) {
        self.count += other.count;
        for (a, b) in self.sx.iter_mut().zip(other.sx.iter()) {
            *a += b;
        }
        for (a, b) in self.sxy.iter_mut().zip(other.sxy.iter()) {
            *a += b;
        }
    }

    /// Number of observations accumulated.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Solve the normal equations.
    ///
    /// Returns `None` when fewer than three observations were seen or the
    /// normal matrix is not (numerically) positive definite, e.g. when all
    /// `x` values coincide.
    pub fn solve(&self) -> Option<QuadraticFit> {
        if self.count < 3 {
            return None;
        }

        let n = self.count as f64;
        let [s1, s2, s3, s4] = self.sx;
        let xtx = [[n, s1, s2], [s1, s2, s3], [s2, s3, s4]];

        solve_cholesky(&xtx, &self.sxy).map(|coefficients| QuadraticFit { coefficients })
    }
}

/// Solve `A x = b` for symmetric positive-definite `A` using Cholesky
/// decomposition `A = L Lᵀ`.
///
/// Returns `None` if a pivot falls below `PIVOT_TOLERANCE` relative to the
/// corresponding diagonal entry of `A`, or if any input is non-finite.
pub fn solve_cholesky<const N: usize>(a: &[[f64; N]; N], b: &[f64; N]) -> Option<[f64; N]> {
    let mut l = [[0.0; N]; N];

    for i in 0..N {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if sum.is_nan() || sum <= a[i][i].abs() * PIVOT_TOLERANCE {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L y = b
    let mut y = [0.0; N];
    for i in 0..N {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Back substitution: Lᵀ x = y
    let mut x = [0.0; N];
    for i in (0..N).rev() {
        let mut sum = y[i];
        for j in (i + 1)..N {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}
