use nalgebra::DMatrix;

use crate::grid::reference_nodes;

/// Replaces Chebyshev coefficients of `f` by those of `df/dξ`, in place.
///
/// Runs the backward recurrence
///
/// ```text
/// c'_{n-1} = 0
/// c'_k     = c'_{k+2} + 2(k+1) c_{k+1}      for k = n-2 .. 0
/// c'_0     = c'_0 / 2
/// ```
///
/// in a single O(n) pass. Only the original `c_{k+1}` and the two most
/// recent outputs are carried between steps, so no second buffer is needed.
/// For `n == 2` the loop runs once and yields `c'_0 = c_1`.
///
/// # Example
///
/// ```rust
/// use chebyshev_spectral::differentiate_coefficients;
///
/// // T_2 = 2ξ² - 1, so dT_2/dξ = 4ξ = 4 T_1
/// let mut coeffs = vec![0.0, 0.0, 1.0];
/// differentiate_coefficients(&mut coeffs);
/// assert_eq!(coeffs, vec![0.0, 4.0, 0.0]);
/// ```
pub fn differentiate_coefficients(coeffs: &mut [f64]) {
    let n = coeffs.len();
    if n == 0 {
        return;
    }

    let mut above = coeffs[n - 1]; // original c_{k+1}
    let mut d_k1 = 0.0; // c'_{k+1}
    let mut d_k2 = 0.0; // c'_{k+2}
    coeffs[n - 1] = 0.0;

    for k in (0..n - 1).rev() {
        let original = coeffs[k];
        let d = d_k2 + 2.0 * (k + 1) as f64 * above;
        coeffs[k] = d;
        d_k2 = d_k1;
        d_k1 = d;
        above = original;
    }

    coeffs[0] *= 0.5;
}

/// Dense `n × n` collocation differentiation matrix in physical coordinates.
///
/// Row `i` holds the weights that produce `f'(x_i)` from the samples
/// `f(x_0) … f(x_{n-1})`, for points ordered as in
/// [`CollocationGrid`](crate::CollocationGrid). Diagonal entries are the
/// negative row sums of the off-diagonal ones, so constants differentiate to
/// exactly zero.
pub fn differentiation_matrix(n: usize, scale: f64) -> DMatrix<f64> {
    if n < 2 {
        return DMatrix::zeros(n, n);
    }
    let xi = reference_nodes(n);
    let last = n - 1;

    // Endpoint weights carry a factor 2, alternating sign by index
    let weight = |i: usize| {
        let magnitude = if i == 0 || i == last { 2.0 } else { 1.0 };
        if i % 2 == 0 {
            magnitude
        } else {
            -magnitude
        }
    };

    let mut d = DMatrix::<f64>::from_fn(n, n, |i, j| {
        if i == j {
            0.0
        } else {
            weight(i) / weight(j) / (xi[i] - xi[j])
        }
    });

    for i in 0..n {
        let row_sum: f64 = d.row(i).iter().sum();
        d[(i, i)] = -row_sum;
    }

    d * scale
}
