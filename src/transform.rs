use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner, Length};
use tracing::{debug, trace};

use crate::error::{check_len, ChebError, Result};

/// Forward and inverse Chebyshev transforms on `n` Gauss-Lobatto points.
///
/// Both directions are a type-I discrete cosine transform, computed as a
/// complex FFT of length `2(n-1)` over the even extension of the input. The
/// FFT plan is built once in [`SpectralTransform::new`] and shared by every
/// call; execution only reads the plan, so one transform may be used from
/// several threads at once.
///
/// Coefficients follow the plain Chebyshev series convention,
/// `f(ξ_i) = Σ_k c_k T_k(ξ_i)`, with no halving left in `c_0` or `c_{n-1}`.
#[derive(Clone)]
pub struct SpectralTransform {
    n: usize,
    fft: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for SpectralTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectralTransform")
            .field("n", &self.n)
            .field("fft_len", &self.fft.len())
            .finish()
    }
}

impl SpectralTransform {
    /// Builds the transform plan for `n` points.
    pub fn new(n: usize) -> Result<Self> {
        if n < 2 {
            return Err(ChebError::InvalidConfiguration(format!(
                "transform needs at least 2 points, got {}",
                n
            )));
        }
        let fft_len = 2 * (n - 1);
        let fft = FftPlanner::<f64>::new().plan_fft_forward(fft_len);
        debug!(n, fft_len, "planned chebyshev transform");
        Ok(Self { n, fft })
    }

    /// Number of points (and coefficients) handled by this plan.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Physical samples to Chebyshev coefficients.
    pub fn forward(&self, values: &[f64], coeffs: &mut [f64]) -> Result<()> {
        check_len(self.n, values.len())?;
        check_len(self.n, coeffs.len())?;
        trace!(n = self.n, "forward transform");

        // Normalize before the FFT so its partial sums stay within the
        // magnitude of the largest sample
        let last = self.n - 1;
        let boundary = 0.5 / last as f64;
        let scaled: Vec<f64> = values.iter().map(|&v| v * boundary).collect();
        self.dct1(&scaled, coeffs);

        for c in coeffs[1..last].iter_mut() {
            *c *= 2.0;
        }
        Ok(())
    }

    /// Chebyshev coefficients to physical samples.
    pub fn inverse(&self, coeffs: &[f64], values: &mut [f64]) -> Result<()> {
        check_len(self.n, coeffs.len())?;
        check_len(self.n, values.len())?;
        trace!(n = self.n, "inverse transform");

        // The DCT-I counts interior terms twice, so halve them first
        let last = self.n - 1;
        let weighted: Vec<f64> = coeffs
            .iter()
            .enumerate()
            .map(|(k, &c)| if k == 0 || k == last { c } else { 0.5 * c })
            .collect();

        self.dct1(&weighted, values);
        Ok(())
    }

    /// Number of live handles on the FFT plan.
    #[cfg(test)]
    pub(crate) fn plan_handles(&self) -> usize {
        Arc::strong_count(&self.fft)
    }

    /// Unnormalized DCT-I: `y_k = x_0 + (-1)^k x_{n-1} + 2 Σ x_j cos(πjk/(n-1))`.
    ///
    /// Both slices must already have length `n`.
    fn dct1(&self, input: &[f64], output: &mut [f64]) {
        let n = self.n;
        let mut buffer: Vec<Complex<f64>> = Vec::with_capacity(2 * (n - 1));
        buffer.extend(input.iter().map(|&x| Complex::new(x, 0.0)));
        buffer.extend(input[1..n - 1].iter().rev().map(|&x| Complex::new(x, 0.0)));

        let mut scratch = vec![Complex::new(0.0, 0.0); self.fft.get_inplace_scratch_len()];
        self.fft.process_with_scratch(&mut buffer, &mut scratch);

        for (out, y) in output.iter_mut().zip(&buffer[..n]) {
            *out = y.re;
        }
    }
}

/// Evaluates `Σ_k c_k T_k(xi)` with Clenshaw's recurrence.
pub fn evaluate_series(coeffs: &[f64], xi: f64) -> f64 {
    let Some((&c0, rest)) = coeffs.split_first() else {
        return 0.0;
    };
    let xi_2 = 2.0 * xi;
    let mut d = 0.0;
    let mut dd = 0.0;

    for &cj in rest.iter().rev() {
        let temp = d;
        d = xi_2 * d - dd + cj;
        dd = temp;
    }

    xi * d - dd + c0
}
