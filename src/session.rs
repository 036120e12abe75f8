use nalgebra::DMatrix;
use tracing::debug;

use crate::derivative::{differentiate_coefficients, differentiation_matrix};
use crate::error::{check_len, ChebError, Result};
use crate::filter::{FilterConfig, SpectralFilter};
use crate::grid::{CollocationGrid, GridConfig};
use crate::transform::{evaluate_series, SpectralTransform};

/// One configured Chebyshev grid together with its transform plan.
///
/// A `Session` owns everything derived from `(n, lower, upper)`: the
/// collocation points, the FFT plan and the filter table. Dropping it (or
/// calling [`Session::cleanup`]) releases them. Compute methods take `&self`
/// and allocate their own coefficient buffers, so a session can be shared
/// across threads. A session is not `Clone`: exactly one value owns the plan,
/// so the release logged on drop happens once per session.
///
/// # Example
///
/// ```rust
/// use chebyshev_spectral::Session;
///
/// let session = Session::init(8, -1.0, 1.0).expect("Valid grid");
/// let v: Vec<f64> = session.points().to_vec();
/// let mut dv = vec![0.0; 8];
/// session.der(&v, &mut dv).expect("Matching lengths");
/// assert!(dv.iter().all(|d| (d - 1.0).abs() < 1e-12));
/// ```
#[derive(Debug)]
pub struct Session {
    config: GridConfig,
    grid: CollocationGrid,
    transform: SpectralTransform,
    filter: SpectralFilter,
}

impl Session {
    /// Builds a session from a grid configuration.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let grid = CollocationGrid::new(&config);
        let transform = SpectralTransform::new(config.n)?;
        let filter = SpectralFilter::new(config.n, config.filter);
        debug!(
            n = config.n,
            lower = config.lower,
            upper = config.upper,
            "chebyshev session initialized"
        );
        Ok(Self {
            config,
            grid,
            transform,
            filter,
        })
    }

    /// Shorthand for `Session::new(GridConfig::new(n, lower, upper)?)`.
    pub fn init(n: usize, lower: f64, upper: f64) -> Result<Self> {
        Self::new(GridConfig::new(n, lower, upper)?)
    }

    /// Releases the transform plan and all derived buffers.
    pub fn cleanup(self) {
        drop(self);
    }

    pub fn n(&self) -> usize {
        self.config.n
    }

    pub fn lower(&self) -> f64 {
        self.config.lower
    }

    pub fn upper(&self) -> f64 {
        self.config.upper
    }

    /// `2 / (upper - lower)`
    pub fn scale(&self) -> f64 {
        self.config.scale()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn filter_config(&self) -> &FilterConfig {
        self.filter.config()
    }

    /// Location of the `i`th collocation point. Index 0 is `upper`.
    pub fn pt(&self, i: usize) -> Result<f64> {
        self.grid.pt(i)
    }

    pub fn points(&self) -> &[f64] {
        self.grid.points()
    }

    /// The transform plan shared by [`der`](Self::der) and [`filter`](Self::filter).
    pub fn transform(&self) -> &SpectralTransform {
        &self.transform
    }

    /// First derivative of `v` over `[lower, upper]`, written to `dv`.
    pub fn der(&self, v: &[f64], dv: &mut [f64]) -> Result<()> {
        self.der_order(v, dv, 1)
    }

    /// `order`-th derivative of `v`, computed within one transform round trip.
    ///
    /// Truncation error in the top modes grows with every order; filtering
    /// between single derivatives is often the better choice for noisy data.
    pub fn der_order(&self, v: &[f64], dv: &mut [f64], order: usize) -> Result<()> {
        let n = self.n();
        check_len(n, v.len())?;
        check_len(n, dv.len())?;

        let mut coeffs = vec![0.0; n];
        self.transform.forward(v, &mut coeffs)?;

        // Chain rule per pass, never as scale^order
        let scale = self.scale();
        for _ in 0..order {
            for c in coeffs.iter_mut() {
                *c *= scale;
            }
            differentiate_coefficients(&mut coeffs);
        }

        self.transform.inverse(&coeffs, dv)
    }

    /// Convenience wrapper around [`der`](Self::der) returning a new vector.
    pub fn derivative(&self, v: &[f64]) -> Result<Vec<f64>> {
        let mut dv = vec![0.0; self.n()];
        self.der(v, &mut dv)?;
        Ok(dv)
    }

    /// Low-pass filters `v` in Chebyshev space, in place.
    pub fn filter(&self, v: &mut [f64]) -> Result<()> {
        let n = self.n();
        check_len(n, v.len())?;

        let mut coeffs = vec![0.0; n];
        self.transform.forward(v, &mut coeffs)?;
        self.filter.apply(&mut coeffs);
        self.transform.inverse(&coeffs, v)
    }

    /// Evaluates the Chebyshev interpolant of `v` at a physical point `x`.
    pub fn interpolate(&self, v: &[f64], x: f64) -> Result<f64> {
        let n = self.n();
        check_len(n, v.len())?;
        let (lower, upper) = (self.lower(), self.upper());
        if !(lower..=upper).contains(&x) {
            return Err(ChebError::OutOfDomain { x, lower, upper });
        }

        let mut coeffs = vec![0.0; n];
        self.transform.forward(v, &mut coeffs)?;
        let xi = ((0.5 * x - 0.5 * self.config.midpoint()) / (0.5 * self.config.half_width()))
            .clamp(-1.0, 1.0);
        Ok(evaluate_series(&coeffs, xi))
    }

    /// Dense collocation differentiation matrix for this grid.
    pub fn differentiation_matrix(&self) -> DMatrix<f64> {
        differentiation_matrix(self.n(), self.scale())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(n = self.config.n, "chebyshev session released");
    }
}
