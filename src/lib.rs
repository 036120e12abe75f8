//! # Chebyshev Spectral
//!
//! Pseudospectral differentiation and low-pass filtering of functions sampled
//! on a Chebyshev-Gauss-Lobatto grid over an arbitrary interval `[lower, upper]`.
//!
//! Samples are moved to Chebyshev coefficient space with a type-I discrete
//! cosine transform (computed through an FFT), operated on there, and moved
//! back. No dense differentiation matrix is assembled, so each call costs
//! O(n log n).
//!
//! ## Features
//!
//! - Collocation grids with the usual quadratic clustering at both ends
//! - Forward/inverse Chebyshev transforms with plans reused across calls
//! - Spectrally accurate first and higher derivatives
//! - Exponential low-pass filter for damping aliasing and Gibbs ringing
//! - Off-grid evaluation of the interpolant and the dense derivative matrix
//! - A process-wide `init`/`cleanup` facade for language bindings
//!
//! ## Point ordering
//!
//! Point `i` is `x_i = lower + (upper - lower)(1 + cos(iπ/(n-1)))/2`, so index
//! 0 is `upper` and index `n-1` is `lower`.
//!
//! ## Example
//!
//! ```rust
//! use chebyshev_spectral::Session;
//!
//! let session = Session::init(16, 0.0, std::f64::consts::TAU).expect("Valid grid");
//! let v: Vec<f64> = session.points().iter().map(|x| x.sin()).collect();
//! let mut dv = vec![0.0; 16];
//! session.der(&v, &mut dv).expect("Matching lengths");
//!
//! for (x, d) in session.points().iter().zip(&dv) {
//!     assert!((d - x.cos()).abs() < 1e-8);
//! }
//! ```

mod csv_utils;
mod derivative;
mod error;
mod filter;
pub mod global;
mod grid;
mod session;
mod transform;

pub use csv_utils::{read_csv_column, write_grid_csv};
pub use derivative::{differentiate_coefficients, differentiation_matrix};
pub use error::{ChebError, Result};
pub use filter::{FilterConfig, SpectralFilter, DEFAULT_ORDER, DEFAULT_STRENGTH};
pub use grid::{CollocationGrid, GridConfig};
pub use session::Session;
pub use transform::{evaluate_series, SpectralTransform};

/// Differentiates samples taken at the Chebyshev points of `[lower, upper]`.
///
/// The grid size is `values.len()`. This builds a throwaway [`Session`]; keep
/// one around instead when differentiating repeatedly.
///
/// # Example
///
/// ```rust
/// use chebyshev_spectral::{derivative, Session};
///
/// let session = Session::init(6, 1.0, 3.0).expect("Valid grid");
/// let squares: Vec<f64> = session.points().iter().map(|x| x * x).collect();
/// let slope = derivative(&squares, 1.0, 3.0).expect("Valid grid");
/// assert!((slope[0] - 6.0).abs() < 1e-12);
/// ```
pub fn derivative(values: &[f64], lower: f64, upper: f64) -> Result<Vec<f64>> {
    let session = Session::init(values.len(), lower, upper)?;
    session.derivative(values)
}

/// Applies the default spectral low-pass filter to Chebyshev-grid samples.
///
/// The filter does not depend on the physical domain, only on `values.len()`.
pub fn smooth(values: &[f64]) -> Result<Vec<f64>> {
    let session = Session::init(values.len(), -1.0, 1.0)?;
    let mut out = values.to_vec();
    session.filter(&mut out)?;
    Ok(out)
}
