use std::f64::consts::PI;

use crate::error::{ChebError, Result};
use crate::filter::FilterConfig;

/// Configuration of a Chebyshev grid: resolution, domain and filter shape.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Number of collocation points (at least 2)
    pub n: usize,
    /// Lower bound of the physical domain
    pub lower: f64,
    /// Upper bound of the physical domain
    pub upper: f64,
    /// Attenuation applied by the spectral filter
    pub filter: FilterConfig,
}

impl GridConfig {
    /// Creates a new grid configuration with validation
    pub fn new(n: usize, lower: f64, upper: f64) -> Result<Self> {
        let config = Self {
            n,
            lower,
            upper,
            filter: FilterConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the spectral filter parameters
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Checks the invariants `n >= 2`, finite bounds, `lower < upper` and an
    /// interval wide enough for its chain-rule factor to be finite.
    pub fn validate(&self) -> Result<()> {
        if self.n < 2 {
            return Err(ChebError::InvalidConfiguration(format!(
                "grid needs at least 2 points, got {}",
                self.n
            )));
        }
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(ChebError::InvalidConfiguration(format!(
                "domain bounds must be finite, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        if self.lower >= self.upper {
            return Err(ChebError::InvalidConfiguration(format!(
                "lower bound {} must be less than upper bound {}",
                self.lower, self.upper
            )));
        }
        if !self.scale().is_finite() {
            return Err(ChebError::InvalidConfiguration(format!(
                "domain [{}, {}] is too narrow to resolve",
                self.lower, self.upper
            )));
        }
        self.filter.validate()
    }

    /// `(upper - lower) / 2`, halved before subtracting so it stays finite
    /// for any pair of finite bounds.
    pub fn half_width(&self) -> f64 {
        0.5 * self.upper - 0.5 * self.lower
    }

    /// `(lower + upper) / 2`, computed without overflowing.
    pub fn midpoint(&self) -> f64 {
        0.5 * self.lower + 0.5 * self.upper
    }

    /// Chain-rule factor `2 / (upper - lower)` mapping d/dξ to d/dx.
    pub fn scale(&self) -> f64 {
        1.0 / self.half_width()
    }
}

/// Chebyshev-Gauss-Lobatto points mapped onto `[lower, upper]`.
///
/// Point `i` sits at `ξ_i = cos(iπ/(n-1))` on the reference interval, mapped
/// as `x_i = (lower + upper)/2 + ξ_i (upper - lower)/2`. Index 0 is therefore `upper`
/// and index `n-1` is `lower`; the points decrease strictly with `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct CollocationGrid {
    points: Vec<f64>,
}

impl CollocationGrid {
    /// Computes the grid for a validated configuration.
    pub fn new(config: &GridConfig) -> Self {
        let n = config.n;
        let mid = config.midpoint();
        let half_width = config.half_width();

        let mut points: Vec<f64> = reference_nodes(n)
            .into_iter()
            .map(|xi| mid + half_width * xi)
            .collect();

        // Pin the endpoints so they match the bounds bit for bit
        points[0] = config.upper;
        points[n - 1] = config.lower;

        Self { points }
    }

    /// Location of point `i` in physical space.
    pub fn pt(&self, i: usize) -> Result<f64> {
        self.points
            .get(i)
            .copied()
            .ok_or(ChebError::IndexOutOfRange {
                index: i,
                n: self.points.len(),
            })
    }

    /// All points, ordered by collocation index.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Gauss-Lobatto nodes `ξ_i = cos(iπ/(n-1))` on `[-1, 1]`, for `n >= 2`.
///
/// Evaluated as `sin(π(n-1-2i)/(2(n-1)))`, which keeps `ξ_i == -ξ_{n-1-i}` exact.
pub(crate) fn reference_nodes(n: usize) -> Vec<f64> {
    let denom = (n - 1) as f64;
    (0..n)
        .map(|i| (PI * (denom - 2.0 * i as f64) / (2.0 * denom)).sin())
        .collect()
}
