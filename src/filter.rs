use crate::error::{ChebError, Result};

/// Default strength `α` of the exponential cutoff.
pub const DEFAULT_STRENGTH: f64 = 40.0;

/// Default order `p` of the exponential cutoff.
pub const DEFAULT_ORDER: f64 = 10.0;

/// Shape of the exponential low-pass filter `σ(η) = exp(-α η^p)`.
///
/// `η = k/(n-1)` is the relative mode number. With the defaults the lowest
/// third of the spectrum is changed by less than one part in 10^3 while the
/// top mode is scaled by `exp(-40)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// Attenuation strength `α` (larger damps harder)
    pub strength: f64,
    /// Cutoff order `p` (larger keeps more modes untouched)
    pub order: f64,
}

impl FilterConfig {
    /// Creates a new filter configuration with validation
    pub fn new(strength: f64, order: f64) -> Result<Self> {
        let config = Self { strength, order };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.strength.is_finite() || self.strength < 0.0 {
            return Err(ChebError::InvalidConfiguration(format!(
                "filter strength must be finite and non-negative, got {}",
                self.strength
            )));
        }
        if !self.order.is_finite() || self.order <= 0.0 {
            return Err(ChebError::InvalidConfiguration(format!(
                "filter order must be finite and positive, got {}",
                self.order
            )));
        }
        Ok(())
    }

    /// Attenuation factor for relative mode number `eta` in `[0, 1]`.
    pub fn attenuation(&self, eta: f64) -> f64 {
        (-self.strength * eta.powf(self.order)).exp()
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH,
            order: DEFAULT_ORDER,
        }
    }
}

/// Precomputed per-mode attenuation factors for a grid of `n` points.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFilter {
    config: FilterConfig,
    weights: Vec<f64>,
}

impl SpectralFilter {
    /// Tabulates `σ(k/(n-1))` for `k = 0 .. n-1`.
    pub fn new(n: usize, config: FilterConfig) -> Self {
        let denom = n.saturating_sub(1).max(1) as f64;
        let weights = (0..n)
            .map(|k| config.attenuation(k as f64 / denom))
            .collect();
        Self { config, weights }
    }

    /// Multiplies each coefficient by its attenuation factor.
    ///
    /// Factors lie in `(0, 1]`, so no coefficient grows in magnitude.
    pub fn apply(&self, coeffs: &mut [f64]) {
        for (c, w) in coeffs.iter_mut().zip(&self.weights) {
            *c *= w;
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}
