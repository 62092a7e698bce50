use super::*;
use crate::error::ConfigError;
use special::Gamma as SpecialGamma;

/// Gamma density over strictly positive values, parametrized by a shape k
/// and a scale s (the inverse of the rate), with mean k*s. A shape of 1
/// yields the exponential distribution with mean s, a common weakly
/// informative prior for rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gamma {
    shape : f64,
    scale : f64
}

// Reference: stats::dgamma.ipp
fn gamma_log_prob(x : f64, shape : f64, scale : f64) -> f64 {
    -1.0*shape.ln_gamma().0 - shape*scale.ln() + (shape - 1.0)*x.ln() - x / scale
}

impl Gamma {

    pub fn new(shape : f64, scale : f64) -> Result<Self, ConfigError> {
        if !(shape > 0.0 && shape.is_finite()) {
            return Err(ConfigError::InvalidParameter { name : "shape", value : shape });
        }
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(ConfigError::InvalidParameter { name : "scale", value : scale });
        }
        Ok(Self { shape, scale })
    }

    /// Exponential distribution with the informed scale (mean).
    pub fn exponential(scale : f64) -> Result<Self, ConfigError> {
        Self::new(1.0, scale)
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

}

impl Density for Gamma {

    fn ln_pdf(&self, x : f64) -> f64 {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        if x == 0.0 {
            return if self.shape < 1.0 {
                f64::INFINITY
            } else if self.shape > 1.0 {
                f64::NEG_INFINITY
            } else {
                -1.0*self.scale.ln()
            };
        }
        gamma_log_prob(x, self.shape, self.scale)
    }

    fn mean(&self) -> f64 {
        self.shape * self.scale
    }

    fn mode(&self) -> f64 {
        // For shape <= 1, the mode is truncated at zero.
        ((self.shape - 1.) * self.scale).max(0.0)
    }

    fn var(&self) -> f64 {
        self.shape * self.scale.powi(2)
    }

}
