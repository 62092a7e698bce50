use super::*;
use crate::error::ConfigError;

/// Flat density over a bounded interval [low, high]. Bounding a flat prior is
/// what makes it proper: its density is 1 / (high - low) within the interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    low : f64,
    high : f64
}

impl Uniform {

    pub fn new(low : f64, high : f64) -> Result<Self, ConfigError> {
        if !low.is_finite() || !high.is_finite() || high <= low {
            return Err(ConfigError::InvalidBounds { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Constant density value within the bounds.
    pub fn height(&self) -> f64 {
        1. / (self.high - self.low)
    }

}

impl Density for Uniform {

    fn ln_pdf(&self, x : f64) -> f64 {
        if x < self.low || x > self.high {
            f64::NEG_INFINITY
        } else {
            -1. * (self.high - self.low).ln()
        }
    }

    fn pdf(&self, x : f64) -> f64 {
        if x < self.low || x > self.high { 0.0 } else { self.height() }
    }

    fn mean(&self) -> f64 {
        0.5 * (self.low + self.high)
    }

    // Any point of the support is a mode; the center is reported.
    fn mode(&self) -> f64 {
        self.mean()
    }

    fn var(&self) -> f64 {
        (self.high - self.low).powi(2) / 12.
    }

}

#[test]
fn uniform_density() {
    let u = Uniform::new(0., 1E5).unwrap();
    assert!((u.pdf(16.) - 1E-5).abs() < 1E-15);
    assert_eq!(u.pdf(-1.), 0.0);
    assert_eq!(u.pdf(2E5), 0.0);
    assert!(Uniform::new(1., 1.).is_err());
}
