use super::Empirical;

/// Trait shared by structures that represents a bounded interval in the real line.
pub trait Interval {

    fn low(&self) -> f64;

    fn high(&self) -> f64;

    /// Verify if value is within the closed interval (self.low(), self.high())
    fn contains(&self, val : &f64) -> bool {
        *val >= self.low() && *val <= self.high()
    }

    fn width(&self) -> f64 {
        self.high() - self.low()
    }

}

/// Central credible interval: the quantiles (1 - level) / 2 and (1 + level) / 2,
/// leaving equal mass at each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Credible {
    low : f64,
    high : f64,
    level : f64
}

impl Credible {

    /// Returns None if level is not within (0, 1).
    pub fn central(cdf : &Empirical, level : f64) -> Option<Self> {
        if !(level > 0.0 && level < 1.0) {
            return None;
        }
        let tail = 0.5 * (1. - level);
        Some(Self {
            low : cdf.quantile(tail)?,
            high : cdf.quantile(1. - tail)?,
            level
        })
    }

    pub fn level(&self) -> f64 {
        self.level
    }

}

impl Interval for Credible {

    fn low(&self) -> f64 {
        self.low
    }

    fn high(&self) -> f64 {
        self.high
    }

}
