use nalgebra::DVector;
use crate::grid::Grid;
use crate::calc;

/// Cumulative distribution tabulated over a domain of increasing values.
#[derive(Debug, Clone, PartialEq)]
pub struct Empirical {
    pub domain : Vec<f64>,
    pub cprobs : Vec<f64>
}

impl Empirical {

    /// Accumulates a density over its grid by the trapezoidal rule. The result is
    /// rescaled to end at exactly one, absorbing any quadrature error.
    pub fn from_density(grid : &Grid, density : &DVector<f64>) -> Self {
        let mut cprobs = calc::cumulative_trapezoid(density.as_slice(), grid.as_slice());
        let total = cprobs[cprobs.len() - 1];
        if total > 0.0 {
            cprobs.iter_mut().for_each(|c| *c /= total );
        }
        Self::from_cumulative_probabilities(grid.as_slice().to_vec(), cprobs)
    }

    pub fn from_cumulative_probabilities(domain : Vec<f64>, cprobs : Vec<f64>) -> Self {
        assert!(domain.len() == cprobs.len());
        assert!(domain.len() >= 2, "Cumulative distribution requires at least two points");
        Self { domain, cprobs }
    }

    /// Cumulative probability at x, interpolating linearly between domain values.
    pub fn cdf(&self, x : f64) -> f64 {
        let n = self.domain.len();
        if x <= self.domain[0] {
            return 0.0;
        }
        if x >= self.domain[n-1] {
            return 1.0;
        }
        let i = self.domain.partition_point(|d| *d <= x );
        let (x0, x1) = (self.domain[i-1], self.domain[i]);
        let (c0, c1) = (self.cprobs[i-1], self.cprobs[i]);
        c0 + (c1 - c0) * (x - x0) / (x1 - x0)
    }

    /// Inverse of the cumulative distribution, interpolating linearly within the
    /// grid interval where the cumulative crosses q. Returns None if q is outside [0, 1].
    pub fn quantile(&self, q : f64) -> Option<f64> {
        if !(q >= 0.0 && q <= 1.0) {
            return None;
        }
        let n = self.domain.len();
        let i = self.cprobs.partition_point(|c| *c < q );
        if i == 0 {
            return Some(self.domain[0]);
        }
        if i >= n {
            return Some(self.domain[n-1]);
        }
        let (x0, x1) = (self.domain[i-1], self.domain[i]);
        let (c0, c1) = (self.cprobs[i-1], self.cprobs[i]);
        if q >= c1 {
            return Some(x1);
        }
        Some(x0 + (x1 - x0) * (q - c0) / (c1 - c0))
    }

}
