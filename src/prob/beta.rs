use super::*;
use crate::error::ConfigError;
use special::Gamma as SpecialGamma;

/// Beta density over [0, 1], the usual prior for a probability. Beta(1, 1) is
/// flat; Beta(0.5, 0.5) (the Jeffreys prior of the binomial) is unbounded at
/// both endpoints, so grids using it should stay strictly inside (0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beta {
    a : f64,
    b : f64
}

// Reference: https://github.com/kthohr/stats/blob/master/include/stats_incl/dens/dbeta.ipp
fn beta_log_prob(x : f64, a : f64, b : f64) -> f64 {
    -1.0*(a.ln_gamma().0 + b.ln_gamma().0 - (a + b).ln_gamma().0 ) +
        (a - 1.0)*x.ln() + (b - 1.0)*(1.0 - x).ln()
}

// Density at an endpoint, where the (a-1)*ln(x) term is 0 * -inf for a == 1.
fn beta_endpoint_log_prob(edge_param : f64, other_param : f64) -> f64 {
    if edge_param < 1.0 {
        f64::INFINITY
    } else if edge_param > 1.0 {
        f64::NEG_INFINITY
    } else {
        // Beta(1, b) at zero equals b (and symmetrically for Beta(a, 1) at one).
        other_param.ln()
    }
}

impl Beta {

    pub fn new(a : f64, b : f64) -> Result<Self, ConfigError> {
        if !(a > 0.0 && a.is_finite()) {
            return Err(ConfigError::InvalidParameter { name : "a", value : a });
        }
        if !(b > 0.0 && b.is_finite()) {
            return Err(ConfigError::InvalidParameter { name : "b", value : b });
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

}

impl Density for Beta {

    fn ln_pdf(&self, x : f64) -> f64 {
        if x < 0.0 || x > 1.0 {
            f64::NEG_INFINITY
        } else if x == 0.0 {
            beta_endpoint_log_prob(self.a, self.b)
        } else if x == 1.0 {
            beta_endpoint_log_prob(self.b, self.a)
        } else {
            beta_log_prob(x, self.a, self.b)
        }
    }

    fn mean(&self) -> f64 {
        self.a / (self.a + self.b)
    }

    fn mode(&self) -> f64 {
        let (a, b) = (self.a, self.b);
        if a > 1. && b > 1. {
            (a - 1.) / (a + b - 2.)
        } else if a <= 1. && b > 1. {
            0.0
        } else if a > 1. && b <= 1. {
            1.0
        } else {
            // U-shaped or flat: both endpoints are modes (flat: any point); report the lower.
            0.0
        }
    }

    fn var(&self) -> f64 {
        let (a, b) = (self.a, self.b);
        a*b / ((a + b).powi(2) * (a + b + 1.))
    }

}
