use std::fmt::Debug;

mod uniform;

pub use uniform::*;

mod gamma;

pub use gamma::*;

mod beta;

pub use beta::*;

mod poisson;

pub use poisson::*;

mod binomial;

pub use binomial::*;

/// Trait shared by univariate probability densities that can be used as priors.
/// Densities are evaluated pointwise; evaluation outside the support yields
/// zero (negative infinity in log form) rather than an error, so that grids
/// can span a wider range than the density support.
pub trait Density
    where Self : Debug
{

    /// Natural logarithm of the density at x.
    fn ln_pdf(&self, x : f64) -> f64;

    /// Density at x.
    fn pdf(&self, x : f64) -> f64 {
        self.ln_pdf(x).exp()
    }

    /// Expected value of the distribution.
    fn mean(&self) -> f64;

    /// The global maximum of the density. For bounded distributions whose density
    /// grows without limit towards a boundary, this is the boundary itself.
    fn mode(&self) -> f64;

    fn var(&self) -> f64;

}

/// A likelihood kernel evaluated over a parameter value, dropping
/// data-dependent factors that do not depend on the parameter.
pub trait Kernel
    where Self : Debug
{

    /// Log of the kernel (log-likelihood up to an additive constant).
    fn ln_kernel(&self, theta : f64) -> f64;

    fn kernel(&self, theta : f64) -> f64 {
        self.ln_kernel(theta).exp()
    }

    /// The log of the factor dropped from the kernel, so that
    /// ln_kernel(theta) + ln_dropped_factor() is the full log-likelihood.
    fn ln_dropped_factor(&self) -> f64;

}

/// Log of n!, by the log-gamma function.
pub fn ln_factorial(n : u64) -> f64 {
    use special::Gamma;
    ((n + 1) as f64).ln_gamma().0
}

// Reference: gcem::log_binomial_coef
pub fn ln_binomial_coef(n : u64, k : u64) -> f64 {
    assert!(k <= n, "Binomial coefficient requires k <= n");
    ln_factorial(n) - ( ln_factorial(k) + ln_factorial(n - k) )
}

/// Product x*ln(y) under the convention 0^0 = 1, that is, 0*ln(0) = 0.
pub(crate) fn xlny(x : f64, y : f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x * y.ln()
    }
}
