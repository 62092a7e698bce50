use super::*;

/// Likelihood of a Poisson rate r given n counts observed over an
/// interval (exposure) T, dropping the n! factor:
///
/// L(r) = (T r)^n exp(-T r)
///
/// The kernel is evaluated in log form, n ln(T r) - T r, so large counts do
/// not overflow; with n = 0 the convention 0^0 = 1 gives L(0) = 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonKernel {
    intvl : f64,
    n : u64
}

impl PoissonKernel {

    pub fn new(intvl : f64, n : u64) -> Self {
        assert!(intvl > 0.0, "Observation interval should be positive");
        Self { intvl, n }
    }

    pub fn intvl(&self) -> f64 {
        self.intvl
    }

    pub fn count(&self) -> u64 {
        self.n
    }

    /// Maximum likelihood estimate n / T.
    pub fn mle(&self) -> f64 {
        self.n as f64 / self.intvl
    }

}

impl Kernel for PoissonKernel {

    fn ln_kernel(&self, rate : f64) -> f64 {
        if rate < 0.0 {
            return f64::NEG_INFINITY;
        }
        let r_intvl = self.intvl * rate;
        xlny(self.n as f64, r_intvl) - r_intvl
    }

    fn ln_dropped_factor(&self) -> f64 {
        -1.0 * ln_factorial(self.n)
    }

}
