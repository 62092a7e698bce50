use super::*;

/// Likelihood of the success probability alpha of a Bernoulli outcome
/// given n successes in n_trials trials, dropping the binomial coefficient:
///
/// L(alpha) = alpha^n (1 - alpha)^(n_trials - n)
///
/// The convention 0^0 = 1 is used at the endpoints: with n = 0, L(0) = 1;
/// with n = n_trials, L(1) = 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialKernel {
    n : u64,
    n_trials : u64
}

// Reference: stats::dbinom.ipp
fn binomial_log_kernel(alpha : f64, n : u64, failures : u64) -> f64 {
    xlny(n as f64, alpha) + xlny(failures as f64, 1. - alpha)
}

impl BinomialKernel {

    pub fn new(n : u64, n_trials : u64) -> Self {
        assert!(n <= n_trials, "Successes should not exceed trials");
        Self { n, n_trials }
    }

    pub fn successes(&self) -> u64 {
        self.n
    }

    pub fn trials(&self) -> u64 {
        self.n_trials
    }

    pub fn failures(&self) -> u64 {
        self.n_trials - self.n
    }

    /// Maximum likelihood estimate n / n_trials.
    pub fn mle(&self) -> f64 {
        self.n as f64 / self.n_trials as f64
    }

}

impl Kernel for BinomialKernel {

    fn ln_kernel(&self, alpha : f64) -> f64 {
        if alpha < 0.0 || alpha > 1.0 {
            return f64::NEG_INFINITY;
        }
        binomial_log_kernel(alpha, self.n, self.failures())
    }

    fn ln_dropped_factor(&self) -> f64 {
        ln_binomial_coef(self.n_trials, self.n)
    }

}
