use super::*;
use crate::prob::{BinomialKernel, Kernel};

/// Posterior of the success probability alpha of a Bernoulli outcome given n
/// successes in n_trials trials, evaluated over na equally spaced values
/// in [low, high] (the whole [0, 1] by default).
///
/// Grids touching 0 or 1 are accepted for any counts: the likelihood uses the
/// convention 0^0 = 1, so with n = 0 the likelihood at alpha = 0 is 1, and with
/// n = n_trials the likelihood at alpha = 1 is 1.
#[derive(Debug, Clone)]
pub struct BinomialProbability {

    kernel : BinomialKernel,

    post : Posterior

}

impl BinomialProbability {

    /// Posterior under a flat prior over [0, 1] with the default resolution.
    pub fn new(n : u64, n_trials : u64) -> Result<Self> {
        Self::builder(n, n_trials).build()
    }

    pub fn builder(n : u64, n_trials : u64) -> BinomialProbabilityBuilder {
        BinomialProbabilityBuilder {
            n,
            n_trials,
            arange : (0., 1.),
            na : DEFAULT_RESOLUTION,
            prior : Prior::default()
        }
    }

    pub fn successes(&self) -> u64 {
        self.kernel.successes()
    }

    pub fn trials(&self) -> u64 {
        self.kernel.trials()
    }

    /// Maximum likelihood estimate n / n_trials.
    pub fn mle(&self) -> f64 {
        self.kernel.mle()
    }

    pub fn posterior(&self) -> &Posterior {
        &self.post
    }

    pub fn into_posterior(self) -> Posterior {
        self.post
    }

    /// Log of the marginal probability of the observed successes, restoring the
    /// binomial coefficient dropped from the likelihood. Only meaningful for proper priors.
    pub fn log_evidence(&self) -> f64 {
        self.post.log_normalizing_constant() + self.kernel.ln_dropped_factor()
    }

}

impl AsRef<Posterior> for BinomialProbability {

    fn as_ref(&self) -> &Posterior {
        &self.post
    }

}

pub struct BinomialProbabilityBuilder {
    n : u64,
    n_trials : u64,
    arange : (f64, f64),
    na : usize,
    prior : Prior
}

impl BinomialProbabilityBuilder {

    pub fn prior<P>(mut self, prior : P) -> Self
    where
        P : Into<Prior>
    {
        self.prior = prior.into();
        self
    }

    /// Grid bounds (low, high), which should lie within [0, 1].
    pub fn range(mut self, low : f64, high : f64) -> Self {
        self.arange = (low, high);
        self
    }

    /// Number of grid points na (200 by default).
    pub fn resolution(mut self, na : usize) -> Self {
        self.na = na;
        self
    }

    pub fn build(self) -> Result<BinomialProbability> {
        if self.n_trials == 0 {
            return Err(ConfigError::InvalidParameter { name : "n_trials", value : 0.0 }.into());
        }
        if self.n > self.n_trials {
            return Err(ConfigError::CountsOutOfRange { n : self.n, n_trials : self.n_trials }.into());
        }
        let (low, high) = self.arange;
        if !(low >= 0.0 && high <= 1.0) {
            return Err(ConfigError::InvalidBounds { low, high }.into());
        }
        let grid = Grid::linspace(low, high, self.na)?;
        let kernel = BinomialKernel::new(self.n, self.n_trials);
        let post = Posterior::new(grid, self.prior, Likelihood::log(move |alpha| kernel.ln_kernel(alpha) ))?;
        Ok(BinomialProbability { kernel, post })
    }

}
