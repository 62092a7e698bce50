use super::*;
use crate::prob::{PoissonKernel, Kernel};

/// Posterior of a Poisson rate given n counts over an interval (exposure) T,
/// evaluated over nr equally spaced rates in [r_l, r_u].
///
/// ```rust
/// use quadbayes::*;
///
/// let post = PoissonRate::new(2.0, 16, Prior::flat(0.0, 1E5).unwrap(), 20.0).unwrap();
/// assert!((post.posterior().grid().integrate(post.posterior().values()) - 1.0).abs() < 1E-2);
/// ```
#[derive(Debug, Clone)]
pub struct PoissonRate {

    kernel : PoissonKernel,

    post : Posterior

}

impl PoissonRate {

    /// Posterior over [0, r_u] with the default resolution.
    pub fn new<P>(intvl : f64, n : u64, prior : P, r_u : f64) -> Result<Self>
    where
        P : Into<Prior>
    {
        Self::builder(intvl, n, r_u).prior(prior).build()
    }

    pub fn builder(intvl : f64, n : u64, r_u : f64) -> PoissonRateBuilder {
        PoissonRateBuilder {
            intvl,
            n,
            r_u,
            r_l : 0.0,
            nr : DEFAULT_RESOLUTION,
            prior : Prior::default()
        }
    }

    /// An upper rate bound that keeps the posterior mass within the grid for
    /// priors that are not very informative: n / T plus six standard errors sqrt(n) / T.
    pub fn default_upper(intvl : f64, n : u64) -> f64 {
        let n = n as f64;
        (n + 6.0 * n.max(1.0).sqrt()) / intvl
    }

    pub fn intvl(&self) -> f64 {
        self.kernel.intvl()
    }

    pub fn count(&self) -> u64 {
        self.kernel.count()
    }

    /// Maximum likelihood estimate n / T.
    pub fn mle(&self) -> f64 {
        self.kernel.mle()
    }

    pub fn posterior(&self) -> &Posterior {
        &self.post
    }

    pub fn into_posterior(self) -> Posterior {
        self.post
    }

    /// Log of the marginal probability of the observed count, restoring the n! factor
    /// dropped from the likelihood. Only meaningful for proper priors.
    pub fn log_evidence(&self) -> f64 {
        self.post.log_normalizing_constant() + self.kernel.ln_dropped_factor()
    }

}

impl AsRef<Posterior> for PoissonRate {

    fn as_ref(&self) -> &Posterior {
        &self.post
    }

}

pub struct PoissonRateBuilder {
    intvl : f64,
    n : u64,
    r_u : f64,
    r_l : f64,
    nr : usize,
    prior : Prior
}

impl PoissonRateBuilder {

    pub fn prior<P>(mut self, prior : P) -> Self
    where
        P : Into<Prior>
    {
        self.prior = prior.into();
        self
    }

    /// Lower rate bound r_l (0 by default).
    pub fn lower(mut self, r_l : f64) -> Self {
        self.r_l = r_l;
        self
    }

    /// Number of grid points nr (200 by default).
    pub fn resolution(mut self, nr : usize) -> Self {
        self.nr = nr;
        self
    }

    pub fn build(self) -> Result<PoissonRate> {
        if !(self.intvl > 0.0 && self.intvl.is_finite()) {
            return Err(ConfigError::InvalidParameter { name : "intvl", value : self.intvl }.into());
        }
        if !(self.r_l >= 0.0) {
            return Err(ConfigError::InvalidParameter { name : "r_l", value : self.r_l }.into());
        }
        let grid = Grid::linspace(self.r_l, self.r_u, self.nr)?;
        let kernel = PoissonKernel::new(self.intvl, self.n);
        let post = Posterior::new(grid, self.prior, Likelihood::log(move |r| kernel.ln_kernel(r) ))?;
        Ok(PoissonRate { kernel, post })
    }

}
