use nalgebra::DVector;
use std::fmt::{self, Debug, Display};
use log::{debug, warn};
use crate::grid::Grid;
use crate::error::{ConfigError, NumericalError, Result};
use crate::prob::Density;
use crate::calc;
use crate::plot::{Curve, LineStyle};
use crate::approx::GridDistribution;

mod poisson;

pub use poisson::*;

mod binomial;

pub use binomial::*;

/// Default number of grid points of the Poisson and binomial specializations.
pub const DEFAULT_RESOLUTION : usize = 200;

// Edge posterior density (relative to the peak) above which the grid is
// reported as possibly truncating the posterior.
const EDGE_MASS_WARN : f64 = 1E-3;

/// A pointwise function of the parameter (a prior density, a likelihood or a log-likelihood).
pub type Pointwise = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// Prior density over the parameter: either a constant (flat prior, which is proper
/// only when bounded, e.g. Prior::flat(low, high) for 1 / (high - low)) or a
/// function that evaluates the density at any parameter value.
pub enum Prior {
    Constant(f64),
    Density(Pointwise)
}

impl Prior {

    pub fn constant(val : f64) -> Self {
        Prior::Constant(val)
    }

    /// Proper flat prior 1 / (high - low) over the bounded range [low, high].
    /// The bounds are a property of the prior, and need not match the grid.
    pub fn flat(low : f64, high : f64) -> std::result::Result<Self, ConfigError> {
        if !low.is_finite() || !high.is_finite() || high <= low {
            return Err(ConfigError::InvalidBounds { low, high });
        }
        Ok(Prior::Constant(1. / (high - low)))
    }

    pub fn density<F>(f : F) -> Self
    where
        F : Fn(f64) -> f64 + Send + Sync + 'static
    {
        Prior::Density(Box::new(f))
    }

    /// Wraps any density of the prob module (Gamma, Beta, Uniform).
    pub fn from_density<D>(d : D) -> Self
    where
        D : Density + Send + Sync + 'static
    {
        Prior::Density(Box::new(move |x : f64| d.pdf(x) ))
    }

    /// Evaluates the prior over the grid, broadcasting constants.
    pub fn evaluate(&self, grid : &Grid) -> DVector<f64> {
        match self {
            Prior::Constant(c) => DVector::from_element(grid.len(), *c),
            Prior::Density(f) => grid.map(|x| f(x) )
        }
    }

}

impl From<f64> for Prior {

    fn from(val : f64) -> Self {
        Prior::Constant(val)
    }

}

impl Default for Prior {

    /// Flat (unnormalized) prior.
    fn default() -> Self {
        Prior::Constant(1.0)
    }

}

impl Debug for Prior {

    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            Prior::Constant(c) => write!(f, "Prior::Constant({})", c),
            Prior::Density(_) => write!(f, "Prior::Density(..)")
        }
    }

}

/// Likelihood over the parameter, informed either directly or by its logarithm.
pub enum Likelihood {
    Direct(Pointwise),
    Log(Pointwise)
}

impl Likelihood {

    pub fn direct<F>(f : F) -> Self
    where
        F : Fn(f64) -> f64 + Send + Sync + 'static
    {
        Likelihood::Direct(Box::new(f))
    }

    pub fn log<F>(f : F) -> Self
    where
        F : Fn(f64) -> f64 + Send + Sync + 'static
    {
        Likelihood::Log(Box::new(f))
    }

    /// Resolves the pair of optional (likelihood, log-likelihood), of which
    /// exactly one should be informed.
    pub fn either(
        likelihood : Option<Pointwise>,
        log_likelihood : Option<Pointwise>
    ) -> std::result::Result<Self, ConfigError> {
        match (likelihood, log_likelihood) {
            (Some(l), None) => Ok(Likelihood::Direct(l)),
            (None, Some(ll)) => Ok(Likelihood::Log(ll)),
            (Some(_), Some(_)) => Err(ConfigError::ConflictingLikelihood),
            (None, None) => Err(ConfigError::MissingLikelihood)
        }
    }

}

impl Debug for Likelihood {

    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            Likelihood::Direct(_) => write!(f, "Likelihood::Direct(..)"),
            Likelihood::Log(_) => write!(f, "Likelihood::Log(..)")
        }
    }

}

/// Posterior density of a single parameter evaluated over a grid, normalized by the
/// marginal likelihood found by the trapezoidal rule.
///
/// Log-likelihoods are shifted by their maximum over the grid before being
/// exponentiated, so the normalizing constant is kept in log form and the
/// posterior stays representable even when the likelihood itself would
/// overflow or underflow.
///
/// ```rust
/// use quadbayes::*;
///
/// let grid = Grid::linspace(0.0, 20.0, 200).unwrap();
/// let post = Posterior::builder(grid)
///     .prior(Prior::flat(0.0, 1E5).unwrap())
///     .likelihood(|r : f64| (2.0 * r).powi(16) * (-2.0 * r).exp() )
///     .build()
///     .unwrap();
/// assert!((post.grid().integrate(post.values()) - 1.0).abs() < 1E-2);
/// ```
#[derive(Debug, Clone)]
pub struct Posterior {

    grid : Grid,

    prior : DVector<f64>,

    post : DVector<f64>,

    // Natural log of the normalizing constant (marginal likelihood).
    log_norm : f64

}

// Pointwise product of prior and likelihood, validating both, and the log of the
// factor the likelihood was divided by before taking the product.
fn unnormalized(
    grid : &Grid,
    prior : &DVector<f64>,
    likelihood : &Likelihood
) -> std::result::Result<(DVector<f64>, f64), NumericalError> {
    for (x, p) in grid.iter().zip(prior.iter()) {
        if !(p.is_finite() && *p >= 0.0) {
            return Err(NumericalError::InvalidPrior { at : *x, value : *p });
        }
    }
    let (like, log_scale) = match likelihood {
        Likelihood::Direct(f) => (grid.map(|x| f(x) ), 0.0),
        Likelihood::Log(f) => {
            let ll = grid.map(|x| f(x) );
            if let Some(pos) = ll.iter().position(|v| v.is_nan() || *v == f64::INFINITY ) {
                return Err(NumericalError::InvalidLikelihood { at : grid.values()[pos], value : ll[pos].exp() });
            }

            // All points at -inf means a likelihood of zero everywhere.
            let max = calc::finite_max(ll.as_slice()).ok_or(NumericalError::DegenerateNormalization(0.0))?;
            (ll.map(|v| (v - max).exp() ), max)
        }
    };
    for (x, l) in grid.iter().zip(like.iter()) {
        if l.is_nan() || *l < 0.0 {
            return Err(NumericalError::InvalidLikelihood { at : *x, value : *l });
        }
    }
    Ok((prior.component_mul(&like), log_scale))
}

impl Posterior {

    /// Evaluates prior and likelihood over the grid, and applies Bayes's theorem
    /// with the marginal likelihood calculated by the composite trapezoidal rule.
    pub fn new(grid : Grid, prior : Prior, likelihood : Likelihood) -> Result<Self> {
        let prior_vals = prior.evaluate(&grid);
        let (numer, log_scale) = unnormalized(&grid, &prior_vals, &likelihood)?;
        let mlike = grid.integrate(&numer);
        if !(mlike.is_finite() && mlike > 0.0) {
            return Err(NumericalError::DegenerateNormalization(mlike).into());
        }
        let post = numer / mlike;
        let log_norm = mlike.ln() + log_scale;
        debug!("Posterior over {} with normalizing constant exp({})", grid, log_norm);
        let post = Self { grid, prior : prior_vals, post, log_norm };
        post.check_edges();
        Ok(post)
    }

    pub fn builder(grid : Grid) -> PosteriorBuilder {
        PosteriorBuilder::new(grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Normalized posterior density values, one per grid point.
    pub fn values(&self) -> &DVector<f64> {
        &self.post
    }

    /// Prior density values, one per grid point.
    pub fn prior_values(&self) -> &DVector<f64> {
        &self.prior
    }

    /// Integral of prior times likelihood over the grid (the marginal likelihood),
    /// as exp(log_normalizing_constant()). Overflows to infinity (or underflows to
    /// zero) when the likelihood informed in log form is outside the f64 range,
    /// even though the posterior values are valid; prefer log_normalizing_constant
    /// in that case.
    pub fn normalizing_constant(&self) -> f64 {
        self.log_norm.exp()
    }

    /// Natural log of the marginal likelihood. This is the canonical form of the
    /// normalizing constant, and is always finite for a successfully built posterior.
    pub fn log_normalizing_constant(&self) -> f64 {
        self.log_norm
    }

    /// Grid step.
    pub fn spacing(&self) -> f64 {
        self.grid.spacing()
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Curve for the plotting collaborator, pairing the grid and the posterior values.
    pub fn curve(&self, style : LineStyle) -> Curve {
        Curve::new(self.grid.as_slice().to_vec(), self.post.as_slice().to_vec(), style)
    }

    fn check_edges(&self) {
        let peak = self.post.max();
        let n = self.post.nrows();
        if self.post[0] > EDGE_MASS_WARN * peak || self.post[n-1] > EDGE_MASS_WARN * peak {
            warn!(
                "Posterior density at the grid edges ({}, {}) is not negligible; {} might truncate the posterior",
                self.post[0],
                self.post[n-1],
                self.grid
            );
        }
    }

}

impl GridDistribution for Posterior {

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn density(&self) -> &DVector<f64> {
        &self.post
    }

}

impl Display for Posterior {

    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Posterior {{ {}, mode : {}, mean : {}, log normalizing constant : {} }}",
            self.grid,
            self.mode(),
            self.mean(),
            self.log_norm
        )
    }

}

/// Collects the grid, prior and (log-)likelihood of a posterior. Informing both
/// or neither of likelihood and log-likelihood is a configuration error reported at build().
pub struct PosteriorBuilder {

    grid : Grid,

    prior : Option<Prior>,

    likelihood : Option<Pointwise>,

    log_likelihood : Option<Pointwise>

}

impl PosteriorBuilder {

    pub fn new(grid : Grid) -> Self {
        Self { grid, prior : None, likelihood : None, log_likelihood : None }
    }

    pub fn prior<P>(mut self, prior : P) -> Self
    where
        P : Into<Prior>
    {
        self.prior = Some(prior.into());
        self
    }

    pub fn likelihood<F>(mut self, f : F) -> Self
    where
        F : Fn(f64) -> f64 + Send + Sync + 'static
    {
        self.likelihood = Some(Box::new(f));
        self
    }

    pub fn log_likelihood<F>(mut self, f : F) -> Self
    where
        F : Fn(f64) -> f64 + Send + Sync + 'static
    {
        self.log_likelihood = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Result<Posterior> {
        let likelihood = Likelihood::either(self.likelihood, self.log_likelihood)?;
        let prior = self.prior.ok_or(ConfigError::MissingPrior)?;
        Posterior::new(self.grid, prior, likelihood)
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::error::InferenceError;
    use approx::assert_relative_eq;

    fn poisson_like(r : f64) -> f64 {
        (2.0 * r).powi(16) * (-2.0 * r).exp()
    }

    fn grid() -> Grid {
        Grid::linspace(0.0, 20.0, 200).unwrap()
    }

    #[test]
    fn posterior_is_normalized() {
        let post = Posterior::new(grid(), Prior::flat(0., 1E5).unwrap(), Likelihood::direct(poisson_like)).unwrap();
        assert_relative_eq!(post.grid().integrate(post.values()), 1.0, epsilon = 1E-10);
        assert_eq!(post.values().len(), 200);
        assert_relative_eq!(post.spacing(), 20.0 / 199.0, epsilon = 1E-12);
    }

    #[test]
    fn normalizing_constant_is_integral_of_product() {
        let g = grid();
        let numer : Vec<f64> = g.iter().map(|r| 1E-5 * poisson_like(*r) ).collect();
        let expected = calc::trapezoid(&numer, g.as_slice());
        let post = Posterior::new(g, Prior::Constant(1E-5), Likelihood::direct(poisson_like)).unwrap();
        assert_relative_eq!(post.normalizing_constant(), expected, max_relative = 1E-10);
    }

    #[test]
    fn log_likelihood_agrees_with_direct_likelihood() {
        let direct = Posterior::builder(grid())
            .prior(1.0)
            .likelihood(poisson_like)
            .build()
            .unwrap();
        let log = Posterior::builder(grid())
            .prior(1.0)
            .log_likelihood(|r : f64| 16.0 * (2.0 * r).ln() - 2.0 * r )
            .build()
            .unwrap();
        for (a, b) in direct.values().iter().zip(log.values().iter()) {
            assert_relative_eq!(a, b, epsilon = 1E-10, max_relative = 1E-8);
        }
        assert_relative_eq!(direct.log_normalizing_constant(), log.log_normalizing_constant(), max_relative = 1E-8);
    }

    #[test]
    fn both_likelihoods_is_a_configuration_error() {
        let err = Posterior::builder(grid())
            .prior(1.0)
            .likelihood(poisson_like)
            .log_likelihood(|r : f64| r )
            .build()
            .unwrap_err();
        assert_eq!(err, InferenceError::Configuration(ConfigError::ConflictingLikelihood));
    }

    #[test]
    fn missing_likelihood_is_a_configuration_error() {
        let err = Posterior::builder(grid()).prior(1.0).build().unwrap_err();
        assert_eq!(err, InferenceError::Configuration(ConfigError::MissingLikelihood));
    }

    #[test]
    fn missing_prior_is_a_configuration_error() {
        let err = Posterior::builder(grid()).likelihood(poisson_like).build().unwrap_err();
        assert_eq!(err, InferenceError::Configuration(ConfigError::MissingPrior));
    }

    #[test]
    fn zero_likelihood_is_a_numerical_error() {
        let err = Posterior::new(grid(), Prior::Constant(1.0), Likelihood::direct(|_| 0.0 )).unwrap_err();
        assert!(err.is_numerical());
        let err = Posterior::new(grid(), Prior::Constant(1.0), Likelihood::log(|_| f64::NEG_INFINITY )).unwrap_err();
        assert!(err.is_numerical());
    }

    #[test]
    fn grid_excluding_posterior_mass_is_a_numerical_error() {
        // The likelihood underflows to zero everywhere over [500, 600].
        let g = Grid::linspace(500.0, 600.0, 50).unwrap();
        let err = Posterior::new(g, Prior::Constant(1.0), Likelihood::direct(poisson_like)).unwrap_err();
        assert_eq!(err, InferenceError::Numerical(NumericalError::DegenerateNormalization(0.0)));
    }

    #[test]
    fn overflowing_likelihood_is_a_numerical_error() {
        let err = Posterior::new(grid(), Prior::Constant(1.0), Likelihood::direct(|_| f64::INFINITY )).unwrap_err();
        assert!(matches!(err, InferenceError::Numerical(NumericalError::DegenerateNormalization(_))));
    }

    #[test]
    fn negative_prior_is_rejected() {
        let err = Posterior::new(grid(), Prior::Constant(-1.0), Likelihood::direct(poisson_like)).unwrap_err();
        assert!(matches!(err, InferenceError::Numerical(NumericalError::InvalidPrior { .. })));
        let err = Posterior::new(grid(), Prior::density(|r| 1. / r ), Likelihood::direct(poisson_like)).unwrap_err();
        assert!(matches!(err, InferenceError::Numerical(NumericalError::InvalidPrior { .. })));
    }

    #[test]
    fn large_log_likelihood_keeps_log_constant() {
        let post = Posterior::new(grid(), Prior::Constant(1.0), Likelihood::log(|_| 800.0 )).unwrap();
        assert_eq!(post.normalizing_constant(), f64::INFINITY);
        assert_relative_eq!(post.log_normalizing_constant(), 800.0 + 20f64.ln(), max_relative = 1E-12);
        assert!(post.values().iter().all(|v| (v - 1. / 20.).abs() < 1E-12 ));
    }

    #[test]
    fn flat_prior_requires_bounded_range() {
        assert!(matches!(Prior::flat(0.0, 1E5), Ok(Prior::Constant(c)) if (c - 1E-5).abs() < 1E-20));
        assert_eq!(Prior::flat(1.0, 1.0).unwrap_err(), ConfigError::InvalidBounds { low : 1.0, high : 1.0 });
        assert!(matches!(Prior::flat(2.0, 1.0), Err(ConfigError::InvalidBounds { .. })));
        assert!(matches!(Prior::flat(0.0, f64::INFINITY), Err(ConfigError::InvalidBounds { .. })));
        assert!(matches!(Prior::flat(f64::NAN, 1.0), Err(ConfigError::InvalidBounds { .. })));
    }

    #[test]
    fn two_point_grid() {
        let g = Grid::linspace(0.0, 1.0, 2).unwrap();
        let post = Posterior::new(g, Prior::Constant(1.0), Likelihood::direct(|a : f64| a )).unwrap();
        assert_relative_eq!(post.normalizing_constant(), 0.5, epsilon = 1E-12);
        assert_eq!(post.values().as_slice(), &[0.0, 2.0]);
        assert_relative_eq!(post.grid().integrate(post.values()), 1.0, epsilon = 1E-12);
    }

    #[test]
    fn construction_is_deterministic() {
        let a = Posterior::new(grid(), Prior::Constant(1.0), Likelihood::direct(poisson_like)).unwrap();
        let b = Posterior::new(grid(), Prior::Constant(1.0), Likelihood::direct(poisson_like)).unwrap();
        assert_eq!(a.values(), b.values());
        assert_eq!(a.log_normalizing_constant(), b.log_normalizing_constant());
    }

}
