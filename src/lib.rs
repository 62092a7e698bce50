/// Error types shared by grid construction, posterior evaluation and job files.
pub mod error;

/// Equally spaced grids over a single parameter.
pub mod grid;

/// Trapezoidal quadrature over grid-evaluated functions.
pub mod calc;

/// Prior densities (flat, gamma, beta) and the likelihood kernels
/// of the Poisson and binomial specializations.
pub mod prob;

/// Posterior evaluation over a grid by Bayes's theorem, with the normalizing
/// constant found by quadrature; and the Poisson rate and binomial
/// probability specializations built on top of it.
pub mod posterior;

/// Summaries of a density evaluated over a grid: mode, moments,
/// cumulative distribution, credible intervals and inverse-CDF draws.
pub mod approx;

/// Curves and display hints handed over to an external plotting collaborator.
pub mod plot;

/// Inference jobs (model, prior and grid specifications) that can be loaded
/// from and saved to JSON files.
pub mod model;

pub use error::*;

pub use grid::Grid;

pub use posterior::*;
