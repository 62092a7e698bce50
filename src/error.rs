use thiserror::Error;
use std::io;

/// Invalid or conflicting parameters informed when building a grid or a posterior.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {

    #[error("Either a likelihood or a log-likelihood must be informed")]
    MissingLikelihood,

    #[error("Cannot inform both a likelihood and a log-likelihood")]
    ConflictingLikelihood,

    #[error("No prior was informed")]
    MissingPrior,

    #[error("Grid requires at least 2 points, but {0} were informed")]
    TooFewPoints(usize),

    #[error("Invalid grid bounds [{low}, {high}]")]
    InvalidBounds { low : f64, high : f64 },

    #[error("Grid value at position {0} is not finite")]
    NonFiniteGrid(usize),

    #[error("Grid values should be strictly increasing (violated at position {0})")]
    NotIncreasing(usize),

    #[error("Grid values should be equally spaced (violated at position {0})")]
    NonUniformGrid(usize),

    #[error("Invalid value {value} for parameter {name}")]
    InvalidParameter { name : &'static str, value : f64 },

    #[error("Number of successes ({n}) cannot exceed the number of trials ({n_trials})")]
    CountsOutOfRange { n : u64, n_trials : u64 },

    #[error("Invalid prior specification: {0}")]
    InvalidPriorSpec(String)

}

/// Degenerate arithmetic found while evaluating a posterior.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericalError {

    #[error("Normalizing constant {0} is zero, negative or not finite (the grid might exclude the posterior mass)")]
    DegenerateNormalization(f64),

    #[error("Prior evaluated to {value} at {at}; prior values should be finite and non-negative")]
    InvalidPrior { at : f64, value : f64 },

    #[error("Likelihood evaluated to {value} at {at}; likelihood values should be non-negative")]
    InvalidLikelihood { at : f64, value : f64 }

}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Numerical error: {0}")]
    Numerical(#[from] NumericalError)

}

impl InferenceError {

    pub fn is_configuration(&self) -> bool {
        matches!(self, InferenceError::Configuration(_))
    }

    pub fn is_numerical(&self) -> bool {
        matches!(self, InferenceError::Numerical(_))
    }

}

pub type Result<T> = std::result::Result<T, InferenceError>;

/// Failures while reading, writing or running job files.
#[derive(Debug, Error)]
pub enum JobError {

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid job file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Job {name} failed: {source}")]
    Inference { name : String, source : InferenceError }

}
