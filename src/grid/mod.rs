use nalgebra::DVector;
use serde::{Serialize, Deserialize};
use std::fmt::{self, Display};
use std::convert::TryFrom;
use crate::error::ConfigError;
use crate::calc;

// Relative tolerance (with respect to the grid range) for the spacing
// uniformity check of informed grids.
const SPACING_TOL : f64 = 1E-8;

/// Ordered, equally spaced values over [low, high] at which priors,
/// likelihoods and posteriors are evaluated. A grid always has at least
/// two strictly increasing, finite values. Grids are serialized as the plain
/// sequence of values, and deserialized through the same validation as from_values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Grid {
    vals : DVector<f64>
}

impl Grid {

    /// Builds n equally spaced points over the closed interval [low, high].
    ///
    /// ```rust
    /// use quadbayes::Grid;
    ///
    /// let grid = Grid::linspace(0.0, 20.0, 200).unwrap();
    /// assert_eq!(grid.len(), 200);
    /// assert!((grid.spacing() - 20.0 / 199.0).abs() < 1E-12);
    /// ```
    pub fn linspace(low : f64, high : f64, n : usize) -> Result<Self, ConfigError> {
        if n < 2 {
            return Err(ConfigError::TooFewPoints(n));
        }
        if !low.is_finite() || !high.is_finite() || high <= low {
            return Err(ConfigError::InvalidBounds { low, high });
        }
        Ok(Self { vals : calc::linspace(low, high, n) })
    }

    /// Validates an informed sequence of values, which should be finite,
    /// strictly increasing and (approximately) equally spaced.
    pub fn from_values(vals : Vec<f64>) -> Result<Self, ConfigError> {
        if vals.len() < 2 {
            return Err(ConfigError::TooFewPoints(vals.len()));
        }
        if let Some(pos) = vals.iter().position(|v| !v.is_finite() ) {
            return Err(ConfigError::NonFiniteGrid(pos));
        }
        if let Some(pos) = vals.windows(2).position(|w| w[1] <= w[0] ) {
            return Err(ConfigError::NotIncreasing(pos + 1));
        }
        let delta = vals[1] - vals[0];
        let tol = SPACING_TOL * (vals[vals.len()-1] - vals[0]);
        if let Some(pos) = vals.windows(2).position(|w| ((w[1] - w[0]) - delta).abs() > tol ) {
            return Err(ConfigError::NonUniformGrid(pos + 1));
        }
        Ok(Self { vals : DVector::from_vec(vals) })
    }

    pub fn len(&self) -> usize {
        self.vals.nrows()
    }

    pub fn low(&self) -> f64 {
        self.vals[0]
    }

    pub fn high(&self) -> f64 {
        self.vals[self.vals.nrows() - 1]
    }

    /// Grid step (the difference between the first two values).
    pub fn spacing(&self) -> f64 {
        self.vals[1] - self.vals[0]
    }

    pub fn values(&self) -> &DVector<f64> {
        &self.vals
    }

    pub fn as_slice(&self) -> &[f64] {
        self.vals.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item=&f64> + '_ {
        self.vals.iter()
    }

    /// Evaluates a pointwise function over all grid values.
    pub fn map<F>(&self, f : F) -> DVector<f64>
    where
        F : Fn(f64) -> f64
    {
        self.vals.map(f)
    }

    /// Trapezoidal integral of values evaluated over this grid.
    pub fn integrate(&self, y : &DVector<f64>) -> f64 {
        calc::trapezoid(y.as_slice(), self.as_slice())
    }

}

impl TryFrom<Vec<f64>> for Grid {

    type Error = ConfigError;

    fn try_from(vals : Vec<f64>) -> Result<Self, ConfigError> {
        Grid::from_values(vals)
    }

}

impl From<Grid> for Vec<f64> {

    fn from(grid : Grid) -> Vec<f64> {
        grid.vals.as_slice().to_vec()
    }

}

impl Display for Grid {

    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid {{ low : {}, high : {}, n : {}, spacing : {} }}", self.low(), self.high(), self.len(), self.spacing())
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn linspace_requires_two_points() {
        assert_eq!(Grid::linspace(0.0, 1.0, 1), Err(ConfigError::TooFewPoints(1)));
        assert_eq!(Grid::linspace(0.0, 1.0, 0), Err(ConfigError::TooFewPoints(0)));
        let g = Grid::linspace(0.0, 1.0, 2).unwrap();
        assert_eq!(g.as_slice(), &[0.0, 1.0]);
        assert_eq!(g.spacing(), 1.0);
    }

    #[test]
    fn linspace_rejects_inverted_bounds() {
        assert!(matches!(Grid::linspace(1.0, 1.0, 10), Err(ConfigError::InvalidBounds { .. })));
        assert!(matches!(Grid::linspace(2.0, 1.0, 10), Err(ConfigError::InvalidBounds { .. })));
        assert!(matches!(Grid::linspace(0.0, f64::INFINITY, 10), Err(ConfigError::InvalidBounds { .. })));
    }

    #[test]
    fn informed_values_are_validated() {
        assert!(Grid::from_values(vec![0.0, 0.25, 0.5, 0.75]).is_ok());
        assert_eq!(Grid::from_values(vec![0.0, 0.5, 0.5]), Err(ConfigError::NotIncreasing(2)));
        assert_eq!(Grid::from_values(vec![0.0, 0.5, 2.0]), Err(ConfigError::NonUniformGrid(2)));
        assert_eq!(Grid::from_values(vec![0.0, f64::NAN]), Err(ConfigError::NonFiniteGrid(1)));
        assert_eq!(Grid::from_values(vec![0.0]), Err(ConfigError::TooFewPoints(1)));
    }

    #[test]
    fn deserialized_values_are_validated() {
        let g = Grid::linspace(0.0, 1.0, 3).unwrap();
        let content = serde_json::to_string(&g).unwrap();
        assert_eq!(content, "[0.0,0.5,1.0]");
        assert_eq!(serde_json::from_str::<Grid>(&content).unwrap(), g);
        assert!(serde_json::from_str::<Grid>("[1.0,0.0]").is_err());
        assert!(serde_json::from_str::<Grid>("[0.0]").is_err());
        assert!(serde_json::from_str::<Grid>("[0.0,0.5,2.0]").is_err());
    }

}
