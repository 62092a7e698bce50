use nalgebra::DVector;
use serde::{Serialize, Deserialize};
use rand::Rng;
use crate::grid::Grid;

/// Cumulative distribution over a grid, and its inverse (quantile function).
mod empirical;

pub use empirical::*;

/// Central credible intervals.
mod interval;

pub use interval::*;

/// Highest-density regions.
mod hdi;

pub use hdi::*;

/// Inverse-CDF draws from a distribution tabulated over a grid.
mod draw;

pub use draw::*;

/// Trait shared by normalized densities tabulated over a grid (such as posteriors),
/// with summaries calculated by the same trapezoidal rule used to normalize them.
pub trait GridDistribution {

    fn grid(&self) -> &Grid;

    /// Density values, one per grid point, which integrate to one over the grid.
    fn density(&self) -> &DVector<f64>;

    /// Grid value with the highest density. Ties resolve to the lowest such value.
    fn mode(&self) -> f64 {
        let dens = self.density();
        let mut imax = 0;
        for (i, d) in dens.iter().enumerate() {
            if *d > dens[imax] {
                imax = i;
            }
        }
        self.grid().values()[imax]
    }

    fn mean(&self) -> f64 {
        let grid = self.grid();
        grid.integrate(&grid.values().component_mul(self.density()))
    }

    fn var(&self) -> f64 {
        let grid = self.grid();
        let mean = self.mean();
        let sq_dev = grid.map(|x| (x - mean).powi(2) );
        grid.integrate(&sq_dev.component_mul(self.density()))
    }

    fn sd(&self) -> f64 {
        self.var().sqrt()
    }

    fn cdf(&self) -> Empirical {
        Empirical::from_density(self.grid(), self.density())
    }

    /// Value below which a fraction q of the mass lies; None if q is outside [0, 1].
    fn quantile(&self, q : f64) -> Option<f64> {
        self.cdf().quantile(q)
    }

    fn median(&self) -> f64 {
        // The cumulative starts at 0 and ends at 1, so the median always exists.
        self.cdf().quantile(0.5).unwrap_or_else(|| self.mode() )
    }

    /// Central interval leaving (1 - level) / 2 of the mass on each side.
    fn credible_interval(&self, level : f64) -> Option<Credible> {
        Credible::central(&self.cdf(), level)
    }

    /// Smallest set of grid regions holding the informed mass. Unimodal
    /// distributions yield a single region.
    fn hdi(&self, level : f64) -> Vec<HDI> {
        highest_density_regions(self.grid(), self.density(), level)
    }

    /// Draws n values by inverting the cumulative distribution.
    fn sample<R>(&self, rng : &mut R, n : usize) -> Vec<f64>
    where
        R : Rng + ?Sized,
        Self : Sized
    {
        inverse_cdf_draws(&self.cdf(), rng, n)
    }

    fn summary(&self, level : f64) -> Summary {
        let (low, high) = self.credible_interval(level)
            .map(|c| (c.low(), c.high()) )
            .unwrap_or((f64::NAN, f64::NAN));
        Summary {
            mode : self.mode(),
            mean : self.mean(),
            sd : self.sd(),
            median : self.median(),
            level,
            low,
            high
        }
    }

}

/// Point and interval summaries of a distribution tabulated over a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mode : f64,
    pub mean : f64,
    pub sd : f64,
    pub median : f64,
    pub level : f64,
    pub low : f64,
    pub high : f64
}
