use rand::Rng;
use super::Empirical;

/// Draws n values from a tabulated distribution by mapping uniform draws over
/// [0, 1) through the quantile function.
pub fn inverse_cdf_draws<R>(cdf : &Empirical, rng : &mut R, n : usize) -> Vec<f64>
where
    R : Rng + ?Sized
{
    (0..n).map(|_| {
        let u : f64 = rng.gen();
        cdf.quantile(u).unwrap_or(cdf.domain[0])
    }).collect()
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::grid::Grid;
    use nalgebra::DVector;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn draws_follow_the_distribution() {
        // Triangular density 2x over [0, 1], with mean 2/3.
        let grid = Grid::linspace(0.0, 1.0, 501).unwrap();
        let dens : DVector<f64> = grid.map(|x| 2.0 * x );
        let cdf = Empirical::from_density(&grid, &dens);
        let mut rng = StdRng::seed_from_u64(42);
        let draws = inverse_cdf_draws(&cdf, &mut rng, 20_000);
        assert_eq!(draws.len(), 20_000);
        assert!(draws.iter().all(|d| *d >= 0.0 && *d <= 1.0 ));
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert!((mean - 2. / 3.).abs() < 0.01);
        let below_half = draws.iter().filter(|d| **d < 0.5 ).count() as f64 / draws.len() as f64;
        assert!((below_half - 0.25).abs() < 0.02);
    }

}
