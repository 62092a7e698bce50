use nalgebra::DVector;
use std::cmp::Ordering;
use crate::grid::Grid;
use super::Interval;

/// Highest-density interval: a contiguous grid region [low, high] whose points all
/// have higher density than any point outside the (possibly multi-region) set,
/// holding the informed fraction of the mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HDI {
    low : f64,
    high : f64,
    mass : f64
}

impl HDI {

    /// Fraction of the total mass within this region.
    pub fn mass(&self) -> f64 {
        self.mass
    }

}

impl Interval for HDI {

    fn low(&self) -> f64 {
        self.low
    }

    fn high(&self) -> f64 {
        self.high
    }

}

// Mass assigned to each grid point by the trapezoidal rule:
// half of each adjacent interval width times the point density.
fn point_masses(grid : &Grid, density : &DVector<f64>) -> Vec<f64> {
    let x = grid.as_slice();
    let n = x.len();
    (0..n).map(|i| {
        let left = if i > 0 { x[i] - x[i-1] } else { 0.0 };
        let right = if i < n - 1 { x[i+1] - x[i] } else { 0.0 };
        0.5 * (left + right) * density[i]
    }).collect()
}

/// Adds grid points in decreasing order of density until the informed level
/// of the mass is reached, then groups the selected points into contiguous
/// regions, returned in increasing order of position. Returns an empty vector
/// if level is not within (0, 1].
pub fn highest_density_regions(grid : &Grid, density : &DVector<f64>, level : f64) -> Vec<HDI> {
    if !(level > 0.0 && level <= 1.0) {
        return Vec::new();
    }
    let masses = point_masses(grid, density);
    let total : f64 = masses.iter().sum();
    if !(total > 0.0) {
        return Vec::new();
    }
    let mut order : Vec<usize> = (0..density.len()).collect();
    order.sort_by(|a, b| density[*b].partial_cmp(&density[*a]).unwrap_or(Ordering::Equal) );

    let mut selected = vec![false; density.len()];
    let mut acc = 0.0;
    for i in order {
        if acc >= level * total {
            break;
        }
        selected[i] = true;
        acc += masses[i];
    }

    let x = grid.as_slice();
    let mut hdis = Vec::new();
    let mut start : Option<usize> = None;
    for i in 0..=selected.len() {
        let inside = i < selected.len() && selected[i];
        match (start, inside) {
            (None, true) => start = Some(i),
            (Some(s), false) => {
                let mass : f64 = masses[s..i].iter().sum();
                hdis.push(HDI { low : x[s], high : x[i-1], mass : mass / total });
                start = None;
            },
            _ => { }
        }
    }
    hdis
}
