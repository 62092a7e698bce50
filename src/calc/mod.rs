use nalgebra::DVector;

/// Composite trapezoidal rule: sums the areas of the trapezoids formed between
/// consecutive points (x[i], y[i]) and (x[i+1], y[i+1]), using the actual
/// local spacing x[i+1] - x[i], so unequal spacing is integrated correctly.
///
/// ```rust
/// let x = [0.0, 1.0, 2.0];
/// let y = [0.0, 1.0, 2.0];
/// assert!((quadbayes::calc::trapezoid(&y, &x) - 2.0).abs() < 1E-12);
/// ```
pub fn trapezoid(y : &[f64], x : &[f64]) -> f64 {
    assert!(y.len() == x.len(), "Integrand and abscissa should have the same length");
    y.windows(2)
        .zip(x.windows(2))
        .map(|(yw, xw)| 0.5 * (xw[1] - xw[0]) * (yw[0] + yw[1]) )
        .sum()
}

/// Running trapezoidal integral. The output has the same length as the input,
/// starting at zero at x[0] and ending at trapezoid(y, x).
pub fn cumulative_trapezoid(y : &[f64], x : &[f64]) -> Vec<f64> {
    assert!(y.len() == x.len(), "Integrand and abscissa should have the same length");
    let mut acc = Vec::with_capacity(y.len());
    if y.is_empty() {
        return acc;
    }
    acc.push(0.0);
    let mut total = 0.0;
    for (yw, xw) in y.windows(2).zip(x.windows(2)) {
        total += 0.5 * (xw[1] - xw[0]) * (yw[0] + yw[1]);
        acc.push(total);
    }
    acc
}

/// n equally-spaced values over the closed interval [low, high]. The last value
/// is set to high exactly, so floating-point error does not push it past a
/// bounded domain (e.g. alpha = 1 for a probability).
pub fn linspace(low : f64, high : f64, n : usize) -> DVector<f64> {
    match n {
        0 => DVector::zeros(0),
        1 => DVector::from_element(1, low),
        _ => {
            let step = (high - low) / (n - 1) as f64;
            DVector::from_fn(n, |i, _| {
                if i == n - 1 { high } else { low + step * i as f64 }
            })
        }
    }
}

/// Maximum over the finite entries of the slice; None when no entry is finite.
pub fn finite_max(vals : &[f64]) -> Option<f64> {
    vals.iter()
        .filter(|v| v.is_finite() )
        .fold(None, |max, v| match max {
            Some(m) if m >= *v => Some(m),
            _ => Some(*v)
        })
}
