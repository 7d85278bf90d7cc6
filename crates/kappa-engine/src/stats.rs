//! Population statistics over `f64` samples.

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by n). Zero for an empty slice.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Slope of the degree-1 least-squares fit of `values` against their index.
///
/// Returns `None` for fewer than two samples.
pub fn linear_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    Some(num / den)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variance_is_population() {
        assert_eq!(variance(&[1.0, 2.0, 3.0, 4.0]), 1.25);
        assert_eq!(variance(&[5.0]), 0.0);
        assert_eq!(variance(&[]), 0.0);
    }

    #[test]
    fn std_dev_of_constant_is_zero() {
        assert_eq!(std_dev(&[0.4, 0.4, 0.4]), 0.0);
    }

    #[test]
    fn slope_of_line() {
        let ys: Vec<f64> = (0..10).map(|i| 0.1 + 0.02 * i as f64).collect();
        let slope = linear_slope(&ys).unwrap();
        assert!((slope - 0.02).abs() < 1e-12);
    }

    #[test]
    fn slope_needs_two_points() {
        assert!(linear_slope(&[0.5]).is_none());
        assert_eq!(linear_slope(&[0.5, 0.5]), Some(0.0));
    }
}
