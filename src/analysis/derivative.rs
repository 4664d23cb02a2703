//! Discrete derivatives of the energy series.
//!
//! The gradient runs over the whole multi-day index as one continuous signal.
//! It deliberately does not reset at day boundaries: the slope at the first
//! sample of a day is influenced by the last sample of the previous day.

use serde::{Deserialize, Serialize};

/// First and second discrete derivatives, index-aligned with the series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivativeSeries {
    pub slope: Vec<f64>,
    pub slope2: Vec<f64>,
}

impl DerivativeSeries {
    pub fn compute(energies: &[f64]) -> Self {
        let slope = gradient(energies);
        let slope2 = gradient(&slope);
        Self { slope, slope2 }
    }

    pub fn len(&self) -> usize {
        self.slope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slope.is_empty()
    }
}

/// Discrete gradient with unit spacing: central differences in the interior,
/// one-sided differences at the edges. Output length equals input length.
pub fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let mut out = Vec::with_capacity(n);
            out.push(values[1] - values[0]);
            for i in 1..n - 1 {
                out.push((values[i + 1] - values[i - 1]) / 2.0);
            }
            out.push(values[n - 1] - values[n - 2]);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_length_matches_input() {
        for n in 0..10 {
            let values: Vec<f64> = (0..n).map(|i| (i * i) as f64).collect();
            assert_eq!(gradient(&values).len(), n);
        }
    }

    #[test]
    fn test_linear_ramp_has_constant_slope_and_zero_curvature() {
        let values: Vec<f64> = (0..50).map(|i| 3.0 * i as f64 + 7.0).collect();
        let deriv = DerivativeSeries::compute(&values);

        for s in &deriv.slope {
            assert!((s - 3.0).abs() < 1e-9, "slope {s} != 3.0");
        }
        for s in &deriv.slope2 {
            assert!(s.abs() < 1e-9, "slope2 {s} != 0.0");
        }
    }

    #[test]
    fn test_central_and_one_sided_differences() {
        let values = vec![0.0, 1.0, 4.0, 9.0];
        let slope = gradient(&values);
        assert_eq!(slope, vec![1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(gradient(&[]).is_empty());
        assert_eq!(gradient(&[42.0]), vec![0.0]);
        assert_eq!(gradient(&[1.0, 3.0]), vec![2.0, 2.0]);
    }
}
