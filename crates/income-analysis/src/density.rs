//! Gaussian kernel density estimation.

use std::f64::consts::PI;

use polars::prelude::{NamedFrom, PlSmallStr, Series};
use serde::Serialize;

/// Gaussian KDE with Scott's rule bandwidth (`n^(-1/5)` times the sample
/// standard deviation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaussianKde {
    #[serde(skip)]
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fits the estimate to the finite values.
    ///
    /// Returns `None` with fewer than two distinct values, or when the
    /// spread of the values is not finite.
    pub fn fit(values: &[f64]) -> Option<Self> {
        let points: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if points.len() < 2 {
            return None;
        }
        let std = Series::new(PlSmallStr::from_static("kde"), points.as_slice()).std(1)?;
        if !std.is_finite() || std <= 0.0 {
            return None;
        }
        let factor = (points.len() as f64).powf(-0.2);
        Some(Self {
            bandwidth: std * factor,
            points,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`; integrates to 1 over the real line.
    pub fn evaluate(&self, x: f64) -> f64 {
        let norm = 1.0 / (self.points.len() as f64 * self.bandwidth * (2.0 * PI).sqrt());
        let sum: f64 = self
            .points
            .iter()
            .map(|p| {
                let z = (x - p) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum();
        norm * sum
    }
}
