//! Equal-width histogram buckets.

use serde::Serialize;
use tracing::debug;

use crate::density::GaussianKde;
use crate::error::{AnalysisError, Result};

/// Smallest accepted bucket count.
pub const MIN_BINS: usize = 5;
/// Largest accepted bucket count.
pub const MAX_BINS: usize = 100;
/// Bucket count used when none is chosen.
pub const DEFAULT_BINS: usize = 30;

/// One histogram bucket. Every bucket is half-open `[lower, upper)` except
/// the last, which also holds `upper`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// Kernel density at the bucket midpoint, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
}

impl Bucket {
    pub fn midpoint(&self) -> f64 {
        self.lower + self.width() / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Histogram of the present values of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub column: String,
    pub buckets: Vec<Bucket>,
    pub total: usize,
}

impl Histogram {
    /// Computes `bins` equal-width buckets over the finite values.
    ///
    /// The range is min..max; when every value is equal it widens to
    /// `value - 0.5 .. value + 0.5`. Non-finite values are ignored.
    pub fn compute(column: &str, values: &[f64], bins: usize) -> Result<Self> {
        check_bins(bins)?;
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(AnalysisError::NoValues {
                column: column.to_string(),
            });
        }

        let (mut min, mut max) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min == max {
            debug!(column, value = min, "constant column, widening histogram range");
            min -= 0.5;
            max += 0.5;
        }

        // max - min overflows for values near the ends of the f64 range
        let span = max - min;
        let width = if span.is_finite() {
            span / bins as f64
        } else {
            max / bins as f64 - min / bins as f64
        };
        let mut counts = vec![0usize; bins];
        for &v in &finite {
            let offset = v - min;
            let position = if offset.is_finite() {
                offset / width
            } else {
                v / width - min / width
            };
            counts[(position as usize).min(bins - 1)] += 1;
        }

        let buckets = counts
            .into_iter()
            .enumerate()
            .map(|(index, count)| {
                let lower = min + width * index as f64;
                let upper = if index + 1 == bins {
                    max
                } else {
                    min + width * (index + 1) as f64
                };
                Bucket {
                    lower,
                    upper,
                    count,
                    density: None,
                }
            })
            .collect();

        Ok(Self {
            column: column.to_string(),
            buckets,
            total: finite.len(),
        })
    }

    /// Adds the kernel density at each bucket midpoint.
    ///
    /// Leaves the histogram unchanged when no estimate exists (fewer than two
    /// distinct values).
    #[must_use]
    pub fn with_density(mut self, kde: Option<&GaussianKde>) -> Self {
        if let Some(kde) = kde {
            for bucket in &mut self.buckets {
                bucket.density = Some(kde.evaluate(bucket.midpoint()));
            }
        }
        self
    }

    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Validates a bucket count against `MIN_BINS..=MAX_BINS`.
pub fn check_bins(bins: usize) -> Result<usize> {
    if (MIN_BINS..=MAX_BINS).contains(&bins) {
        Ok(bins)
    } else {
        Err(AnalysisError::BinsOutOfRange {
            bins,
            min: MIN_BINS,
            max: MAX_BINS,
        })
    }
}
