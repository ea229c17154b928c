//! Recorded datasets

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::{RecorderError, RunLabels, Sample, Series};
use util::maths::{get_ang_dist_2pi, max_abs, rms};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The ordered samples of one run.
///
/// Sample times are finite, non-negative and strictly increasing. Since each
/// sample holds every series, all series always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    labels: RunLabels,
    samples: Vec<Sample>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Dataset {
    /// Create an empty dataset.
    pub fn new(labels: RunLabels) -> Self {
        Self {
            labels,
            samples: Vec::new(),
        }
    }

    /// Create a dataset from existing samples, checking their times.
    pub fn from_samples(labels: RunLabels, samples: Vec<Sample>) -> Result<Self, RecorderError> {
        let mut dataset = Self {
            labels,
            samples: Vec::with_capacity(samples.len()),
        };

        for sample in samples {
            dataset.push(sample)?;
        }

        Ok(dataset)
    }

    /// Append a sample, which must be later than the last one.
    pub(crate) fn push(&mut self, sample: Sample) -> Result<(), RecorderError> {
        if !sample.t.is_finite() || sample.t < 0.0 {
            return Err(RecorderError::InvalidTime(sample.t));
        }

        if let Some(last_t_s) = self.last_t() {
            if sample.t <= last_t_s {
                return Err(RecorderError::NonMonotonicTime {
                    t_s: sample.t,
                    last_t_s,
                });
            }
        }

        self.samples.push(sample);

        Ok(())
    }

    pub fn labels(&self) -> &RunLabels {
        &self.labels
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time of the latest sample.
    pub fn last_t(&self) -> Option<f64> {
        self.samples.last().map(|s| s.t)
    }

    /// Get all values of one series, in time order.
    pub fn series(&self, series: Series) -> Vec<f64> {
        self.samples.iter().map(|s| s.get(series)).collect()
    }

    /// Compute the tracking error `reference - actual` of a series at every
    /// sample.
    ///
    /// Only `x`, `y` and `theta` (or their reference series) have an error.
    /// The heading error is a plain difference, see `wrapped_heading_error`
    /// for the shortest signed angle.
    pub fn compute_error(&self, series: Series) -> Result<Vec<f64>, RecorderError> {
        let (reference, actual) = series
            .error_pair()
            .ok_or(RecorderError::NoReferenceSeries(series))?;

        Ok(self
            .samples
            .iter()
            .map(|s| s.get(reference) - s.get(actual))
            .collect())
    }

    /// Heading error wrapped into [-pi, pi].
    pub fn wrapped_heading_error(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| get_ang_dist_2pi(s.theta, s.theta_ref))
            .collect()
    }

    /// Root mean square tracking error of a series, `None` for an empty
    /// dataset.
    pub fn rms_error(&self, series: Series) -> Result<Option<f64>, RecorderError> {
        Ok(rms(&self.compute_error(series)?))
    }

    /// Largest absolute tracking error of a series, `None` for an empty
    /// dataset.
    pub fn max_abs_error(&self, series: Series) -> Result<Option<f64>, RecorderError> {
        Ok(max_abs(&self.compute_error(series)?))
    }
}
