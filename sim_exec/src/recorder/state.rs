//! Sample recorder state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use std::sync::Arc;

// Internal
use super::*;
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Append-only recorder for the samples of one run.
///
/// Snapshots share the recorded data until the next append, at which point
/// the recorder copies it (copy-on-snapshot), so a snapshot never changes
/// after it has been taken.
#[derive(Debug)]
pub struct SampleRecorder {
    dataset: Arc<Dataset>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SampleRecorder {
    /// Create a new, empty recorder for a run.
    pub fn new(labels: RunLabels) -> Self {
        Self {
            dataset: Arc::new(Dataset::new(labels)),
        }
    }

    /// Record one simulation step.
    ///
    /// `t_s` must be strictly greater than the time of the previous sample,
    /// otherwise `NonMonotonicTime` is returned and nothing is recorded.
    pub fn add_sample(
        &mut self,
        t_s: f64,
        pose: &Pose,
        reference: &Pose,
        v_c: f64,
        w_c: f64
    ) -> Result<(), RecorderError> {
        let sample = Sample::new(t_s, pose, reference, v_c, w_c);

        Arc::make_mut(&mut self.dataset).push(sample)?;

        trace!("Recorded sample {}: {:?}", self.dataset.len() - 1, sample);

        Ok(())
    }

    /// Compute the tracking error of the named series, e.g. "x" or "theta".
    pub fn compute_error(&self, series_name: &str) -> Result<Vec<f64>, RecorderError> {
        let series: Series = series_name.parse()?;

        self.dataset.compute_error(series)
    }

    /// Take an immutable snapshot of everything recorded so far.
    pub fn snapshot(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    /// Read-only view of the recorded samples.
    pub fn samples(&self) -> &[Sample] {
        self.dataset.samples()
    }

    pub fn labels(&self) -> &RunLabels {
        self.dataset.labels()
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn last_t(&self) -> Option<f64> {
        self.dataset.last_t()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn recorder() -> SampleRecorder {
        SampleRecorder::new(RunLabels::new("euler", "circular"))
    }

    #[test]
    fn test_non_monotonic_time() {
        let pose = Pose::default();

        let mut rec = recorder();
        rec.add_sample(1.0, &pose, &pose, 0.0, 0.0).unwrap();
        assert_eq!(
            rec.add_sample(1.0, &pose, &pose, 0.0, 0.0),
            Err(RecorderError::NonMonotonicTime { t_s: 1.0, last_t_s: 1.0 })
        );
        assert_eq!(
            rec.add_sample(0.5, &pose, &pose, 0.0, 0.0),
            Err(RecorderError::NonMonotonicTime { t_s: 0.5, last_t_s: 1.0 })
        );

        // Rejected samples are not recorded
        assert_eq!(rec.len(), 1);
        rec.add_sample(1.5, &pose, &pose, 0.0, 0.0).unwrap();
        assert_eq!(rec.last_t(), Some(1.5));
    }

    #[test]
    fn test_invalid_time() {
        let pose = Pose::default();
        let mut rec = recorder();

        assert!(matches!(
            rec.add_sample(std::f64::NAN, &pose, &pose, 0.0, 0.0),
            Err(RecorderError::InvalidTime(_))
        ));
        assert_eq!(
            rec.add_sample(-0.1, &pose, &pose, 0.0, 0.0),
            Err(RecorderError::InvalidTime(-0.1))
        );
        assert!(rec.is_empty());
    }

    #[test]
    fn test_compute_error_by_name() {
        let mut rec = recorder();

        for i in 0..4 {
            let t = i as f64;
            rec.add_sample(
                t,
                &Pose::new(t, 2.0 * t, 0.1 * t),
                &Pose::new(t + 1.0, 2.0 * t, 0.2 * t),
                1.0,
                0.0
            ).unwrap();
        }

        assert_eq!(rec.compute_error("x").unwrap(), vec![1.0; 4]);
        assert_eq!(rec.compute_error("y").unwrap(), vec![0.0; 4]);
        let e_theta = rec.compute_error("theta").unwrap();
        for (i, e) in e_theta.iter().enumerate() {
            assert_eq!(*e, 0.2 * i as f64 - 0.1 * i as f64);
        }

        assert_eq!(
            rec.compute_error("speed"),
            Err(RecorderError::UnknownSeries("speed".into()))
        );
        assert_eq!(
            rec.compute_error("w_c"),
            Err(RecorderError::NoReferenceSeries(Series::WC))
        );
    }

    #[test]
    fn test_snapshot_is_immutable() {
        let pose = Pose::default();
        let mut rec = recorder();

        rec.add_sample(0.0, &pose, &pose, 0.0, 0.0).unwrap();
        let snap = rec.snapshot();

        rec.add_sample(0.1, &pose, &pose, 0.0, 0.0).unwrap();
        rec.add_sample(0.2, &pose, &pose, 0.0, 0.0).unwrap();

        assert_eq!(snap.len(), 1);
        assert_eq!(rec.len(), 3);
        assert_eq!(rec.snapshot().samples(), rec.samples());
        assert_eq!(snap.labels(), &RunLabels::new("euler", "circular"));
    }
}
