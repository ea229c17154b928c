//! # Sample recorder module
//!
//! The recorder accumulates one `Sample` per simulation step: the time, the
//! actual pose of the robot, the reference pose it should have, and the
//! commanded velocities. Samples must arrive in strictly increasing time, so
//! that time can serve as the key of the recorded run.
//!
//! The recorded run is a `Dataset`. The recorder only ever appends to it and
//! hands out immutable snapshots, so exporters and presenters never alias
//! the buffer that is still growing. If a run has to be restarted a new
//! recorder is created.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod dataset;
mod sample;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use dataset::*;
pub use sample::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that can occur while recording or querying a run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecorderError {
    /// Time did not advance, which indicates a bug in the control loop.
    #[error("Sample time {t_s} s is not after the previous sample at {last_t_s} s")]
    NonMonotonicTime {
        t_s: f64,
        last_t_s: f64
    },

    #[error("Sample time {0} s is not a finite, non-negative number")]
    InvalidTime(f64),

    #[error("Unknown series \"{0}\"")]
    UnknownSeries(String),

    #[error("Series {0} has no reference to compute an error against")]
    NoReferenceSeries(Series),
}
