//! Samples and series names

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RecorderError;
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single recorded step of a run.
///
/// Field order is the column order of exported tables.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Elapsed simulation time in seconds
    pub t: f64,
    pub x: f64,
    pub x_ref: f64,
    pub y: f64,
    pub y_ref: f64,
    pub theta: f64,
    pub theta_ref: f64,

    /// Commanded linear velocity in meters/second
    pub v_c: f64,

    /// Commanded angular velocity in radians/second
    pub w_c: f64,
}

/// Labels identifying a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLabels {
    /// The control law that produced the actual trajectory, e.g. "pid"
    pub controller: String,

    /// The reference trajectory kind, e.g. "circular"
    pub trajectory: String,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The named series of a dataset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    T,
    X,
    XRef,
    Y,
    YRef,
    Theta,
    ThetaRef,
    VC,
    WC,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Sample {
    /// Build a sample from the actual and reference poses of one step.
    pub fn new(t_s: f64, pose: &Pose, reference: &Pose, v_c: f64, w_c: f64) -> Self {
        Self {
            t: t_s,
            x: pose.x(),
            x_ref: reference.x(),
            y: pose.y(),
            y_ref: reference.y(),
            theta: pose.heading_rad,
            theta_ref: reference.heading_rad,
            v_c,
            w_c,
        }
    }

    /// Get the value of one series in this sample.
    pub fn get(&self, series: Series) -> f64 {
        match series {
            Series::T => self.t,
            Series::X => self.x,
            Series::XRef => self.x_ref,
            Series::Y => self.y,
            Series::YRef => self.y_ref,
            Series::Theta => self.theta,
            Series::ThetaRef => self.theta_ref,
            Series::VC => self.v_c,
            Series::WC => self.w_c,
        }
    }
}

impl RunLabels {
    pub fn new<C: Into<String>, T: Into<String>>(controller: C, trajectory: T) -> Self {
        Self {
            controller: controller.into(),
            trajectory: trajectory.into(),
        }
    }
}

impl Series {
    /// All series in table column order.
    pub const ALL: [Series; 9] = [
        Series::T,
        Series::X,
        Series::XRef,
        Series::Y,
        Series::YRef,
        Series::Theta,
        Series::ThetaRef,
        Series::VC,
        Series::WC,
    ];

    /// The column name of the series.
    pub fn name(&self) -> &'static str {
        match self {
            Series::T => "t",
            Series::X => "x",
            Series::XRef => "x_ref",
            Series::Y => "y",
            Series::YRef => "y_ref",
            Series::Theta => "theta",
            Series::ThetaRef => "theta_ref",
            Series::VC => "v_c",
            Series::WC => "w_c",
        }
    }

    /// The `(reference, actual)` pair the tracking error of this series is
    /// computed from, if it has one.
    ///
    /// A reference series maps to the same pair as its actual series.
    pub fn error_pair(&self) -> Option<(Series, Series)> {
        match self {
            Series::X | Series::XRef => Some((Series::XRef, Series::X)),
            Series::Y | Series::YRef => Some((Series::YRef, Series::Y)),
            Series::Theta | Series::ThetaRef => Some((Series::ThetaRef, Series::Theta)),
            _ => None,
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Series {
    type Err = RecorderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|series| series.name() == s.trim())
            .copied()
            .ok_or_else(|| RecorderError::UnknownSeries(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_series_names() {
        for series in Series::ALL.iter() {
            assert_eq!(series.name().parse::<Series>().unwrap(), *series);
        }
        assert_eq!(
            "z".parse::<Series>(),
            Err(RecorderError::UnknownSeries("z".into()))
        );
    }

    #[test]
    fn test_sample_from_poses() {
        let s = Sample::new(
            1.5,
            &Pose::new(1.0, 2.0, 0.1),
            &Pose::new(1.1, 2.2, 0.3),
            0.4,
            -0.5
        );

        let values: Vec<f64> = Series::ALL.iter().map(|series| s.get(*series)).collect();
        assert_eq!(values, vec![1.5, 1.0, 1.1, 2.0, 2.2, 0.1, 0.3, 0.4, -0.5]);
    }
}
