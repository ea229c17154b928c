//! # Trajectory module
//!
//! A trajectory is a reference path given as a closed-form function of the
//! elapsed simulation time. Six kinds are supported, each in its own
//! submodule, and unified behind the `Trajectory` enum whose `evaluate_at`
//! dispatches to the variant selected when the trajectory was built.
//!
//! Evaluation is pure: a trajectory holds no mutable state, so it can be
//! queried repeatedly, in any order, and from any thread. All parameter
//! validation (e.g. zero radius or period) happens at construction, after
//! which `evaluate_at` cannot fail for a finite time.
//!
//! Trajectories are normally built through `TrajectoryFactory`, which maps a
//! kind name and a positional parameter list onto a variant.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod astroid;
mod circular;
mod epitrochoid;
mod factory;
mod lemniscate;
mod linear;
mod params;
mod squared;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Internal
pub use astroid::AstroidTrajectory;
pub use circular::CircularTrajectory;
pub use epitrochoid::EpitrochoidTrajectory;
pub use factory::TrajectoryFactory;
pub use lemniscate::LemniscateTrajectory;
pub use linear::LinearTrajectory;
pub use params::TrajParams;
pub use squared::SquaredTrajectory;

use crate::loc::{Point2D, Pose};
use util::maths::get_ang_dist_2pi;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Time step used for finite differences when the caller's step is unusable.
pub const DEFAULT_DIFF_STEP_S: f64 = 1e-3;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that can occur while building a trajectory.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrajError {
    #[error("Unknown trajectory kind \"{0}\", expected one of linear, circular, squared, astroid, lemniscate or epitrochoid")]
    UnknownTrajectoryKind(String),

    #[error("Invalid parameters for a {kind} trajectory: {reason}")]
    InvalidTrajectoryParameters {
        kind: TrajectoryKind,
        reason: String
    },
}

/// The kinds of trajectory that can be generated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrajectoryKind {
    Linear,
    Circular,
    Squared,
    Astroid,
    Lemniscate,
    Epitrochoid,
}

/// A reference trajectory.
///
/// Each variant carries its own validated parameters.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Trajectory {
    Linear(LinearTrajectory),
    Circular(CircularTrajectory),
    Squared(SquaredTrajectory),
    Astroid(AstroidTrajectory),
    Lemniscate(LemniscateTrajectory),
    Epitrochoid(EpitrochoidTrajectory),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajectoryKind {
    /// Every trajectory kind, in declaration order.
    pub const ALL: [TrajectoryKind; 6] = [
        TrajectoryKind::Linear,
        TrajectoryKind::Circular,
        TrajectoryKind::Squared,
        TrajectoryKind::Astroid,
        TrajectoryKind::Lemniscate,
        TrajectoryKind::Epitrochoid,
    ];

    /// The name of the kind as used in parameter files and table names.
    pub fn name(&self) -> &'static str {
        match self {
            TrajectoryKind::Linear => "linear",
            TrajectoryKind::Circular => "circular",
            TrajectoryKind::Squared => "squared",
            TrajectoryKind::Astroid => "astroid",
            TrajectoryKind::Lemniscate => "lemniscate",
            TrajectoryKind::Epitrochoid => "epitrochoid",
        }
    }

    /// Names of the positional parameters accepted by this kind, in order.
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            TrajectoryKind::Linear => &["vx_ms", "ax_mss", "vy_ms", "ay_mss"],
            TrajectoryKind::Circular => &["radius_m", "period_s"],
            TrajectoryKind::Squared => &["side_m", "period_s", "phase_x_m", "phase_y_m"],
            TrajectoryKind::Astroid => &["radius_m", "period_s"],
            TrajectoryKind::Lemniscate => &["scale_m", "period_s"],
            TrajectoryKind::Epitrochoid => &[
                "fixed_radius_m",
                "rolling_radius_m",
                "offset_m",
                "period_s",
                "speed_ratio",
            ],
        }
    }
}

impl fmt::Display for TrajectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrajectoryKind {
    type Err = TrajError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        Self::ALL
            .iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| TrajError::UnknownTrajectoryKind(s.to_string()))
    }
}

impl Trajectory {
    /// The kind of this trajectory.
    pub fn kind(&self) -> TrajectoryKind {
        match self {
            Trajectory::Linear(_) => TrajectoryKind::Linear,
            Trajectory::Circular(_) => TrajectoryKind::Circular,
            Trajectory::Squared(_) => TrajectoryKind::Squared,
            Trajectory::Astroid(_) => TrajectoryKind::Astroid,
            Trajectory::Lemniscate(_) => TrajectoryKind::Lemniscate,
            Trajectory::Epitrochoid(_) => TrajectoryKind::Epitrochoid,
        }
    }

    /// Get the reference position at the given elapsed time.
    pub fn evaluate_at(&self, t_s: f64) -> Point2D {
        match self {
            Trajectory::Linear(t) => t.evaluate_at(t_s),
            Trajectory::Circular(t) => t.evaluate_at(t_s),
            Trajectory::Squared(t) => t.evaluate_at(t_s),
            Trajectory::Astroid(t) => t.evaluate_at(t_s),
            Trajectory::Lemniscate(t) => t.evaluate_at(t_s),
            Trajectory::Epitrochoid(t) => t.evaluate_at(t_s),
        }
    }

    /// The time after which the trajectory repeats itself, or `None` if it
    /// does not repeat within a single traversal of its parameter period.
    pub fn period_s(&self) -> Option<f64> {
        match self {
            Trajectory::Linear(_) => None,
            Trajectory::Circular(t) => Some(t.period_s()),
            Trajectory::Squared(t) => Some(t.period_s()),
            Trajectory::Astroid(t) => Some(t.period_s()),
            Trajectory::Lemniscate(t) => Some(t.period_s()),
            Trajectory::Epitrochoid(_) => None,
        }
    }

    /// Reference velocity at the given time, from a central difference over
    /// `dt_s`.
    pub fn velocity_at(&self, t_s: f64, dt_s: f64) -> Vector2<f64> {
        let h = diff_step(dt_s) * 0.5;

        (self.evaluate_at(t_s + h) - self.evaluate_at(t_s - h)) / (2.0 * h)
    }

    /// Reference heading (direction of travel) at the given time.
    pub fn heading_at(&self, t_s: f64, dt_s: f64) -> f64 {
        let v = self.velocity_at(t_s, dt_s);
        v.y.atan2(v.x)
    }

    /// Reference linear speed at the given time.
    pub fn speed_at(&self, t_s: f64, dt_s: f64) -> f64 {
        self.velocity_at(t_s, dt_s).norm()
    }

    /// Reference turn rate at the given time, accounting for heading wrap.
    pub fn turn_rate_at(&self, t_s: f64, dt_s: f64) -> f64 {
        let dt = diff_step(dt_s);
        let h = dt * 0.5;

        get_ang_dist_2pi(
            self.heading_at(t_s - h, dt_s),
            self.heading_at(t_s + h, dt_s)
        ) / dt
    }

    /// Reference pose (position and direction of travel) at the given time.
    pub fn reference_pose(&self, t_s: f64, dt_s: f64) -> Pose {
        Pose::from_position(self.evaluate_at(t_s), self.heading_at(t_s, dt_s))
    }

    /// Evaluate the trajectory over a uniform time grid `0, dt, 2dt, ...`.
    pub fn sample_path(&self, steps: usize, dt_s: f64) -> Vec<Point2D> {
        (0..steps)
            .map(|i| self.evaluate_at(i as f64 * dt_s))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Check that a parameter used as a divisor is not zero.
pub(crate) fn require_non_zero(
    kind: TrajectoryKind,
    name: &str,
    value: f64
) -> Result<(), TrajError> {
    if value == 0.0 {
        return Err(TrajError::InvalidTrajectoryParameters {
            kind,
            reason: format!("{} must not be zero", name)
        })
    }

    Ok(())
}

fn diff_step(dt_s: f64) -> f64 {
    if dt_s.is_finite() && dt_s > 0.0 {
        dt_s
    }
    else {
        DEFAULT_DIFF_STEP_S
    }
}
