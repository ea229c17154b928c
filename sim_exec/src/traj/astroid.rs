//! Astroid trajectory

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use std::f64::consts::TAU;

use super::{require_non_zero, TrajError, TrajectoryKind};
use crate::loc::Point2D;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A four-cusped hypocycloid with its cusps on the axes at +/- radius.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct AstroidTrajectory {
    radius_m: f64,
    period_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AstroidTrajectory {
    pub fn new(radius_m: f64, period_s: f64) -> Result<Self, TrajError> {
        require_non_zero(TrajectoryKind::Astroid, "radius_m", radius_m)?;
        require_non_zero(TrajectoryKind::Astroid, "period_s", period_s)?;

        Ok(Self { radius_m, period_s })
    }

    pub fn evaluate_at(&self, t_s: f64) -> Point2D {
        let angle_rad = TAU * t_s / self.period_s;

        Point2D::new(
            self.radius_m * angle_rad.cos().powi(3),
            self.radius_m * angle_rad.sin().powi(3),
        )
    }

    pub fn period_s(&self) -> f64 {
        self.period_s
    }
}
