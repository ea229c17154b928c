//! Lemniscate (figure-eight) trajectory

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

/// A lemniscate of Bernoulli centred on the origin, crossing itself at the
/// origin and reaching +/- scale on the X axis.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LemniscateTrajectory {
    scale_m: f64,
    period_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LemniscateTrajectory {
    pub fn new(scale_m: f64, period_s: f64) -> Result<Self, TrajError> {
        require_non_zero(TrajectoryKind::Lemniscate, "scale_m", scale_m)?;
        require_non_zero(TrajectoryKind::Lemniscate, "period_s", period_s)?;

        Ok(Self { scale_m, period_s })
    }

    pub fn evaluate_at(&self, t_s: f64) -> Point2D {
        let angle_rad = TAU * t_s / self.period_s;
        let (sin, cos) = angle_rad.sin_cos();

        // Always >= 1 so never a division by zero
        let denom = 1.0 + sin.powi(2);

        Point2D::new(
            self.scale_m * cos / denom,
            self.scale_m * sin * cos / denom,
        )
    }

    pub fn period_s(&self) -> f64 {
        self.period_s
    }
}
