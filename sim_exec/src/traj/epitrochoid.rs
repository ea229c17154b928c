//! Epitrochoid trajectory

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

/// The curve traced by a point attached to a circle rolling around the
/// outside of a fixed circle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct EpitrochoidTrajectory {
    /// Radius of the fixed circle
    fixed_radius_m: f64,

    /// Radius of the rolling circle
    rolling_radius_m: f64,

    /// Distance of the traced point from the rolling circle's centre
    offset_m: f64,

    period_s: f64,

    /// Number of turns about the fixed circle per period
    speed_ratio: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl EpitrochoidTrajectory {
    /// Create a new epitrochoid, the rolling radius and the period must be
    /// non-zero.
    pub fn new(
        fixed_radius_m: f64,
        rolling_radius_m: f64,
        offset_m: f64,
        period_s: f64,
        speed_ratio: f64
    ) -> Result<Self, TrajError> {
        require_non_zero(TrajectoryKind::Epitrochoid, "rolling_radius_m", rolling_radius_m)?;
        require_non_zero(TrajectoryKind::Epitrochoid, "period_s", period_s)?;

        Ok(Self {
            fixed_radius_m,
            rolling_radius_m,
            offset_m,
            period_s,
            speed_ratio,
        })
    }

    pub fn evaluate_at(&self, t_s: f64) -> Point2D {
        let theta = self.speed_ratio * TAU * t_s / self.period_s;
        let sum_m = self.fixed_radius_m + self.rolling_radius_m;
        let rolling_theta = sum_m / self.rolling_radius_m * theta;

        Point2D::new(
            sum_m * theta.cos() - self.offset_m * rolling_theta.cos(),
            sum_m * theta.sin() - self.offset_m * rolling_theta.sin(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_epitrochoid() {
        let traj = EpitrochoidTrajectory::new(5.0, 1.0, 3.0, 60.0, 1.0 / 3.0).unwrap();

        // R + r - d
        assert_eq!(traj.evaluate_at(0.0), Point2D::new(3.0, 0.0));

        // theta = pi after 90 s, the rolling circle has turned 6 pi
        let p = traj.evaluate_at(90.0);
        assert_abs_diff_eq!(p.x, -6.0 - 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-9);

        // Integer (R + r) / r closes the curve after one full turn
        let a = traj.evaluate_at(17.0);
        let b = traj.evaluate_at(17.0 + 180.0);
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
    }

    #[test]
    fn test_epitrochoid_invalid() {
        assert!(EpitrochoidTrajectory::new(5.0, 0.0, 3.0, 60.0, 1.0).is_err());
        assert!(EpitrochoidTrajectory::new(5.0, 1.0, 3.0, 0.0, 1.0).is_err());
        assert!(EpitrochoidTrajectory::new(0.0, 1.0, 0.0, 1.0, 0.0).is_ok());
    }
}
