//! Circular trajectory

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

/// A circle about the origin, starting on the +X axis and travelled
/// anticlockwise once per period.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CircularTrajectory {
    radius_m: f64,
    period_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CircularTrajectory {
    /// Create a new circular trajectory, the radius and period must be
    /// non-zero.
    pub fn new(radius_m: f64, period_s: f64) -> Result<Self, TrajError> {
        require_non_zero(TrajectoryKind::Circular, "radius_m", radius_m)?;
        require_non_zero(TrajectoryKind::Circular, "period_s", period_s)?;

        Ok(Self { radius_m, period_s })
    }

    pub fn evaluate_at(&self, t_s: f64) -> Point2D {
        let angle_rad = TAU * t_s / self.period_s;

        Point2D::new(
            self.radius_m * angle_rad.cos(),
            self.radius_m * angle_rad.sin(),
        )
    }

    pub fn period_s(&self) -> f64 {
        self.period_s
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_circular() {
        let traj = CircularTrajectory::new(2.0, 10.0).unwrap();

        assert_eq!(traj.evaluate_at(0.0), Point2D::new(2.0, 0.0));

        let p = traj.evaluate_at(2.5);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-12);

        // Every point lies on the circle
        for i in 0..100 {
            let p = traj.evaluate_at(i as f64 * 0.13);
            assert_abs_diff_eq!(p.coords.norm(), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_circular_invalid() {
        assert!(matches!(
            CircularTrajectory::new(0.0, 10.0),
            Err(TrajError::InvalidTrajectoryParameters { kind: TrajectoryKind::Circular, .. })
        ));
        assert!(CircularTrajectory::new(2.0, 0.0).is_err());
    }
}
