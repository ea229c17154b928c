//! Linear trajectory

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use crate::loc::Point2D;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A straight or parabolic path starting at the origin, with each axis
/// accelerating independently from its initial velocity.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LinearTrajectory {
    vx_ms: f64,
    ax_mss: f64,
    vy_ms: f64,
    ay_mss: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LinearTrajectory {
    /// Create a new linear trajectory.
    ///
    /// Any combination of velocities and accelerations is valid.
    pub fn new(vx_ms: f64, ax_mss: f64, vy_ms: f64, ay_mss: f64) -> Self {
        Self {
            vx_ms,
            ax_mss,
            vy_ms,
            ay_mss,
        }
    }

    pub fn evaluate_at(&self, t_s: f64) -> Point2D {
        Point2D::new(
            self.vx_ms * t_s + 0.5 * self.ax_mss * t_s.powi(2),
            self.vy_ms * t_s + 0.5 * self.ay_mss * t_s.powi(2),
        )
    }
}
