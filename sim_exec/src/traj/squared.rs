//! Squared trajectory

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::{require_non_zero, TrajError, TrajectoryKind};
use crate::loc::Point2D;
use util::maths::rem_euclid;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of sides of the square.
const NUM_SIDES: usize = 4;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An axis-aligned square travelled anticlockwise at constant speed.
///
/// The path starts at the corner `(phase_x_m, phase_y_m)`, runs along +X,
/// then +Y, then -X and finally -Y back to the start, completing one lap per
/// period.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct SquaredTrajectory {
    side_m: f64,
    period_s: f64,
    phase_x_m: f64,
    phase_y_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SquaredTrajectory {
    pub fn new(
        side_m: f64,
        period_s: f64,
        phase_x_m: f64,
        phase_y_m: f64
    ) -> Result<Self, TrajError> {
        require_non_zero(TrajectoryKind::Squared, "side_m", side_m)?;
        require_non_zero(TrajectoryKind::Squared, "period_s", period_s)?;

        Ok(Self {
            side_m,
            period_s,
            phase_x_m,
            phase_y_m,
        })
    }

    pub fn evaluate_at(&self, t_s: f64) -> Point2D {
        // Normalised time in [0, 1], stretched over the four sides
        let lap = rem_euclid(t_s / self.period_s, 1.0) * NUM_SIDES as f64;

        // rem_euclid can round up to exactly 1.0, which is the end of the
        // last side rather than the start of a fifth one
        let side = (lap.floor() as usize).min(NUM_SIDES - 1);
        let frac = (lap - side as f64) * self.side_m;

        let (x, y) = match side {
            0 => (frac, 0.0),
            1 => (self.side_m, frac),
            2 => (self.side_m - frac, self.side_m),
            _ => (0.0, self.side_m - frac),
        };

        Point2D::new(x + self.phase_x_m, y + self.phase_y_m)
    }

    pub fn period_s(&self) -> f64 {
        self.period_s
    }
}
