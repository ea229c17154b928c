//! # Localisation types
//!
//! Positions are expressed in the planar world frame, in meters, headings
//! are angles to the positive X axis in radians.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A point in the plane.
pub type Point2D = Point2<f64>;

/// The planar pose (position and heading) of the robot.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// The position in the world frame
    pub position_m: Point2D,

    /// The heading (angle to the positive X axis) in radians
    pub heading_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    /// Create a new pose from its components.
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64) -> Self {
        Self {
            position_m: Point2D::new(x_m, y_m),
            heading_rad,
        }
    }

    /// Create a pose at the given position.
    pub fn from_position(position_m: Point2D, heading_rad: f64) -> Self {
        Self {
            position_m,
            heading_rad,
        }
    }

    pub fn x(&self) -> f64 {
        self.position_m.x
    }

    pub fn y(&self) -> f64 {
        self.position_m.y
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position_m: Point2D::origin(),
            heading_rad: 0.0,
        }
    }
}
