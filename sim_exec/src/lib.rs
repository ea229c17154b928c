//! # Tracking simulation library.
//!
//! This library holds the core of the tracking simulation: reference
//! trajectory generation, recording of actual against reference state, and
//! export of the recorded runs.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Result exporter - writes recorded runs into the durable table store
pub mod export;

/// Localisation types - the planar pose of the robot
pub mod loc;

/// Executable parameters
pub mod params;

/// Presentation boundary - consumers of a recorded run
pub mod present;

/// Sample recorder - accumulates one sample per simulation step
pub mod recorder;

/// Simulation driver - steps a reference-replay run through the recorder
pub mod sim;

/// Trajectory module - parametric reference path generators
pub mod traj;
