//! # Simulation Executable Parameters
//!
//! This module provides parameters for the simulation executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::traj::TrajParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimExecParams {
    /// The controller kind, used only to label the run (e.g. "euler" or "pid")
    pub controller: String,

    /// Length of the simulated run
    pub simulation_time_s: f64,

    /// Time between two simulation steps
    pub delta_t_s: f64,

    /// The reference trajectory to follow
    pub trajectory: TrajParams,

    #[serde(default)]
    pub export: ExportParams,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExportParams {
    /// If false the run is not exported
    pub enabled: bool,

    /// Table store directory, relative to the session's archive root
    pub dir: String,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    #[error("The step delta_t_s must be finite and positive, found {0}")]
    InvalidStep(f64),

    #[error("The simulation time must be finite and non-negative, found {0}")]
    InvalidSimulationTime(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimExecParams {
    /// Check the timing parameters.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.delta_t_s.is_finite() || self.delta_t_s <= 0.0 {
            return Err(ParamsError::InvalidStep(self.delta_t_s));
        }
        if !self.simulation_time_s.is_finite() || self.simulation_time_s < 0.0 {
            return Err(ParamsError::InvalidSimulationTime(self.simulation_time_s));
        }

        Ok(())
    }

    /// Number of simulation steps in the run.
    pub fn steps(&self) -> usize {
        (self.simulation_time_s / self.delta_t_s).round() as usize
    }
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: String::from("tables"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PARAMS: &str = r#"
        controller = "pid"
        simulation_time_s = 60.0
        delta_t_s = 0.01

        [trajectory]
        kind = "circular"
        params = [2.0, 60.0]
    "#;

    #[test]
    fn test_parse() {
        let p: SimExecParams = util::params::from_str(PARAMS).unwrap();

        assert_eq!(p.controller, "pid");
        assert_eq!(p.steps(), 6000);
        assert_eq!(p.export, ExportParams::default());
        assert_eq!(p.trajectory.params, Some(vec![2.0, 60.0]));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let mut p: SimExecParams = util::params::from_str(PARAMS).unwrap();

        p.delta_t_s = 0.0;
        assert_eq!(p.validate(), Err(ParamsError::InvalidStep(0.0)));

        p.delta_t_s = 0.1;
        p.simulation_time_s = -1.0;
        assert_eq!(p.validate(), Err(ParamsError::InvalidSimulationTime(-1.0)));
    }
}
