//! Trajectory parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::{TrajError, Trajectory, TrajectoryFactory, TrajectoryKind};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters selecting the reference trajectory of a run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TrajParams {
    /// Name of the trajectory kind, e.g. "circular"
    pub kind: String,

    /// Positional parameters for the kind. If not given the defaults for the
    /// kind are used.
    #[serde(default)]
    pub params: Option<Vec<f64>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajParams {
    /// Build the trajectory these parameters describe for a simulation
    /// lasting `horizon_s`.
    pub fn build(&self, horizon_s: f64) -> Result<Trajectory, TrajError> {
        match self.params {
            Some(ref p) => TrajectoryFactory::create(&self.kind, p),
            None => TrajectoryFactory::create_default(&self.kind, horizon_s)
        }
    }

    /// The parameters that `build` would use.
    pub fn resolved_params(&self, horizon_s: f64) -> Result<Vec<f64>, TrajError> {
        match self.params {
            Some(ref p) => Ok(p.clone()),
            None => {
                let kind: TrajectoryKind = self.kind.parse()?;
                Ok(TrajectoryFactory::default_params(kind, horizon_s))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build_from_toml() {
        let p: TrajParams = util::params::from_str("kind = \"lemniscate\"\nparams = [1.5, 20.0]\n").unwrap();
        let traj = p.build(100.0).unwrap();
        assert_eq!(traj.kind(), TrajectoryKind::Lemniscate);
        assert_eq!(traj.period_s(), Some(20.0));

        let p: TrajParams = util::params::from_str("kind = \"astroid\"\n").unwrap();
        assert_eq!(p.params, None);
        assert_eq!(p.build(42.0).unwrap().period_s(), Some(42.0));
        assert_eq!(p.resolved_params(42.0).unwrap(), vec![2.0, 42.0]);
    }
}
