//! Trajectory factory
//!
//! Maps a kind name and a positional parameter list onto a `Trajectory`.
//! Selection happens once here, evaluation afterwards never compares names.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use super::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Builds trajectories from their configuration.
pub struct TrajectoryFactory;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajectoryFactory {
    /// Create a trajectory from the name of its kind and its positional
    /// parameters.
    ///
    /// The parameter order for each kind is given by
    /// `TrajectoryKind::param_names`.
    pub fn create(name: &str, params: &[f64]) -> Result<Trajectory, TrajError> {
        let kind: TrajectoryKind = name.parse()?;

        Self::create_kind(kind, params)
    }

    /// Create a trajectory of the given kind from its positional parameters.
    pub fn create_kind(kind: TrajectoryKind, params: &[f64]) -> Result<Trajectory, TrajError> {
        let expected = kind.param_names().len();
        if params.len() != expected {
            return Err(TrajError::InvalidTrajectoryParameters {
                kind,
                reason: format!(
                    "expected {} parameters ({}), found {}",
                    expected,
                    kind.param_names().join(", "),
                    params.len()
                )
            })
        }

        let p = params;
        let traj = match kind {
            TrajectoryKind::Linear =>
                Trajectory::Linear(LinearTrajectory::new(p[0], p[1], p[2], p[3])),
            TrajectoryKind::Circular =>
                Trajectory::Circular(CircularTrajectory::new(p[0], p[1])?),
            TrajectoryKind::Squared =>
                Trajectory::Squared(SquaredTrajectory::new(p[0], p[1], p[2], p[3])?),
            TrajectoryKind::Astroid =>
                Trajectory::Astroid(AstroidTrajectory::new(p[0], p[1])?),
            TrajectoryKind::Lemniscate =>
                Trajectory::Lemniscate(LemniscateTrajectory::new(p[0], p[1])?),
            TrajectoryKind::Epitrochoid =>
                Trajectory::Epitrochoid(EpitrochoidTrajectory::new(p[0], p[1], p[2], p[3], p[4])?),
        };

        debug!("Created {} trajectory with parameters {:?}", kind, params);

        Ok(traj)
    }

    /// Create a trajectory of the named kind using its default parameters for
    /// a simulation lasting `horizon_s`.
    pub fn create_default(name: &str, horizon_s: f64) -> Result<Trajectory, TrajError> {
        let kind: TrajectoryKind = name.parse()?;

        Self::create_kind(kind, &Self::default_params(kind, horizon_s))
    }

    /// The default positional parameters of a kind.
    ///
    /// Periodic kinds complete one lap over the simulation horizon.
    pub fn default_params(kind: TrajectoryKind, horizon_s: f64) -> Vec<f64> {
        match kind {
            TrajectoryKind::Linear => vec![0.05, 0.01, 0.05, 0.01],
            TrajectoryKind::Circular => vec![2.0, horizon_s],
            TrajectoryKind::Squared => vec![2.0, horizon_s, 0.01, 0.01],
            TrajectoryKind::Astroid => vec![2.0, horizon_s],
            TrajectoryKind::Lemniscate => vec![2.0, horizon_s],
            TrajectoryKind::Epitrochoid => vec![5.0, 1.0, 3.0, horizon_s, 1.0 / 3.0],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_create_each_kind() {
        for kind in TrajectoryKind::ALL.iter() {
            let traj = TrajectoryFactory::create_default(kind.name(), 60.0).unwrap();
            assert_eq!(traj.kind(), *kind);
        }
    }

    #[test]
    fn test_start_points() {
        let start = |name: &str, params: &[f64]| {
            TrajectoryFactory::create(name, params).unwrap().evaluate_at(0.0)
        };

        assert_eq!(start("linear", &[0.05, 0.01, 0.05, 0.01]), Point2D::new(0.0, 0.0));
        assert_eq!(start("circular", &[2.0, 10.0]), Point2D::new(2.0, 0.0));
        assert_eq!(start("squared", &[2.0, 10.0, 0.01, 0.02]), Point2D::new(0.01, 0.02));
        assert_eq!(start("astroid", &[2.0, 10.0]), Point2D::new(2.0, 0.0));
        assert_eq!(start("lemniscate", &[2.0, 10.0]), Point2D::new(2.0, 0.0));
        assert_eq!(start("epitrochoid", &[5.0, 1.0, 3.0, 10.0, 1.0 / 3.0]), Point2D::new(3.0, 0.0));
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            TrajectoryFactory::create("unknown_kind", &[1.0, 2.0]),
            Err(TrajError::UnknownTrajectoryKind("unknown_kind".into()))
        );
        assert!(matches!(
            TrajectoryFactory::create_default("", 10.0),
            Err(TrajError::UnknownTrajectoryKind(_))
        ));
    }

    #[test]
    fn test_invalid_params() {
        // Zero period and zero radius
        assert!(matches!(
            TrajectoryFactory::create("circular", &[2.0, 0.0]),
            Err(TrajError::InvalidTrajectoryParameters { kind: TrajectoryKind::Circular, .. })
        ));
        assert!(matches!(
            TrajectoryFactory::create("astroid", &[0.0, 10.0]),
            Err(TrajError::InvalidTrajectoryParameters { kind: TrajectoryKind::Astroid, .. })
        ));

        // Wrong number of parameters
        assert!(matches!(
            TrajectoryFactory::create("linear", &[1.0]),
            Err(TrajError::InvalidTrajectoryParameters { kind: TrajectoryKind::Linear, .. })
        ));

        // Other values pass straight through
        assert!(TrajectoryFactory::create("circular", &[-2.0, -10.0]).is_ok());
    }
}
