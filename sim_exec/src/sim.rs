//! # Simulation driver
//!
//! Steps a run for a fixed number of cycles. Each cycle queries the
//! reference trajectory, asks a `StepSource` (the control loop) for the
//! actual pose and commanded velocities, and records the result.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use crate::{
    loc::Pose,
    recorder::{RecorderError, SampleRecorder},
    traj::Trajectory,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Output of one cycle of the control loop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StepOutput {
    /// Actual pose of the robot
    pub pose: Pose,

    /// Commanded linear velocity
    pub v_c: f64,

    /// Commanded angular velocity
    pub w_c: f64,
}

/// A control loop that follows the reference exactly.
///
/// The actual pose is the reference pose, and the commands are the
/// reference's own speed and turn rate, so the tracking error is zero.
#[derive(Debug, Clone)]
pub struct ReferenceReplay {
    trajectory: Trajectory,
    delta_t_s: f64,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Produces the actual state of the robot for each cycle.
pub trait StepSource {
    fn step(&mut self, t_s: f64, reference: &Pose) -> StepOutput;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ReferenceReplay {
    pub fn new(trajectory: Trajectory, delta_t_s: f64) -> Self {
        Self {
            trajectory,
            delta_t_s,
        }
    }
}

impl StepSource for ReferenceReplay {
    fn step(&mut self, t_s: f64, reference: &Pose) -> StepOutput {
        StepOutput {
            pose: *reference,
            v_c: self.trajectory.speed_at(t_s, self.delta_t_s),
            w_c: self.trajectory.turn_rate_at(t_s, self.delta_t_s),
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Run `steps` cycles at times `0, dt, 2dt, ...`, recording every cycle.
///
/// Stops at the first recording error.
pub fn run<S: StepSource>(
    trajectory: &Trajectory,
    source: &mut S,
    recorder: &mut SampleRecorder,
    steps: usize,
    delta_t_s: f64
) -> Result<(), RecorderError> {
    debug!(
        "Running {} steps of {} s along a {} trajectory",
        steps, delta_t_s, trajectory.kind()
    );

    for i in 0..steps {
        let t_s = i as f64 * delta_t_s;

        let reference = trajectory.reference_pose(t_s, delta_t_s);
        let out = source.step(t_s, &reference);

        recorder.add_sample(t_s, &out.pose, &reference, out.v_c, out.w_c)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::recorder::RunLabels;
    use crate::traj::TrajectoryFactory;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_replay_has_zero_error() {
        let traj = TrajectoryFactory::create("lemniscate", &[2.0, 20.0]).unwrap();
        let mut rec = SampleRecorder::new(RunLabels::new("euler", "lemniscate"));
        let mut replay = ReferenceReplay::new(traj, 0.05);

        run(&traj, &mut replay, &mut rec, 400, 0.05).unwrap();

        assert_eq!(rec.len(), 400);
        for name in ["x", "y", "theta"].iter() {
            assert!(rec.compute_error(name).unwrap().iter().all(|e| *e == 0.0));
        }
    }

    #[test]
    fn test_replay_commands() {
        let traj = TrajectoryFactory::create("circular", &[2.0, 10.0]).unwrap();
        let mut rec = SampleRecorder::new(RunLabels::new("pid", "circular"));
        let mut replay = ReferenceReplay::new(traj, 0.01);

        run(&traj, &mut replay, &mut rec, 1000, 0.01).unwrap();

        let omega = std::f64::consts::TAU / 10.0;
        for s in rec.samples() {
            assert_abs_diff_eq!(s.v_c, 2.0 * omega, epsilon = 1e-4);
            assert_abs_diff_eq!(s.w_c, omega, epsilon = 1e-4);
        }
    }

    struct Stuck;

    impl StepSource for Stuck {
        fn step(&mut self, _t_s: f64, _reference: &Pose) -> StepOutput {
            StepOutput { pose: Pose::default(), v_c: 0.0, w_c: 0.0 }
        }
    }

    #[test]
    fn test_errors_follow_source() {
        let traj = TrajectoryFactory::create("circular", &[2.0, 10.0]).unwrap();
        let mut rec = SampleRecorder::new(RunLabels::new("pid", "circular"));

        run(&traj, &mut Stuck, &mut rec, 10, 1.0).unwrap();

        let e_x = rec.compute_error("x").unwrap();
        assert_abs_diff_eq!(e_x[0], 2.0, epsilon = 1e-12);

        // A second run on the same recorder restarts time, which is rejected
        assert!(matches!(
            run(&traj, &mut Stuck, &mut rec, 10, 1.0),
            Err(RecorderError::NonMonotonicTime { .. })
        ));
    }
}
