//! Main simulation executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and parameters
//!     - Build the reference trajectory
//!     - Main loop, once per simulation step:
//!         - Reference evaluation
//!         - Control loop step
//!         - Sample recording
//!     - Present the recorded run
//!     - Export the recorded run

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info};
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use sim_lib::{
    export::ResultExporter,
    params::SimExecParams,
    present::{LogPresenter, Presentation, RunView},
    recorder::{RunLabels, SampleRecorder},
    sim::{self, ReferenceReplay},
};
use util::{
    host,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Reference tracking simulation
#[derive(Debug, StructOpt)]
#[structopt(name = "sim_exec")]
struct Opt {
    /// Parameter file, relative to the params directory
    #[structopt(long, parse(from_os_str), default_value = "sim_exec.toml")]
    params: PathBuf,

    /// Override the trajectory kind, using that kind's default parameters
    #[structopt(long)]
    trajectory: Option<String>,

    /// Override the controller kind label
    #[structopt(long)]
    controller: Option<String>,

    /// Do not export the recorded run
    #[structopt(long)]
    no_export: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    let sw_root = host::get_sw_root()
        .wrap_err("Failed to find the software root")?;

    // Initialise session
    let session = Session::new("sim_exec", sw_root.join("sessions"))
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Tracking Simulation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI arguments: {:?}", opt);

    // ---- LOAD PARAMETERS ----

    let mut params: SimExecParams = util::params::load(&opt.params)
        .wrap_err("Could not load exec params")?;

    if let Some(kind) = opt.trajectory {
        params.trajectory.kind = kind;
        params.trajectory.params = None;
    }
    if let Some(controller) = opt.controller {
        params.controller = controller;
    }
    if opt.no_export {
        params.export.enabled = false;
    }

    params.validate().wrap_err("Invalid exec params")?;

    info!("Exec parameters loaded");

    // ---- BUILD TRAJECTORY ----

    let horizon_s = params.simulation_time_s;
    let trajectory = params.trajectory.build(horizon_s)
        .wrap_err("Failed to build the reference trajectory")?;

    info!(
        "Reference trajectory: {} {:?}",
        trajectory.kind(),
        params.trajectory.resolved_params(horizon_s)?
    );

    session.save("run_params.json", &params)
        .wrap_err("Failed to save the run parameters")?;

    // ---- RUN ----

    let steps = params.steps();
    let mut recorder = SampleRecorder::new(RunLabels::new(
        params.controller.as_str(),
        trajectory.kind().name()
    ));
    let mut control_loop = ReferenceReplay::new(trajectory, params.delta_t_s);

    info!("Running {} steps of {} s", steps, params.delta_t_s);

    sim::run(&trajectory, &mut control_loop, &mut recorder, steps, params.delta_t_s)
        .wrap_err("Simulation aborted")?;

    info!("Simulation complete, {} samples recorded\n", recorder.len());

    let dataset = recorder.snapshot();

    // ---- PRESENT ----

    let view = RunView::new(&dataset)
        .wrap_err("Failed to compute the error series")?;
    LogPresenter::default()
        .render(&view)
        .wrap_err("Failed to present the run")?;

    // ---- EXPORT ----

    if params.export.enabled {
        let exporter = ResultExporter::new(session.arch_root.join(&params.export.dir))
            .wrap_err("Failed to open the table store")?;

        let table_id = exporter.export(&dataset)
            .wrap_err("Failed to export the run")?;

        info!("Run exported as {}", table_id);
    }
    else {
        info!("Export disabled, run not exported");
    }

    Ok(())
}
