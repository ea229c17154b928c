//! # Presentation boundary
//!
//! Presenters consume a finished run: the dataset's named series plus the
//! tracking error series. Plot rendering itself lives outside this crate,
//! this module defines the data handed over and a presenter which reports
//! the run through the log.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;

use crate::recorder::{Dataset, RecorderError, Series};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Everything a presenter needs to render one run.
#[derive(Debug, Clone)]
pub struct RunView<'a> {
    pub dataset: &'a Dataset,

    /// `x_ref - x` at every sample
    pub e_x: Vec<f64>,

    /// `y_ref - y` at every sample
    pub e_y: Vec<f64>,

    /// `theta_ref - theta` at every sample
    pub e_theta: Vec<f64>,
}

/// Summary of the tracking performance of one series.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ErrorSummary {
    pub series: Series,
    pub rms: f64,
    pub max_abs: f64,
}

/// A presenter which writes a per-series summary of the run to the log.
#[derive(Debug, Default)]
pub struct LogPresenter {
    /// Summaries produced by the last render
    pub summaries: Vec<ErrorSummary>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The figures a run is presented in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Figure {
    /// x, y and their errors against time
    XAndY,

    /// theta and its error against time, and the x-y trajectory
    ThetaAndTrajectory,

    /// Commanded velocities against time
    Controls,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Something that can present a recorded run.
pub trait Presentation {
    /// An error which can occur while rendering.
    type Error;

    fn render(&mut self, run: &RunView<'_>) -> Result<(), Self::Error>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<'a> RunView<'a> {
    /// Build the view of a dataset, computing its error series.
    pub fn new(dataset: &'a Dataset) -> Result<Self, RecorderError> {
        Ok(Self {
            dataset,
            e_x: dataset.compute_error(Series::X)?,
            e_y: dataset.compute_error(Series::Y)?,
            e_theta: dataset.compute_error(Series::Theta)?,
        })
    }

    /// Values of a named series.
    pub fn series(&self, series: Series) -> Vec<f64> {
        self.dataset.series(series)
    }

    /// The title of a figure for this run.
    pub fn title(&self, figure: Figure) -> String {
        format!(
            "{}results - {}",
            controller_title(&self.dataset.labels().controller),
            figure.title()
        )
    }
}

impl Figure {
    pub fn title(&self) -> &'static str {
        match self {
            Figure::XAndY => "x and y",
            Figure::ThetaAndTrajectory => "theta and trajectory",
            Figure::Controls => "v_c and w_c",
        }
    }
}

impl Presentation for LogPresenter {
    type Error = RecorderError;

    fn render(&mut self, run: &RunView<'_>) -> Result<(), Self::Error> {
        self.summaries.clear();

        info!("{}", run.title(Figure::XAndY));
        info!("    Samples: {}", run.dataset.len());

        for series in [Series::X, Series::Y, Series::Theta].iter() {
            let rms = run.dataset.rms_error(*series)?;
            let max_abs = run.dataset.max_abs_error(*series)?;

            if let (Some(rms), Some(max_abs)) = (rms, max_abs) {
                info!(
                    "    {:>5} error: rms {:.6}, max {:.6}",
                    series.name(), rms, max_abs
                );
                self.summaries.push(ErrorSummary {
                    series: *series,
                    rms,
                    max_abs
                });
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Display title prefix for a controller kind.
///
/// Unknown controller kinds have no title.
pub fn controller_title(controller: &str) -> &'static str {
    match controller.trim().to_ascii_lowercase().as_str() {
        "euler" => "Euler method controller ",
        "pid" => "PID controller ",
        _ => "",
    }
}
