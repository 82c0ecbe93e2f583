//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting for the build stages
//! - Interactive spinners using indicatif
//! - Styled summaries of build results and module interfaces
//!
//! All progress reporting goes through the BuildReporter trait, so the
//! pipeline never writes to the terminal itself.

pub mod display;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::{BuildReport, Stage};

/// Progress reporter for a build
pub trait BuildReporter {
    /// A stage is about to run
    fn stage_started(&mut self, stage: Stage);

    /// A stage completed successfully
    fn stage_finished(&mut self, stage: Stage);

    /// The output directory was committed
    fn finish(&mut self, report: &BuildReport);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Interactive progress reporter with a spinner per build
pub struct InteractiveBuildReporter {
    spinner: ProgressBar,
}

impl InteractiveBuildReporter {
    pub fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new(Stage::ALL.len() as u64);
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self { spinner }
    }
}

impl Default for InteractiveBuildReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildReporter for InteractiveBuildReporter {
    fn stage_started(&mut self, stage: Stage) {
        self.spinner.set_message(stage.description());
    }

    fn stage_finished(&mut self, _stage: Stage) {
        self.spinner.inc(1);
    }

    fn finish(&mut self, _report: &BuildReport) {
        self.spinner.finish_and_clear();
    }

    fn abandon(&mut self) {
        self.spinner.abandon();
    }
}

/// Silent progress reporter
///
/// Used when stderr is not a terminal, and in tests.
#[derive(Default)]
pub struct SilentBuildReporter;

impl BuildReporter for SilentBuildReporter {
    fn stage_started(&mut self, _stage: Stage) {}

    fn stage_finished(&mut self, _stage: Stage) {}

    fn finish(&mut self, _report: &BuildReport) {}

    fn abandon(&mut self) {}
}

/// Pick a reporter for the current terminal
pub fn reporter_for_terminal() -> Box<dyn BuildReporter> {
    if console::Term::stderr().is_term() {
        Box::new(InteractiveBuildReporter::new())
    } else {
        Box::new(SilentBuildReporter)
    }
}
