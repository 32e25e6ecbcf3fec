//! Check command implementation.
//!
//! Runs every stage up to layout and reports the result. The output
//! directory is left alone.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::discover;
use crate::error::Result;
use crate::optimizer::Normalizer;
use crate::output::{plural, Printer};
use crate::pipeline::{self, BuildSummary};

/// Parse and lay out every icon without writing anything
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Project root (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<BuildSummary> {
    let project = discover(&args.path)?;
    super::build::report_sources(&project, printer);

    let summary = pipeline::check(&project, &Normalizer)?;
    super::report_diagnostics(&summary, printer);

    printer.info(
        "Checked",
        &format!(
            "{} ({} mono, {} color), sprite {}x{}",
            plural(summary.icon_count(), "icon", "icons"),
            summary.mono_count,
            summary.color_count,
            summary.width,
            summary.height
        ),
    );

    Ok(summary)
}
