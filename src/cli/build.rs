//! Build command implementation.
//!
//! Discovers the project, runs the full pipeline and reports what was
//! written.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;

use crate::discovery::{discover, Project, MANIFEST_FILENAME};
use crate::error::Result;
use crate::optimizer::Normalizer;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{self, BuildSummary};

/// Compile icons into the sprite, catalog, stylesheets and preview
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project root (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
        }
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<BuildSummary> {
    let start = Instant::now();
    let project = discover(&args.path)?;
    report_sources(&project, printer);

    printer.status("Compiling", &display_path(&project.layout.mono_dir));
    let summary = pipeline::run(&project, &Normalizer)?;
    super::report_diagnostics(&summary, printer);

    if summary.written.is_empty() {
        return Ok(summary);
    }

    for path in &summary.written {
        printer.verbose("Writing", &display_path(path));
    }
    printer.status(
        "Finished",
        &format!(
            "{} ({} mono, {} color) into {} in {:.2}s",
            plural(summary.icon_count(), "icon", "icons"),
            summary.mono_count,
            summary.color_count,
            display_path(&project.layout.output_dir),
            start.elapsed().as_secs_f64()
        ),
    );

    Ok(summary)
}

/// Print where icons are read from.
pub(super) fn report_sources(project: &Project, printer: &Printer) {
    if project.has_manifest {
        let manifest = project.layout.root.join(MANIFEST_FILENAME);
        printer.verbose("Manifest", &display_path(&manifest));
    }
    printer.verbose("Mono", &display_path(&project.layout.mono_dir));
    printer.verbose("Color", &display_path(&project.layout.color_dir));
}
