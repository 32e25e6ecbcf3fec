pub mod build;
pub mod check;
pub mod completions;

use clap::{Parser, Subcommand};

use crate::output::Printer;
use crate::pipeline::BuildSummary;

/// iconsprite - SVG icon sprite compiler
///
/// Without a subcommand, builds the project in the current directory.
#[derive(Parser, Debug)]
#[command(name = "iconsprite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show source directories and every written artifact
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile icons into the sprite, catalog, stylesheets and preview
    Build(build::BuildArgs),

    /// Parse and lay out every icon without writing anything
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Print the warnings collected during a run.
fn report_diagnostics(summary: &BuildSummary, printer: &Printer) {
    for diagnostic in &summary.diagnostics {
        printer.diagnostic(diagnostic);
    }
}
