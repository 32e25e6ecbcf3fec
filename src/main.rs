use clap::Parser;
use miette::Result;

use iconsprite::cli::build::BuildArgs;
use iconsprite::cli::{build, check, completions, Cli, Commands};
use iconsprite::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new(cli.verbose);

    match cli.command {
        None => {
            build::run(BuildArgs::default(), &printer)?;
        }
        Some(Commands::Build(args)) => {
            build::run(args, &printer)?;
        }
        Some(Commands::Check(args)) => {
            check::run(args, &printer)?;
        }
        Some(Commands::Completions(args)) => completions::run(args)?,
    }

    Ok(())
}
