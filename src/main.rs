use clap::Parser;
use miette::Result;
use paintguide::cli::{Cli, Commands};
use paintguide::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => {
            paintguide::cli::convert::run(args, &printer)?;
        }
        Commands::Inspect(args) => paintguide::cli::inspect::run(args, &printer)?,
        Commands::Init(args) => paintguide::cli::init::run(args, &printer)?,
        Commands::Completions(args) => paintguide::cli::completions::run(args)?,
    }

    Ok(())
}
