use std::process::ExitCode;

use anyhow::Result;

use wikistack::cli::{self, Command};
use wikistack::docker::{self, CliRuntime};
use wikistack::{config, install, report, stack};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match cli::parse(&args) {
        Ok(command) => command,
        Err(usage) => {
            eprintln!("{usage}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run(command) {
        report::error(format!("{err:#}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(command: Command) -> Result<()> {
    let mut cfg = config::loader::load_default()?;
    let runtime = CliRuntime;

    match command {
        Command::Start => {
            docker::ensure_available()?;
            stack::start(&mut cfg, &runtime)?;
        }
        Command::Stop => {
            stack::stop(&runtime);
        }
        Command::Restart => {
            docker::ensure_available()?;
            stack::stop(&runtime);
            stack::start(&mut cfg, &runtime)?;
        }
        Command::Install { assume_yes } => {
            // The confirmation gate must precede any external operation.
            install::run(&mut cfg, &runtime, assume_yes)?;
        }
    }
    Ok(())
}
