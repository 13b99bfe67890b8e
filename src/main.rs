use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use hashwatch::cli::{CheckArgs, Cli, Commands};
use hashwatch::output::{self, Verbosity};
use hashwatch::utils::logging;
use hashwatch::{HashwatchContext, commands};
use std::io;
use std::process;

/// Exit status of `check --exit-code` when changes were found.
const CHANGES_EXIT_CODE: i32 = 2;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            output::error(&format!("Error: {e:#}"));
            process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    if cli.quiet {
        output::set_verbosity(Verbosity::Quiet);
    } else if cli.verbose {
        output::set_verbosity(Verbosity::Verbose);
    }

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Check(CheckArgs::default()));

    match command {
        Commands::Check(args) => {
            let ctx = HashwatchContext::new()?;
            let outcome = commands::check::execute(&ctx, &args)?;
            if args.exit_code && !outcome.report.is_clean() {
                return Ok(CHANGES_EXIT_CODE);
            }
        }
        Commands::Baseline(args) => {
            let ctx = HashwatchContext::new()?;
            commands::baseline::execute(&ctx, &args)?;
        }
        Commands::Show { json } => {
            let ctx = HashwatchContext::new()?;
            commands::show::execute(&ctx, json)?;
        }
        Commands::Reset => {
            let ctx = HashwatchContext::new()?;
            commands::reset::execute(&ctx)?;
        }
        Commands::Config {
            key,
            value,
            unset,
            list,
        } => {
            let mut ctx = HashwatchContext::new()?;
            commands::config::execute(&mut ctx, key.as_deref(), value, unset, list)?;
        }
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
        }
    }

    Ok(0)
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
