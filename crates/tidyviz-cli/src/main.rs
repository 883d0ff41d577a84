//! tidyviz CLI - Command-line interface for the clang-tidy fixture corpus
//!
//! This binary lists and shows fixtures, validates the manifest, exports the
//! corpus for an analyzer run, and checks the analyzer's diagnostics.

mod cli_args;

use clap::Parser;
use cli_args::{Cli, Commands};
use std::process::ExitCode;
use tidyviz_corpus::DiagnosticsFormat;

// Use modules from the library crate
use tidyviz_cli::{commands, config, logging};

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::List { category, json } => commands::list::run(category.as_deref(), json),
        Commands::Show { name, source, json } => commands::show::run(&name, source, json),
        Commands::Verify { json } => commands::verify::run(json),
        Commands::Export {
            out_dir,
            compiler,
            std,
        } => {
            let config = config::load_config(cli.config.as_deref())?;
            commands::export::run(&out_dir, &config.export_options(compiler, std))
        }
        Commands::Check {
            name,
            diagnostics,
            format,
            line_tolerance,
            ignore_checks,
            strict,
            json,
        } => {
            let config = config::load_config(cli.config.as_deref())?;
            let format = format
                .map(|f| f.parse::<DiagnosticsFormat>())
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let options = config.check_options(line_tolerance, &ignore_checks, strict);
            commands::check::run(&name, &diagnostics, format, &options, json)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
