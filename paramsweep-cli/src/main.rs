//! Command line front end of the parameter sweep driver.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use paramsweep::config::{Configuration, SweepOptions};
use paramsweep::executor::{ProcessSubmitter, SweepReport, DEFAULT_VERIFY_PROGRAM};
use paramsweep::observability::{init_logging, LogFormat};
use paramsweep::placeholder::{PlaceholderSyntax, DEFAULT_MARKER};
use paramsweep::sweep::SweepDriver;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum LogFormatArg {
    #[default]
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Json => Self::Json,
        }
    }
}

/// Expands a templated configuration into one verification task per
/// parameter combination and submits them with inter-task dependencies.
#[derive(Parser, Debug)]
#[command(name = "paramsweep", version, about)]
struct Cli {
    /// The file containing the information what parameters you want to have tested
    #[arg(short = 'c', long)]
    configuration_file: PathBuf,

    /// The place holder key that starts the place holders which will be replaced
    #[arg(short = 'k', long, default_value_t = DEFAULT_MARKER)]
    place_holder_key: char,

    /// The database that you want to execute the experiments on
    #[arg(short = 'd', long)]
    database: String,

    /// The sub-directory where the files of the current experiment should be stored
    #[arg(short = 'b', long)]
    sub_directory: String,

    /// The grid configuration
    #[arg(short = 'g', long)]
    grid: Option<String>,

    /// The directory where to read the already preprocessed images from
    #[arg(short = 'p', long)]
    preprocessed_image_directory: Option<PathBuf>,

    /// Directory where the submitted.db files should be written into
    #[arg(short = 's', long, default_value = ".")]
    grid_database_directory: PathBuf,

    /// The file name where to write the calls into (dependencies are not written)
    #[arg(short = 'w', long)]
    write_commands: Option<String>,

    /// Just write the commands to console and mimic dependencies, but do not execute them
    #[arg(short = 'q', long)]
    dry_run: bool,

    /// Only start experiments whose score directory does not exist below this directory
    #[arg(short = 'Q', long)]
    non_existent_only: Option<PathBuf>,

    /// The verification program that submits each task
    #[arg(long, default_value = DEFAULT_VERIFY_PROGRAM)]
    verify_program: String,

    /// Increase the verbosity level (also forwarded to every task)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log record format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty)]
    log_format: LogFormatArg,

    /// Parameters passed verbatim to every verification task; separate them with --
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    parameters: Vec<String>,
}

impl Cli {
    fn sweep_options(&self) -> SweepOptions {
        let mut options = SweepOptions::new(&self.database, &self.sub_directory)
            .with_grid_database_directory(&self.grid_database_directory)
            .dry_run(self.dry_run)
            .with_verbosity(self.verbose)
            .with_parameters(self.parameters.iter().cloned());
        if let Some(grid) = &self.grid {
            options = options.with_grid(grid);
        }
        if let Some(dir) = &self.preprocessed_image_directory {
            options = options.with_preprocessed_image_directory(dir);
        }
        if let Some(file_name) = &self.write_commands {
            options = options.with_write_commands(file_name);
        }
        if let Some(root) = &self.non_existent_only {
            options = options.with_non_existent_only(root);
        }
        options
    }
}

async fn run(cli: &Cli) -> Result<SweepReport> {
    let configuration = Configuration::load(
        &cli.configuration_file,
        PlaceholderSyntax::new(cli.place_holder_key),
    )
    .with_context(|| {
        format!(
            "Invalid configuration file '{}'",
            cli.configuration_file.display()
        )
    })?;

    let submitter = ProcessSubmitter::new(&cli.verify_program);
    let driver = SweepDriver::new(configuration, cli.sweep_options());
    driver.run(&submitter).await.context("Sweep aborted")
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose, cli.log_format.into()) {
        eprintln!("Could not initialize logging: {e}");
    }

    match run(&cli).await {
        Ok(report) => {
            println!("{}", report.summary_line());
            if report.has_failures() {
                tracing::warn!(
                    failures = report.failures.len(),
                    "Some tasks could not be submitted"
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
