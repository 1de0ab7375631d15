use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use log::*;

use crate::app::RunOutcome;

pub mod app;
pub mod config;
pub mod export;
pub mod proc;
pub mod report;

#[derive(Parser, Debug)]
#[command(about)]
struct Cli {
    /// Write every sample to FILE in CSV format
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
    /// Render a CPU/memory chart once the run completes
    #[arg(long)]
    plot: bool,
    #[arg(short, long, value_name = "FILE", default_value = config::DEFAULT_FILE)]
    config: PathBuf,
    /// Command to run and monitor, with its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<OsString>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    env_logger::init();
    let cli = Cli::parse();
    if cli.command.is_empty() {
        Cli::command().print_help()?;
        return Ok(ExitCode::from(1));
    }
    let config = config::PulseConfig::load(&cli.config)?;

    let finished = app::run(&cli.command, &config).await?;

    if let RunOutcome::Exited(status) = &finished.outcome {
        if !status.success() {
            println!("Process exited with error: {}", status);
        }
    }
    let summary = report::summarize(&finished.series, finished.duration);
    report::print_summary(summary.as_ref());

    if let Some(path) = &cli.log {
        if let Err(err) = export::csv::write_log(path, &finished.series) {
            warn!(target: "Export", "Failed to write CSV log: {err:#}");
        }
    }
    if cli.plot {
        if let Err(err) = export::plot::render(Path::new(&config.plot_file), &finished.series) {
            warn!(target: "Export", "Failed to render plot: {err:#}");
        }
    }

    Ok(match finished.outcome {
        RunOutcome::Exited(status) if status.success() => ExitCode::SUCCESS,
        RunOutcome::Exited(status) => ExitCode::from(status.code().unwrap_or(1) as u8),
        RunOutcome::Interrupted => ExitCode::from(1),
    })
}
