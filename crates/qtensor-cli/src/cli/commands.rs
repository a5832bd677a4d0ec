use super::CliError;
use super::helpers::{current_working_dir, prompt_for_directory};
use qtensor_core::modules::{ProcessConfig, render_human_summary, run_processing};
use std::path::{Path, PathBuf};

#[derive(clap::Args)]
pub(super) struct ProcessArgs {
    /// Directory holding the q1..q6 component files (prompted for when omitted)
    #[arg(value_name = "DIRECTORY")]
    directory: Option<PathBuf>,

    /// Directory for the derived .gp outputs (defaults to DIRECTORY)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON run report output path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl ProcessArgs {
    fn into_config(self, input_dir: PathBuf, working_dir: &Path) -> ProcessConfig {
        let mut config = ProcessConfig::new(working_dir.join(input_dir));
        if let Some(output_dir) = self.output_dir {
            config = config.with_output_dir(working_dir.join(output_dir));
        }
        if let Some(report) = self.report {
            config = config.with_report_path(working_dir.join(report));
        }
        config
    }
}

pub(super) fn run_process_command(mut args: ProcessArgs) -> Result<i32, CliError> {
    let working_dir = current_working_dir().map_err(CliError::Compute)?;
    let input_dir = match args.directory.take() {
        Some(directory) => directory,
        None => prompt_for_directory()?,
    };
    let config = args.into_config(input_dir, &working_dir);
    tracing::info!(
        input = %config.input_dir.display(),
        output = %config.output_dir.display(),
        "starting run"
    );

    let report = run_processing(&config).map_err(CliError::Compute)?;
    println!("{}", render_human_summary(&report));

    if let Some(report_path) = &config.report_path {
        println!("JSON report: {}", report_path.display());
    }

    Ok(0)
}
