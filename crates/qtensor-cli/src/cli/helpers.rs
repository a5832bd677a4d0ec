use super::CliError;
use anyhow::Context;
use qtensor_core::domain::{ProcessResult, QtensorError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DIRECTORY_PROMPT: &str = "Folder name? ";

/// Log events go to stderr so stdout carries only the summary.
pub(super) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub(super) fn current_working_dir() -> ProcessResult<PathBuf> {
    std::env::current_dir().map_err(|source| {
        QtensorError::input_read(format!(
            "failed to read current working directory: {}",
            source
        ))
    })
}

pub(super) fn prompt_for_directory() -> Result<PathBuf, CliError> {
    let mut stdout = io::stdout();
    write!(stdout, "{DIRECTORY_PROMPT}").context("failed to write directory prompt")?;
    stdout.flush().context("failed to flush directory prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read directory name from stdin")?;

    let directory = line.trim();
    if directory.is_empty() {
        return Err(CliError::Usage(
            "no directory given; pass DIRECTORY or answer the prompt".to_string(),
        ));
    }
    Ok(PathBuf::from(directory))
}
