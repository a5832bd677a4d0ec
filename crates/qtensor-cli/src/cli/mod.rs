mod commands;
mod helpers;

use clap::Parser;
use qtensor_core::domain::QtensorError;

pub fn run_from_env() -> i32 {
    helpers::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let process_error = error.as_qtensor_error();
            eprintln!("{}", process_error.diagnostic_line());
            if let Some(summary_line) = process_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            process_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("qtensor".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "qtensor",
    version,
    about = "Q-tensor order-parameter post-processor"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Process every q1..q6 timestamp group in a directory
    Process(commands::ProcessArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Process(args) => commands::run_process_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(QtensorError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_qtensor_error(&self) -> QtensorError {
        match self {
            Self::Usage(message) => QtensorError::usage(message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => QtensorError::internal(format!("{error:#}")),
        }
    }
}
