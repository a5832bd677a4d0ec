use std::error::Error;
use std::fmt::{Display, Formatter};

pub type QtensorResult<T> = Result<T, QtensorError>;
pub type ParserResult<T> = QtensorResult<T>;
pub type ProcessResult<T> = QtensorResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

/// Every failure the post-processor can report, and how far it reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessErrorKind {
    DirectoryNotFound,
    NoInputFilesFound,
    TimestampGroupIncomplete,
    InputNotFound,
    InputReadFailure,
    EmptyInputFile,
    MalformedNumericToken,
    EigenDecompositionFailure,
    OutputWriteFailure,
    CliUsage,
    Internal,
}

impl ProcessErrorKind {
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::DirectoryNotFound
            | Self::InputNotFound
            | Self::InputReadFailure
            | Self::OutputWriteFailure => ErrorCategory::IoSystemError,
            Self::NoInputFilesFound
            | Self::TimestampGroupIncomplete
            | Self::EmptyInputFile
            | Self::MalformedNumericToken
            | Self::CliUsage => ErrorCategory::InputValidationError,
            Self::EigenDecompositionFailure => ErrorCategory::ComputationError,
            Self::Internal => ErrorCategory::InternalError,
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::DirectoryNotFound => "IO.DIRECTORY_NOT_FOUND",
            Self::NoInputFilesFound => "INPUT.NO_INPUT_FILES",
            Self::TimestampGroupIncomplete => "INPUT.TIMESTAMP_GROUP",
            Self::InputNotFound => "IO.INPUT_NOT_FOUND",
            Self::InputReadFailure => "IO.INPUT_READ",
            Self::EmptyInputFile => "INPUT.EMPTY_FILE",
            Self::MalformedNumericToken => "INPUT.MALFORMED_NUMBER",
            Self::EigenDecompositionFailure => "RUN.EIGEN_DECOMPOSITION",
            Self::OutputWriteFailure => "IO.OUTPUT_WRITE",
            Self::CliUsage => "INPUT.CLI_USAGE",
            Self::Internal => "SYS.INTERNAL",
        }
    }

    /// Only discovery failures stop the whole run; everything else is
    /// contained to a single timestamp.
    pub const fn is_run_fatal(self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound | Self::NoInputFilesFound | Self::CliUsage | Self::Internal
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QtensorError {
    kind: ProcessErrorKind,
    message: String,
}

impl QtensorError {
    pub fn new(kind: ProcessErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn directory_not_found(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::DirectoryNotFound, message)
    }

    pub fn no_input_files(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::NoInputFilesFound, message)
    }

    pub fn incomplete_group(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::TimestampGroupIncomplete, message)
    }

    pub fn input_not_found(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::InputNotFound, message)
    }

    pub fn input_read(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::InputReadFailure, message)
    }

    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::EmptyInputFile, message)
    }

    pub fn malformed_number(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::MalformedNumericToken, message)
    }

    pub fn eigen_failure(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::EigenDecompositionFailure, message)
    }

    pub fn output_write(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::OutputWriteFailure, message)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::CliUsage, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProcessErrorKind::Internal, message)
    }

    pub const fn kind(&self) -> ProcessErrorKind {
        self.kind
    }

    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub const fn placeholder(&self) -> &'static str {
        self.kind.placeholder()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.kind.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category().is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder(), self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category()
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for QtensorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category().as_str(),
            self.placeholder(),
            self.message
        )
    }
}

impl Error for QtensorError {}

#[cfg(test)]
mod tests {
    use super::{ErrorCategory, ProcessErrorKind, QtensorError};

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (ErrorCategory::Success, 0, "Success"),
            (ErrorCategory::InputValidationError, 2, "InputValidationError"),
            (ErrorCategory::IoSystemError, 3, "IoSystemError"),
            (ErrorCategory::ComputationError, 4, "ComputationError"),
            (ErrorCategory::InternalError, 5, "InternalError"),
        ];

        for (category, exit_code, name) in cases {
            assert_eq!(category.exit_code(), exit_code);
            assert_eq!(category.as_str(), name);
        }
    }

    #[test]
    fn only_discovery_failures_abort_the_run() {
        let fatal = [
            ProcessErrorKind::DirectoryNotFound,
            ProcessErrorKind::NoInputFilesFound,
            ProcessErrorKind::CliUsage,
        ];
        let contained = [
            ProcessErrorKind::TimestampGroupIncomplete,
            ProcessErrorKind::InputNotFound,
            ProcessErrorKind::InputReadFailure,
            ProcessErrorKind::EmptyInputFile,
            ProcessErrorKind::MalformedNumericToken,
            ProcessErrorKind::EigenDecompositionFailure,
            ProcessErrorKind::OutputWriteFailure,
        ];

        assert!(fatal.iter().all(|kind| kind.is_run_fatal()));
        assert!(contained.iter().all(|kind| !kind.is_run_fatal()));
    }

    #[test]
    fn fatal_error_renders_diagnostic_lines() {
        let error = QtensorError::no_input_files("no 'q*.gp' files found in 'run-01'");

        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.NO_INPUT_FILES] no 'q*.gp' files found in 'run-01'"
        );
        assert_eq!(
            error.fatal_exit_line().as_deref(),
            Some("FATAL EXIT CODE: 2")
        );
        assert_eq!(
            error.to_string(),
            "InputValidationError [INPUT.NO_INPUT_FILES] no 'q*.gp' files found in 'run-01'"
        );
    }
}
