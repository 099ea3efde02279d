//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("no section with content key: {0}")]
    SectionNotFound(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::SectionNotFound(_) => crate::exitcode::DATAERR,
            CliError::Infra(e) => match e {
                InfraError::Write { .. } => crate::exitcode::CANTCREAT,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_) | ApplicationError::Config { .. } => {
                        crate::exitcode::CONFIG
                    }
                    ApplicationError::InputNotFound(_) => crate::exitcode::NOINPUT,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use std::path::PathBuf;

    #[test]
    fn given_errors_when_mapping_exit_codes_then_follow_sysexits() {
        let missing: CliError = ApplicationError::InputNotFound(PathBuf::from("x.txt")).into();
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);

        let config: CliError = ApplicationError::Domain(DomainError::EmptyPatternSet).into();
        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);

        let not_found = CliError::SectionNotFound("A-B".to_string());
        assert_eq!(not_found.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(not_found.to_string(), "no section with content key: A-B");
    }
}
