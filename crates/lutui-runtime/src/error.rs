use crate::supervisor::SupervisorError;
use std::fmt;

/// Result type for lutui-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// The `lutris` executable could not be located
    ExecutableNotFound(String),

    /// `lutris` ran but reported failure
    CommandFailed { status: Option<i32>, stderr: String },

    /// Catalog output was not the expected JSON
    Decode(serde_json::Error),

    /// Catalog file could not be loaded
    Catalog(lutui_types::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Process supervision error
    Supervisor(SupervisorError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ExecutableNotFound(what) => write!(f, "lutris executable not found: {}", what),
            Error::CommandFailed { status, stderr } => {
                match status {
                    Some(code) => write!(f, "lutris command failed with exit code {}", code)?,
                    None => write!(f, "lutris command terminated by signal")?,
                }
                if !stderr.is_empty() {
                    write!(f, ": '{}'", stderr)?;
                }
                Ok(())
            }
            Error::Decode(err) => write!(f, "Invalid lutris output: {}", err),
            Error::Catalog(err) => write!(f, "Catalog error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Supervisor(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(err) => Some(err),
            Error::Catalog(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Supervisor(err) => Some(err),
            Error::ExecutableNotFound(_) | Error::CommandFailed { .. } | Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err)
    }
}

impl From<lutui_types::Error> for Error {
    fn from(err: lutui_types::Error) -> Self {
        Error::Catalog(err)
    }
}

impl From<SupervisorError> for Error {
    fn from(err: SupervisorError) -> Self {
        Error::Supervisor(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
