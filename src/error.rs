use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WareError {
    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error("Backend '{0}' is not available on this system")]
    BackendUnavailable(String),

    #[error("Package manager error: {0}")]
    PackageManagerError(String),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("Bootstrap of the community helper failed: {0}")]
    BootstrapFailure(String),

    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Unknown setup target: {0}")]
    UnknownSetupTarget(String),

    #[error("Installer script failed verification: {0}")]
    ScriptVerification(String),

    #[error("Failed to fetch remote resource: {0}")]
    RemoteFetchError(String),

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, WareError>;
