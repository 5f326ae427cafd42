//! Error types shared by every rpcgen crate

use std::path::PathBuf;
use thiserror::Error;

/// Invalid combinations of requested outputs
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("missing --go-grpc_out or --gogofaster_out")]
    MissingServiceBackend,

    #[error("missing --go_out or --gogofaster_out")]
    MissingMessageBackend,

    #[error("missing scaffold output, please use --zrpc_out to specify the output")]
    MissingScaffoldOutput,
}

/// Errors raised while emitting the scaffold
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Invalid style {0:?}: expected one of gozero, go_zero, goZero")]
    InvalidStyle(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Invalid protoc command: {0}")]
    InvalidCommand(String),

    #[error("protoc failed: {0}")]
    Protoc(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can abort a scaffolding run
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Failed to resolve path {}: {source}", .path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

/// Result type for rpcgen operations
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
