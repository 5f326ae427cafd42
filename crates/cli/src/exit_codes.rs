//! Exit codes for the rpcgen CLI.
//!
//! - 0: Success
//! - 1: Any other failure
//! - 2: Usage error (reported by clap)
//! - 3: Invalid output configuration
//! - 4: Path could not be resolved
//! - 5: Output directory could not be created
//! - 6: Generator failure (templates, protoc)

use rpcgen_common::ScaffoldError;

/// Successful execution.
pub const SUCCESS: u8 = 0;

/// Failure without a more specific code.
pub const FAILURE: u8 = 1;

/// Missing service backend, message backend or scaffold output.
pub const CONFIGURATION: u8 = 3;

/// The working directory or an output path could not be resolved.
pub const PATH_RESOLUTION: u8 = 4;

/// An output directory could not be created.
pub const DIRECTORY_CREATION: u8 = 5;

/// The generator failed.
pub const GENERATOR: u8 = 6;

/// Exit code for an error returned from a command
pub fn for_error(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ScaffoldError>() {
        Some(ScaffoldError::Configuration(_)) => CONFIGURATION,
        Some(ScaffoldError::PathResolution { .. }) => PATH_RESOLUTION,
        Some(ScaffoldError::DirectoryCreation { .. }) => DIRECTORY_CREATION,
        Some(ScaffoldError::Generator(_)) => GENERATOR,
        None => FAILURE,
    }
}
