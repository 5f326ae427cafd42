//! Running the protocol compiler

use rpcgen_common::GeneratorError;
use std::process::Command;
use tracing::{debug, info};

/// Executes a protoc argument list
#[cfg_attr(test, mockall::automock)]
pub trait ProtocRunner {
    /// `args[0]` is the program. Output goes straight to the terminal.
    fn run(&self, args: &[String], verbose: bool) -> Result<(), GeneratorError>;
}

/// Runs protoc as a child process with inherited stdio
pub struct SystemProtoc;

impl ProtocRunner for SystemProtoc {
    fn run(&self, args: &[String], verbose: bool) -> Result<(), GeneratorError> {
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| GeneratorError::InvalidCommand("empty protoc command".to_string()))?;

        if verbose {
            info!(command = %args.join(" "), "running protoc");
        } else {
            debug!(command = %args.join(" "), "running protoc");
        }

        let status = Command::new(program)
            .args(rest)
            .status()
            .map_err(|e| GeneratorError::Protoc(format!("failed to start {}: {}", program, e)))?;

        if !status.success() {
            return Err(GeneratorError::Protoc(status.to_string()));
        }

        Ok(())
    }
}
