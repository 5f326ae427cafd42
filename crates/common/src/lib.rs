//! Common types and utilities for rpcgen
//!
//! This crate contains shared data structures, error types, and the
//! run-scoped configuration used across the core, generator, and CLI
//! components.

mod context;
mod error;
mod flags;
mod style;

pub use context::{GenerationContext, Generator, RunConfig, ServiceBackend};
pub use error::{ConfigurationError, GeneratorError, Result, ScaffoldError};
pub use flags::RepeatedFlag;
pub use style::{pascal_case, Style};
