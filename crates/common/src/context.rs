//! Run-scoped configuration and the generation work order

use crate::{GeneratorError, Style};
use serde::Serialize;
use std::path::PathBuf;

/// Which backend produces the service stubs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceBackend {
    /// protoc-gen-go plus protoc-gen-go-grpc
    GrpcStyle,
    /// protoc-gen-gogofaster, messages and services in one output
    Alternative,
}

/// Settings that apply to a whole generator run
///
/// The template home lives here rather than in process-wide state so that
/// independent runs cannot observe each other's remote template checkouts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub style: Style,
    pub verbose: bool,
    /// Directory whose `rpc/*.tpl` files override the embedded templates
    pub template_home: Option<PathBuf>,
}

/// Everything the generator needs for one run
///
/// All directories are absolute. Built once by the context assembler and
/// handed to [`Generator::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationContext {
    pub source: PathBuf,
    pub message_output: PathBuf,
    pub grpc_output: PathBuf,
    pub alternative_output: PathBuf,
    pub backend: ServiceBackend,
    pub scaffold_output: PathBuf,
    /// The protoc invocation joined with spaces
    pub protoc_command: String,
    /// The same invocation as an argument vector, program first
    pub protoc_args: Vec<String>,
    pub client_only: bool,
    pub multiple: bool,
}

/// Consumer of a [`GenerationContext`]
pub trait Generator {
    fn generate(&self, ctx: &GenerationContext) -> Result<(), GeneratorError>;
}
