//! Orchestration core for rpcgen
//!
//! Turns the options of a `protoc` run into a validated, immutable
//! [`GenerationContext`](rpcgen_common::GenerationContext):
//!
//! 1. [`OutputTargets`] checks which backends were requested and creates the
//!    absolute output directories.
//! 2. [`resolve_remote_templates`] optionally swaps in a cloned template
//!    repository for this run only.
//! 3. [`ProtocCommand`] lays out the compiler invocation in its fixed flag
//!    order.
//! 4. [`run`] assembles the context and hands it to a
//!    [`Generator`](rpcgen_common::Generator).

pub mod outputs;
pub mod pipeline;
pub mod protoc;
pub mod remote;

pub use outputs::{absolutize, current_dir, OutputTargets, ResolvedOutputs};
pub use pipeline::{assemble_context, run, ModeFlags, ScaffoldRequest};
pub use protoc::{CompilerFlags, ProtocCommand, PROTOC};
pub use remote::{
    resolve_remote_templates, template_home, FetchError, GitTemplateFetcher, RemoteTemplateSpec,
    TemplateFetcher,
};
