//! Generation context assembly and the end-to-end scaffolding run

use crate::outputs::{OutputTargets, ResolvedOutputs};
use crate::protoc::{CompilerFlags, ProtocCommand, PROTOC};
use crate::remote::{template_home, RemoteTemplateSpec, TemplateFetcher};
use rpcgen_common::{GenerationContext, Generator, GeneratorError, Result, RunConfig, Style};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Mode switches that pass straight through to the generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub client_only: bool,
    pub multiple: bool,
}

/// Everything the user asked for in one `protoc` run
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    /// Positional arguments; the first one is the `.proto` source
    pub positional: Vec<String>,
    pub outputs: OutputTargets,
    pub flags: CompilerFlags,
    pub remote: RemoteTemplateSpec,
    /// `--style` as given; parsed once the outputs are in place
    pub style: String,
    pub verbose: bool,
    pub template_home: Option<PathBuf>,
    pub modes: ModeFlags,
    /// Compiler binary, `protoc` unless overridden
    pub protoc: String,
}

impl ScaffoldRequest {
    /// Request for a single source file with default settings
    pub fn new(source: impl Into<String>, outputs: OutputTargets) -> Self {
        Self {
            positional: vec![source.into()],
            outputs,
            flags: CompilerFlags::default(),
            remote: RemoteTemplateSpec::default(),
            style: Style::default().to_string(),
            verbose: false,
            template_home: None,
            modes: ModeFlags::default(),
            protoc: PROTOC.to_string(),
        }
    }

    pub fn source(&self) -> &str {
        self.positional.first().map(String::as_str).unwrap_or_default()
    }
}

/// Package resolved outputs, the built command and the mode flags into the
/// generator's work order.
pub fn assemble_context(
    source: &str,
    outputs: ResolvedOutputs,
    command: ProtocCommand,
    modes: ModeFlags,
) -> GenerationContext {
    GenerationContext {
        source: PathBuf::from(source),
        message_output: outputs.message,
        grpc_output: outputs.grpc,
        alternative_output: outputs.alternative,
        backend: outputs.backend,
        scaffold_output: outputs.scaffold,
        protoc_command: command.joined(),
        protoc_args: command.into_args(),
        client_only: modes.client_only,
        multiple: modes.multiple,
    }
}

/// Run the whole pipeline: resolve outputs, pick the template home, build
/// the protoc command, assemble the context and hand it to the generator
/// created by `make_generator`.
///
/// The first failure aborts the run, so missing outputs are reported before
/// an unknown style. A failed remote template fetch is not a failure.
/// Generator errors are returned as-is.
pub fn run<G, F>(
    request: &ScaffoldRequest,
    cwd: &Path,
    fetcher: &dyn TemplateFetcher,
    make_generator: F,
) -> Result<GenerationContext>
where
    G: Generator,
    F: FnOnce(RunConfig) -> Result<G, GeneratorError>,
{
    let resolved = request.outputs.resolve(cwd)?;
    debug!(?resolved, "resolved output directories");

    let style: Style = request.style.parse()?;
    let config = RunConfig {
        style,
        verbose: request.verbose,
        template_home: template_home(request.template_home.clone(), &request.remote, fetcher),
    };

    let command = ProtocCommand::build(
        &request.protoc,
        &request.positional,
        &request.flags,
        &request.outputs,
    );
    info!(command = %command.joined(), "assembled protoc command");

    let ctx = assemble_context(request.source(), resolved, command, request.modes);

    let generator = make_generator(config)?;
    generator.generate(&ctx)?;

    Ok(ctx)
}
