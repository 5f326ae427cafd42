//! Scaffold generation for rpcgen
//!
//! This crate runs the protoc invocation described by a
//! [`GenerationContext`] and renders the service skeleton around the
//! generated stubs: server entry point, config, service context and client.

mod protoc;
mod templates;

pub use protoc::{ProtocRunner, SystemProtoc};
pub use templates::{
    default_template_home, load_templates, template_path, write_default_templates, TEMPLATES,
    TEMPLATE_DIR, TEMPLATE_EXT,
};

use rpcgen_common::{
    GenerationContext, Generator, GeneratorError, RunConfig, ServiceBackend, Style,
};
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::debug;

/// Scaffold generator
///
/// Renders into the context's scaffold output:
/// - `<service>.go` (server entry point)
/// - `etc/<service>.yaml`
/// - `internal/config/config.go`
/// - `internal/svc/<servicecontext>.go`
/// - the client package
///
/// File names follow the configured [`Style`]. A client-only run emits just
/// the client package.
pub struct ScaffoldGenerator {
    config: RunConfig,
    tera: Tera,
    protoc: Box<dyn ProtocRunner>,
}

impl ScaffoldGenerator {
    /// Create a generator that runs the system protoc
    pub fn new(config: RunConfig) -> Result<Self, GeneratorError> {
        Self::with_protoc_runner(config, Box::new(SystemProtoc))
    }

    pub fn with_protoc_runner(
        config: RunConfig,
        protoc: Box<dyn ProtocRunner>,
    ) -> Result<Self, GeneratorError> {
        let tera = load_templates(config.template_home.as_deref())?;
        Ok(Self {
            config,
            tera,
            protoc,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    fn style(&self) -> Style {
        self.config.style
    }

    /// Render a template and write it, creating parent directories
    fn render_to(
        &self,
        template: &str,
        context: &tera::Context,
        path: &Path,
    ) -> Result<(), GeneratorError> {
        let rendered = self.tera.render(template, context).map_err(|e| {
            GeneratorError::Template(format!(
                "Failed to render {}: {}",
                template,
                templates::describe(&e)
            ))
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, rendered)?;
        debug!(path = %path.display(), "wrote scaffold file");

        Ok(())
    }

    /// Create template context from GenerationContext
    fn create_context(&self, ctx: &GenerationContext, service: &str) -> tera::Context {
        let file = self.style().format(service);
        let stub_output = match ctx.backend {
            ServiceBackend::GrpcStyle => &ctx.grpc_output,
            ServiceBackend::Alternative => &ctx.alternative_output,
        };

        let mut context = tera::Context::new();
        context.insert("service", service);
        context.insert("package", &Style::Lower.format(service));
        context.insert("client_package", &client_package(service, ctx.multiple));
        context.insert("config_file", &format!("{}.yaml", file));
        context.insert("source", &ctx.source.display().to_string());
        context.insert("stub_output", &stub_output.display().to_string());
        context.insert("backend", &ctx.backend);
        context.insert("protoc_command", &ctx.protoc_command);
        context
    }
}

impl Generator for ScaffoldGenerator {
    fn generate(&self, ctx: &GenerationContext) -> Result<(), GeneratorError> {
        self.protoc.run(&ctx.protoc_args, self.config.verbose)?;

        let service = service_name(&ctx.source);
        let context = self.create_context(ctx, &service);
        let output = &ctx.scaffold_output;
        let file = self.style().format(&service);

        if !ctx.client_only {
            self.render_to("main", &context, &output.join(format!("{}.go", file)))?;
            self.render_to(
                "etc",
                &context,
                &output.join("etc").join(format!("{}.yaml", file)),
            )?;
            self.render_to(
                "config",
                &context,
                &output.join("internal").join("config").join("config.go"),
            )?;
            self.render_to(
                "svc",
                &context,
                &output
                    .join("internal")
                    .join("svc")
                    .join(format!("{}.go", self.style().format("service_context"))),
            )?;
        }

        let client = client_dir(output, &service, ctx.multiple);
        self.render_to("client", &context, &client.join(format!("{}.go", file)))?;

        Ok(())
    }
}

/// Service name taken from the source file stem (`greet.proto` -> `greet`)
pub fn service_name(source: &Path) -> String {
    source
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("service")
        .to_string()
}

/// Go package name of the client
fn client_package(service: &str, multiple: bool) -> String {
    let package = Style::Lower.format(service);
    if multiple {
        package
    } else {
        format!("{}client", package)
    }
}

/// Directory the client package is written to
pub fn client_dir(output: &Path, service: &str, multiple: bool) -> PathBuf {
    if multiple {
        output.join("client").join(Style::Lower.format(service))
    } else {
        output.join(client_package(service, false))
    }
}
