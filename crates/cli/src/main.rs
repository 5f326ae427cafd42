//! rpcgen CLI
//!
//! Command-line interface for generating RPC service scaffolding from
//! `.proto` sources.

mod exit_codes;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use rpcgen_common::{RepeatedFlag, ScaffoldError};
use rpcgen_core::{
    CompilerFlags, GitTemplateFetcher, ModeFlags, OutputTargets, RemoteTemplateSpec,
    ScaffoldRequest, PROTOC,
};
use rpcgen_generator::{default_template_home, write_default_templates, ScaffoldGenerator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rpcgen")]
#[command(version, about = "Generate RPC service scaffolding from protobuf sources")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run protoc and generate an rpc service around the stubs
    #[command(after_help = "EXAMPLES:\n  \
        # grpc-go stubs next to the service\n  \
        rpcgen protoc greet.proto \\\n    \
        --go_out ./pb \\\n    \
        --go-grpc_out ./pb \\\n    \
        --zrpc_out ./greet\n\n  \
        # gogofaster stubs with a remote template set\n  \
        rpcgen protoc greet.proto \\\n    \
        --gogofaster_out ./pb \\\n    \
        --zrpc_out ./greet \\\n    \
        --remote https://github.com/acme/rpc-templates.git \\\n    \
        --branch v1")]
    Protoc(ProtocArgs),

    /// Manage scaffold templates
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },
}

#[derive(Subcommand)]
enum TemplateCommand {
    /// Write the built-in templates to the template home for customization
    Init {
        /// Template home (defaults to ~/.rpcgen)
        #[arg(long, env = "RPCGEN_HOME")]
        home: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ProtocArgs {
    /// The .proto source file
    source: String,

    /// Extra positional arguments passed through to protoc
    extra: Vec<String>,

    /// Output directory for message code (repeatable, last one wins)
    #[arg(long = "go_out", value_name = "DIR")]
    go_out: Vec<String>,

    /// Output directory for grpc service code (repeatable, last one wins)
    #[arg(long = "go-grpc_out", value_name = "DIR")]
    go_grpc_out: Vec<String>,

    /// Output directory for combined gogofaster code (repeatable, last one wins)
    #[arg(long = "gogofaster_out", value_name = "DIR")]
    gogofaster_out: Vec<String>,

    /// Directory searched for imports (repeatable)
    #[arg(short = 'I', long = "proto_path", value_name = "PATH")]
    proto_path: Vec<String>,

    /// Option for protoc-gen-go (repeatable)
    #[arg(long = "go_opt", value_name = "OPT")]
    go_opt: Vec<String>,

    /// Option for protoc-gen-go-grpc (repeatable)
    #[arg(long = "go-grpc_opt", value_name = "OPT")]
    go_grpc_opt: Vec<String>,

    /// Option for protoc-gen-gogofaster (repeatable)
    #[arg(long = "gogofaster_opt", value_name = "OPT")]
    gogofaster_opt: Vec<String>,

    /// Plugin executable, as NAME=PATH (repeatable)
    #[arg(long = "plugin", value_name = "PLUGIN")]
    plugin: Vec<String>,

    /// Output directory for the rpc service scaffold
    #[arg(long = "zrpc_out", value_name = "DIR")]
    zrpc_out: Option<String>,

    /// File naming style: gozero, go_zero or goZero
    #[arg(long, default_value = "gozero")]
    style: String,

    /// Template home whose rpc/*.tpl files override the built-in templates
    #[arg(long, env = "RPCGEN_HOME")]
    home: Option<PathBuf>,

    /// Git repository to fetch templates from, replacing --home for this run
    #[arg(long)]
    remote: Option<String>,

    /// Branch of the remote template repository
    #[arg(long)]
    branch: Option<String>,

    /// Generate only the rpc client
    #[arg(short, long)]
    client: bool,

    /// Lay out the client for a proto with multiple services
    #[arg(short, long)]
    multiple: bool,
}

impl ProtocArgs {
    /// Translate the parsed flags into a scaffolding request
    fn into_request(self, verbose: bool) -> ScaffoldRequest {
        let template_home = self
            .home
            .or_else(|| default_template_home().filter(|home| home.is_dir()));

        let mut positional = vec![self.source];
        positional.extend(self.extra);

        ScaffoldRequest {
            positional,
            outputs: OutputTargets {
                message: RepeatedFlag::from(self.go_out),
                grpc: RepeatedFlag::from(self.go_grpc_out),
                alternative: RepeatedFlag::from(self.gogofaster_out),
                scaffold: self.zrpc_out.unwrap_or_default(),
            },
            flags: CompilerFlags {
                proto_paths: RepeatedFlag::from(self.proto_path),
                go_opts: RepeatedFlag::from(self.go_opt),
                grpc_opts: RepeatedFlag::from(self.go_grpc_opt),
                alternative_opts: RepeatedFlag::from(self.gogofaster_opt),
                plugins: RepeatedFlag::from(self.plugin),
            },
            remote: RemoteTemplateSpec::new(
                self.remote.unwrap_or_default(),
                self.branch.unwrap_or_default(),
            ),
            style: self.style,
            verbose,
            template_home,
            modes: ModeFlags {
                client_only: self.client,
                multiple: self.multiple,
            },
            protoc: PROTOC.to_string(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    let result = match cli.command {
        Commands::Protoc(args) => protoc_command(args, cli.verbose),
        Commands::Template {
            command: TemplateCommand::Init { home },
        } => template_init_command(home),
    };

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(err) => {
            eprintln!("{} {:#}", "✗".red().bold(), err);
            ExitCode::from(exit_codes::for_error(&err))
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "rpcgen=debug,rpcgen_core=debug,rpcgen_generator=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn protoc_command(args: ProtocArgs, verbose: bool) -> Result<()> {
    let request = args.into_request(verbose);

    println!(
        "{} Generating rpc service from: {}",
        "→".cyan(),
        request.source().yellow()
    );

    if verbose {
        println!("  Style: {}", request.style);
        if let Some(home) = &request.template_home {
            println!("  Template home: {}", home.display());
        }
        if !request.remote.repo.is_empty() {
            println!("  Remote templates: {}", request.remote.repo);
        }
    }

    let cwd = rpcgen_core::current_dir()?;
    let fetcher = match GitTemplateFetcher::in_home_dir() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::debug!(error = %e, "falling back to a temporary template cache");
            GitTemplateFetcher::new(std::env::temp_dir().join("rpcgen-remote"))
        }
    };

    let ctx = rpcgen_core::run(&request, &cwd, &fetcher, ScaffoldGenerator::new)?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    if verbose {
        println!("  protoc: {}", ctx.protoc_command);
    }
    println!("\n{}", "Output:".bold());
    println!("  📁 {}", ctx.scaffold_output.display());
    println!("  📁 {}", ctx.message_output.display());
    println!("\n{}", "Next steps:".bold());
    println!("  1. Review generated files in {}", ctx.scaffold_output.display());
    println!("  2. Implement the service logic");
    println!(
        "  3. Run it: cd {} && go mod tidy && go run .",
        ctx.scaffold_output.display()
    );

    Ok(())
}

fn template_init_command(home: Option<PathBuf>) -> Result<()> {
    let home = home
        .or_else(default_template_home)
        .context("No template home given and no home directory found")?;

    println!(
        "{} Writing templates to: {}",
        "→".cyan(),
        home.display()
    );

    let written = write_default_templates(&home).map_err(ScaffoldError::from)?;

    if written.is_empty() {
        println!("{} Templates already present, nothing written", "✓".green());
    } else {
        for path in &written {
            println!("  📄 {}", path.display());
        }
        println!("\n{} Wrote {} templates", "✓".green().bold(), written.len());
    }

    Ok(())
}
