//! protoc command assembly

use crate::outputs::OutputTargets;
use rpcgen_common::RepeatedFlag;

/// Default compiler binary
pub const PROTOC: &str = "protoc";

/// Repeatable protoc options that are forwarded untouched
#[derive(Debug, Clone, Default)]
pub struct CompilerFlags {
    /// `--proto_path`
    pub proto_paths: RepeatedFlag,
    /// `--go_opt`
    pub go_opts: RepeatedFlag,
    /// `--go-grpc_opt`
    pub grpc_opts: RepeatedFlag,
    /// `--gogofaster_opt`
    pub alternative_opts: RepeatedFlag,
    /// `--plugin`
    pub plugins: RepeatedFlag,
}

/// A complete protoc argument list, program name first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocCommand {
    args: Vec<String>,
}

impl ProtocCommand {
    /// Assemble the invocation.
    ///
    /// Categories are emitted in a fixed order regardless of how the flags
    /// were interleaved on the command line: positional arguments, proto
    /// paths, the three option kinds, the three output kinds, then plugins.
    /// Within a category every occurrence is kept in its original order,
    /// since protoc lets the last one win.
    pub fn build(
        binary: &str,
        positional: &[String],
        flags: &CompilerFlags,
        outputs: &OutputTargets,
    ) -> Self {
        let mut args = Vec::with_capacity(1 + positional.len());
        args.push(binary.to_string());
        args.extend(positional.iter().cloned());

        let pairs: [(&str, &RepeatedFlag); 7] = [
            ("--proto_path", &flags.proto_paths),
            ("--go_opt", &flags.go_opts),
            ("--go-grpc_opt", &flags.grpc_opts),
            ("--gogofaster_opt", &flags.alternative_opts),
            ("--go_out", &outputs.message),
            ("--go-grpc_out", &outputs.grpc),
            ("--gogofaster_out", &outputs.alternative),
        ];
        for (name, values) in pairs {
            for value in values.iter() {
                args.push(name.to_string());
                args.push(value.to_string());
            }
        }

        args.extend(flags.plugins.iter().map(|plugin| format!("--plugin={plugin}")));

        Self { args }
    }

    pub fn program(&self) -> &str {
        &self.args[0]
    }

    /// Full argument list including the program name
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Space-joined command line, for display and for the generation context
    pub fn joined(&self) -> String {
        self.args.join(" ")
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}
