//! End-to-end tests for the scaffolding pipeline

use rpcgen_common::{
    ConfigurationError, GenerationContext, Generator, GeneratorError, RepeatedFlag, RunConfig,
    ScaffoldError, ServiceBackend,
};
use rpcgen_core::{
    run, FetchError, GitTemplateFetcher, OutputTargets, RemoteTemplateSpec, ScaffoldRequest,
    TemplateFetcher,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Records every context it is asked to generate
#[derive(Default, Clone)]
struct RecordingGenerator {
    calls: Rc<RefCell<Vec<GenerationContext>>>,
    fail: bool,
}

impl Generator for RecordingGenerator {
    fn generate(&self, ctx: &GenerationContext) -> Result<(), GeneratorError> {
        self.calls.borrow_mut().push(ctx.clone());
        if self.fail {
            return Err(GeneratorError::Protoc("exit status: 1".to_string()));
        }
        Ok(())
    }
}

/// Never reached unless a remote repository is configured
struct NoRemote;

impl TemplateFetcher for NoRemote {
    fn fetch(&self, _spec: &RemoteTemplateSpec) -> Result<PathBuf, FetchError> {
        Err(FetchError::NoHomeDirectory)
    }
}

fn flag(values: &[&str]) -> RepeatedFlag {
    values.iter().copied().collect()
}

fn abs(dir: &Path, name: &str) -> String {
    dir.join(name).display().to_string()
}

#[test]
fn test_grpc_scenario_generates_once() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    let pb = abs(cwd, "pb");
    let request = ScaffoldRequest::new(
        "svc.proto",
        OutputTargets {
            message: flag(&[pb.as_str()]),
            grpc: flag(&[pb.as_str()]),
            alternative: RepeatedFlag::new(),
            scaffold: "./svc".to_string(),
        },
    );
    let generator = RecordingGenerator::default();
    let calls = generator.calls.clone();

    let ctx = run(&request, cwd, &NoRemote, |_| Ok(generator)).unwrap();

    assert!(cwd.join("pb").is_dir());
    assert!(cwd.join("svc").is_dir());
    assert_eq!(
        ctx.protoc_command,
        format!("protoc svc.proto --go_out {pb} --go-grpc_out {pb}")
    );
    assert_eq!(ctx.backend, ServiceBackend::GrpcStyle);
    assert_eq!(ctx.message_output, cwd.join("pb"));
    assert_eq!(ctx.scaffold_output, cwd.join("svc"));

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], ctx);
}

#[test]
fn test_relative_outputs_forwarded_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    let request = ScaffoldRequest::new(
        "svc.proto",
        OutputTargets {
            message: flag(&["./pb"]),
            grpc: flag(&["./pb"]),
            alternative: RepeatedFlag::new(),
            scaffold: "./svc".to_string(),
        },
    );

    let generator = RecordingGenerator::default();

    let ctx = run(&request, cwd, &NoRemote, |_| Ok(generator)).unwrap();

    assert_eq!(
        ctx.protoc_command,
        "protoc svc.proto --go_out ./pb --go-grpc_out ./pb"
    );
    assert_eq!(ctx.message_output, cwd.join("pb"));
    assert_eq!(ctx.grpc_output, cwd.join("pb"));
    assert_eq!(ctx.alternative_output, cwd);
    assert_eq!(ctx.scaffold_output, cwd.join("svc"));
    assert!(ctx.message_output.is_absolute());
    assert!(ctx.scaffold_output.is_absolute());
    assert!(cwd.join("pb").is_dir());
    assert!(cwd.join("svc").is_dir());
}

#[test]
fn test_missing_backends_reported_before_invalid_style() {
    let temp_dir = TempDir::new().unwrap();
    let mut request = ScaffoldRequest::new(
        "svc.proto",
        OutputTargets {
            scaffold: "svc".to_string(),
            ..Default::default()
        },
    );
    request.style = "bad".to_string();
    let generator = RecordingGenerator::default();

    let err = run(&request, temp_dir.path(), &NoRemote, |_| Ok(generator)).unwrap_err();

    assert!(matches!(
        err,
        ScaffoldError::Configuration(ConfigurationError::MissingServiceBackend)
    ));
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_invalid_style_fails_after_outputs_resolve() {
    let temp_dir = TempDir::new().unwrap();
    let mut request = ScaffoldRequest::new(
        "svc.proto",
        OutputTargets {
            alternative: flag(&["gogo"]),
            scaffold: "svc".to_string(),
            ..Default::default()
        },
    );
    request.style = "GoZero".to_string();
    let generator = RecordingGenerator::default();
    let mut constructed = false;

    let err = run(&request, temp_dir.path(), &NoRemote, |_| {
        constructed = true;
        Ok(generator)
    })
    .unwrap_err();

    assert!(matches!(
        err,
        ScaffoldError::Generator(GeneratorError::InvalidStyle(ref s)) if s == "GoZero"
    ));
    assert!(!constructed);
    assert!(temp_dir.path().join("gogo").is_dir());
}

#[test]
fn test_missing_backends_stop_before_anything_happens() {
    let temp_dir = TempDir::new().unwrap();
    let request = ScaffoldRequest::new(
        "svc.proto",
        OutputTargets {
            scaffold: "svc".to_string(),
            ..Default::default()
        },
    );
    let generator = RecordingGenerator::default();
    let calls = generator.calls.clone();
    let mut constructed = false;

    let err = run(&request, temp_dir.path(), &NoRemote, |_| {
        constructed = true;
        Ok(generator)
    })
    .unwrap_err();

    assert!(matches!(
        err,
        ScaffoldError::Configuration(ConfigurationError::MissingServiceBackend)
    ));
    assert!(!constructed);
    assert!(calls.borrow().is_empty());
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_repeated_message_output_forwarded() {
    let temp_dir = TempDir::new().unwrap();
    let request = ScaffoldRequest::new(
        "svc.proto",
        OutputTargets {
            message: flag(&["a", "b"]),
            grpc: flag(&["b"]),
            alternative: RepeatedFlag::new(),
            scaffold: "svc".to_string(),
        },
    );

    let ctx = run(&request, temp_dir.path(), &NoRemote, |_| {
        Ok(RecordingGenerator::default())
    })
    .unwrap();

    assert_eq!(ctx.message_output, temp_dir.path().join("b"));
    assert_eq!(
        ctx.protoc_command,
        "protoc svc.proto --go_out a --go_out b --go-grpc_out b"
    );
}

#[test]
fn test_unreachable_remote_keeps_template_home() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let home = temp_dir.path().join("templates");
    let mut request = ScaffoldRequest::new(
        "svc.proto",
        OutputTargets {
            alternative: flag(&["gogo"]),
            scaffold: "svc".to_string(),
            ..Default::default()
        },
    );
    request.template_home = Some(home.clone());
    request.remote = RemoteTemplateSpec::new(abs(cache.path(), "unreachable"), "main");
    let fetcher = GitTemplateFetcher::new(cache.path().join("remote"));

    let mut seen: Option<RunConfig> = None;
    let ctx = run(&request, temp_dir.path(), &fetcher, |config| {
        seen = Some(config);
        Ok(RecordingGenerator::default())
    })
    .unwrap();

    assert_eq!(seen.unwrap().template_home, Some(home));
    assert_eq!(ctx.backend, ServiceBackend::Alternative);
}

#[test]
fn test_generator_error_returned_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let request = ScaffoldRequest::new(
        "svc.proto",
        OutputTargets {
            alternative: flag(&["gogo"]),
            scaffold: "svc".to_string(),
            ..Default::default()
        },
    );
    let generator = RecordingGenerator {
        fail: true,
        ..Default::default()
    };

    let err = run(&request, temp_dir.path(), &NoRemote, |_| Ok(generator)).unwrap_err();
    assert!(matches!(err, ScaffoldError::Generator(GeneratorError::Protoc(_))));
    assert_eq!(err.to_string(), "protoc failed: exit status: 1");
    // No rollback of directories created before the failure.
    assert!(temp_dir.path().join("svc").is_dir());
}

#[test]
fn test_generator_construction_error_propagates() {
    let temp_dir = TempDir::new().unwrap();
    let request = ScaffoldRequest::new(
        "svc.proto",
        OutputTargets {
            alternative: flag(&["gogo"]),
            scaffold: "svc".to_string(),
            ..Default::default()
        },
    );

    let err = run::<RecordingGenerator, _>(&request, temp_dir.path(), &NoRemote, |_| {
        Err(GeneratorError::InvalidStyle("bad".to_string()))
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ScaffoldError::Generator(GeneratorError::InvalidStyle(_))
    ));
}
