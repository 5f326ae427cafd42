//! Output target validation and directory resolution

use rpcgen_common::{ConfigurationError, RepeatedFlag, Result, ScaffoldError, ServiceBackend};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Output directories as requested on the command line
#[derive(Debug, Clone, Default)]
pub struct OutputTargets {
    /// `--go_out`
    pub message: RepeatedFlag,
    /// `--go-grpc_out`
    pub grpc: RepeatedFlag,
    /// `--gogofaster_out`
    pub alternative: RepeatedFlag,
    /// `--zrpc_out`
    pub scaffold: String,
}

/// Absolute, existing output directories for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub message: PathBuf,
    pub grpc: PathBuf,
    pub alternative: PathBuf,
    pub scaffold: PathBuf,
    pub backend: ServiceBackend,
}

impl OutputTargets {
    /// Check that a message backend, a service backend and a scaffold
    /// output were all requested.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.grpc.is_empty() && self.alternative.is_empty() {
            return Err(ConfigurationError::MissingServiceBackend);
        }
        if self.message.is_empty() && self.alternative.is_empty() {
            return Err(ConfigurationError::MissingMessageBackend);
        }
        // The lists may hold explicit empty values, so check what takes effect.
        if self.message.effective().is_empty() && self.alternative.effective().is_empty() {
            return Err(ConfigurationError::MissingMessageBackend);
        }
        if self.scaffold.is_empty() {
            return Err(ConfigurationError::MissingScaffoldOutput);
        }
        Ok(())
    }

    /// Validate, then make every effective output absolute against `cwd`
    /// and create it.
    ///
    /// Nothing is created unless validation passes. Directories created
    /// before a later failure are left in place.
    pub fn resolve(&self, cwd: &Path) -> Result<ResolvedOutputs> {
        self.validate()?;

        let resolved = ResolvedOutputs {
            message: absolutize(Path::new(self.message.effective()), cwd),
            grpc: absolutize(Path::new(self.grpc.effective()), cwd),
            alternative: absolutize(Path::new(self.alternative.effective()), cwd),
            scaffold: absolutize(Path::new(&self.scaffold), cwd),
            backend: if self.grpc.effective().is_empty() {
                ServiceBackend::Alternative
            } else {
                ServiceBackend::GrpcStyle
            },
        };

        for dir in [
            &resolved.message,
            &resolved.grpc,
            &resolved.alternative,
            &resolved.scaffold,
        ] {
            ensure_dir(dir)?;
        }

        Ok(resolved)
    }

    /// [`OutputTargets::resolve`] against the process working directory
    pub fn resolve_in_current_dir(&self) -> Result<ResolvedOutputs> {
        self.resolve(&current_dir()?)
    }
}

/// The process working directory
pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|source| ScaffoldError::PathResolution {
        path: PathBuf::from("."),
        source,
    })
}

/// Join a relative path onto `base` and lexically clean the result
///
/// An empty path resolves to `base` itself.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut cleaned = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to go above the root, matching `/..` == `/`
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Create a directory and its parents if absent
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    debug!(path = %path.display(), "creating output directory");
    fs::create_dir_all(path).map_err(|source| ScaffoldError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })
}
