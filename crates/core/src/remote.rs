//! Best-effort fetching of remote template repositories

use git2::{build::RepoBuilder, FetchOptions, RemoteCallbacks};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace};

/// A template repository to use instead of the local template home
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteTemplateSpec {
    /// Git URL or local repository path. Empty means no remote.
    pub repo: String,
    /// Branch or tag. Empty means the remote's default branch.
    pub branch: String,
}

impl RemoteTemplateSpec {
    pub fn new(repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    pub fn branch(&self) -> Option<&str> {
        (!self.branch.is_empty()).then_some(self.branch.as_str())
    }
}

/// Errors while materializing a template repository
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No home directory to cache templates in")]
    NoHomeDirectory,

    #[error("Failed to prepare template cache: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to clone repository: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository has no working directory")]
    NoWorkingDirectory,
}

/// Materializes a remote template repository on the local filesystem
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFetcher {
    fn fetch(&self, spec: &RemoteTemplateSpec) -> Result<PathBuf, FetchError>;
}

/// Clones template repositories into a local cache directory
pub struct GitTemplateFetcher {
    cache_root: PathBuf,
}

impl GitTemplateFetcher {
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
        }
    }

    /// Cache under `~/.rpcgen/remote`
    pub fn in_home_dir() -> Result<Self, FetchError> {
        let home = dirs::home_dir().ok_or(FetchError::NoHomeDirectory)?;
        Ok(Self::new(home.join(".rpcgen").join("remote")))
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }
}

impl TemplateFetcher for GitTemplateFetcher {
    fn fetch(&self, spec: &RemoteTemplateSpec) -> Result<PathBuf, FetchError> {
        let target = self.cache_root.join(cache_dir_name(&spec.repo));

        // Always start from a fresh clone so a moved branch is picked up.
        if target.exists() {
            fs::remove_dir_all(&target)?;
        }
        fs::create_dir_all(&self.cache_root)?;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.transfer_progress(|stats| {
            trace!(
                received = stats.received_objects(),
                total = stats.total_objects(),
                "receiving template objects"
            );
            true
        });

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        let mut repo_builder = RepoBuilder::new();
        repo_builder.fetch_options(fetch_options);
        if let Some(branch) = spec.branch() {
            repo_builder.branch(branch);
        }

        debug!(repo = %spec.repo, branch = ?spec.branch(), "cloning template repository");
        let repo = repo_builder.clone(&spec.repo, &target)?;

        let workdir = repo
            .workdir()
            .ok_or(FetchError::NoWorkingDirectory)?
            .to_path_buf();
        Ok(workdir)
    }
}

/// Fetch the remote templates, if any.
///
/// Returns `None` when no repository was given or when fetching fails for
/// any reason; the failure is only logged, so an offline run falls back to
/// the existing template home.
pub fn resolve_remote_templates(
    spec: &RemoteTemplateSpec,
    fetcher: &dyn TemplateFetcher,
) -> Option<PathBuf> {
    if spec.repo.is_empty() {
        return None;
    }

    match fetcher.fetch(spec) {
        Ok(path) => {
            info!(path = %path.display(), "using remote templates");
            Some(path)
        }
        Err(e) => {
            debug!(
                repo = %spec.repo,
                error = %e,
                "remote templates unavailable, keeping template home"
            );
            None
        }
    }
}

/// The template home for this run: the remote checkout if one could be
/// fetched, otherwise `current`.
pub fn template_home(
    current: Option<PathBuf>,
    spec: &RemoteTemplateSpec,
    fetcher: &dyn TemplateFetcher,
) -> Option<PathBuf> {
    resolve_remote_templates(spec, fetcher).or(current)
}

/// Directory name for a repository inside the cache
fn cache_dir_name(repo: &str) -> String {
    let trimmed = repo
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(repo)
        .trim_end_matches('/')
        .trim_end_matches(".git");

    let name: String = trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let name = name.trim_matches('_');
    if name.is_empty() {
        "default".to_string()
    } else {
        name.to_string()
    }
}
