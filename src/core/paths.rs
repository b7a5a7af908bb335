//! core::paths
//!
//! Locating an application's `secrets/` output directory.
//!
//! # Repository Layout
//!
//! The GitOps repository root is the nearest ancestor of the working
//! directory that contains an `apps/` directory. Applications live at either:
//! - `<root>/apps/<name>` (checked first)
//! - `<root>/infrastructure/<name>`
//!
//! Sealed output is written to `<app dir>/secrets/<secret name>.yaml`.
//!
//! If no ancestor contains `apps/`, the root falls back to two levels above
//! the working directory, which is where the tool lives in the repository
//! (`scripts/kryptos`).
//!
//! # Example
//!
//! ```no_run
//! use kryptos::core::paths::RepoPaths;
//! use std::path::Path;
//!
//! let paths = RepoPaths::discover(Path::new("/repo/scripts/kryptos"));
//! let secrets_dir = paths.secrets_dir("grafana").unwrap();
//! let output = RepoPaths::output_file(&secrets_dir, "grafana-admin");
//! assert!(output.ends_with("secrets/grafana-admin.yaml"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Directory whose presence marks the repository root.
pub const APPS_DIR: &str = "apps";

/// Secondary location for applications.
pub const INFRASTRUCTURE_DIR: &str = "infrastructure";

/// Output directory inside an application directory.
pub const SECRETS_DIR: &str = "secrets";

/// Extension of written SealedSecret files.
pub const OUTPUT_EXTENSION: &str = "yaml";

/// How far above the working directory the fallback root sits.
const FALLBACK_DEPTH: usize = 2;

/// Errors from output path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("could not find application directory for '{app}' in apps/ or infrastructure/ under '{root}'")]
    AppNotFound { app: String, root: PathBuf },

    #[error("failed to create secrets directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Path routing for a GitOps repository.
///
/// # Invariants
///
/// - `apps/<name>` always wins over `infrastructure/<name>`
/// - [`RepoPaths::secrets_dir`] is idempotent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    root: PathBuf,
}

impl RepoPaths {
    /// Use `root` as the repository root without searching.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the repository root starting at `start`.
    ///
    /// Falls back to two levels above `start` when no ancestor has `apps/`.
    pub fn discover(start: &Path) -> Self {
        match Self::find_root(start) {
            Some(root) => {
                debug!(root = %root.display(), "found repository root");
                Self { root }
            }
            None => {
                let root = start
                    .ancestors()
                    .take(FALLBACK_DEPTH + 1)
                    .last()
                    .unwrap_or(start)
                    .to_path_buf();
                debug!(
                    start = %start.display(),
                    root = %root.display(),
                    "no apps/ ancestor, using fallback root"
                );
                Self { root }
            }
        }
    }

    /// The nearest ancestor of `start` (inclusive) containing `apps/`.
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(APPS_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate application directories, in lookup order.
    pub fn app_candidates(&self, app_name: &str) -> [PathBuf; 2] {
        [
            self.root.join(APPS_DIR).join(app_name),
            self.root.join(INFRASTRUCTURE_DIR).join(app_name),
        ]
    }

    /// The first candidate that exists and is a directory.
    pub fn find_app_dir(&self, app_name: &str) -> Option<PathBuf> {
        self.app_candidates(app_name)
            .into_iter()
            .find(|candidate| candidate.is_dir())
    }

    /// Resolve and create `<app dir>/secrets`.
    ///
    /// # Errors
    ///
    /// - `PathError::AppNotFound` if neither candidate directory exists
    /// - `PathError::CreateDir` if the directory cannot be created
    pub fn secrets_dir(&self, app_name: &str) -> Result<PathBuf, PathError> {
        let app_dir = self
            .find_app_dir(app_name)
            .ok_or_else(|| PathError::AppNotFound {
                app: app_name.to_string(),
                root: self.root.clone(),
            })?;

        let secrets_dir = app_dir.join(SECRETS_DIR);
        fs::create_dir_all(&secrets_dir).map_err(|e| PathError::CreateDir {
            path: secrets_dir.clone(),
            source: e,
        })?;

        debug!(app = app_name, dir = %secrets_dir.display(), "resolved secrets directory");
        Ok(secrets_dir)
    }

    /// Output file for a secret inside a resolved secrets directory.
    pub fn output_file(secrets_dir: &Path, secret_name: &str) -> PathBuf {
        secrets_dir.join(format!("{}.{}", secret_name, OUTPUT_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo_with(dirs: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for dir in dirs {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
        }
        temp
    }

    #[test]
    fn finds_root_from_deep_nesting() {
        let temp = repo_with(&["apps/demo", "scripts/kryptos/a/b/c"]);
        let start = temp.path().join("scripts/kryptos/a/b/c");
        assert_eq!(RepoPaths::find_root(&start).unwrap(), temp.path());
        assert_eq!(RepoPaths::discover(&start).root(), temp.path());
    }

    #[test]
    fn apps_file_does_not_mark_root() {
        let temp = repo_with(&["apps/demo", "scripts/kryptos"]);
        let start = temp.path().join("scripts/kryptos");
        fs::write(start.join("apps"), "not a dir").unwrap();

        let paths = RepoPaths::discover(&start);
        assert_eq!(paths.root(), temp.path());
        assert_eq!(
            paths.secrets_dir("demo").unwrap(),
            temp.path().join("apps/demo/secrets")
        );
    }

    #[test]
    fn start_directory_itself_can_be_root() {
        let temp = repo_with(&["apps"]);
        assert_eq!(RepoPaths::find_root(temp.path()).unwrap(), temp.path());
    }

    #[test]
    fn fallback_is_two_levels_up() {
        let paths = RepoPaths::discover(Path::new("/nonexistent-kryptos-root/scripts/kryptos"));
        assert_eq!(paths.root(), Path::new("/nonexistent-kryptos-root"));
    }

    #[test]
    fn fallback_stops_at_filesystem_root() {
        let paths = RepoPaths::discover(Path::new("/nonexistent-kryptos-root"));
        assert_eq!(paths.root(), Path::new("/"));
    }

    #[test]
    fn apps_preferred_over_infrastructure() {
        let temp = repo_with(&["apps/traefik", "infrastructure/traefik"]);
        let paths = RepoPaths::new(temp.path());
        assert_eq!(
            paths.find_app_dir("traefik").unwrap(),
            temp.path().join("apps/traefik")
        );
    }

    #[test]
    fn infrastructure_used_when_apps_missing() {
        let temp = repo_with(&["apps", "infrastructure/cert-manager"]);
        let paths = RepoPaths::new(temp.path());
        let dir = paths.secrets_dir("cert-manager").unwrap();
        assert_eq!(dir, temp.path().join("infrastructure/cert-manager/secrets"));
        assert!(dir.is_dir());
    }

    #[test]
    fn file_candidate_is_skipped() {
        let temp = repo_with(&["apps", "infrastructure/vault"]);
        fs::write(temp.path().join("apps/vault"), "not a dir").unwrap();
        let paths = RepoPaths::new(temp.path());
        assert_eq!(
            paths.find_app_dir("vault").unwrap(),
            temp.path().join("infrastructure/vault")
        );
    }

    #[test]
    fn secrets_dir_is_idempotent() {
        let temp = repo_with(&["apps/demo/secrets"]);
        let paths = RepoPaths::new(temp.path());
        let first = paths.secrets_dir("demo").unwrap();
        let second = paths.secrets_dir("demo").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_app_is_an_error() {
        let temp = repo_with(&["apps"]);
        let paths = RepoPaths::new(temp.path());
        let err = paths.secrets_dir("ghost").unwrap_err();
        assert!(matches!(err, PathError::AppNotFound { .. }));
        assert!(err.to_string().contains("ghost"));
        assert!(!temp.path().join("apps/ghost").exists());
    }

    #[test]
    fn output_file_uses_secret_name() {
        assert_eq!(
            RepoPaths::output_file(Path::new("/repo/apps/demo/secrets"), "demo-admin"),
            PathBuf::from("/repo/apps/demo/secrets/demo-admin.yaml")
        );
    }
}
