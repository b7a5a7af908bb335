//! sealer::kubeseal
//!
//! [`Sealer`] backed by the `kubeseal` CLI.
//!
//! # Invocation
//!
//! - probe: `kubeseal --fetch-cert`
//! - seal: `kubeseal --format yaml --controller-namespace kube-system
//!   --name <name> --namespace <namespace>`, plaintext on stdin, SealedSecret
//!   on stdout, diagnostics on stderr
//!
//! Calls block until `kubeseal` exits. There is no timeout.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use super::traits::{SealError, Sealer};

/// Executable looked up on `PATH`.
pub const BINARY_NAME: &str = "kubeseal";

/// Namespace the sealed-secrets controller runs in.
pub const CONTROLLER_NAMESPACE: &str = "kube-system";

/// The `kubeseal` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kubeseal {
    binary: PathBuf,
}

impl Kubeseal {
    /// Find `kubeseal` on the executable search path.
    ///
    /// # Errors
    ///
    /// Returns `SealError::Unavailable` if it is not installed.
    pub fn locate() -> Result<Self, SealError> {
        let binary =
            which::which(BINARY_NAME).map_err(|e| SealError::Unavailable(e.to_string()))?;
        debug!(binary = %binary.display(), "located kubeseal");
        Ok(Self::with_binary(binary))
    }

    /// Use a specific executable.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Path to the executable.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Arguments for a seal invocation.
    pub fn seal_args(namespace: &str, name: &str) -> Vec<String> {
        [
            "--format",
            "yaml",
            "--controller-namespace",
            CONTROLLER_NAMESPACE,
            "--name",
            name,
            "--namespace",
            namespace,
        ]
        .iter()
        .map(|arg| arg.to_string())
        .collect()
    }
}

impl Sealer for Kubeseal {
    fn check_connectivity(&self) -> Result<(), SealError> {
        let output = Command::new(&self.binary)
            .arg("--fetch-cert")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| SealError::Spawn(e.to_string()))?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(SealError::Unreachable {
                status: output.status.to_string(),
                output: combined.trim().to_string(),
            });
        }

        debug!("sealed-secrets controller reachable");
        Ok(())
    }

    fn seal(&self, plaintext: &[u8], namespace: &str, name: &str) -> Result<Vec<u8>, SealError> {
        info!(namespace, name, "sealing secret");

        let mut child = Command::new(&self.binary)
            .args(Self::seal_args(namespace, name))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SealError::Spawn(e.to_string()))?;

        // Dropping stdin closes the pipe so kubeseal sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(plaintext),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| SealError::Spawn(e.to_string()))?;

        if !output.status.success() {
            return Err(SealError::Rejected {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if let Err(e) = written {
            return Err(SealError::Spawn(format!("failed to write to kubeseal stdin: {}", e)));
        }
        if output.stdout.is_empty() {
            return Err(SealError::EmptyOutput);
        }

        Ok(output.stdout)
    }
}
