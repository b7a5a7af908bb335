//! sealer::traits
//!
//! The `Sealer` trait: the narrow seam between the workflow and the external
//! encryption tool.
//!
//! # Design
//!
//! Two operations only: a readiness probe and the seal itself. The workflow
//! never shells out directly, so tests can substitute
//! [`MockSealer`](super::mock::MockSealer).
//!
//! # Security
//!
//! Implementations receive plaintext on `seal` and MUST NOT log it, write it
//! to disk, or include it in error messages.

use thiserror::Error;

/// Errors from sealing operations.
///
/// Messages carry the tool's diagnostics, never the plaintext.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SealError {
    /// The encryption tool is not on the executable search path.
    #[error("kubeseal binary not found in PATH: {0}")]
    Unavailable(String),

    /// The certificate probe failed.
    #[error("failed to connect to sealed-secrets controller ({status}): {output}")]
    Unreachable { status: String, output: String },

    /// The tool could not be started or fed its input.
    #[error("failed to run kubeseal: {0}")]
    Spawn(String),

    /// The tool exited non-zero.
    #[error("kubeseal failed ({status}): {stderr}")]
    Rejected { status: String, stderr: String },

    /// The tool exited zero but wrote nothing.
    #[error("kubeseal produced no output")]
    EmptyOutput,
}

/// An encryption backend for plaintext Secret documents.
pub trait Sealer {
    /// Non-destructive readiness probe.
    ///
    /// A failure here is advisory: callers warn and carry on.
    fn check_connectivity(&self) -> Result<(), SealError>;

    /// Encrypt `plaintext` into a SealedSecret named `name` in `namespace`.
    ///
    /// `namespace` and `name` are authoritative even if the plaintext
    /// document embeds different values.
    fn seal(&self, plaintext: &[u8], namespace: &str, name: &str) -> Result<Vec<u8>, SealError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = SealError::Unavailable("cannot find binary path".into());
        assert!(err.to_string().contains("not found in PATH"));

        let err = SealError::Rejected {
            status: "exit status: 1".into(),
            stderr: "error: cannot fetch certificate".into(),
        };
        assert!(err.to_string().contains("exit status: 1"));
        assert!(err.to_string().contains("cannot fetch certificate"));

        let err = SealError::Unreachable {
            status: "exit status: 2".into(),
            output: "connection refused".into(),
        };
        assert!(err.to_string().contains("sealed-secrets controller"));

        assert!(SealError::EmptyOutput.to_string().contains("no output"));
    }
}
