//! sealer::mock
//!
//! Mock sealer for deterministic testing.
//!
//! # Design
//!
//! `MockSealer` records every call, including the plaintext it was handed, so
//! tests can inspect the document the workflow built. Its output is a small
//! SealedSecret-shaped YAML that never contains the plaintext.
//!
//! # Example
//!
//! ```
//! use kryptos::sealer::mock::MockSealer;
//! use kryptos::sealer::Sealer;
//!
//! let sealer = MockSealer::new();
//! let sealed = sealer.seal(b"kind: Secret\n", "demo-prod", "demo-admin").unwrap();
//!
//! assert!(String::from_utf8(sealed).unwrap().contains("kind: SealedSecret"));
//! assert_eq!(sealer.calls()[0].name, "demo-admin");
//! ```

use std::sync::{Arc, Mutex};

use super::traits::{SealError, Sealer};

/// Mock sealer for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockSealer {
    inner: Arc<Mutex<MockSealerInner>>,
}

#[derive(Debug, Default)]
struct MockSealerInner {
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    CheckConnectivity(SealError),
    Seal(SealError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CheckConnectivity,
    Seal(SealCall),
}

/// Arguments of one `seal` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealCall {
    pub plaintext: String,
    pub namespace: String,
    pub name: String,
}

impl MockSealer {
    /// Create a mock sealer that succeeds on everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use kryptos::sealer::mock::{FailOn, MockSealer};
    /// use kryptos::sealer::{SealError, Sealer};
    ///
    /// let sealer = MockSealer::new().fail_on(FailOn::Seal(SealError::EmptyOutput));
    /// assert!(sealer.seal(b"", "ns", "name").is_err());
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Recorded `seal` calls only.
    pub fn calls(&self) -> Vec<SealCall> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::Seal(call) => Some(call),
                MockOperation::CheckConnectivity => None,
            })
            .collect()
    }

    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    fn check_fail(&self, expected: &str) -> Option<SealError> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::CheckConnectivity(e)) if expected == "check_connectivity" => {
                Some(e.clone())
            }
            Some(FailOn::Seal(e)) if expected == "seal" => Some(e.clone()),
            _ => None,
        }
    }
}

impl Sealer for MockSealer {
    fn check_connectivity(&self) -> Result<(), SealError> {
        self.record(MockOperation::CheckConnectivity);
        match self.check_fail("check_connectivity") {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn seal(&self, plaintext: &[u8], namespace: &str, name: &str) -> Result<Vec<u8>, SealError> {
        self.record(MockOperation::Seal(SealCall {
            plaintext: String::from_utf8_lossy(plaintext).into_owned(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        }));
        if let Some(e) = self.check_fail("seal") {
            return Err(e);
        }

        let sealed = format!(
            "apiVersion: bitnami.com/v1alpha1\n\
             kind: SealedSecret\n\
             metadata:\n  name: {name}\n  namespace: {namespace}\n\
             spec:\n  encryptedData:\n    mock: \"{len} bytes\"\n",
            len = plaintext.len(),
        );
        Ok(sealed.into_bytes())
    }
}
