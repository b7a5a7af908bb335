//! core::manifest
//!
//! Plaintext Kubernetes `Secret` assembly.
//!
//! # Security
//!
//! A [`RawSecretDocument`] only ever lives in memory and on `kubeseal`'s
//! stdin. Its values are zeroized on drop and redacted from `Debug` output.
//!
//! # Merge Order
//!
//! Entered values are inserted first, then the secret's static
//! `string_data`. A static entry therefore replaces an entered value with the
//! same key.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use zeroize::Zeroize;

use crate::core::types::{AppConfig, Secret};

/// Errors from document validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required key: {0}")]
    MissingField(String),
}

/// A plaintext `v1/Secret`.
#[derive(Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawSecretDocument {
    pub api_version: &'static str,
    pub kind: &'static str,
    pub metadata: SecretMetadata,
    #[serde(rename = "type")]
    pub secret_type: String,
    pub string_data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SecretMetadata {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl RawSecretDocument {
    /// Serialize as YAML for `kubeseal`.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; in practice this cannot fail for
    /// string-only maps.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

impl fmt::Debug for RawSecretDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSecretDocument")
            .field("metadata", &self.metadata)
            .field("type", &self.secret_type)
            .field("keys", &self.string_data.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Drop for RawSecretDocument {
    fn drop(&mut self) {
        for value in self.string_data.values_mut() {
            value.zeroize();
        }
    }
}

/// Validate `entered` against `secret` and build the plaintext document.
///
/// A required field is satisfied by a non-empty entered value or by a key in
/// the secret's static `string_data`. Fields are checked in declaration
/// order and the first missing one is reported.
///
/// # Errors
///
/// Returns `ValidationError::MissingField` naming the first missing field.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use kryptos::core::manifest::build_document;
/// use kryptos::core::types::{AppConfig, Secret, SecretField};
///
/// let secret = Secret {
///     name: "demo-admin".into(),
///     fields: vec![SecretField { required: true, ..SecretField::new("username") }],
///     ..Default::default()
/// };
/// let app = AppConfig {
///     app_name: "demo".into(),
///     display_name: "Demo".into(),
///     namespace: "demo-prod".into(),
///     secrets: vec![secret.clone()],
/// };
///
/// let mut entered = BTreeMap::new();
/// entered.insert("username".to_string(), "admin".to_string());
///
/// let doc = build_document(&app, &secret, &entered).unwrap();
/// assert_eq!(doc.metadata.namespace, "demo-prod");
/// assert_eq!(doc.string_data["username"], "admin");
/// ```
pub fn build_document(
    app: &AppConfig,
    secret: &Secret,
    entered: &BTreeMap<String, String>,
) -> Result<RawSecretDocument, ValidationError> {
    for field in secret.fields.iter().filter(|f| f.required) {
        let has_value = entered.get(&field.name).is_some_and(|v| !v.is_empty());
        if !has_value && !secret.string_data.contains_key(&field.name) {
            return Err(ValidationError::MissingField(field.name.clone()));
        }
    }

    let mut string_data = entered.clone();
    string_data.extend(
        secret
            .string_data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );

    Ok(RawSecretDocument {
        api_version: "v1",
        kind: "Secret",
        metadata: SecretMetadata {
            name: secret.name.clone(),
            namespace: app.namespace.clone(),
            labels: secret.labels.clone(),
        },
        secret_type: secret.effective_type().to_string(),
        string_data,
    })
}
