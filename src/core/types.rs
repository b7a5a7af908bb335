//! core::types
//!
//! The normalized in-memory model every configuration schema is parsed into.
//!
//! # Types
//!
//! - [`AppConfig`] - One application and the secrets it owns
//! - [`Secret`] - One SealedSecret to generate
//! - [`SecretField`] - One value to collect from the operator
//!
//! Values are built once by [`crate::core::config`] and never mutated
//! afterwards; the UI borrows them.
//!
//! # Example
//!
//! ```
//! use kryptos::core::types::SecretField;
//!
//! let field = SecretField::new("db_password");
//! assert_eq!(field.prompt(), "db_password");
//! assert!(field.is_sensitive());
//! ```

use std::collections::BTreeMap;

use crate::secrets::GeneratorKind;

/// Kubernetes secret type used when a definition leaves it empty.
pub const DEFAULT_SECRET_TYPE: &str = "Opaque";

/// Substrings that mark a field as sensitive (masked on entry).
const SENSITIVE_MARKERS: &[&str] = &["password", "token", "secret"];

/// One application's secret definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Machine identifier, used to find `apps/<name>` on disk.
    pub app_name: String,
    /// Human label shown in the application list.
    pub display_name: String,
    /// Target namespace written into every secret of this app.
    pub namespace: String,
    /// Secrets in declaration order.
    pub secrets: Vec<Secret>,
}

impl AppConfig {
    /// Label for menus: the display name, or the app name if none was given.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.app_name
        } else {
            &self.display_name
        }
    }
}

/// A single secret manifest definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Secret {
    /// Resource name; also the output file stem.
    pub name: String,
    pub display_name: String,
    /// Kubernetes secret type (e.g. `Opaque`). May be empty.
    pub secret_type: String,
    pub description: String,
    /// Fields in display and input order.
    pub fields: Vec<SecretField>,
    /// Static labels attached to the resource.
    pub labels: BTreeMap<String, String>,
    /// Static values merged after the entered ones.
    pub string_data: BTreeMap<String, String>,
}

impl Secret {
    /// Label for menus: the display name, or the resource name if none was given.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    /// The secret type to write into the document.
    pub fn effective_type(&self) -> &str {
        if self.secret_type.is_empty() {
            DEFAULT_SECRET_TYPE
        } else {
            &self.secret_type
        }
    }
}

/// One value to collect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretField {
    /// Key in the secret's data map.
    pub name: String,
    /// Display text. Empty means "use the name".
    pub prompt: String,
    pub required: bool,
    /// Generator used to pre-seed or fill the value.
    pub generator: Option<GeneratorKind>,
    /// Pre-filled value; may itself be a generator keyword.
    pub default: String,
    /// Requested length for generated values. Advisory only.
    pub length: Option<u32>,
}

impl SecretField {
    /// A manual-entry field whose prompt is its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            prompt: name.clone(),
            name,
            ..Default::default()
        }
    }

    /// Text shown to the operator.
    pub fn prompt(&self) -> &str {
        if self.prompt.is_empty() {
            &self.name
        } else {
            &self.prompt
        }
    }

    /// Whether input for this field should be masked.
    pub fn is_sensitive(&self) -> bool {
        let lower = self.name.to_lowercase();
        SENSITIVE_MARKERS.iter().any(|marker| lower.contains(marker))
    }
}
