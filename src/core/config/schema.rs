//! core::config::schema
//!
//! On-disk schemas for per-application secret definitions.
//!
//! # Versions
//!
//! - **v1**: `apiVersion: kryptos.dev/v1`, `kind: SecretConfig`, with
//!   `metadata` and `spec.secrets[].fields[]`
//! - **legacy**: flat `app_name` / `display_name` / `namespace` with
//!   `secrets[].keys` (a bare list of key names)
//!
//! A document whose `apiVersion` is `kryptos.dev/v1` is parsed as v1; any
//! other document is parsed as legacy. Both normalize into
//! [`AppConfig`](crate::core::types::AppConfig).
//!
//! # Example
//!
//! ```
//! use kryptos::core::config::schema::parse_config;
//!
//! let yaml = r#"
//! app_name: demo
//! namespace: demo-prod
//! secrets:
//!   - name: demo-admin
//!     keys: [username, password]
//! "#;
//!
//! let app = parse_config(yaml).unwrap();
//! assert_eq!(app.secrets[0].fields[1].prompt, "password");
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;

use crate::core::types::{AppConfig, Secret, SecretField};
use crate::secrets::GeneratorKind;

/// `apiVersion` that selects the v1 schema.
pub const API_VERSION_V1: &str = "kryptos.dev/v1";

/// `kind` required by the v1 schema.
pub const KIND_SECRET_CONFIG: &str = "SecretConfig";

/// Errors from parsing a single configuration document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid YAML: {0}")]
    Yaml(String),

    #[error("error parsing {version} config: {message}")]
    Invalid {
        version: &'static str,
        message: String,
    },

    #[error("invalid kind '{found}', expected '{KIND_SECRET_CONFIG}'")]
    InvalidKind { found: String },

    #[error("required field '{0}' is empty")]
    EmptyField(String),

    #[error("'{0}' must be a string, number or boolean")]
    NotScalar(String),
}

/// A parsed document, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigDocument {
    V1(V1Document),
    Legacy(LegacyDocument),
}

impl ConfigDocument {
    /// Parse YAML, dispatching on `apiVersion`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not YAML or does not match the
    /// selected schema.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| SchemaError::Yaml(e.to_string()))?;

        let is_v1 = value.get("apiVersion").and_then(Value::as_str) == Some(API_VERSION_V1);
        if is_v1 {
            let doc: V1Document = serde_yaml::from_value(value).map_err(|e| SchemaError::Invalid {
                version: "v1",
                message: e.to_string(),
            })?;
            if doc.kind != KIND_SECRET_CONFIG {
                return Err(SchemaError::InvalidKind { found: doc.kind });
            }
            Ok(ConfigDocument::V1(doc))
        } else {
            let doc: LegacyDocument =
                serde_yaml::from_value(value).map_err(|e| SchemaError::Invalid {
                    version: "legacy",
                    message: e.to_string(),
                })?;
            Ok(ConfigDocument::Legacy(doc))
        }
    }

    /// Short name of the schema this document was parsed with.
    pub fn version(&self) -> &'static str {
        match self {
            ConfigDocument::V1(_) => "v1",
            ConfigDocument::Legacy(_) => "legacy",
        }
    }

    /// Convert into the normalized model.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifying field is empty or a static map
    /// holds a non-scalar value.
    pub fn normalize(self) -> Result<AppConfig, SchemaError> {
        match self {
            ConfigDocument::V1(doc) => doc.normalize(),
            ConfigDocument::Legacy(doc) => doc.normalize(),
        }
    }
}

/// Parse and normalize a configuration document in one step.
///
/// # Errors
///
/// See [`ConfigDocument::parse`] and [`ConfigDocument::normalize`].
pub fn parse_config(text: &str) -> Result<AppConfig, SchemaError> {
    ConfigDocument::parse(text)?.normalize()
}

// =========================================================================
// v1
// =========================================================================

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct V1Document {
    pub api_version: String,
    pub kind: String,
    pub metadata: V1Metadata,
    #[serde(default)]
    pub spec: V1Spec,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct V1Metadata {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub namespace: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct V1Spec {
    #[serde(default)]
    pub secrets: Vec<V1Secret>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct V1Secret {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub secret_type: Option<String>,
    #[serde(default)]
    pub fields: Vec<V1Field>,
    #[serde(default)]
    pub string_data: BTreeMap<String, Value>,
    #[serde(default)]
    pub labels: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct V1Field {
    pub name: String,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub generator: Option<String>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub length: Option<u32>,
}

impl V1Document {
    fn normalize(self) -> Result<AppConfig, SchemaError> {
        require("metadata.name", &self.metadata.name)?;
        require("metadata.namespace", &self.metadata.namespace)?;

        let secrets = self
            .spec
            .secrets
            .into_iter()
            .enumerate()
            .map(|(i, secret)| secret.normalize(i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AppConfig {
            app_name: self.metadata.name,
            display_name: self.metadata.display_name.unwrap_or_default(),
            namespace: self.metadata.namespace,
            secrets,
        })
    }
}

impl V1Secret {
    fn normalize(self, index: usize) -> Result<Secret, SchemaError> {
        let path = format!("spec.secrets[{}]", index);
        require(&format!("{}.name", path), &self.name)?;

        let mut fields = Vec::with_capacity(self.fields.len());
        for (i, field) in self.fields.into_iter().enumerate() {
            let field_path = format!("{}.fields[{}]", path, i);
            require(&format!("{}.name", field_path), &field.name)?;

            let default = match field.default {
                Some(value) => scalar(&format!("{}.default", field_path), value)?,
                None => String::new(),
            };

            fields.push(SecretField {
                generator: parse_generator(&field.name, field.generator.as_deref()),
                name: field.name,
                prompt: field.prompt.unwrap_or_default(),
                required: field.required,
                default,
                length: field.length,
            });
        }

        Ok(Secret {
            name: self.name,
            display_name: self.display_name.unwrap_or_default(),
            secret_type: self.secret_type.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            fields,
            labels: scalar_map(&format!("{}.labels", path), self.labels)?,
            string_data: scalar_map(&format!("{}.stringData", path), self.string_data)?,
        })
    }
}

// =========================================================================
// legacy
// =========================================================================

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LegacyDocument {
    pub app_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub namespace: String,
    #[serde(default)]
    pub secrets: Vec<LegacySecret>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LegacySecret {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, rename = "type")]
    pub secret_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keys: Vec<Value>,
    #[serde(default, rename = "stringData")]
    pub string_data: BTreeMap<String, Value>,
    #[serde(default)]
    pub labels: BTreeMap<String, Value>,
}

impl LegacyDocument {
    fn normalize(self) -> Result<AppConfig, SchemaError> {
        require("app_name", &self.app_name)?;
        require("namespace", &self.namespace)?;

        let secrets = self
            .secrets
            .into_iter()
            .enumerate()
            .map(|(i, secret)| secret.normalize(i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AppConfig {
            app_name: self.app_name,
            display_name: self.display_name.unwrap_or_default(),
            namespace: self.namespace,
            secrets,
        })
    }
}

impl LegacySecret {
    fn normalize(self, index: usize) -> Result<Secret, SchemaError> {
        let path = format!("secrets[{}]", index);
        require(&format!("{}.name", path), &self.name)?;

        let mut fields = Vec::with_capacity(self.keys.len());
        for (i, key) in self.keys.into_iter().enumerate() {
            let key_path = format!("{}.keys[{}]", path, i);
            let key = scalar(&key_path, key)?;
            require(&key_path, &key)?;
            fields.push(SecretField::new(key));
        }

        Ok(Secret {
            name: self.name,
            display_name: self.display_name.unwrap_or_default(),
            secret_type: self.secret_type.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            fields,
            labels: scalar_map(&format!("{}.labels", path), self.labels)?,
            string_data: scalar_map(&format!("{}.stringData", path), self.string_data)?,
        })
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn require(path: &str, value: &str) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        return Err(SchemaError::EmptyField(path.to_string()));
    }
    Ok(())
}

fn parse_generator(field: &str, generator: Option<&str>) -> Option<GeneratorKind> {
    let name = generator.filter(|g| !g.is_empty())?;
    let kind = GeneratorKind::from_keyword(name);
    if kind.is_none() {
        debug!(field, generator = name, "unknown generator, treating field as manual entry");
    }
    kind
}

/// Render a YAML scalar the way it was written. Nulls become empty strings.
fn scalar(path: &str, value: Value) -> Result<String, SchemaError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(SchemaError::NotScalar(path.to_string())),
    }
}

fn scalar_map(
    path: &str,
    map: BTreeMap<String, Value>,
) -> Result<BTreeMap<String, String>, SchemaError> {
    map.into_iter()
        .map(|(key, value)| {
            let rendered = scalar(&format!("{}.{}", path, key), value)?;
            Ok((key, rendered))
        })
        .collect()
}
