//! engine::submit
//!
//! The submission pipeline.
//!
//! # Order
//!
//! 1. Every entered value that is exactly a generator keyword is replaced by
//!    a freshly generated value
//! 2. The plaintext document is built and validated
//! 3. The document is sealed
//! 4. The application's `secrets/` directory is resolved (and created)
//! 5. The sealed bytes are written to `<secrets dir>/<secret name>.yaml`
//!
//! Sealing happens before path resolution, so an unknown application still
//! costs one `kubeseal` round trip but never leaves a file behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};
use zeroize::{Zeroize, Zeroizing};

use crate::core::manifest::{build_document, ValidationError};
use crate::core::paths::{PathError, RepoPaths};
use crate::core::types::{AppConfig, Secret};
use crate::sealer::{SealError, Sealer};
use crate::secrets::{self, GeneratorError, GeneratorKind};

/// Errors from submitting a form.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to generate value: {0}")]
    Generation(#[from] GeneratorError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to serialize secret: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("failed to seal secret: {0}")]
    Seal(#[from] SealError),

    #[error("failed to resolve output directory: {0}")]
    Path(#[from] PathError),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Replace generator keywords with generated values.
///
/// Matching is exact: `secure` is a keyword, `Secure` and ` secure` are
/// literal text.
///
/// # Errors
///
/// Returns [`GeneratorError`] if the random source fails.
pub fn resolve_values(
    entered: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, GeneratorError> {
    let mut resolved = BTreeMap::new();
    for (key, value) in entered {
        let value = match GeneratorKind::from_keyword(value) {
            Some(kind) => {
                debug!(key = %key, generator = %kind, "generating value");
                secrets::generate(kind)?
            }
            None => value.clone(),
        };
        resolved.insert(key.clone(), value);
    }
    Ok(resolved)
}

/// Seal one secret and write it into the application's `secrets/` directory.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Any [`SubmitError`]; the output file is only created once every earlier
/// step has succeeded.
pub fn submit(
    sealer: &dyn Sealer,
    paths: &RepoPaths,
    app: &AppConfig,
    secret: &Secret,
    entered: &BTreeMap<String, String>,
) -> Result<PathBuf, SubmitError> {
    info!(app = %app.app_name, secret = %secret.name, "submitting secret");

    let mut values = resolve_values(entered)?;
    let document = build_document(app, secret, &values);
    values.values_mut().for_each(|v| v.zeroize());
    let document = document?;

    let plaintext = Zeroizing::new(document.to_yaml()?);
    drop(document);

    let sealed = sealer.seal(plaintext.as_bytes(), &app.namespace, &secret.name)?;
    drop(plaintext);

    let dir = paths.secrets_dir(&app.app_name)?;
    let path = RepoPaths::output_file(&dir, &secret.name);
    fs::write(&path, &sealed).map_err(|e| SubmitError::Write {
        path: path.clone(),
        source: e,
    })?;

    info!(path = %path.display(), bytes = sealed.len(), "wrote sealed secret");
    Ok(path)
}
