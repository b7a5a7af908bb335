//! secrets
//!
//! Cryptographically secure generation of credential values.
//!
//! # Architecture
//!
//! - [`generator`]: password, API key, base64 key and passphrase builders
//! - [`GeneratorKind`]: the reserved keywords (`secure`, `strong`, `apikey`,
//!   `passphrase`) that trigger generation instead of literal use
//!
//! # Security
//!
//! - Every random choice comes from the operating system CSPRNG
//! - A failing entropy source is a [`GeneratorError`]; there is no fallback
//!   to a weaker generator
//! - Generated values are never logged
//!
//! # Example
//!
//! ```
//! use kryptos::secrets::{generate, GeneratorKind};
//!
//! let kind = GeneratorKind::from_keyword("apikey").unwrap();
//! let key = generate(kind).unwrap();
//! assert_eq!(key.len(), 64);
//! ```

pub mod generator;
mod words;

pub use generator::{api_key, base64_key, passphrase, secure_password};
pub use words::WORDS;

use std::fmt;

use thiserror::Error;

/// Password length used by the `secure` and `strong` keywords.
pub const DEFAULT_PASSWORD_LENGTH: usize = 32;

/// Key length used by the `apikey` keyword.
pub const DEFAULT_API_KEY_LENGTH: usize = 64;

/// Word count used by the `passphrase` keyword.
pub const DEFAULT_PASSPHRASE_WORDS: usize = 4;

/// Separator used by the `passphrase` keyword.
pub const DEFAULT_PASSPHRASE_SEPARATOR: &str = "-";

/// Errors from value generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The secure random source could not produce output.
    #[error("secure random source failed: {0}")]
    Entropy(String),
}

/// A reserved generator keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// 32-character password, letters and digits.
    Secure,
    /// 32-character password including symbols.
    Strong,
    /// 64 lowercase hex characters.
    ApiKey,
    /// Four words joined by `-`.
    Passphrase,
}

impl GeneratorKind {
    /// All keywords, in documentation order.
    pub const ALL: [GeneratorKind; 4] = [
        GeneratorKind::Secure,
        GeneratorKind::Strong,
        GeneratorKind::ApiKey,
        GeneratorKind::Passphrase,
    ];

    /// The literal keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            GeneratorKind::Secure => "secure",
            GeneratorKind::Strong => "strong",
            GeneratorKind::ApiKey => "apikey",
            GeneratorKind::Passphrase => "passphrase",
        }
    }

    /// Parse an exact keyword. Matching is case-sensitive and does not trim.
    pub fn from_keyword(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == text)
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Generate a fresh value for a keyword using its standard parameters.
///
/// # Errors
///
/// Returns [`GeneratorError::Entropy`] if the random source fails.
pub fn generate(kind: GeneratorKind) -> Result<String, GeneratorError> {
    match kind {
        GeneratorKind::Secure => secure_password(DEFAULT_PASSWORD_LENGTH, false),
        GeneratorKind::Strong => secure_password(DEFAULT_PASSWORD_LENGTH, true),
        GeneratorKind::ApiKey => api_key(DEFAULT_API_KEY_LENGTH),
        GeneratorKind::Passphrase => {
            passphrase(DEFAULT_PASSPHRASE_WORDS, DEFAULT_PASSPHRASE_SEPARATOR)
        }
    }
}
