//! secrets::generator
//!
//! Random credential builders.
//!
//! The public functions draw from [`OsRng`]. The `*_with` variants take any
//! source bounded by [`TryCryptoRng`], so a statistical PRNG cannot be
//! substituted by accident.
//!
//! # Example
//!
//! ```
//! use kryptos::secrets::{api_key, passphrase, secure_password};
//!
//! let password = secure_password(4, false).unwrap();
//! assert_eq!(password.len(), 8); // raised to the minimum
//!
//! let key = api_key(16).unwrap();
//! assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
//!
//! let phrase = passphrase(3, ".").unwrap();
//! assert_eq!(phrase.split('.').count(), 3);
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rand::TryCryptoRng;
use zeroize::Zeroize;

use super::words::WORDS;
use super::GeneratorError;

/// Shortest password [`secure_password`] will produce.
pub const MIN_PASSWORD_LENGTH: usize = 8;

// Ambiguous glyphs (0 O 1 I l) are left out of every pool.
pub(crate) const LOWER: &[u8] = b"abcdefghjkmnpqrstuvwxyz";
pub(crate) const UPPER: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ";
pub(crate) const DIGITS: &[u8] = b"23456789";
pub(crate) const SYMBOLS: &[u8] = b"!@#$%^&*";

/// Generate a password of `length` characters (at least [`MIN_PASSWORD_LENGTH`]).
///
/// The result always contains a lowercase letter, an uppercase letter and a
/// digit, plus a symbol when `include_symbols` is set.
///
/// # Errors
///
/// Returns [`GeneratorError::Entropy`] if the random source fails.
pub fn secure_password(length: usize, include_symbols: bool) -> Result<String, GeneratorError> {
    secure_password_with(&mut OsRng, length, include_symbols)
}

/// Generate exactly `length` lowercase hex characters.
///
/// # Errors
///
/// Returns [`GeneratorError::Entropy`] if the random source fails.
pub fn api_key(length: usize) -> Result<String, GeneratorError> {
    api_key_with(&mut OsRng, length)
}

/// Base64-encode `length` random bytes.
///
/// # Errors
///
/// Returns [`GeneratorError::Entropy`] if the random source fails.
pub fn base64_key(length: usize) -> Result<String, GeneratorError> {
    base64_key_with(&mut OsRng, length)
}

/// Join `word_count` words from [`WORDS`], chosen with replacement.
///
/// # Errors
///
/// Returns [`GeneratorError::Entropy`] if the random source fails.
pub fn passphrase(word_count: usize, separator: &str) -> Result<String, GeneratorError> {
    passphrase_with(&mut OsRng, word_count, separator)
}

pub(crate) fn secure_password_with<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    length: usize,
    include_symbols: bool,
) -> Result<String, GeneratorError> {
    let length = length.max(MIN_PASSWORD_LENGTH);

    let mut pools: Vec<&[u8]> = vec![LOWER, UPPER, DIGITS];
    if include_symbols {
        pools.push(SYMBOLS);
    }
    let alphabet = pools.concat();

    let mut chars = Vec::with_capacity(length);
    for pool in &pools {
        chars.push(pool[random_index(rng, pool.len())?]);
    }
    while chars.len() < length {
        chars.push(alphabet[random_index(rng, alphabet.len())?]);
    }

    shuffle(rng, &mut chars)?;

    let password = chars.iter().copied().map(char::from).collect();
    chars.zeroize();
    Ok(password)
}

pub(crate) fn api_key_with<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    length: usize,
) -> Result<String, GeneratorError> {
    let mut bytes = vec![0u8; length.div_ceil(2)];
    fill(rng, &mut bytes)?;

    let mut key = hex::encode(&bytes);
    key.truncate(length);
    bytes.zeroize();
    Ok(key)
}

pub(crate) fn base64_key_with<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    length: usize,
) -> Result<String, GeneratorError> {
    let mut bytes = vec![0u8; length];
    fill(rng, &mut bytes)?;

    let key = STANDARD.encode(&bytes);
    bytes.zeroize();
    Ok(key)
}

pub(crate) fn passphrase_with<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    word_count: usize,
    separator: &str,
) -> Result<String, GeneratorError> {
    let mut words = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        words.push(WORDS[random_index(rng, WORDS.len())?]);
    }
    Ok(words.join(separator))
}

/// Fisher-Yates shuffle; every swap index comes from `rng`.
fn shuffle<R: TryCryptoRng + ?Sized>(rng: &mut R, items: &mut [u8]) -> Result<(), GeneratorError> {
    for i in (1..items.len()).rev() {
        let j = random_index(rng, i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}

/// Uniform index in `0..bound` by rejection sampling. `bound` must be non-zero.
fn random_index<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    bound: usize,
) -> Result<usize, GeneratorError> {
    debug_assert!(bound > 0, "random_index needs a non-empty range");
    let bound = bound as u64;
    let limit = u64::MAX - (u64::MAX % bound);
    loop {
        let value = rng
            .try_next_u64()
            .map_err(|e| GeneratorError::Entropy(e.to_string()))?;
        if value < limit {
            return Ok((value % bound) as usize);
        }
    }
}

fn fill<R: TryCryptoRng + ?Sized>(rng: &mut R, bytes: &mut [u8]) -> Result<(), GeneratorError> {
    rng.try_fill_bytes(bytes)
        .map_err(|e| GeneratorError::Entropy(e.to_string()))
}
