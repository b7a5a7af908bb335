//! Property-based tests for value generation.
//!
//! These tests use proptest to verify invariants hold across
//! randomly chosen generator parameters.

use std::collections::HashSet;

use proptest::prelude::*;

use kryptos::secrets::{api_key, base64_key, passphrase, secure_password, WORDS};

const SYMBOLS: &str = "!@#$%^&*";
const AMBIGUOUS: &str = "0O1Il";

/// Strategy for passphrase separators.
fn separator() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["-", "_", ".", " ", "::"]).prop_map(String::from)
}

proptest! {
    /// Passwords honor the length floor and contain every included pool.
    #[test]
    fn password_pools_and_length(length in 0usize..96, symbols in any::<bool>()) {
        let password = secure_password(length, symbols).unwrap();

        prop_assert_eq!(password.chars().count(), length.max(8));
        prop_assert!(password.chars().any(|c| c.is_ascii_lowercase()));
        prop_assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        prop_assert!(password.chars().any(|c| c.is_ascii_digit()));
        prop_assert_eq!(password.chars().any(|c| SYMBOLS.contains(c)), symbols);
        prop_assert!(!password.chars().any(|c| AMBIGUOUS.contains(c)));
        prop_assert!(password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SYMBOLS.contains(c)));
    }

    /// API keys are exactly `length` lowercase hex characters.
    #[test]
    fn api_key_is_lowercase_hex(length in 0usize..200) {
        let key = api_key(length).unwrap();
        prop_assert_eq!(key.len(), length);
        prop_assert!(key.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    /// Base64 keys decode back to `length` bytes.
    #[test]
    fn base64_key_encodes_requested_bytes(length in 0usize..128) {
        use base64::Engine as _;

        let key = base64_key(length).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD.decode(&key).unwrap();
        prop_assert_eq!(decoded.len(), length);
    }

    /// Passphrases have exactly `count` words, all from the word list.
    #[test]
    fn passphrase_words_from_list(count in 1usize..12, sep in separator()) {
        let phrase = passphrase(count, &sep).unwrap();
        let words: Vec<&str> = phrase.split(sep.as_str()).collect();

        prop_assert_eq!(words.len(), count);
        for word in words {
            prop_assert!(!word.is_empty());
            prop_assert!(WORDS.contains(&word), "{} not in word list", word);
        }
    }
}

#[test]
fn generators_do_not_repeat() {
    let mut passwords = HashSet::new();
    let mut keys = HashSet::new();
    for _ in 0..500 {
        assert!(passwords.insert(secure_password(32, true).unwrap()));
        assert!(keys.insert(api_key(64).unwrap()));
    }
}

#[test]
fn passphrases_vary() {
    let phrases: HashSet<String> = (0..200)
        .map(|_| passphrase(4, "-").unwrap())
        .collect();
    // 64^4 combinations; a handful of collisions would still be fine.
    assert!(phrases.len() > 190);
}
