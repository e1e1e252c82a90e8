// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random token generation for queue entry names and issue titles.
//!
//! Six alphanumeric characters give 62^6 (~5.7e10) combinations for
//! entry ids and 36^6 (~2.2e9) for title tokens; collision risk is
//! accepted as negligible and unguarded beyond `create_new` semantics
//! at the queue layer.

use rand::Rng;

/// Default token length for entry ids and issue titles.
pub const TOKEN_LEN: usize = 6;

const ENTRY_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TITLE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn sample(len: usize, chars: &[u8]) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| chars[rng.gen_range(0..chars.len())] as char)
        .collect()
}

/// Generate a random id for a queue entry file (mixed-case alphanumeric).
pub fn entry_token() -> String {
    sample(TOKEN_LEN, ENTRY_CHARS)
}

/// Generate a short human-readable token for an issue title
/// (uppercase alphanumeric).
pub fn title_token() -> String {
    sample(TOKEN_LEN, TITLE_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_token_has_expected_shape() {
        let token = entry_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn title_token_is_uppercase_alphanumeric() {
        let token = title_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn tokens_vary_across_calls() {
        // 62^6 combinations make 20 identical draws vanishingly unlikely.
        let tokens: std::collections::HashSet<String> =
            (0..20).map(|_| entry_token()).collect();
        assert!(tokens.len() > 1);
    }
}
