// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret token resolution.
//!
//! Tokens come from a file (the usual deployment shape, mounted
//! secrets) or from an environment variable as a fallback.

use std::path::Path;

use gripe_core::GripeError;

/// Resolves a token from `file`, falling back to the `env_var`
/// environment variable. File contents are trimmed of surrounding
/// whitespace so a trailing newline in a mounted secret is harmless.
pub fn resolve(file: Option<&Path>, env_var: &str, name: &str) -> Result<String, GripeError> {
    if let Some(path) = file {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GripeError::Config(format!(
                "unable to read the {name} file {}: {e}",
                path.display()
            ))
        })?;
        let token = raw.trim().to_string();
        if token.is_empty() {
            return Err(GripeError::Config(format!(
                "the {name} file {} is empty",
                path.display()
            )));
        }
        return Ok(token);
    }

    match std::env::var(env_var) {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => Err(GripeError::Config(format!(
            "no {name} provided: pass a token file or set {env_var}"
        ))),
    }
}
