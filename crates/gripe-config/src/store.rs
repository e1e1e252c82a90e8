// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared configuration handle with persist-on-write semantics.
//!
//! A single [`ConfigStore`] is created at startup and passed by
//! explicit handle into every component constructor; there are no
//! ambient globals. Admin commands mutate through [`ConfigStore::update`],
//! which validates and rewrites the whole JSON document, so a live
//! change applies cleanly to the next `snapshot()` with last-write-wins
//! semantics.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gripe_core::GripeError;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::model::TriageConfig;

/// Shared handle to the live configuration.
pub type ConfigHandle = Arc<ConfigStore>;

/// Owns the configuration document and its backing file.
pub struct ConfigStore {
    path: PathBuf,
    inner: Mutex<TriageConfig>,
}

impl ConfigStore {
    /// Loads the configuration from `path`, validating it. A missing
    /// file yields the defaults; it is created on the first mutation.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, GripeError> {
        let path = path.into();
        let config = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str::<TriageConfig>(&raw).map_err(|e| {
                GripeError::Config(format!("{}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "config file not found, starting from defaults");
                TriageConfig::default()
            }
            Err(e) => {
                return Err(GripeError::Config(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };
        config.validate()?;

        Ok(Self {
            path,
            inner: Mutex::new(config),
        })
    }

    /// Returns a point-in-time copy of the configuration.
    ///
    /// Callers re-read rather than cache: the rotation interval and the
    /// triage threshold are both consulted fresh on every cycle / vote.
    pub async fn snapshot(&self) -> TriageConfig {
        self.inner.lock().await.clone()
    }

    /// Applies `mutate` to the configuration, validates the result, and
    /// persists the full document. On validation failure nothing is
    /// changed in memory or on disk.
    pub async fn update<F>(&self, mutate: F) -> Result<TriageConfig, GripeError>
    where
        F: FnOnce(&mut TriageConfig),
    {
        let mut guard = self.inner.lock().await;
        let mut candidate = guard.clone();
        mutate(&mut candidate);
        candidate.validate()?;

        persist(&self.path, &candidate).await?;
        *guard = candidate.clone();
        debug!(path = %self.path.display(), "configuration persisted");
        Ok(candidate)
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn persist(path: &Path, config: &TriageConfig) -> Result<(), GripeError> {
    let body = serde_json::to_string_pretty(config)
        .map_err(|e| GripeError::Config(format!("cannot encode config: {e}")))?;
    tokio::fs::write(path, body).await.map_err(|e| {
        GripeError::Config(format!("cannot write {}: {e}", path.display()))
    })
}
