// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable file-per-item queue for pending feedback.
//!
//! Each submitted record becomes one `<random-id>.json` file in the
//! rotation directory; file presence is the sole pending-state
//! indicator. The queue makes no ordering promise beyond "still present
//! means still pending", which is exactly the contract the rotation
//! dispatcher needs. Writes happen from the HTTP intake path, removals
//! only from the single dispatcher instance.

use std::path::{Path, PathBuf};

use gripe_core::{token, EntryId, FeedbackRecord, GripeError};
use tracing::warn;

/// Durable store for feedback awaiting delivery.
pub struct FeedbackQueue {
    dir: PathBuf,
}

impl FeedbackQueue {
    /// Creates a queue over `dir`. The directory must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The rotation directory this queue persists into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the rotation directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), GripeError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| GripeError::Queue {
                message: format!("cannot create rotation directory {}", self.dir.display()),
                source: Some(Box::new(e)),
            })
    }

    /// Writes `record` as a new uniquely-named entry and returns its id.
    ///
    /// `create_new` semantics guarantee concurrent enqueues never land
    /// on the same file; an id collision is retried with a fresh id.
    pub async fn enqueue(&self, record: &FeedbackRecord) -> Result<EntryId, GripeError> {
        let body = serde_json::to_vec(record).map_err(|e| GripeError::Queue {
            message: "cannot encode feedback record".into(),
            source: Some(Box::new(e)),
        })?;

        loop {
            let id = token::entry_token();
            let path = self.entry_path(&id);
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => {
                    write_all(file, &body, &path).await?;
                    return Ok(EntryId(id));
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    // 62^6 ids make this a once-in-a-blue-moon retry.
                    continue;
                }
                Err(e) => return Err(classify_write_error(e, &path)),
            }
        }
    }

    /// Returns any one pending entry, or `None` when the queue is empty.
    ///
    /// Entries come back in directory-enumeration order; there is no
    /// recency guarantee, and none is wanted. Unparseable files are
    /// skipped with a warning and left in place.
    pub async fn peek_pending(
        &self,
    ) -> Result<Option<(EntryId, FeedbackRecord)>, GripeError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            GripeError::Queue {
                message: format!("cannot read rotation directory {}", self.dir.display()),
                source: Some(Box::new(e)),
            }
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| GripeError::Queue {
            message: "cannot enumerate rotation directory".into(),
            source: Some(Box::new(e)),
        })? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let raw = match tokio::fs::read(&path).await {
                Ok(raw) => raw,
                // Entry may have been removed between enumeration and read.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(GripeError::Queue {
                        message: format!("cannot read queue entry {}", path.display()),
                        source: Some(Box::new(e)),
                    });
                }
            };

            match serde_json::from_slice::<FeedbackRecord>(&raw) {
                Ok(record) => return Ok(Some((EntryId(stem.to_string()), record))),
                Err(e) => {
                    warn!(
                        entry = %path.display(),
                        error = %e,
                        "skipping unparseable queue entry"
                    );
                    continue;
                }
            }
        }

        Ok(None)
    }

    /// Deletes the entry after confirmed delivery.
    ///
    /// Idempotent: removing an already-removed id is a no-op.
    pub async fn remove(&self, id: &EntryId) -> Result<(), GripeError> {
        let path = self.entry_path(&id.0);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GripeError::Queue {
                message: format!("cannot remove queue entry {}", path.display()),
                source: Some(Box::new(e)),
            }),
        }
    }

    /// Number of pending entries; used by tests and the health surface.
    pub async fn pending_count(&self) -> Result<usize, GripeError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            GripeError::Queue {
                message: format!("cannot read rotation directory {}", self.dir.display()),
                source: Some(Box::new(e)),
            }
        })?;
        let mut count = 0;
        while let Some(entry) = entries.next_entry().await.map_err(|e| GripeError::Queue {
            message: "cannot enumerate rotation directory".into(),
            source: Some(Box::new(e)),
        })? {
            if entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
                count += 1;
            }
        }
        Ok(count)
    }

    fn entry_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

async fn write_all(
    mut file: tokio::fs::File,
    body: &[u8],
    path: &Path,
) -> Result<(), GripeError> {
    use tokio::io::AsyncWriteExt;

    let write = async {
        file.write_all(body).await?;
        file.flush().await
    };
    write.await.map_err(|e| classify_write_error(e, path))
}

fn classify_write_error(e: std::io::Error, path: &Path) -> GripeError {
    let message = match e.kind() {
        std::io::ErrorKind::PermissionDenied => {
            format!("incorrect permissions writing {}", path.display())
        }
        _ => format!("I/O failure writing {}", path.display()),
    };
    GripeError::Queue {
        message,
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gripe_core::FeedbackKind;

    fn record(body: &str) -> FeedbackRecord {
        FeedbackRecord {
            kind: FeedbackKind::Bug,
            contact: "alice".into(),
            location: "/home".into(),
            body: body.into(),
        }
    }

    #[tokio::test]
    async fn enqueue_creates_exactly_one_json_entry() {
        let dir = tempfile::tempdir().unwrap();
        let queue = FeedbackQueue::new(dir.path());

        let id = queue.enqueue(&record("broken button")).await.unwrap();
        assert_eq!(queue.pending_count().await.unwrap(), 1);

        let path = dir.path().join(format!("{}.json", id.0));
        let raw = std::fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["kind"], "bug");
        assert_eq!(value["feedback"], "broken button");
    }

    #[tokio::test]
    async fn peek_returns_the_stored_record() {
        let dir = tempfile::tempdir().unwrap();
        let queue = FeedbackQueue::new(dir.path());

        assert!(queue.peek_pending().await.unwrap().is_none());

        let id = queue.enqueue(&record("hello")).await.unwrap();
        let (peeked_id, peeked) = queue.peek_pending().await.unwrap().unwrap();
        assert_eq!(peeked_id, id);
        assert_eq!(peeked.body, "hello");
        // Peeking does not consume.
        assert_eq!(queue.pending_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let queue = FeedbackQueue::new(dir.path());

        let id = queue.enqueue(&record("once")).await.unwrap();
        queue.remove(&id).await.unwrap();
        assert_eq!(queue.pending_count().await.unwrap(), 0);

        // Second removal of the same id is a no-op, not an error.
        queue.remove(&id).await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_submissions_are_independent_entries() {
        let dir = tempfile::tempdir().unwrap();
        let queue = FeedbackQueue::new(dir.path());

        let a = queue.enqueue(&record("same text")).await.unwrap();
        let b = queue.enqueue(&record("same text")).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(queue.pending_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unparseable_entries_are_skipped_not_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let queue = FeedbackQueue::new(dir.path());

        std::fs::write(dir.path().join("poison.json"), "not json").unwrap();
        queue.enqueue(&record("good")).await.unwrap();

        let (_, peeked) = queue.peek_pending().await.unwrap().unwrap();
        assert_eq!(peeked.body, "good");
        // The poison file stays on disk; only confirmed delivery removes entries.
        assert!(dir.path().join("poison.json").exists());
    }

    #[tokio::test]
    async fn non_json_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let queue = FeedbackQueue::new(dir.path());

        std::fs::write(dir.path().join("README.txt"), "ignore me").unwrap();
        assert!(queue.peek_pending().await.unwrap().is_none());
        assert_eq!(queue.pending_count().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_enqueues_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let queue = std::sync::Arc::new(FeedbackQueue::new(dir.path()));

        let mut handles = Vec::new();
        for i in 0..32 {
            let queue = queue.clone();
            handles.push(tokio::spawn(async move {
                queue.enqueue(&record(&format!("item {i}"))).await.unwrap()
            }));
        }

        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 32);
        assert_eq!(queue.pending_count().await.unwrap(), 32);
    }

    #[tokio::test]
    async fn missing_directory_is_a_queue_error() {
        let queue = FeedbackQueue::new("/nonexistent/rotation/dir");
        assert!(matches!(
            queue.enqueue(&record("x")).await,
            Err(GripeError::Queue { .. })
        ));
        assert!(queue.peek_pending().await.is_err());
    }
}
