use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::engagement::EngagementRecord;

/// Append-only engagement log stored as a single JSON array on disk.
///
/// Every append is a read-modify-write of the whole file, serialised by a mutex so
/// concurrent requests never drop each other's records. A file whose contents are
/// empty or not a JSON array is reset before appending. A file that cannot be read
/// is left untouched and the append fails.
pub struct EngagementLog {
    path: PathBuf,
    write_lock: Mutex<()>,
    #[cfg(test)]
    read_fault: Option<ErrorKind>,
}

impl EngagementLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            #[cfg(test)]
            read_fault: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, record: &EngagementRecord) -> Result<()> {
        let entry = serde_json::to_value(record).context("Failed to serialise engagement record")?;

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }

        let mut entries = self.read_entries().await?;
        entries.push(entry);

        let bytes = serde_json::to_vec_pretty(&entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(
            "Engagement log {} now holds {} records",
            self.path.display(),
            entries.len()
        );
        Ok(())
    }

    /// Existing entries. A missing file yields an empty list, as does content that
    /// is not a JSON array. I/O errors propagate so the existing file is never replaced.
    async fn read_entries(&self) -> Result<Vec<Value>> {
        let bytes = match self.read_bytes().await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read engagement log {}", self.path.display())
                })
            }
        };

        match serde_json::from_slice::<Vec<Value>>(&bytes) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    "Engagement log {} is corrupt ({e}); starting a fresh log",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        #[cfg(test)]
        if let Some(kind) = self.read_fault {
            return Err(std::io::Error::from(kind));
        }
        fs::read(&self.path).await
    }
}
