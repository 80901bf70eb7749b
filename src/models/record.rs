// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Configuration record domain model and id allocation (UI-agnostic).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier of a catalog record, unique for the registry's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared monotonic id source. Cloneable so several upload attempts can be
/// in flight at once without ever producing colliding ids.
#[derive(Clone, Debug)]
pub struct RecordIdGen {
    next: Arc<AtomicU64>,
}

impl Default for RecordIdGen {
    fn default() -> Self {
        Self {
            next: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl RecordIdGen {
    /// Generator whose first allocation is strictly greater than every id
    /// already present in `records`.
    pub fn starting_after(records: &[ConfigRecord]) -> Self {
        let max = records.iter().map(|r| r.id.0).max().unwrap_or(0);
        Self {
            next: Arc::new(AtomicU64::new(max + 1)),
        }
    }

    /// Hand out the next id. Never returns the same value twice.
    pub fn allocate(&self) -> RecordId {
        RecordId(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// One shareable configuration artifact and its catalog metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub id: RecordId,
    /// Display filename, never empty after a successful mutation.
    pub filename: String,
    /// Human-readable size, derived once at creation (e.g. "2.0 KB").
    pub size_label: String,
    /// Free-text description, 1-500 characters at creation time.
    pub description: String,
    /// Calendar date the record was created, ISO 8601 date form.
    pub upload_date: NaiveDate,
    /// Download counter, only ever incremented.
    pub downloads: u64,
}

impl ConfigRecord {
    /// Synthesize a record from a completed upload. The size label is fixed
    /// here and never recomputed; the date is captured as today's local date.
    pub fn from_upload(id: RecordId, candidate: &CandidateFile, description: String) -> Self {
        Self {
            id,
            filename: candidate.name.clone(),
            size_label: kib_label(candidate.bytes),
            description,
            upload_date: chrono::Local::now().date_naive(),
            downloads: 0,
        }
    }
}

/// A file the user has selected or dropped but not yet uploaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    /// Plain filename component used for display and the resulting record.
    pub name: String,
    /// Declared content type guessed from the path.
    pub mime: String,
    pub bytes: u64,
}

impl CandidateFile {
    /// Build a candidate from a filesystem path, reading its metadata.
    ///
    /// # Errors
    ///
    /// Returns an error when the file metadata cannot be read.
    pub fn inspect(path: &Path) -> Result<Self> {
        let meta = path
            .metadata()
            .with_context(|| format!("Failed to read file metadata: {:?}", path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config".to_string());
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            path: path.to_path_buf(),
            name,
            mime,
            bytes: meta.len(),
        })
    }
}

/// Kibibyte size label with one decimal place, matching the catalog cards.
pub fn kib_label(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
