// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! The authoritative ordered collection of configuration records.
//!
//! Every mutation is a single atomic step and hands back the resulting
//! snapshot; callers never mutate a snapshot they already observed. New
//! records go to the head (most-recent-first), updates and counter bumps
//! keep their position, removal closes the gap.

use thiserror::Error;

use crate::models::record::{ConfigRecord, RecordId};

/// Registry-level failures. All of them leave the registry untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Insert with an id that is already present. Should be unreachable
    /// given the id generator guarantee; seeing it means the invariant
    /// was breached upstream.
    #[error("configuration id {0} already exists")]
    DuplicateId(RecordId),

    /// Operation against an id that is not (or no longer) in the registry.
    #[error("configuration {0} not found")]
    NotFound(RecordId),
}

/// In-memory, process-lifetime store of [`ConfigRecord`]s.
#[derive(Clone, Debug, Default)]
pub struct ConfigRegistry {
    records: Vec<ConfigRecord>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing ordered record set (site seed data).
    pub fn seeded(records: Vec<ConfigRecord>) -> Self {
        Self { records }
    }

    /// Current ordered snapshot, read-only.
    pub fn all(&self) -> &[ConfigRecord] {
        &self.records
    }

    pub fn find(&self, id: RecordId) -> Option<&ConfigRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Prepend a freshly created record.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateId`] when the id is already present; the
    /// insert is aborted.
    pub fn insert(&mut self, record: ConfigRecord) -> Result<&[ConfigRecord], RegistryError> {
        if self.find(record.id).is_some() {
            return Err(RegistryError::DuplicateId(record.id));
        }
        self.records.insert(0, record);
        Ok(&self.records)
    }

    /// Merge new `filename`/`description` into the record at `id`. The id,
    /// size label, upload date, and download counter are never touched.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] when the id is absent.
    pub fn update(
        &mut self,
        id: RecordId,
        filename: &str,
        description: &str,
    ) -> Result<&[ConfigRecord], RegistryError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RegistryError::NotFound(id))?;
        record.filename = filename.to_string();
        record.description = description.to_string();
        Ok(&self.records)
    }

    /// Bump the download counter by exactly one.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] when the id is absent; the counter is
    /// not incremented.
    pub fn increment_downloads(&mut self, id: RecordId) -> Result<&[ConfigRecord], RegistryError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RegistryError::NotFound(id))?;
        record.downloads += 1;
        Ok(&self.records)
    }

    /// Delete the record. Immediate and irreversible; no soft-delete.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] when the id is absent.
    pub fn remove(&mut self, id: RecordId) -> Result<&[ConfigRecord], RegistryError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(RegistryError::NotFound(id))?;
        self.records.remove(index);
        Ok(&self.records)
    }
}
