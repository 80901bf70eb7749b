// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Site-level configuration: branding, external links, and seed records.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::record::{ConfigRecord, RecordId};

/// Filename looked up in the working directory at startup.
pub const SITE_CONFIG_FILE: &str = "confshare.json";

/// Operator-editable site configuration. Missing fields fall back to the
/// built-in defaults so a partial file is fine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    pub site_description: String,
    pub telegram_channel: String,
    pub telegram_contact: String,
    /// Records the catalog starts with before any upload.
    pub default_configs: Vec<ConfigRecord>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "ConfShare".to_string(),
            site_description: "Access premium V2Ray configurations for free. \
                               Curated high-performance servers, updated by the community."
                .to_string(),
            telegram_channel: "https://t.me/confshare_channel".to_string(),
            telegram_contact: "https://t.me/confshare_support".to_string(),
            default_configs: default_records(),
        }
    }
}

impl SiteConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read site config: {:?}", path))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse site config: {:?}", path))
    }
}

/// Built-in catalog seed, mirroring the records the site ships with.
fn default_records() -> Vec<ConfigRecord> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        ConfigRecord {
            id: RecordId(1),
            filename: "us-east-premium.json".to_string(),
            size_label: "2.3 KB".to_string(),
            description: "US East coast server, low latency, optimized for streaming."
                .to_string(),
            upload_date: date(2024, 11, 18),
            downloads: 1247,
        },
        ConfigRecord {
            id: RecordId(2),
            filename: "eu-frankfurt-fast.json".to_string(),
            size_label: "1.8 KB".to_string(),
            description: "Frankfurt node with high throughput and WebSocket transport."
                .to_string(),
            upload_date: date(2024, 12, 2),
            downloads: 892,
        },
        ConfigRecord {
            id: RecordId(3),
            filename: "sg-gaming-lowping.json".to_string(),
            size_label: "2.1 KB".to_string(),
            description: "Singapore server tuned for gaming, sub-50ms ping across SEA."
                .to_string(),
            upload_date: date(2024, 12, 20),
            downloads: 634,
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();

        let site = SiteConfig::load(&tmp.path().join("confshare.json")).unwrap();

        assert_eq!(site.site_name, "ConfShare");
        assert_eq!(site.default_configs.len(), 3);
    }

    #[test]
    fn partial_file_keeps_default_records() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("confshare.json");
        fs::write(&path, r#"{"site_name": "MyMirror"}"#).unwrap();

        let site = SiteConfig::load(&path).unwrap();

        assert_eq!(site.site_name, "MyMirror");
        assert!(!site.default_configs.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("confshare.json");
        fs::write(&path, "not json").unwrap();

        assert!(SiteConfig::load(&path).is_err());
    }

    #[test]
    fn seed_ids_are_unique() {
        let records = default_records();
        let mut ids: Vec<_> = records.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), records.len());
    }
}
