// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! The downloadable artifact: a fixed placeholder V2Ray client document.
//!
//! Every download emits the same bytes regardless of which record was
//! requested; the catalog shares metadata, not file contents.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Value, json};

/// The placeholder client configuration, two sections: one SOCKS inbound
/// and one vmess outbound.
pub fn placeholder_document() -> Value {
    json!({
        "inbounds": [{
            "port": 1080,
            "protocol": "socks",
            "settings": {
                "auth": "noauth"
            }
        }],
        "outbounds": [{
            "protocol": "vmess",
            "settings": {
                "vnext": [{
                    "address": "example.com",
                    "port": 443,
                    "users": [{
                        "id": "12345678-1234-1234-1234-123456789abc",
                        "security": "auto"
                    }]
                }]
            }
        }]
    })
}

/// Pretty-printed document exactly as written to disk.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn placeholder_json() -> Result<String> {
    serde_json::to_string_pretty(&placeholder_document())
        .context("Failed to serialize placeholder configuration")
}

/// Write the placeholder document to `output`, creating parent directories
/// when missing.
///
/// # Errors
///
/// Returns an error on serialization or filesystem failure.
pub fn write_placeholder(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let body = placeholder_json()?;
    fs::write(output, body).with_context(|| format!("Failed to write config: {:?}", output))
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps an existing matching extension (case-insensitive); otherwise
/// replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const EXPECTED: &str = r#"{
  "inbounds": [
    {
      "port": 1080,
      "protocol": "socks",
      "settings": {
        "auth": "noauth"
      }
    }
  ],
  "outbounds": [
    {
      "protocol": "vmess",
      "settings": {
        "vnext": [
          {
            "address": "example.com",
            "port": 443,
            "users": [
              {
                "id": "12345678-1234-1234-1234-123456789abc",
                "security": "auto"
              }
            ]
          }
        ]
      }
    }
  ]
}"#;

    #[test]
    fn placeholder_bytes_are_fixed() {
        assert_eq!(placeholder_json().unwrap(), EXPECTED);
    }

    #[test]
    fn written_file_matches_placeholder_exactly() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("downloaded.json");

        write_placeholder(&path).expect("placeholder written");

        assert_eq!(std::fs::read_to_string(&path).unwrap(), EXPECTED);
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/config.json");

        write_placeholder(&path).expect("placeholder written");

        assert!(path.exists());
    }

    #[test]
    fn ensure_extension_appends_or_replaces() {
        assert_eq!(
            ensure_extension(PathBuf::from("/tmp/file"), "json"),
            PathBuf::from("/tmp/file.json")
        );
        assert_eq!(
            ensure_extension(PathBuf::from("/tmp/file.JSON"), "json"),
            PathBuf::from("/tmp/file.JSON")
        );
        assert_eq!(
            ensure_extension(PathBuf::from("/tmp/file.txt"), "json"),
            PathBuf::from("/tmp/file.json")
        );
    }
}
