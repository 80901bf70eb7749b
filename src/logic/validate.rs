// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Pure acceptance checks applied before a file enters the upload pipeline.

use crate::models::record::CandidateFile;

/// Hard cap applied to descriptions at every entry point.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// True when the candidate declares a JSON content type or carries a
/// `.json` name. Name/type check only; the content is never parsed here.
pub fn is_acceptable_file(candidate: &CandidateFile) -> bool {
    candidate.mime == "application/json"
        || candidate
            .name
            .to_ascii_lowercase()
            .ends_with(".json")
}

/// True when the text is non-empty after trimming surrounding whitespace.
/// Over-long input is unobservable here because entry points clamp first.
pub fn is_acceptable_description(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Truncate to [`MAX_DESCRIPTION_CHARS`] characters, leaving shorter input
/// untouched.
pub fn clamp_description(text: &str) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        text.to_string()
    } else {
        text.chars().take(MAX_DESCRIPTION_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn candidate(name: &str, mime: &str) -> CandidateFile {
        CandidateFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            mime: mime.to_string(),
            bytes: 1024,
        }
    }

    #[test]
    fn accepts_json_mime_or_json_extension() {
        assert!(is_acceptable_file(&candidate(
            "server.json",
            "application/json"
        )));
        // Extension alone is enough even with an unknown content type.
        assert!(is_acceptable_file(&candidate(
            "server.JSON",
            "application/octet-stream"
        )));
        // Content type alone is enough even with an odd name.
        assert!(is_acceptable_file(&candidate(
            "exported-config",
            "application/json"
        )));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_acceptable_file(&candidate("notes.txt", "text/plain")));
        assert!(!is_acceptable_file(&candidate(
            "config.yaml",
            "application/octet-stream"
        )));
    }

    #[test]
    fn description_must_have_substance() {
        assert!(is_acceptable_description("fast server"));
        assert!(is_acceptable_description("  padded  "));
        assert!(!is_acceptable_description(""));
        assert!(!is_acceptable_description("   \t\n"));
    }

    #[test]
    fn clamp_keeps_exactly_500_and_cuts_501() {
        let exact = "a".repeat(500);
        assert_eq!(clamp_description(&exact), exact);

        let over = "b".repeat(501);
        let clamped = clamp_description(&over);
        assert_eq!(clamped.chars().count(), 500);
    }

    #[test]
    fn clamp_counts_characters_not_bytes() {
        let over: String = "ü".repeat(501);
        let clamped = clamp_description(&over);
        assert_eq!(clamped.chars().count(), 500);
    }
}
