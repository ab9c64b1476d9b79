use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{EnricherError, Result};

const FENCE: &str = "```";

/// Removes a Markdown code fence wrapped around a model response.
///
/// The opening fence must start the (trimmed) text; everything up to the end
/// of its line is dropped, which also removes an info string like `json`. A
/// closing fence is removed only when it ends the text. Unfenced input is
/// returned trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(after_open) = text.strip_prefix(FENCE) else {
        return text;
    };

    let body = match after_open.find('\n') {
        Some(pos) => &after_open[pos + 1..],
        None => after_open.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };

    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Shortens text for error messages without splitting a character.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut short: String = trimmed.chars().take(max_chars).collect();
    short.push_str(" ...");
    short
}

/// `2024-01-01T12:00:00.123456Z`
pub fn utc_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

pub fn load_report(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| EnricherError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| EnricherError::InvalidReport {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `value` as two-space indented JSON with non-ASCII kept literal.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_strip_fences_with_language_tag() {
        let raw = "```json\n[{\"id\": 1}]\n```";
        assert_eq!(strip_code_fences(raw), "[{\"id\": 1}]");
    }

    #[test]
    fn test_strip_fences_without_tag_and_surrounding_whitespace() {
        let raw = "  \n```\n[1, 2]\n```\n  ";
        assert_eq!(strip_code_fences(raw), "[1, 2]");
    }

    #[test]
    fn test_unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fences("  [1]\n"), "[1]");
    }

    #[test]
    fn test_missing_closing_fence_keeps_body() {
        assert_eq!(strip_code_fences("```json\n[1]"), "[1]");
    }

    #[test]
    fn test_single_line_fence() {
        assert_eq!(strip_code_fences("```json[1]```"), "[1]");
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("Привет мир", 6), "Привет ...");
        assert_eq!(excerpt("short", 10), "short");
    }

    #[test]
    fn test_timestamp_format() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap();
        assert_eq!(utc_timestamp(now), "2024-01-01T08:30:00.000000Z");
    }

    #[test]
    fn test_write_json_keeps_cyrillic_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        let value = json!({"z": "Рост", "a": 1});

        write_json(&path, &value).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.contains("\"Рост\""));
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
        assert_eq!(load_report(&path).unwrap(), value);
    }

    #[test]
    fn test_load_report_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_report(&missing),
            Err(EnricherError::ReadInput { .. })
        ));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{not json").unwrap();
        assert!(matches!(
            load_report(&bad),
            Err(EnricherError::InvalidReport { .. })
        ));
    }
}
