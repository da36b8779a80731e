//! Lightweight message previews for session listings.
//!
//! The listing surface wants one line of text per session without paying
//! for a full reconstruction. The most recently stored message payload is
//! pushed through an ordered chain of fallible decoders, stopping at the
//! first that yields text.

use serde_json::Value;

/// Character budget for a preview before the ellipsis marker.
pub const PREVIEW_MAX_CHARS: usize = 100;

/// Derive a one-line preview from a raw message payload.
///
/// Decoder chain, in order:
/// 1. direct JSON decode, extracting the record's `content` text;
/// 2. strip non-printable bytes, decode the first `{...}` span, extract
///    `content`;
/// 3. the cleaned raw text itself.
///
/// Returns `None` only when nothing printable survives. The result is
/// truncated to [`PREVIEW_MAX_CHARS`] characters with a `...` marker.
pub fn preview(data: &[u8]) -> Option<String> {
    let raw = String::from_utf8_lossy(data);

    let decoders: [fn(&str) -> Option<String>; 3] =
        [decode_direct, decode_embedded, decode_cleaned];
    for decode in decoders {
        if let Some(text) = decode(&raw) {
            if !text.is_empty() {
                return Some(truncate(&text));
            }
        }
    }
    None
}

/// Direct JSON decode of the whole payload.
fn decode_direct(raw: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw).ok()?;
    content_text(&value)
}

/// Binary-wrapped JSON: strip non-printables, decode the first top-level
/// `{...}` span.
fn decode_embedded(raw: &str) -> Option<String> {
    let cleaned = strip_non_printable(raw);
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }
    let value: Value = serde_json::from_str(&cleaned[start..=end]).ok()?;
    content_text(&value)
}

/// Last resort: the cleaned text itself.
fn decode_cleaned(raw: &str) -> Option<String> {
    let cleaned = strip_non_printable(raw);
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extract the displayable text of a record's `content` field: either a
/// plain string or the first `text` part of a typed part list.
pub fn content_text(value: &Value) -> Option<String> {
    match value.get("content")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => parts.iter().find_map(|part| {
            if part.get("type").and_then(Value::as_str) == Some("text") {
                part.get("text")
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
            } else {
                None
            }
        }),
        _ => None,
    }
}

/// Keep tab, newline, carriage return, and printable ASCII.
fn strip_non_printable(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c == '\t' || c == '\n' || c == '\r' || (' '..='~').contains(&c))
        .collect()
}

fn truncate(text: &str) -> String {
    if text.chars().count() > PREVIEW_MAX_CHARS {
        let head: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_content() {
        let p = preview(b"{\"role\":\"user\",\"content\":\"hello there\"}").unwrap();
        assert_eq!(p, "hello there");
    }

    #[test]
    fn part_list_content_picks_first_text() {
        let payload =
            b"{\"content\":[{\"type\":\"image\"},{\"type\":\"text\",\"text\":\"caption\"}]}";
        assert_eq!(preview(payload).unwrap(), "caption");
    }

    #[test]
    fn binary_wrapped_json_is_recovered() {
        let mut payload = vec![0x00, 0x01, 0xFF];
        payload.extend_from_slice(b"{\"content\":\"wrapped\"}");
        payload.extend([0x00, 0x02]);
        assert_eq!(preview(&payload).unwrap(), "wrapped");
    }

    #[test]
    fn contentless_json_falls_back_to_cleaned_text() {
        let p = preview(b"{\"role\":\"user\"}").unwrap();
        assert_eq!(p, "{\"role\":\"user\"}");
    }

    #[test]
    fn plain_text_survives_cleaning() {
        let mut payload = vec![0x07];
        payload.extend_from_slice(b"just some words");
        assert_eq!(preview(&payload).unwrap(), "just some words");
    }

    #[test]
    fn unprintable_only_payload_has_no_preview() {
        assert!(preview(&[0x00, 0x01, 0x02, 0x07]).is_none());
        assert!(preview(b"").is_none());
    }

    #[test]
    fn long_content_is_truncated_with_marker() {
        let long = "x".repeat(150);
        let payload = format!("{{\"content\":\"{long}\"}}");
        let p = preview(payload.as_bytes()).unwrap();
        assert_eq!(p.chars().count(), PREVIEW_MAX_CHARS + 3);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn exact_budget_is_not_truncated() {
        let text = "y".repeat(PREVIEW_MAX_CHARS);
        let payload = format!("{{\"content\":\"{text}\"}}");
        assert_eq!(preview(payload.as_bytes()).unwrap(), text);
    }
}
