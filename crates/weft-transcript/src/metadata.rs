//! Metadata value decoding.
//!
//! The session's key/value table stores values in whatever form the
//! producer chose that day: hex-encoded JSON, plain strings, sometimes raw
//! bytes. Each value goes through a short decoder chain — hex-decoded JSON
//! first, then the raw text — and the first success wins.

use std::collections::BTreeMap;

use serde_json::Value;
use weft_store::MetaEntry;

/// Decode a session's raw metadata entries into structured values.
///
/// Undecodable values fall back to their lossy text form; nothing here
/// fails. Later duplicate keys overwrite earlier ones.
pub fn decode_metadata(entries: &[MetaEntry]) -> BTreeMap<String, Value> {
    entries
        .iter()
        .map(|entry| (entry.key.clone(), decode_value(&entry.value)))
        .collect()
}

fn decode_value(raw: &[u8]) -> Value {
    let text = String::from_utf8_lossy(raw);
    if let Some(value) = decode_hex_json(&text) {
        return value;
    }
    Value::String(text.into_owned())
}

/// Hex-encoded JSON, the producer's usual envelope for structured values.
fn decode_hex_json(text: &str) -> Option<Value> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = hex::decode(text).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(key: &str, value: &[u8]) -> MetaEntry {
        MetaEntry {
            key: key.into(),
            value: value.to_vec(),
        }
    }

    #[test]
    fn hex_encoded_json_is_decoded() {
        let encoded = hex::encode(b"{\"name\":\"demo session\",\"mode\":\"chat\"}");
        let meta = decode_metadata(&[entry("agent", encoded.as_bytes())]);
        assert_eq!(meta["agent"], json!({"name": "demo session", "mode": "chat"}));
    }

    #[test]
    fn plain_string_passes_through() {
        let meta = decode_metadata(&[entry("name", b"my session")]);
        assert_eq!(meta["name"], json!("my session"));
    }

    #[test]
    fn hex_of_non_json_falls_back_to_raw_text() {
        // All hex digits, but the decoded bytes are not JSON.
        let meta = decode_metadata(&[entry("k", b"deadbeef")]);
        assert_eq!(meta["k"], json!("deadbeef"));
    }

    #[test]
    fn odd_length_hex_falls_back_to_raw_text() {
        let meta = decode_metadata(&[entry("k", b"abc")]);
        assert_eq!(meta["k"], json!("abc"));
    }

    #[test]
    fn non_utf8_bytes_are_lossy_not_fatal() {
        let meta = decode_metadata(&[entry("k", &[0xFF, 0xFE, b'x'])]);
        assert!(matches!(meta["k"], Value::String(_)));
    }

    #[test]
    fn hex_encoded_numbers_decode_as_json() {
        // "31323334" decodes to the bytes "1234", which is valid JSON.
        let meta = decode_metadata(&[entry("count", b"31323334")]);
        assert_eq!(meta["count"], json!(1234));
    }

    #[test]
    fn empty_table_decodes_to_empty_map() {
        assert!(decode_metadata(&[]).is_empty());
    }
}
