//! Hashing System - SHA-256 Fingerprints
//!
//! Deterministic fingerprints of layout documents and compiled markup,
//! used as cache keys and recorded in manifests.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            let sorted_map: serde_json::Map<String, Value> = sorted
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_value(v)))
                .collect();
            Value::Object(sorted_map)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Fingerprint of a layout document; key order in the source is irrelevant.
pub fn layout_fingerprint(layout: &Value) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(layout)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

pub fn markup_fingerprint(markup: &str) -> String {
    sha256_hex(markup.as_bytes())
}

/// Cache key for one compile run
/// key = sha256(dialect + canonical_layout + engine_version)
pub fn compile_cache_key(
    dialect: &str,
    layout: &impl Serialize,
    engine_version: &str,
) -> Result<String, serde_json::Error> {
    let canonical_layout = canonical_json(layout)?;
    let combined = format!("{}:{}:{}", dialect, canonical_layout, engine_version);
    Ok(sha256_hex(combined.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorted() {
        let obj = json!({"z": 1, "a": 2, "m": {"y": true, "b": null}});
        let canonical = canonical_json(&obj).unwrap();
        assert_eq!(canonical, r#"{"a":2,"m":{"b":null,"y":true},"z":1}"#);
    }

    #[test]
    fn test_hash_deterministic() {
        let h1 = sha256_hex(b"test data");
        let h2 = sha256_hex(b"test data");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn test_layout_fingerprint_ignores_key_order() {
        let a = json!({"page_title": "Home", "sections": [{"type": "hero", "align": "left"}]});
        let b = json!({"sections": [{"align": "left", "type": "hero"}], "page_title": "Home"});
        assert_eq!(layout_fingerprint(&a).unwrap(), layout_fingerprint(&b).unwrap());
    }

    #[test]
    fn test_cache_key_depends_on_dialect() {
        let layout = json!({"sections": []});
        let portable = compile_cache_key("portable", &layout, "1.0.0").unwrap();
        let native = compile_cache_key("native", &layout, "1.0.0").unwrap();
        assert_ne!(portable, native);
    }
}
