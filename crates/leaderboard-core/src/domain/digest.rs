//! Canonical JSON and digest computation for loaded snapshots.
//!
//! Two runs over the same result set must report the same digest, so object
//! keys are sorted explicitly and integer-valued floats are collapsed to
//! integers before hashing.

use sha2::{Digest, Sha256};

use crate::domain::error::{LeaderboardError, Result};

fn sort_keys(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));

            let mut sorted = serde_json::Map::new();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.to_string(), sort_keys(v));
                }
            }
            serde_json::Value::Object(sorted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(sort_keys).collect())
        }
        other => other.clone(),
    }
}

fn normalize_numbers(value: &serde_json::Value) -> Result<serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => {
            let mut normalized = serde_json::Map::new();
            for (k, v) in map {
                normalized.insert(k.clone(), normalize_numbers(v)?);
            }
            Ok(serde_json::Value::Object(normalized))
        }
        serde_json::Value::Array(arr) => Ok(serde_json::Value::Array(
            arr.iter().map(normalize_numbers).collect::<Result<Vec<_>>>()?,
        )),
        serde_json::Value::Number(n) if !(n.is_i64() || n.is_u64()) => match n.as_f64() {
            Some(f) if !f.is_finite() => Err(LeaderboardError::NonFiniteNumber),
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                Ok(serde_json::Value::Number(serde_json::Number::from(f as i64)))
            }
            _ => Ok(value.clone()),
        },
        other => Ok(other.clone()),
    }
}

/// Convert JSON value to canonical form: normalize numbers, sort keys, compact JSON.
pub fn canonical_json(value: &serde_json::Value) -> Result<String> {
    let normalized = normalize_numbers(value)?;
    Ok(serde_json::to_string(&sort_keys(&normalized))?)
}

/// SHA-256 hex digest of the canonical JSON of any serializable value.
pub fn compute_digest<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_value(value)?;
    let canonical = canonical_json(&json)?;
    Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_order_does_not_change_digest() {
        let a = json!({"agent": "A1", "score": 0.5});
        let b = json!({"score": 0.5, "agent": "A1"});
        assert_eq!(
            compute_digest(&a).expect("digest a"),
            compute_digest(&b).expect("digest b")
        );
    }

    #[test]
    fn integer_valued_floats_collapse() {
        let canonical = canonical_json(&json!({"time": 12.0})).expect("canonical");
        assert_eq!(canonical, r#"{"time":12}"#);
    }

    #[test]
    fn digest_is_hex_sha256() {
        let digest = compute_digest(&json!([])).expect("digest");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
