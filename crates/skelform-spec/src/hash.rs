//! Canonical hashing for spec identity and build reproducibility.

use crate::error::SpecError;
use crate::spec::CharacterSpec;

/// Computes the canonical BLAKE3 hash of a character spec.
///
/// The spec is serialized to JSON, canonicalized (lexicographically sorted
/// object keys, no whitespace), and hashed. Two specs with equal content
/// always produce the same 64-character lowercase hex string.
pub fn canonical_spec_hash(spec: &CharacterSpec) -> Result<String, SpecError> {
    let value = spec.to_value()?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Canonicalizes a JSON value: sorted object keys, compact separators.
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => {
            serde_json::to_string(s).expect("string serialization cannot fail")
        }
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            let pairs: Vec<String> = keys
                .iter()
                .map(|k| {
                    let key = serde_json::to_string(k).expect("string serialization cannot fail");
                    format!("{}:{}", key, canonicalize_json(&obj[*k]))
                })
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

/// Incrementally hashes world-pose samples into a build pose digest.
///
/// Feed every bind joint in a stable order, then call [`PoseDigest::finish`].
/// Floats are hashed by their exact bit pattern, so the digest is equal
/// only for bitwise-identical poses.
pub struct PoseDigest {
    hasher: blake3::Hasher,
}

impl PoseDigest {
    /// Creates an empty digest.
    pub fn new() -> Self {
        Self {
            hasher: blake3::Hasher::new(),
        }
    }

    /// Adds one named pose sample (translation, rotation quaternion, scale).
    pub fn add_sample(&mut self, name: &str, translation: [f64; 3], rotation: [f64; 4], scale: [f64; 3]) {
        self.hasher.update(name.as_bytes());
        self.hasher.update(&[0u8]);
        for component in translation.iter().chain(rotation.iter()).chain(scale.iter()) {
            self.hasher.update(&component.to_bits().to_le_bytes());
        }
    }

    /// Finishes the digest and returns the hex string.
    pub fn finish(self) -> String {
        self.hasher.finalize().to_hex().to_string()
    }
}

impl Default for PoseDigest {
    fn default() -> Self {
        Self::new()
    }
}
