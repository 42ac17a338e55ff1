//! Spec file loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use skelform_spec::{canonical_spec_hash, CharacterSpec};

/// A loaded spec with its canonical hash.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed spec.
    pub spec: CharacterSpec,
    /// Canonical BLAKE3 hash of the spec content.
    pub spec_hash: String,
}

/// Loads a character spec from a JSON file.
pub fn load_spec(path: &Path) -> Result<LoadResult> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file: {}", path.display()))?;
    let spec = CharacterSpec::from_json(&text)
        .with_context(|| format!("failed to parse spec file: {}", path.display()))?;
    let spec_hash = canonical_spec_hash(&spec)
        .with_context(|| format!("failed to hash spec: {}", path.display()))?;
    Ok(LoadResult { spec, spec_hash })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_roundtrip() {
        let spec = CharacterSpec::builder("load-test-01").build();
        let json = spec.to_json_pretty().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_spec(file.path()).unwrap();
        assert_eq!(loaded.spec.character_id, "load-test-01");
        assert_eq!(loaded.spec_hash.len(), 64);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = load_spec(Path::new("/nonexistent/spec.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
