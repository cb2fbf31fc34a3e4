use std::fs;
use std::path::Path;

use anyhow::Context;
use notever_diff::EngineConfig;

/// Load the engine configuration, or the defaults when no file is given.
pub fn load_engine_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_file_gives_defaults() {
        assert_eq!(load_engine_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "diff_threshold = 100\nverify_deletes = true").unwrap();
        let config = load_engine_config(Some(file.path())).unwrap();
        assert_eq!(config.diff_threshold, 100);
        assert!(config.verify_deletes);
        assert_eq!(config.max_edit_distance, None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "diff_threshold = \"lots\"").unwrap();
        let err = load_engine_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_engine_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
