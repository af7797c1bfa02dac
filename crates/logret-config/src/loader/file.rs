//! File-based configuration loading

use crate::{error::ConfigError, loader::ConfigFormat, Config, Result, Validate};
use std::fs;
use std::path::Path;

/// Load configuration from a file
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = detect_format(path)?;

    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let path_str = path.display().to_string();

    let config: Config = match format {
        ConfigFormat::Yaml => {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                format: "YAML",
                path: path_str,
                message: e.to_string(),
            })?
        }
        ConfigFormat::Toml => toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            format: "TOML",
            path: path_str,
            message: e.to_string(),
        })?,
        ConfigFormat::Json => {
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                format: "JSON",
                path: path_str,
                message: e.to_string(),
            })?
        }
    };

    config.validate()?;
    Ok(config)
}

/// Detect configuration format from file extension
fn detect_format(path: &Path) -> Result<ConfigFormat> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yml") | Some("yaml") => Ok(ConfigFormat::Yaml),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some("json") => Ok(ConfigFormat::Json),
        _ => Err(ConfigError::UnknownFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_detect_yaml() {
        assert_eq!(
            detect_format(&PathBuf::from("config.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            detect_format(&PathBuf::from("config.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
    }

    #[test]
    fn test_detect_toml() {
        assert_eq!(
            detect_format(&PathBuf::from("config.toml")).unwrap(),
            ConfigFormat::Toml
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(detect_format(&PathBuf::from("config.ini")).is_err());
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logret.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "[search]\ndefault_limit = 7\n[embedding]\ndim = 16").unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.search.default_limit, 7);
        assert_eq!(config.embedding.dim, 16);
        // untouched sections keep defaults
        assert_eq!(config.chunking.max_chunk_chars, 2000);
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logret.yml");
        fs::write(&path, "embedding:\n  dim: 0\n").unwrap();
        assert!(load_from_file(&path).is_err());
    }
}
