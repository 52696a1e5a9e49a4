use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;
use crate::model::candidate::{CandidateSource, CandidatesFile};

/// Error type for config and candidate file I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not parse candidates file {path}: {source}")]
    CandidatesError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Default config location: `~/.config/jot/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("jot").join("config.toml"))
}

/// Load the config.
///
/// An explicit path must exist. Without one, the default location is tried and
/// a missing file means defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => {
                tracing::debug!("no config file, using defaults");
                Ok(Config::default())
            }
        },
    }
}

/// Read and parse a config file
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load candidates from a local JSON file instead of the server
pub fn read_candidates_file(path: &Path) -> Result<CandidateSource, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file: CandidatesFile =
        serde_json::from_str(&text).map_err(|e| ConfigError::CandidatesError {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(file.into_source())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r##"[server]
base_url = "https://example.org/u"
timeout_secs = 3
session_cookie = "sessionid=abc"

[ui]
max_visible = 5

[ui.colors]
background = "#000000"
"##
    }

    #[test]
    fn read_config_parses_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, sample_config()).unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.server.base_url.as_deref(), Some("https://example.org/u"));
        assert_eq!(config.server.timeout_secs, 3);
        assert_eq!(config.server.session_cookie.as_deref(), Some("sessionid=abc"));
        assert_eq!(config.server.people_path, "/get_followed_usernames/");
        assert_eq!(config.ui.max_visible, 5);
        assert_eq!(config.ui.colors.get("background").map(String::as_str), Some("#000000"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().starts_with("could not parse"));
    }

    #[test]
    fn candidates_file_loads() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("candidates.json");
        fs::write(
            &path,
            r#"{"usernames_with_display_names": [{"username": "alice", "display_name": "Alice"}], "tags": ["food"]}"#,
        )
        .unwrap();
        let source = read_candidates_file(&path).unwrap();
        assert_eq!(source.people, vec![Person::with_display_name("alice", "Alice")]);
        assert_eq!(source.tags, vec!["food"]);
    }

    #[test]
    fn candidates_file_bad_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("candidates.json");
        fs::write(&path, "not json").unwrap();
        let err = read_candidates_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::CandidatesError { .. }));
    }
}
