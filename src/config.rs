//! Layered TOML configuration.
//!
//! Files are optional; missing ones fall through to defaults:
//! - ~/.roster/config.toml (user-level)
//! - .roster/config.toml (project-level, overrides user-level)
//!
//! CLI flags and environment variables override both, applied in main.

use crate::fetch;
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DEPARTMENT: &str = "Engineering";

/// Raw shape of a config file; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    default_department: Option<String>,
    #[serde(default)]
    transcripts_dir: Option<PathBuf>,
}

/// Resolved configuration, after layering and defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint the startup fetch reads from.
    pub source_url: String,
    /// Department assigned to fetched records and pre-filled in the form.
    pub default_department: String,
    /// Where session transcripts land; None means .roster/sessions.
    pub transcripts_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: fetch::DEFAULT_URL.to_string(),
            default_department: DEFAULT_DEPARTMENT.to_string(),
            transcripts_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from the default paths.
    /// Priority: project (.roster/config.toml) > user (~/.roster/config.toml) > defaults.
    pub fn load() -> Result<Self> {
        let user = dirs::home_dir().map(|home| home.join(".roster").join("config.toml"));
        let project = Path::new(".roster").join("config.toml");
        Self::load_layered(user.as_deref(), Some(&project))
    }

    /// Layer optional user-level and project-level files over defaults;
    /// the project file wins. A missing file is skipped, a malformed one
    /// is an error.
    pub fn load_layered(user: Option<&Path>, project: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        for path in [user, project].into_iter().flatten() {
            if path.exists() {
                config.merge(read_file(path)?);
            }
        }
        Ok(config)
    }

    /// Load configuration from a specific path, over defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(read_file(path)?);
        Ok(config)
    }

    fn merge(&mut self, file: ConfigFile) {
        if let Some(url) = file.source_url {
            self.source_url = url;
        }
        if let Some(dept) = file.default_department {
            self.default_department = dept;
        }
        if let Some(dir) = file.transcripts_dir {
            self.transcripts_dir = Some(dir);
        }
    }
}

fn read_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&content)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source_url, fetch::DEFAULT_URL);
        assert_eq!(config.default_department, "Engineering");
        assert!(config.transcripts_dir.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "source_url = \"http://localhost:9000/users\"").unwrap();
        writeln!(f, "default_department = \"Support\"").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.source_url, "http://localhost:9000/users");
        assert_eq!(config.default_department, "Support");
        // Unset keys keep their defaults
        assert!(config.transcripts_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "transcripts_dir = \"/tmp/sessions\"").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.source_url, fetch::DEFAULT_URL);
        assert_eq!(
            config.transcripts_dir.as_deref(),
            Some(Path::new("/tmp/sessions"))
        );
    }

    #[test]
    fn test_project_layer_wins_over_user() {
        let dir = tempfile::tempdir().unwrap();
        let user_path = dir.path().join("user.toml");
        let project_path = dir.path().join("project.toml");
        std::fs::write(
            &user_path,
            "default_department = \"Support\"\nsource_url = \"http://localhost:9000/users\"",
        )
        .unwrap();
        std::fs::write(&project_path, "default_department = \"Ops\"").unwrap();

        let config = Config::load_layered(Some(&user_path), Some(&project_path)).unwrap();
        assert_eq!(config.default_department, "Ops");
        // Keys the project file leaves unset still come from the user layer
        assert_eq!(config.source_url, "http://localhost:9000/users");
    }

    #[test]
    fn test_layered_load_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("project.toml");
        std::fs::write(&project_path, "default_department = \"Ops\"").unwrap();

        let config = Config::load_layered(
            Some(&dir.path().join("absent.toml")),
            Some(&project_path),
        )
        .unwrap();
        assert_eq!(config.default_department, "Ops");
        assert_eq!(config.source_url, fetch::DEFAULT_URL);
    }

    #[test]
    fn test_layered_load_fails_on_malformed_layer() {
        let dir = tempfile::tempdir().unwrap();
        let user_path = dir.path().join("user.toml");
        let project_path = dir.path().join("project.toml");
        std::fs::write(&user_path, "default_department = \"Support\"").unwrap();
        std::fs::write(&project_path, "source_url = [not toml").unwrap();

        assert!(Config::load_layered(Some(&user_path), Some(&project_path)).is_err());
    }

    #[test]
    fn test_load_from_missing_file_is_error() {
        assert!(Config::load_from(Path::new("/nonexistent/config.toml")).is_err());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "source_url = [not toml").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
