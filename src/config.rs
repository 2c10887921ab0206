//! Configuration loading.
//!
//! ```toml
//! [database]
//! url = "sqlite::memory:"
//! dialect = "sqlite"
//!
//! [[tables]]
//! name = "post"
//! columns = ["id", "title", { name = "user", column = "user_id" }]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::schema::{SchemaConfig, SchemaRegistry};
use crate::transpiler::Dialect;

/// The `[database]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default)]
    pub dialect: Dialect,
}

/// Contents of `relsql.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(flatten)]
    pub schema: SchemaConfig,
}

impl Config {
    pub const FILE_NAME: &'static str = "relsql.toml";

    pub fn parse(content: &str) -> QueryResult<Self> {
        toml::from_str(content).map_err(|e| QueryError::Config(e.to_string()))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content).map_err(|e| {
            QueryError::Config(format!("Failed to load {}: {}", path.display(), e))
        })?;
        tracing::info!(
            "Loaded config from {} ({} tables, {} links)",
            path.display(),
            config.schema.tables.len(),
            config.schema.links.len()
        );
        Ok(config)
    }

    /// Candidate locations, in lookup order: the working directory, then the
    /// user config directory.
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(Self::FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("relsql").join(Self::FILE_NAME));
        }
        paths
    }

    /// Load the explicit path if given (it must exist), else the first
    /// default location that exists, else an empty default config.
    pub fn discover(explicit: Option<&Path>) -> QueryResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::default_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from_file(path),
            None => {
                tracing::debug!("No {} found, using defaults", Self::FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    pub fn registry(&self) -> SchemaRegistry {
        SchemaRegistry::from_config(self.schema.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
[database]
url = "sqlite::memory:"
dialect = "sqlite"

[[tables]]
name = "user"
columns = ["id", "username"]

[[links]]
table = "user_groups"
source = "user_id"
target = "group_id"
"#,
        )
        .unwrap();

        assert_eq!(config.database.url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.database.dialect, Dialect::SQLite);
        assert_eq!(config.schema.tables[0].name, "user");
        assert_eq!(config.schema.links[0].target.column, "group_id");
        assert_eq!(config.registry().len(), 2);
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.database.dialect, Dialect::Postgres);
        assert!(config.registry().is_empty());
    }

    #[test]
    fn test_bad_dialect() {
        let err = Config::parse("[database]\ndialect = \"oracle\"\n").unwrap_err();
        assert!(matches!(err, QueryError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = Config::discover(Some(Path::new("/nonexistent/relsql.toml"))).unwrap_err();
        assert!(matches!(err, QueryError::Io(_)));
    }

    #[test]
    fn test_default_paths_start_with_cwd() {
        assert_eq!(Config::default_paths()[0], PathBuf::from("relsql.toml"));
    }
}
