//! Project configuration.
//!
//! Values resolve as: command-line flag (or its environment variable, which
//! clap folds into the flag) > `devcms.toml` > built-in default. Relative
//! paths are taken from the project directory.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use devcms_core::DevcmsError;
use devcms_db::{DbConfig, DEFAULT_DATABASE_URL, DEFAULT_SCHEMA};

pub const CONFIG_FILE: &str = "devcms.toml";
pub const DEFAULT_SITE_ID: &str = "default-site";
pub const DEFAULT_OUTPUT: &str = "./src/app/generated";
pub const DEFAULT_TEMPLATES: &str = "./templates";
pub const DEFAULT_ROUTES: &str = "./src/app/app.routes.ts";

/// Contents of `devcms.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub database: DatabaseSection,
    pub site: SiteSection,
    pub paths: PathsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub schema: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsSection {
    pub output: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub routes: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(source: &str) -> Result<Self, DevcmsError> {
        toml::from_str(source).map_err(|e| DevcmsError::config(format!("invalid {}: {}", CONFIG_FILE, e)))
    }

    /// Load a config file. A missing file is only an error when `required`.
    pub fn load(path: &Path, required: bool) -> Result<Self, DevcmsError> {
        match std::fs::read_to_string(path) {
            Ok(source) => Self::parse(&source),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(e) => Err(DevcmsError::config(format!("cannot read {}: {}", path.display(), e))),
        }
    }
}

/// Resolved settings for one invocation.
#[derive(Debug)]
pub struct Settings {
    pub project_dir: PathBuf,
    pub database: DbConfig,
    file: FileConfig,
}

impl Settings {
    /// Resolve global settings.
    ///
    /// `config_path` overrides the default `<project>/devcms.toml` and must
    /// exist when given.
    pub fn resolve(
        project_dir: PathBuf,
        config_path: Option<&Path>,
        database_url: Option<String>,
        schema: Option<String>,
    ) -> Result<Self> {
        let file = match config_path {
            Some(path) => FileConfig::load(&project_dir.join(path), true)?,
            None => FileConfig::load(&project_dir.join(CONFIG_FILE), false)?,
        };

        let database = DbConfig {
            url: database_url
                .or_else(|| file.database.url.clone())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            schema: schema
                .or_else(|| file.database.schema.clone())
                .unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
        };

        Ok(Self {
            project_dir,
            database,
            file,
        })
    }

    pub fn site_id(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.file.site.id.clone())
            .unwrap_or_else(|| DEFAULT_SITE_ID.to_string())
    }

    pub fn output_path(&self, flag: Option<PathBuf>) -> PathBuf {
        self.path(flag, self.file.paths.output.as_ref(), DEFAULT_OUTPUT)
    }

    pub fn templates_path(&self, flag: Option<PathBuf>) -> PathBuf {
        self.path(flag, self.file.paths.templates.as_ref(), DEFAULT_TEMPLATES)
    }

    pub fn routes_path(&self, flag: Option<PathBuf>) -> PathBuf {
        self.path(flag, self.file.paths.routes.as_ref(), DEFAULT_ROUTES)
    }

    fn path(&self, flag: Option<PathBuf>, configured: Option<&PathBuf>, default: &str) -> PathBuf {
        let chosen = flag
            .or_else(|| configured.cloned())
            .unwrap_or_else(|| PathBuf::from(default));
        self.project_dir.join(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempdir().unwrap();
        let settings = Settings::resolve(dir.path().to_path_buf(), None, None, None).unwrap();

        assert_eq!(settings.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.database.schema, "public");
        assert_eq!(settings.site_id(None), "default-site");
        assert_eq!(settings.output_path(None), dir.path().join("./src/app/generated"));
        assert_eq!(settings.templates_path(None), dir.path().join("./templates"));
        assert_eq!(settings.routes_path(None), dir.path().join("./src/app/app.routes.ts"));
    }

    #[test]
    fn test_config_file_values_apply() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[database]
url = "postgresql://file/db"
schema = "cms"

[site]
id = "blog"

[paths]
output = "gen"
templates = "/abs/templates"
"#,
        )
        .unwrap();

        let settings = Settings::resolve(dir.path().to_path_buf(), None, None, None).unwrap();
        assert_eq!(settings.database.url, "postgresql://file/db");
        assert_eq!(settings.database.schema, "cms");
        assert_eq!(settings.site_id(None), "blog");
        assert_eq!(settings.output_path(None), dir.path().join("gen"));
        assert_eq!(settings.templates_path(None), PathBuf::from("/abs/templates"));
        assert_eq!(settings.routes_path(None), dir.path().join(DEFAULT_ROUTES));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[database]\nurl = \"postgresql://file/db\"\n[site]\nid = \"blog\"\n",
        )
        .unwrap();

        let settings = Settings::resolve(
            dir.path().to_path_buf(),
            None,
            Some("postgresql://flag/db".to_string()),
            Some("other".to_string()),
        )
        .unwrap();

        assert_eq!(settings.database.url, "postgresql://flag/db");
        assert_eq!(settings.database.schema, "other");
        assert_eq!(settings.site_id(Some("shop".to_string())), "shop");
        assert_eq!(settings.output_path(Some(PathBuf::from("out"))), dir.path().join("out"));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempdir().unwrap();
        let err = Settings::resolve(dir.path().to_path_buf(), Some(Path::new("missing.toml")), None, None)
            .unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(FileConfig::parse("[database]\nurl = 5\n").is_err());
        assert!(FileConfig::parse("[unknown]\nkey = 1\n").is_err());
        assert!(FileConfig::parse("").is_ok());
    }
}
