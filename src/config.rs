//! # Build Configuration
//!
//! Where the generator reads schemas from and where it writes the OpenAPI
//! document to.
//!
//! ## Sources
//!
//! Later sources win:
//! 1. Built-in defaults (the core MODX schema set and `spec/openapi.json`)
//! 2. `xpdo-openapi.toml` in the working directory, or the file given with `--config`
//! 3. `XPDO_OAS_SPEC` for the target document
//! 4. Command line flags
//!
//! ## Example
//!
//! ```toml
//! spec = "spec/openapi.json"
//! schemas = [
//!     "core/model/schema/modx.mysql.schema.xml",
//!     "core/model/schema/modx.registry.db.mysql.schema.xml",
//! ]
//! ignore = ["modElement", "modScript", "modSession"]
//!
//! [package]
//! default = "modx"
//! prefix = "modx."
//! ```

use crate::error::BuildError;
use crate::generator::DEFAULT_IGNORED;
use crate::schema::PackageRules;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "xpdo-openapi.toml";

/// Environment variable overriding [`BuildConfig::spec`]
pub const SPEC_ENV: &str = "XPDO_OAS_SPEC";

const DEFAULT_SPEC: &str = "spec/openapi.json";

const DEFAULT_SCHEMAS: [&str; 4] = [
    "core/model/schema/modx.mysql.schema.xml",
    "core/model/schema/modx.registry.db.mysql.schema.xml",
    "core/model/schema/modx.sources.mysql.schema.xml",
    "core/model/schema/modx.transport.mysql.schema.xml",
];

/// Settings for one generator run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Target OpenAPI document
    pub spec: PathBuf,
    /// Schema files, processed in order
    pub schemas: Vec<PathBuf>,
    /// Entity classes never exposed
    pub ignore: Vec<String>,
    pub package: PackageConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            spec: PathBuf::from(DEFAULT_SPEC),
            schemas: DEFAULT_SCHEMAS.iter().map(PathBuf::from).collect(),
            ignore: DEFAULT_IGNORED.iter().map(|s| s.to_string()).collect(),
            package: PackageConfig::default(),
        }
    }
}

/// `[package]` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
    /// Package attribute that maps to the base namespace
    pub default: String,
    /// Prefix stripped from every other package attribute
    pub prefix: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        let rules = PackageRules::default();
        PackageConfig {
            default: rules.default_package,
            prefix: rules.prefix,
        }
    }
}

impl BuildConfig {
    pub fn package_rules(&self) -> PackageRules {
        PackageRules {
            default_package: self.package.default.clone(),
            prefix: self.package.prefix.clone(),
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(spec) = lookup(SPEC_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(spec = %spec, "target document overridden from environment");
            self.spec = PathBuf::from(spec);
        }
        self
    }
}

/// Parse a configuration file's contents.
pub fn parse_build_config(path: &Path, contents: &str) -> Result<BuildConfig, BuildError> {
    toml::from_str(contents).map_err(|e| BuildError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the build configuration.
///
/// With `explicit` set, that file must exist and parse. Without it,
/// [`DEFAULT_CONFIG_FILE`] is used when present and the built-in defaults
/// otherwise. Environment overrides are not applied here.
pub fn load_build_config(explicit: Option<&Path>) -> Result<BuildConfig, BuildError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(BuildConfig::default());
            }
            path
        }
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| BuildError::InvalidConfig {
        path: path.clone(),
        message: e.to_string(),
    })?;
    let config = parse_build_config(&path, &contents)?;
    tracing::info!(path = %path.display(), schemas = config.schemas.len(), "loaded build config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.spec, PathBuf::from("spec/openapi.json"));
        assert_eq!(config.schemas.len(), 4);
        assert_eq!(
            config.schemas[0],
            PathBuf::from("core/model/schema/modx.mysql.schema.xml")
        );
        assert_eq!(config.ignore, vec!["modElement", "modScript", "modSession"]);
        assert_eq!(config.package_rules(), PackageRules::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_build_config(
            Path::new("xpdo-openapi.toml"),
            r#"
spec = "out/openapi.json"

[package]
prefix = "custom."
"#,
        )
        .unwrap();
        assert_eq!(config.spec, PathBuf::from("out/openapi.json"));
        assert_eq!(config.schemas.len(), 4);
        assert_eq!(config.package.default, "modx");
        assert_eq!(config.package.prefix, "custom.");
    }

    #[test]
    fn test_full_file() {
        let config = parse_build_config(
            Path::new("xpdo-openapi.toml"),
            r#"
spec = "openapi.json"
schemas = ["a.xml", "b.xml"]
ignore = []
"#,
        )
        .unwrap();
        assert_eq!(config.schemas, vec![PathBuf::from("a.xml"), PathBuf::from("b.xml")]);
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_unknown_key_is_invalid() {
        let err = parse_build_config(Path::new("x.toml"), "specs = \"typo.json\"").unwrap_err();
        assert!(matches!(err, BuildError::InvalidConfig { .. }));
    }

    #[test]
    fn test_explicit_missing_file_is_invalid() {
        let dir = tempdir().unwrap();
        let err = load_build_config(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, BuildError::InvalidConfig { .. }));
    }

    #[test]
    fn test_explicit_file_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build.toml");
        std::fs::write(&path, "schemas = [\"only.xml\"]\n").unwrap();
        let config = load_build_config(Some(&path)).unwrap();
        assert_eq!(config.schemas, vec![PathBuf::from("only.xml")]);
    }

    #[test]
    fn test_env_override() {
        let config = BuildConfig::default().with_overrides_from(|key| {
            (key == SPEC_ENV).then(|| "/tmp/openapi.json".to_string())
        });
        assert_eq!(config.spec, PathBuf::from("/tmp/openapi.json"));

        let config = BuildConfig::default().with_overrides_from(|_| Some("  ".to_string()));
        assert_eq!(config.spec, PathBuf::from("spec/openapi.json"));
    }
}
