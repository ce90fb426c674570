//! Layered configuration for the media catalog.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `config.toml` in the platform config directory, if present
//! 3. an explicitly given file (TOML, YAML or JSON, chosen by extension)
//! 4. `MEDIACENTER_*` environment variables, nested keys split on `__`
//!    (e.g. `MEDIACENTER_CATALOG__POLICY=strict`)

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use mediacenter_catalog::{GroupKey, LanguageFilter, Policy};
use mediacenter_manifest::models::{DEFAULT_LANGUAGE, LanguageCode, LanguageDisplay, LanguageTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const ENV_PREFIX: &str = "MEDIACENTER_";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub sources: Sources,
    /// Additional or overriding language display entries, keyed by code.
    pub languages: BTreeMap<String, LanguageDisplay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Second fallback tier, and the initial selection of last resort.
    pub default_language: String,
    pub policy: Policy,
    pub group_by: GroupKey,
    /// Hide subfolders that have nothing to show for the current selection.
    pub hide_empty: bool,
}
impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            policy: Policy::default(),
            group_by: GroupKey::default(),
            hide_empty: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub manifest: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<PathBuf>,
}
impl Default for Sources {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("media.json"),
            categories: None,
        }
    }
}

impl Config {
    /// Loads and validates configuration from every source.
    #[instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::from_figment(&Self::figment(explicit)?)
    }

    /// The merged, not yet extracted, configuration sources.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = default_path().filter(|path| path.is_file()) {
            tracing::debug!(path = %path.display(), "Using default configuration file");
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = merge_file(figment, path)?;
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load("merged sources".to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that deserialize but can't be used.
    pub fn validate(&self) -> Result<()> {
        self.default_language()?;
        for code in self.languages.keys() {
            parse_code(code, "languages")?;
        }
        if self.sources.manifest.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid {
                field: "sources.manifest".to_string(),
                value: String::new(),
            });
        }
        Ok(())
    }

    pub fn default_language(&self) -> Result<LanguageCode> {
        parse_code(&self.catalog.default_language, "catalog.default_language")
    }

    /// The resolver described by the `[catalog]` section.
    pub fn language_filter(&self) -> Result<LanguageFilter> {
        Ok(LanguageFilter::new(self.catalog.policy)
            .with_default_language(self.default_language()?)
            .with_group_by(self.catalog.group_by))
    }

    /// The built-in language table with `[languages]` entries applied on top.
    pub fn language_table(&self) -> Result<LanguageTable> {
        let mut table = LanguageTable::default();
        for (code, display) in &self.languages {
            table.insert(parse_code(code, "languages")?, display.clone());
        }
        Ok(table)
    }
}

/// `config.toml` in the platform configuration directory.
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "mediacenter").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let source = path.display().to_string();
    if !path.is_file() {
        exn::bail!(ErrorKind::Load(source));
    }
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => {
            tracing::warn!(path = %source, "Unrecognised configuration file extension");
            exn::bail!(ErrorKind::Load(source))
        },
    })
}

fn parse_code(code: &str, field: &str) -> Result<LanguageCode> {
    code.parse::<LanguageCode>().or_raise(|| ErrorKind::Invalid {
        field: field.to_string(),
        value: code.to_string(),
    })
}
