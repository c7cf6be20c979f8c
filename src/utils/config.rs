use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "qs-migrate";
pub const DEFAULT_EXTRACTS_DIR: &str = "qs_extracts";
pub const DEFAULT_PHYSICAL_TABLE_LIMIT: usize = 200;
pub const ENV_PREFIX: &str = "QS_MIGRATE";

/// Ausgabeformat für Logs
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Hauptkonfiguration für qs-migrate
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// AWS Region; fehlt sie, greift die Default Chain des SDK (AWS_REGION, Profil)
    pub region: Option<String>,
    pub profile: Option<String>,
    pub extracts_dir: PathBuf,
    /// Maximale Anzahl Physical Tables pro Data Set beim Re-Pointing, 0 = kein Limit
    pub physical_table_limit: usize,
    pub log_format: LogFormat,
}

impl Config {
    /// Lade Config aus optionaler TOML Datei und Environment Variablen (QS_MIGRATE_*)
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .set_default("extracts_dir", DEFAULT_EXTRACTS_DIR)?
            .set_default("physical_table_limit", DEFAULT_PHYSICAL_TABLE_LIMIT as i64)?
            .set_default("log_format", "pretty")?;

        let builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// CLI Flags überschreiben Datei- und Env-Werte
    pub fn with_overrides(
        mut self,
        region: Option<String>,
        profile: Option<String>,
        extracts_dir: Option<PathBuf>,
    ) -> Self {
        if region.is_some() {
            self.region = region;
        }
        if profile.is_some() {
            self.profile = profile;
        }
        if let Some(dir) = extracts_dir {
            self.extracts_dir = dir;
        }
        self
    }

    pub fn table_limit(&self) -> Option<usize> {
        match self.physical_table_limit {
            0 => None,
            limit => Some(limit),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            extracts_dir: PathBuf::from(DEFAULT_EXTRACTS_DIR),
            physical_table_limit: DEFAULT_PHYSICAL_TABLE_LIMIT,
            log_format: LogFormat::Pretty,
        }
    }
}
