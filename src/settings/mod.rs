//! Settings for the data client and its stubs.
//!
//! Sources are merged with increasing priority:
//! 1. Default values (hardcoded)
//! 2. Explicit settings file passed to [`DataSettings::load`]
//! 3. File named by `BIGTABLE_CONFIG_PATH`
//! 4. Environment variables prefixed `BIGTABLE__` (highest priority)

mod emulator;
pub use emulator::*;


//---
use std::env;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::Result;

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    /// Project that owns the instance
    #[serde(default)]
    pub project_id: String,

    /// Instance holding the tables
    #[serde(default)]
    pub instance_id: String,

    /// Application profile used to route requests
    #[serde(default = "default_app_profile_id")]
    pub app_profile_id: String,

    /// In-process emulator tuning
    #[serde(default)]
    pub emulator: EmulatorConfig,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            instance_id: String::new(),
            app_profile_id: default_app_profile_id(),
            emulator: EmulatorConfig::default(),
        }
    }
}

impl DataSettings {
    /// Settings for a project/instance pair with everything else defaulted.
    pub fn new(
        project_id: impl Into<String>,
        instance_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            instance_id: instance_id.into(),
            ..Self::default()
        }
    }

    /// Load settings from the optional file, `BIGTABLE_CONFIG_PATH` and the
    /// environment, then validate.
    ///
    /// # Arguments
    /// * `path` - Optional settings file; it must exist when given
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = Config::builder();

        if let Some(path) = path {
            config = config.add_source(File::with_name(path).required(true));
        }

        if let Ok(path) = env::var("BIGTABLE_CONFIG_PATH") {
            config = config.add_source(File::with_name(&path));
        }

        config = config.add_source(
            Environment::with_prefix("BIGTABLE")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: Self = config.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::Message("project_id must not be empty".into()).into());
        }
        if self.instance_id.trim().is_empty() {
            return Err(ConfigError::Message("instance_id must not be empty".into()).into());
        }
        self.emulator.validate()
    }

    /// `projects/{project}/instances/{instance}`
    pub fn instance_name(&self) -> String {
        format!(
            "projects/{}/instances/{}",
            self.project_id, self.instance_id
        )
    }

    /// `projects/{project}/instances/{instance}/tables/{table}`
    pub fn table_name(
        &self,
        table_id: &str,
    ) -> String {
        format!("{}/tables/{}", self.instance_name(), table_id)
    }
}

fn default_app_profile_id() -> String {
    "default".to_string()
}
