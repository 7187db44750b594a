// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const STORAGE_MODES: [&str; 3] = ["file", "snapshot", "memory"];
const DEFAULT_MODE: &str = "snapshot";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    pub data_dir: Option<String>,
    pub db_name: Option<String>,
    pub mode: Option<String>,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_name: Some(macrov_db::DEFAULT_DB_NAME.to_owned()),
            mode: Some(DEFAULT_MODE.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("MACROV_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set MACROV_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(macrov_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [storage]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(db_name) = &self.storage.db_name {
            macrov_db::validate_db_name(db_name)
                .with_context(|| format!("storage.db_name in {}", path.display()))?;
        }

        if let Some(mode) = &self.storage.mode
            && !STORAGE_MODES.contains(&mode.as_str())
        {
            bail!(
                "storage.mode in {} must be one of {}; got {mode:?}",
                path.display(),
                STORAGE_MODES.join(", ")
            );
        }

        Ok(())
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => macrov_db::default_data_dir(),
        }
    }

    pub fn db_name(&self) -> &str {
        self.storage
            .db_name
            .as_deref()
            .unwrap_or(macrov_db::DEFAULT_DB_NAME)
    }

    pub fn mode(&self) -> &str {
        self.storage.mode.as_deref().unwrap_or(DEFAULT_MODE)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# macrov config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/macrov)\n# data_dir = \"/absolute/path/to/data\"\ndb_name = \"{}\"\n# \"snapshot\" keeps the database in memory and persists a snapshot after\n# every write; \"file\" opens the database file in place; \"memory\" keeps\n# nothing across runs.\nmode = \"{}\"\n",
            path.display(),
            macrov_db::DEFAULT_DB_NAME,
            DEFAULT_MODE,
        )
    }
}
