use crate::Result;
use serde::{Deserialize, Serialize};
use sleepmerge_core::resolve_workspace_path;
use sleepmerge_profiles::ProfileOptions;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default = "enabled_by_default")]
    pub drop_unfitted_sensors: bool,
    /// Canonical label -> extra vendor spellings
    #[serde(default)]
    pub label_aliases: BTreeMap<String, Vec<String>>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            drop_unfitted_sensors: true,
            label_aliases: BTreeMap::new(),
        }
    }
}

impl ProfileConfig {
    pub fn options(&self) -> ProfileOptions {
        ProfileOptions {
            label_aliases: self
                .label_aliases
                .iter()
                .map(|(canonical, aliases)| (canonical.clone(), aliases.clone()))
                .collect(),
            drop_unfitted_sensors: self.drop_unfitted_sensors,
        }
    }
}

/// User configuration. Profiles without an entry use [`ProfileConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_workspace_path(None)?.join("config.toml"))
    }

    pub fn profile(&self, id: &str) -> ProfileConfig {
        self.profiles.get(id).cloned().unwrap_or_default()
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.profiles.get(id).is_none_or(|p| p.enabled)
    }

    pub fn set_profile(&mut self, id: impl Into<String>, config: ProfileConfig) {
        self.profiles.insert(id.into(), config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.profiles.is_empty());
        assert!(config.is_enabled("resmed"));
        assert!(config.profile("resmed").drop_unfitted_sensors);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        let mut resmed = ProfileConfig::default();
        resmed
            .label_aliases
            .insert("Flow".to_string(), vec!["Flujo.40ms".to_string()]);
        config.set_profile("resmed", resmed);
        config.set_profile(
            "oximetry",
            ProfileConfig {
                enabled: false,
                ..ProfileConfig::default()
            },
        );

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        assert!(!loaded.is_enabled("oximetry"));
        Ok(())
    }

    #[test]
    fn test_partial_profile_table_uses_defaults() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
            [profiles.resmed]
            drop_unfitted_sensors = false

            [profiles.resmed.label_aliases]
            Pressure = ["Pres.2s"]
            "#,
        )?;

        let resmed = config.profile("resmed");
        assert!(resmed.enabled);
        let options = resmed.options();
        assert!(!options.drop_unfitted_sensors);
        assert_eq!(
            options.label_aliases,
            vec![("Pressure".to_string(), vec!["Pres.2s".to_string()])]
        );
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("missing.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "profiles = 3")?;
        assert!(matches!(Config::load_from(&path), Err(crate::Error::Config(_))));
        Ok(())
    }
}
