use crate::cache::CachePolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    env::var,
    fs::{read_to_string, write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub cache: CacheSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Most chunks kept at once. Unset means the cache never evicts.
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportSettings {
    pub list_blocks: bool,
}

impl CacheSettings {
    pub fn policy(&self) -> CachePolicy {
        match self.capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => CachePolicy::Bounded { capacity },
            None => CachePolicy::Unbounded,
        }
    }
}

pub fn guess_root() -> Option<PathBuf> {
    if let Ok(root) = var("MICA_ROOT") {
        return Some(PathBuf::from(root));
    }

    ProjectDirs::from("io.github", "mica", "Mica").map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn settings_path() -> Option<PathBuf> {
    guess_root().map(|root| root.join("settings.toml"))
}

impl Settings {
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let data = read_to_string(path)?;
        toml::from_str(&data).map_err(Into::into)
    }

    pub fn store(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write(path, toml::to_string(self)?)?;
        Ok(())
    }

    /// Loads from `path`, or falls back to defaults when the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        log::info!("Loading settings from: {path:?}");

        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not read settings: {e:?}");
                log::info!("Using default settings.");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cache.policy(), CachePolicy::Unbounded);
    }

    #[test]
    fn capacity_selects_bounded_policy() {
        let settings: Settings = toml::from_str("[cache]\ncapacity = 64\n").unwrap();
        assert_eq!(
            settings.cache.policy(),
            CachePolicy::Bounded {
                capacity: NonZeroUsize::new(64).unwrap()
            }
        );
    }

    #[test]
    fn zero_capacity_means_unbounded() {
        let settings: Settings = toml::from_str("[cache]\ncapacity = 0\n").unwrap();
        assert_eq!(settings.cache.policy(), CachePolicy::Unbounded);
    }

    #[test]
    fn store_then_load() {
        let dir = std::env::temp_dir().join(format!("mica-settings-{}", std::process::id()));
        let path = dir.join("settings.toml");

        let settings = Settings {
            cache: CacheSettings {
                capacity: Some(12),
            },
            report: ReportSettings { list_blocks: true },
        };
        settings.store(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_falls_back() {
        let path = std::env::temp_dir().join("mica-does-not-exist/settings.toml");
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
