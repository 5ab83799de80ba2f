use crate::config::{StorageConfig, StorageMode};
use crate::util::expand_tilde;
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

/// Resolve the storage directory from configuration values.
pub fn resolve_directory(storage_cfg: &StorageConfig, config_dir: &Path) -> Result<PathBuf> {
    let base_dir = match storage_cfg.storage {
        StorageMode::Auto => {
            let root = dirs::data_dir().unwrap_or_else(|| config_dir.to_path_buf());
            root.join("paintboard")
        }
        StorageMode::Config => config_dir.to_path_buf(),
        StorageMode::Custom => {
            let raw = storage_cfg.custom_directory.as_ref().ok_or_else(|| {
                anyhow!("storage.custom_directory must be set when storage = \"custom\"")
            })?;
            let expanded = expand_tilde(raw.trim());
            if expanded.as_os_str().is_empty() {
                return Err(anyhow!(
                    "storage.custom_directory resolved to an empty path"
                ));
            }
            expanded
        }
    };
    Ok(base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_mode_uses_config_dir() {
        let cfg = StorageConfig {
            storage: StorageMode::Config,
            custom_directory: None,
        };
        let dir = resolve_directory(&cfg, Path::new("/etc/paintboard")).unwrap();
        assert_eq!(dir, PathBuf::from("/etc/paintboard"));
    }

    #[test]
    fn custom_mode_requires_directory() {
        let mut cfg = StorageConfig {
            storage: StorageMode::Custom,
            custom_directory: None,
        };
        assert!(resolve_directory(&cfg, Path::new("/tmp")).is_err());

        cfg.custom_directory = Some("   ".to_string());
        assert!(resolve_directory(&cfg, Path::new("/tmp")).is_err());

        cfg.custom_directory = Some("/srv/paint".to_string());
        assert_eq!(
            resolve_directory(&cfg, Path::new("/tmp")).unwrap(),
            PathBuf::from("/srv/paint")
        );
    }

    #[test]
    fn auto_mode_ends_in_app_directory() {
        let cfg = StorageConfig::default();
        let dir = resolve_directory(&cfg, Path::new("/tmp/cfg")).unwrap();
        assert!(dir.ends_with("paintboard"));
    }
}
