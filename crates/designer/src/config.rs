//! Parameter-space configuration. Loaded from designer.ron at startup.

use anyhow::{Context, Result};
use procgen::ModelConfig;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "designer.ron";

/// Load the model configuration.
///
/// An explicit path must exist and parse. Without one, `designer.ron` in the
/// current directory is used if present, else the built-in parameter space.
/// Either way the result is validated before any design is generated.
pub fn load(path: Option<&Path>) -> Result<ModelConfig> {
    let config = match path {
        Some(path) => read(path)?,
        None => {
            let path = config_path();
            if path.exists() {
                read(&path)?
            } else {
                log::info!("No {} found, using built-in parameter space", CONFIG_FILE);
                ModelConfig::default()
            }
        }
    };
    config.validate().context("configuration rejected")?;
    Ok(config)
}

fn read(path: &Path) -> Result<ModelConfig> {
    let data = std::fs::read_to_string(path).with_context(|| format!("could not read config {:?}", path))?;
    let config = ron::from_str(&data).with_context(|| format!("invalid config at {:?}", path))?;
    log::info!("Loaded parameter space from {:?}", path);
    Ok(config)
}

/// Save the built-in configuration so it can be edited.
pub fn write_default(path: &Path) -> Result<()> {
    let text = ron::ser::to_string_pretty(&ModelConfig::default(), ron::ser::PrettyConfig::default())
        .context("could not serialise default config")?;
    std::fs::write(path, text).with_context(|| format!("could not write config to {:?}", path))?;
    log::info!("Wrote default parameter space to {:?}", path);
    Ok(())
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        write_default(&path).unwrap();
        let loaded = load(Some(&path)).unwrap();
        assert_eq!(loaded, ModelConfig::default());
    }

    #[test]
    fn bundled_config_is_valid() {
        let config: ModelConfig = ron::from_str(include_str!("../../../designer.ron")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.available_models().len(), 2);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("nope.ron"))).is_err());
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ron");
        std::fs::write(
            &path,
            r#"(models: {"csym": (parameters: {"height": [3.0, 1.0]}, num_texture_types: 4)})"#,
        )
        .unwrap();
        assert!(load(Some(&path)).is_err());
    }
}
