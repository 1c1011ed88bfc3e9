use crate::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use std::path::Path;

/// Contents written by `metainherit init`. Parses to the default settings.
pub fn default_config_contents() -> &'static str {
    r#"# metainherit configuration

[inheritance]
# Metadata declared on the target's own type
include_class = true
# Metadata declared on superclasses of the declaring type
include_superclasses = false
# Metadata declared on implemented interfaces
include_interfaces = true
# Package-level metadata (reserved, has no effect)
include_packages = false

[interception]
# Restrict resolution to these metadata kinds, in this order.
# Leave unset to collect every kind.
# metadata = ["Transactional", "Secured"]
"#
}

pub fn init_config(force: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    init_config_in(&cwd, force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    std::fs::write(&config_path, default_config_contents())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, MetaInheritConfig};
    use tempfile::TempDir;

    #[test]
    fn test_default_contents_parse_to_defaults() {
        let config = parse_config(default_config_contents()).unwrap();
        assert_eq!(config.inheritance, MetaInheritConfig::default().inheritance);
        assert_eq!(config.intercepting_metadata(), None);
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "# mine\n").unwrap();

        let err = init_config_in(dir.path(), false).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        let contents = std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(contents, "# mine\n");
    }

    #[test]
    fn test_init_with_force_overwrites() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "# mine\n").unwrap();

        init_config_in(dir.path(), true).unwrap();

        let contents = std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(contents, default_config_contents());
    }
}
