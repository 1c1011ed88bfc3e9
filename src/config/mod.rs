//! Configuration for metadata resolution.
//!
//! [`InheritanceConfiguration`] and [`ResolutionSettings`] are plain values
//! handed to collectors; [`MetaInheritConfig`] is their on-disk form.

mod core;
mod inheritance;
mod loader;

pub use core::{InterceptionConfig, MetaInheritConfig, ResolutionSettings};
pub use inheritance::{default_include_class, default_include_interfaces, InheritanceConfiguration};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path, parse_config,
    CONFIG_FILE_NAME,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_settings_from_config() {
        let config = parse_config(
            r#"
[inheritance]
include_superclasses = true

[interception]
metadata = ["Transactional", "Secured"]
"#,
        )
        .unwrap();

        let settings = config.resolution_settings();
        assert!(settings.inheritance.include_superclasses);
        assert!(settings.inheritance.include_class);
        assert_eq!(
            settings.intercepting_metadata,
            Some(vec!["Transactional".to_string(), "Secured".to_string()])
        );
    }

    #[test]
    fn test_missing_interception_collects_everything() {
        let config = parse_config("[inheritance]\ninclude_interfaces = false\n").unwrap();
        let settings = config.resolution_settings();
        assert!(!settings.inheritance.include_interfaces);
        assert_eq!(settings.intercepting_metadata, None);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), MetaInheritConfig::default());
    }
}
