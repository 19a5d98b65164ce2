//! Run configuration loading
//!
//! A run comes either from a YAML file or a named preset. Files may omit
//! every field that has a default; the result is validated before use.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{WrapErr, eyre};
use knotdrift_core::RunConfig;

use crate::cli::ConfigSource;

/// Preset used when neither a file nor a preset name is given
pub const DEFAULT_PRESET: &str = "grid";

/// Parse a YAML run configuration
pub fn from_yaml(yaml: &str) -> Result<RunConfig, serde_saphyr::Error> {
    serde_saphyr::from_str(yaml)
}

/// Render a run configuration as YAML
pub fn to_yaml(config: &RunConfig) -> Result<String, serde_saphyr::ser::Error> {
    serde_saphyr::to_string(config)
}

/// Look up a preset by name
pub fn preset(name: &str) -> color_eyre::Result<RunConfig> {
    RunConfig::preset(name).ok_or_else(|| {
        eyre!(
            "unknown preset '{name}' (available: {})",
            RunConfig::PRESETS.join(", ")
        )
    })
}

/// Read and validate a configuration file
pub fn load_file(path: &Path) -> color_eyre::Result<RunConfig> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
    let config = from_yaml(&content)
        .wrap_err_with(|| format!("Failed to parse config file {}", path.display()))?;
    config
        .validate()
        .wrap_err_with(|| format!("Invalid configuration in {}", path.display()))?;
    tracing::info!(path = %path.display(), "Loaded run configuration");
    Ok(config)
}

/// Resolve the configuration a subcommand should run with
pub fn resolve(source: &ConfigSource) -> color_eyre::Result<RunConfig> {
    match (&source.config, &source.preset) {
        (Some(path), _) => load_file(path),
        (None, Some(name)) => preset(name),
        (None, None) => preset(DEFAULT_PRESET),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knotdrift_core::config::PlanKind;
    use knotdrift_core::drift::TailWindow;
    use std::io::Write;

    #[test]
    fn test_presets_survive_yaml() {
        for name in RunConfig::PRESETS {
            let config = preset(name).unwrap();
            let yaml = to_yaml(&config).unwrap();
            let parsed = from_yaml(&yaml).unwrap();
            assert_eq!(parsed, config, "preset {name} changed through YAML");
        }
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let yaml = r#"
coupling_range: { min: 0.2, max: 1.5, count: 14 }
frequency_range: { min: 1.0e8, max: 5.0e9, count: 16, spacing: log }
modulation_range: { min: 0.85, max: 1.15, count: 11 }
time_span: { start: 0.0, end: 50.0 }
sample_count: 2000
plans: [coupling_vs_modulation]
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_file(file.path()).unwrap();
        assert_eq!(config.coupling_range.count, 14);
        assert_eq!(config.plans, vec![PlanKind::CouplingVsModulation]);
        assert_eq!(config.tail_window, TailWindow::Fraction(0.5));
        assert_eq!(config.tolerances.rtol, 1e-8);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let yaml = r#"
coupling_range: { min: 1.5, max: 0.2, count: 14 }
frequency_range: { min: 1.0e8, max: 5.0e9, count: 16, spacing: log }
modulation_range: { min: 0.85, max: 1.15, count: 11 }
time_span: { start: 0.0, end: 50.0 }
sample_count: 2000
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, yaml).unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:?}").contains("min exceeds max"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_resolve_order() {
        let source = ConfigSource {
            config: None,
            preset: Some("minimal".into()),
        };
        assert_eq!(resolve(&source).unwrap(), RunConfig::minimal());
        assert_eq!(resolve(&ConfigSource::default()).unwrap(), RunConfig::grid());
        let unknown = ConfigSource {
            config: None,
            preset: Some("nope".into()),
        };
        assert!(resolve(&unknown).is_err());
    }
}
