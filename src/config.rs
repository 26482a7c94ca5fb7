use crate::error::{AuditError, Result};
use crate::models::MunicipalityId;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

/// Optional settings file. Every key may be omitted; command-line flags
/// take precedence over anything set here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub coverage: CoverageSettings,

    #[validate(nested)]
    pub summarize: SummarizeSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CoverageSettings {
    pub reference: Option<PathBuf>,
    pub forecast: Option<PathBuf>,
    /// Added on top of the built-in expected-absent codes
    pub extra_expected_absent: Vec<MunicipalityId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SummarizeSettings {
    pub daily_historical: Option<PathBuf>,
    pub hourly: Option<PathBuf>,
    pub daily_current: Option<PathBuf>,
    pub forecast: Option<PathBuf>,

    #[validate(range(min = 1))]
    pub last_days: Option<usize>,
}

impl AppConfig {
    /// Load and validate a settings file. The format follows the extension
    /// (toml, yaml, json).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AuditError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .build()?;
        let app_config: AppConfig = settings.try_deserialize()?;
        app_config.validate()?;
        app_config.check_extra_ids()?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(app_config)
    }

    /// Load when a path was given, defaults otherwise
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn check_extra_ids(&self) -> Result<()> {
        match self
            .coverage
            .extra_expected_absent
            .iter()
            .find(|id| !id.is_well_formed())
        {
            Some(id) => Err(AuditError::Config(format!(
                "extra_expected_absent entry '{}' is not a 5-digit municipality code",
                id
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("aemet-audit.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_config(
            &dir,
            r#"
[coverage]
reference = "ref.csv.gz"
extra_expected_absent = ["08999"]

[summarize]
hourly = "hourly.csv"
last_days = 3
"#,
        );

        let config = AppConfig::load(&path)?;
        assert_eq!(config.coverage.reference, Some(PathBuf::from("ref.csv.gz")));
        assert_eq!(config.coverage.forecast, None);
        assert_eq!(
            config.coverage.extra_expected_absent,
            vec![MunicipalityId::from("08999")]
        );
        assert_eq!(config.summarize.hourly, Some(PathBuf::from("hourly.csv")));
        assert_eq!(config.summarize.last_days, Some(3));
        Ok(())
    }

    #[test]
    fn test_zero_last_days_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_config(&dir, "[summarize]\nlast_days = 0\n");
        assert!(matches!(
            AppConfig::load(&path),
            Err(AuditError::Validation(_))
        ));
        Ok(())
    }

    #[test]
    fn test_malformed_extra_id_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_config(&dir, "[coverage]\nextra_expected_absent = [\"8999\"]\n");
        assert!(matches!(AppConfig::load(&path), Err(AuditError::Config(_))));
        Ok(())
    }

    #[test]
    fn test_no_config_is_default() -> Result<()> {
        let config = AppConfig::load_optional(None)?;
        assert!(config.coverage.extra_expected_absent.is_empty());
        assert_eq!(config.summarize.last_days, None);
        Ok(())
    }

    #[test]
    fn test_missing_config_file() {
        let result = AppConfig::load(Path::new("no/such/config.toml"));
        assert!(matches!(result, Err(AuditError::MissingFile { .. })));
    }
}
