use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use validator::Validate;

use crate::domain::analysis::AnalysisConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::scrub::ScrubConfig;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "ticketscrub.toml";

/// Environment overrides, e.g. `TICKETSCRUB_PATHS__SCRUB_INPUT=tickets.xlsx`
pub const ENV_PREFIX: &str = "TICKETSCRUB_";

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PathSettings {
    /// Raw ticket export read by `scrub`
    pub scrub_input: PathBuf,

    /// Cleaned table written by `scrub`
    pub scrub_output: PathBuf,

    /// Cleaned table read by `analyze`
    pub analysis_input: PathBuf,

    /// Directory receiving the analysis report files
    pub analysis_output_dir: PathBuf,

    /// Optional newline-separated list of known names merged into the name list
    pub names_file: Option<PathBuf>,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            scrub_input: PathBuf::from("Data/Input/data.xlsx"),
            scrub_output: PathBuf::from("Data/Output/cleaned_output.csv"),
            analysis_input: PathBuf::from("Data/Output/cleaned_output.csv"),
            analysis_output_dir: PathBuf::from("Analysis"),
            names_file: None,
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    #[validate(nested)]
    pub paths: PathSettings,

    #[validate(nested)]
    pub scrub: ScrubConfig,

    #[validate(nested)]
    pub analysis: AnalysisConfig,
}

pub struct ConfigService;

impl ConfigService {
    /// Build settings from defaults, then the TOML file, then the environment.
    ///
    /// An explicit `config_path` must exist. Without one, `ticketscrub.toml`
    /// in the working directory is used if present.
    pub fn load(config_path: Option<&Path>) -> Result<Settings> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::NotFound(format!(
                        "Config file {} does not exist",
                        path.display()
                    )));
                }
                info!("Loading configuration from {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut settings: Settings = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load configuration: {}", e)))?;

        if let Some(names_file) = settings.paths.names_file.clone() {
            let names = Self::read_names_file(&names_file)?;
            debug!("Loaded {} names from {}", names.len(), names_file.display());
            settings.scrub.name_list.extend(names);
        }

        settings
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        Ok(settings)
    }

    /// One name per line; blank lines and `#` comments are ignored
    pub fn read_names_file(path: &Path) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to read names file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let settings = ConfigService::load(None).map_err(|e| e.to_string())?;
            assert_eq!(settings, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn test_toml_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [paths]
                scrub_input = "exports/tickets.csv"

                [scrub]
                name_list = ["Amara"]

                [[analysis.categories]]
                name = "Parking"
                keywords = ["parking", "permit"]
                "#,
            )?;
            jail.set_env("TICKETSCRUB_ANALYSIS__TOP_WORDS", "5");

            let settings = ConfigService::load(None).map_err(|e| e.to_string())?;

            assert_eq!(settings.paths.scrub_input, PathBuf::from("exports/tickets.csv"));
            assert_eq!(settings.scrub.name_list, vec!["Amara".to_string()]);
            assert_eq!(settings.analysis.categories.len(), 1);
            assert_eq!(settings.analysis.categories[0].name, "Parking");
            assert_eq!(settings.analysis.top_words, 5);
            assert_eq!(settings.analysis.top_bigrams, 20);
            Ok(())
        });
    }

    #[test]
    fn test_names_file_extends_name_list() {
        Jail::expect_with(|jail| {
            jail.create_file("names.txt", "# staff\nOluwaseun\n\n  Mei Ling  \n")?;
            jail.set_env("TICKETSCRUB_PATHS__NAMES_FILE", "names.txt");

            let settings = ConfigService::load(None).map_err(|e| e.to_string())?;

            assert_eq!(
                settings.scrub.name_list,
                vec!["Oluwaseun".to_string(), "Mei Ling".to_string()]
            );
            Ok(())
        });
    }

    #[test]
    fn test_invalid_settings_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("TICKETSCRUB_ANALYSIS__TOP_BIGRAMS", "0");

            let result = ConfigService::load(None);
            assert!(matches!(result, Err(AppError::ValidationError(_))));
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let result = ConfigService::load(Some(Path::new("no/such/config.toml")));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
