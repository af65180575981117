use crate::cli::Cli;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Identifiers the page markup and the renderer agree on.
pub mod selectors {
    pub const THEME_TOGGLE_ID: &str = "theme-toggle";
    pub const PROJECTS_CONTAINER_ID: &str = "projects-container";
    pub const HEADER_TAG: &str = "header";
    pub const PROJECT_CARD_CLASS: &str = "project-card";
    pub const DARK_MODE_CLASS: &str = "dark-mode";
    pub const LOADING_CLASS: &str = "loading";
    pub const ERROR_CLASS: &str = "error-message";
}

/// User-facing strings written into the projects container.
pub mod messages {
    pub const LOADING: &str = "Loading projects...";
    pub const FETCH_FAILED: &str = "Failed to load projects. Please try again later.";
    pub const MISSING_DESCRIPTION: &str = "No description provided.";
    pub const STATIC_LINK_LABEL: &str = "View Project";
    pub const REMOTE_LINK_LABEL: &str = "View on GitHub";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSource {
    Static,
    Github,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub application_name: String,
    pub github_api_base_url: String,
    pub github_user: String,
    pub github_token: Option<String>,
    pub project_source: ProjectSource,
    /// Unset means the fetch runs until it completes or fails.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            application_name: "Folio".to_string(),
            github_api_base_url: "https://api.github.com/".to_string(),
            github_user: "octocat".to_string(),
            github_token: None,
            project_source: ProjectSource::Github,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self, AppConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("application_name", defaults.application_name.clone())?
            .set_default("github_api_base_url", defaults.github_api_base_url.clone())?
            .set_default("github_user", defaults.github_user.clone())?
            .set_default("project_source", "github")?;

        if let Some(profile) = &cli.profile {
            let profile_file_name = format!("folio.{profile}.toml");
            if let Some(path) = Self::config_dir_path(&profile_file_name) {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        if let Some(config_path) = &cli.config {
            builder = builder.add_source(File::from(config_path.clone()).required(true));
        } else if let Some(path) = Self::config_dir_path("folio.toml") {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("FOLIO").separator("__"));

        let built = builder.build()?;
        Ok(built.try_deserialize::<AppConfig>()?)
    }

    fn config_dir_path(file_name: &str) -> Option<PathBuf> {
        ProjectDirs::from("com", "DigitalDataCo", "Folio")
            .map(|dirs| dirs.config_dir().join(file_name))
    }
}
