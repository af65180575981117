use crate::config::{AppConfig, ProjectSource};
use crate::page::{static_cards, Listing, ProjectFilter, ProjectRenderer, ThemeToggler};
use crate::services::api::GithubClient;
use crate::view::Document;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub source: ProjectSource,
    pub user: String,
    pub filter: ProjectFilter,
    pub dark: bool,
}

impl RenderOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            source: config.project_source,
            user: config.github_user.clone(),
            filter: ProjectFilter::default(),
            dark: false,
        }
    }
}

/// Builds the page into a fresh document the same way the viewer does on load.
pub async fn build_page(config: &AppConfig, options: &RenderOptions) -> Result<Document> {
    let mut document = Document::portfolio_shell(config.application_name.clone());
    let mut toggler = ThemeToggler::register(&document).context("page has no theme control")?;
    let renderer = ProjectRenderer::locate(&document).context("page has no projects container")?;

    let listing = match options.source {
        ProjectSource::Static => Listing::Cards(renderer.render_static(&mut document)?),
        ProjectSource::Github => {
            let client = GithubClient::from_config(config)
                .context("Failed to build GitHub client")?;
            renderer
                .load_remote(&mut document, &client, &options.user)
                .await?
        }
    };

    if let Listing::Cards(cards) = &listing {
        if !options.filter.is_empty() {
            let kept = options.filter.apply(cards);
            tracing::info!(kept = kept.len(), total = cards.len(), "applied project filter");
            renderer.render_cards(&mut document, &kept)?;
        }
    }

    if options.dark {
        toggler.activate(&mut document)?;
    }

    Ok(document)
}

pub fn run(config: AppConfig, options: RenderOptions, output: Option<PathBuf>) -> Result<()> {
    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let document = runtime.block_on(build_page(&config, &options))?;
    let html = document.to_html();

    match output {
        Some(path) => {
            fs::write(&path, &html)
                .with_context(|| format!("Writing page to {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = html.len(), "page written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{messages, selectors};
    use crate::view::{Marker, View};
    use httpmock::prelude::*;
    use serde_json::json;

    fn static_options() -> RenderOptions {
        RenderOptions {
            source: ProjectSource::Static,
            ..RenderOptions::from_config(&AppConfig::default())
        }
    }

    #[tokio::test]
    async fn static_page_has_three_cards() {
        let document = build_page(&AppConfig::default(), &static_options())
            .await
            .unwrap();
        assert_eq!(
            document.find(Marker::Class(selectors::PROJECT_CARD_CLASS)).len(),
            3
        );
        assert!(document.find(Marker::Class(selectors::DARK_MODE_CLASS)).is_empty());
    }

    #[tokio::test]
    async fn dark_flag_and_filter_apply_to_rendered_cards() {
        let options = RenderOptions {
            filter: ProjectFilter::new("two"),
            dark: true,
            ..static_options()
        };
        let document = build_page(&AppConfig::default(), &options).await.unwrap();

        let cards = document.find(Marker::Class(selectors::PROJECT_CARD_CLASS));
        assert_eq!(cards.len(), 1);
        assert!(document.has_class(cards[0], selectors::DARK_MODE_CLASS));
        assert!(document.has_class(document.body(), selectors::DARK_MODE_CLASS));
    }

    #[tokio::test]
    async fn github_failure_renders_error_page() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/users/octocat/repos");
            then.status(404);
        });
        let config = AppConfig {
            github_api_base_url: server.url("/"),
            ..AppConfig::default()
        };
        let options = RenderOptions::from_config(&config);

        let document = build_page(&config, &options).await.unwrap();
        let html = document.to_html();
        assert!(html.contains(messages::FETCH_FAILED));
        assert!(!html.contains(selectors::PROJECT_CARD_CLASS));
    }

    #[tokio::test]
    async fn github_page_lists_repositories() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET)
                .path("/users/ferris/repos")
                .query_param("sort", "updated");
            then.status(200).json_body(json!([
                { "name": "claws", "description": "Pinch <fast>", "html_url": "https://github.com/ferris/claws" }
            ]));
        });
        let config = AppConfig {
            github_api_base_url: server.url("/"),
            github_user: "ferris".into(),
            ..AppConfig::default()
        };
        let options = RenderOptions::from_config(&config);

        let html = build_page(&config, &options).await.unwrap().to_html();
        assert!(html.contains("<h3>claws</h3>"));
        assert!(html.contains("<p>Pinch &lt;fast&gt;</p>"));
        assert!(html.contains(
            "<a href=\"https://github.com/ferris/claws\" target=\"_blank\">View on GitHub</a>"
        ));
    }

    #[test]
    fn run_writes_html_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");

        run(AppConfig::default(), static_options(), Some(path.clone())).unwrap();

        let html = fs::read_to_string(path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("id=\"projects-container\""));
        assert_eq!(html.matches("class=\"project-card\"").count(), 3);
    }
}
