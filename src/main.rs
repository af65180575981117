mod app;
mod cli;
mod config;
mod headless;
mod page;
mod services;
mod ui;
mod view;

use crate::cli::{Cli, Command};
use crate::headless::RenderOptions;
use crate::page::ProjectFilter;
use anyhow::Result;
use clap::Parser;
use std::panic;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        eprintln!("Folio panic: {info}");
        if let Some(location) = info.location() {
            eprintln!("  at {}:{}", location.file(), location.line());
        }
    }));

    let cli = Cli::parse();
    init_logging(&cli);

    let settings = config::AppConfig::load(&cli)?;
    tracing::debug!(source = ?settings.project_source, user = %settings.github_user, "configuration loaded");

    match cli.command {
        Some(command) => handle_command(command, settings),
        None => app::run(settings),
    }
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, settings: config::AppConfig) -> Result<()> {
    match command {
        Command::Render {
            source,
            user,
            filter,
            dark,
            output,
        } => {
            let defaults = RenderOptions::from_config(&settings);
            let options = RenderOptions {
                source: source.unwrap_or(defaults.source),
                user: user.unwrap_or(defaults.user),
                filter: filter
                    .as_deref()
                    .map(ProjectFilter::new)
                    .unwrap_or(defaults.filter),
                dark,
            };
            headless::run(settings, options, output)
        }
    }
}
