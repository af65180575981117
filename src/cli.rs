use crate::config::ProjectSource;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command line interface for Folio.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "folio",
    author,
    version,
    about = "Personal portfolio page with project cards and a dark mode toggle"
)]
pub struct Cli {
    /// Optional path to a configuration file (TOML, YAML, JSON).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Named profile to load (e.g. dev, staging, prod).
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Log verbosity when RUST_LOG is not set.
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the page without opening a window and write it as HTML.
    Render {
        /// Where the project cards come from (defaults to the configured source).
        #[arg(short, long, value_enum)]
        source: Option<ProjectSource>,
        /// GitHub account whose repositories are listed.
        #[arg(short, long)]
        user: Option<String>,
        /// Only keep cards whose title or description contains this text.
        #[arg(short, long)]
        filter: Option<String>,
        /// Activate the theme control once after the cards are rendered.
        #[arg(long)]
        dark: bool,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_command() {
        let cli = Cli::parse_from([
            "folio", "render", "--source", "static", "--filter", "two", "--dark",
        ]);
        match cli.command {
            Some(Command::Render {
                source,
                filter,
                dark,
                output,
                user,
            }) => {
                assert_eq!(source, Some(ProjectSource::Static));
                assert_eq!(filter.as_deref(), Some("two"));
                assert!(dark);
                assert!(output.is_none());
                assert!(user.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn defaults_to_viewer_without_subcommand() {
        let cli = Cli::parse_from(["folio"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level.as_directive(), "info");
    }
}
