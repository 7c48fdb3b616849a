//! Command-line interface.

use std::path::PathBuf;

use anuvad_settings::{AnuvadSettings, LogFormat, load_settings_from_path, settings_path};
use anyhow::{Context, ensure};
use clap::Parser;

/// Real-time WebSocket translation relay.
#[derive(Debug, Parser)]
#[command(name = "anuvad", version, about)]
pub struct Cli {
    /// Settings file [default: ~/.anuvad/settings.json]
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Bind address.
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Target language for clients that omit `?lang=`.
    #[arg(long, value_name = "CODE")]
    pub default_lang: Option<String>,

    /// Log output format (pretty or json).
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Do not install the Prometheus recorder (`/metrics` answers 404).
    #[arg(long)]
    pub no_metrics: bool,
}

impl Cli {
    /// Load settings (file, env) and apply command-line overrides on top.
    ///
    /// An explicitly passed `--settings` file must exist; the default
    /// location may be absent.
    pub fn resolve_settings(&self) -> anyhow::Result<AnuvadSettings> {
        let path = match &self.settings {
            Some(path) => {
                ensure!(path.exists(), "settings file {} not found", path.display());
                path.clone()
            }
            None => settings_path(),
        };
        let mut settings = load_settings_from_path(&path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        self.apply_overrides(&mut settings);
        settings.validate();
        Ok(settings)
    }

    /// Overwrite settings with any flags that were given.
    pub fn apply_overrides(&self, settings: &mut AnuvadSettings) {
        if let Some(host) = &self.host {
            settings.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(lang) = &self.default_lang {
            settings.server.default_lang.clone_from(lang);
        }
        if let Some(format) = self.log_format {
            settings.logging.format = format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("anuvad").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_changes_nothing() {
        let cli = parse(&[]);
        let mut settings = AnuvadSettings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.server.default_lang, "hi");
        assert!(!cli.no_metrics);
    }

    #[test]
    fn flags_override_settings() {
        let cli = parse(&[
            "--host",
            "0.0.0.0",
            "-p",
            "9090",
            "--default-lang",
            "bn",
            "--log-format",
            "json",
            "--no-metrics",
        ]);
        let mut settings = AnuvadSettings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.default_lang, "bn");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert!(cli.no_metrics);
    }

    #[test]
    fn invalid_log_format_is_rejected() {
        let result = Cli::try_parse_from(["anuvad", "--log-format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn explicit_missing_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let cli = parse(&["--settings", missing.to_str().unwrap()]);
        let err = cli.resolve_settings().unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn flags_win_over_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"server": {"defaultLang": "fr", "wsPath": "/live"}}"#,
        )
        .unwrap();

        let cli = parse(&["--settings", path.to_str().unwrap(), "--default-lang", "ur"]);
        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.server.default_lang, "ur");
        assert_eq!(settings.server.ws_path, "/live");
    }
}
