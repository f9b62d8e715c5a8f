use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

use crate::theme::ThemeConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/money-manager.toml";
pub const ENV_PREFIX: &str = "MONEY_MANAGER";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for every displayed amount
    pub currency_symbol: String,
    pub log_level: String,
    /// Logs are only written when this is set; the terminal belongs to the UI
    pub log_file: Option<PathBuf>,
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            log_level: "info".to_string(),
            log_file: None,
            theme: ThemeConfig::default(),
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "money-manager", version, about = "Monthly income and expense tracker")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override the currency symbol shown before amounts.
    #[arg(long)]
    pub currency_symbol: Option<String>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
    /// Write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Defaults, then the config file, then `MONEY_MANAGER_*`, then the command line
pub fn load() -> Result<AppConfig, config::ConfigError> {
    load_from(Args::parse())
}

pub fn load_from(args: Args) -> Result<AppConfig, config::ConfigError> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let settings: AppConfig = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(args.config.is_some()))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    Ok(apply_overrides(settings, args))
}

fn apply_overrides(mut settings: AppConfig, args: Args) -> AppConfig {
    if let Some(symbol) = args.currency_symbol {
        settings.currency_symbol = symbol;
    }
    if let Some(level) = args.log_level {
        settings.log_level = level;
    }
    if let Some(path) = args.log_file {
        settings.log_file = Some(path);
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_original_palette() {
        let config = AppConfig::default();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.theme.background, "#E5F0F4");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_file_values_and_cli_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "currency_symbol = \"€\"\nlog_level = \"debug\"\n\n[theme]\ntext = \"#000000\""
        )
        .unwrap();

        let args = Args {
            config: Some(file.path().to_string_lossy().into_owned()),
            log_level: Some("trace".to_string()),
            ..Args::default()
        };
        let config = load_from(args).unwrap();

        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.theme.text, "#000000");
        assert_eq!(config.theme.button, "#38779A");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let args = Args {
            config: Some("/nonexistent/money-manager.toml".to_string()),
            ..Args::default()
        };
        assert!(load_from(args).is_err());
    }

    #[test]
    fn test_cli_args_parse() {
        let args = Args::parse_from(["money-manager", "--currency-symbol", "£", "--log-file", "mm.log"]);
        let config = apply_overrides(AppConfig::default(), args);

        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.log_file, Some(PathBuf::from("mm.log")));
    }
}
