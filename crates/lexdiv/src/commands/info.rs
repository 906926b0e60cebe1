//! Info command implementation

use anyhow::Context;
use clap::Args;
use lexdiv_core::config::{self, Config, ConfigSources};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_config_dir: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
    preset: String,
    windows: Vec<usize>,
    inaccuracy_threshold: usize,
    group_thousands: bool,
    word_class: String,
    surrogates: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    strip_markdown: Option<bool>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> anyhow::Result<Self> {
        let report = config
            .report_config()
            .context("invalid report configuration")?;
        Ok(Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            user_config_dir: config::user_config_dir().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            max_input_bytes: config.input_limit(),
            preset: config.preset.as_str().to_string(),
            windows: report.windows.iter().map(|w| w.size.get()).collect(),
            inaccuracy_threshold: report.inaccuracy_threshold,
            group_thousands: report.group_thousands,
            word_class: report.word_class.as_str().to_string(),
            surrogates: report.surrogates.as_str().to_string(),
            strip_markdown: config.strip_markdown,
        })
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources)?,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }
    if !package.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), package.repository.cyan());
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match cfg.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    print_opt("User config dir", &cfg.user_config_dir);
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    print_opt("Log directory", &cfg.log_dir);
    match cfg.max_input_bytes {
        Some(limit) => println!("{}: {limit} bytes", "Input limit".dimmed()),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    println!();
    println!("{}", "Report".bold().underline());
    println!("{}: {}", "Preset".dimmed(), cfg.preset);
    let windows: Vec<String> = cfg.windows.iter().map(ToString::to_string).collect();
    println!("{}: {}", "Windows".dimmed(), windows.join(", "));
    println!("{}: {}", "Caveat below".dimmed(), cfg.inaccuracy_threshold);
    println!("{}: {}", "Group thousands".dimmed(), cfg.group_thousands);
    println!("{}: {}", "Word class".dimmed(), cfg.word_class);
    println!("{}: {}", "Surrogates".dimmed(), cfg.surrogates);
    print_opt("Strip markdown", &cfg.strip_markdown);

    Ok(())
}

/// Print an optional value or "(not set)".
fn print_opt<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    match value {
        Some(v) => println!("{}: {}", label.dimmed(), v),
        None => println!("{}: {}", label.dimmed(), "(not set)".dimmed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexdiv_core::Preset;

    #[test]
    fn test_cmd_info_text_succeeds() {
        assert!(cmd_info(InfoArgs::default(), false, &Config::default(), &ConfigSources::default()).is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        assert!(cmd_info(InfoArgs::default(), true, &Config::default(), &ConfigSources::default()).is_ok());
    }

    #[test]
    fn test_config_info_no_file() {
        let info = ConfigInfo::from_config(&Config::default(), &ConfigSources::default()).unwrap();
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.preset, "dual");
        assert_eq!(info.windows, vec![100, 500]);
        assert_eq!(info.inaccuracy_threshold, 100);
    }

    #[test]
    fn config_info_reflects_preset() {
        let config = Config {
            preset: Preset::Single,
            disable_input_limit: true,
            ..Config::default()
        };
        let info = ConfigInfo::from_config(&config, &ConfigSources::default()).unwrap();
        assert_eq!(info.windows, vec![100]);
        assert_eq!(info.inaccuracy_threshold, 150);
        assert!(!info.group_thousands);
        assert!(info.max_input_bytes.is_none());
    }

    #[test]
    fn invalid_windows_fail() {
        let config = Config {
            windows: Some(Vec::new()),
            ..Config::default()
        };
        assert!(ConfigInfo::from_config(&config, &ConfigSources::default()).is_err());
    }
}
