//! Score command: MATTR report for a file, stdin or the clipboard.

use std::num::NonZeroUsize;

use clap::Args;
use lexdiv_core::config::Config;
use lexdiv_core::{ConfigResult, Preset, ReportConfig, SurrogatePolicy, WindowDisplay, WordClass};
use tracing::{debug, instrument};

use super::InputArgs;

/// Arguments for the `score` subcommand.
#[derive(Args, Debug, Default)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Report layout
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// MATTR window size (repeatable; replaces the preset's windows)
    #[arg(long = "window", value_name = "N")]
    pub windows: Vec<NonZeroUsize>,

    /// Show the small-sample caveat below this many words
    #[arg(long, value_name = "WORDS")]
    pub threshold: Option<usize>,

    /// Print the word count without thousands separators
    #[arg(long)]
    pub no_grouping: bool,

    /// Count any Unicode letters and digits as word characters
    #[arg(long)]
    pub unicode_words: bool,

    /// Drop every character outside the Basic Multilingual Plane
    #[arg(long)]
    pub strip_surrogates: bool,
}

impl ScoreArgs {
    fn overrides(&self) -> ReportOverrides {
        ReportOverrides {
            preset: self.preset,
            windows: self.windows.clone(),
            threshold: self.threshold,
            group_thousands: self.no_grouping.then_some(false),
            word_class: self.unicode_words.then_some(WordClass::Unicode),
            surrogates: self.strip_surrogates.then_some(SurrogatePolicy::StripAll),
        }
    }
}

/// Per-invocation changes layered over the loaded [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ReportOverrides {
    /// Replace the configured preset.
    pub preset: Option<Preset>,
    /// Replace the window list. Sizes already configured keep their display
    /// settings; new sizes get defaults.
    pub windows: Vec<NonZeroUsize>,
    /// Replace the caveat threshold.
    pub threshold: Option<usize>,
    /// Force thousands grouping on or off.
    pub group_thousands: Option<bool>,
    /// Replace the word class.
    pub word_class: Option<WordClass>,
    /// Replace the surrogate policy.
    pub surrogates: Option<SurrogatePolicy>,
}

impl ReportOverrides {
    /// Apply the overrides to `base` and resolve the report settings.
    pub fn resolve(&self, base: &Config) -> ConfigResult<ReportConfig> {
        let mut config = base.clone();
        if let Some(preset) = self.preset {
            config.preset = preset;
        }
        if !self.windows.is_empty() {
            let known = config
                .windows
                .clone()
                .unwrap_or_else(|| config.preset.windows());
            let windows = self
                .windows
                .iter()
                .map(|&size| {
                    known
                        .iter()
                        .find(|w| w.size == size)
                        .cloned()
                        .unwrap_or_else(|| WindowDisplay::new(size))
                })
                .collect();
            config.windows = Some(windows);
        }
        if let Some(threshold) = self.threshold {
            config.inaccuracy_threshold = Some(threshold);
        }
        if let Some(group) = self.group_thousands {
            config.group_thousands = Some(group);
        }
        if let Some(class) = self.word_class {
            config.word_class = class;
        }
        if let Some(policy) = self.surrogates {
            config.surrogates = policy;
        }
        config.report_config()
    }
}

/// Score the input and print the description (or the structured report).
#[instrument(name = "cmd_score", skip_all, fields(input = %args.input.label()))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        preset = ?args.preset,
        windows = ?args.windows,
        threshold = ?args.threshold,
        "executing score command"
    );

    let report_config = args.overrides().resolve(config)?;
    let text = super::read_input(&args.input, max_input, config.strip_markdown)?;
    let report = lexdiv_core::analyze(&text, &report_config);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.description);
    }

    Ok(())
}
