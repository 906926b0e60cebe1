//! Report rendering.
//!
//! Turns MATTR scores and a word count into the multi-line description shown
//! to the user, e.g.
//!
//! ```text
//! 0.742 MATTR-100 score (0.80 typical)
//! 0.581 MATTR-500 score (0.58 typical)
//! 1,204 words
//! ```
//!
//! Which windows appear, their precision and baselines, the word-count
//! grouping and the small-sample caveat all come from [`ReportConfig`].
//! [`Preset`] carries the two stock layouts.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Deref;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::mattr::{self, MattrResult};
use crate::sanitize::{self, SurrogatePolicy};
use crate::tokenize::{self, WordClass};

/// Default caveat appended to the word count line. `{threshold}` is replaced
/// with the configured threshold.
pub const DEFAULT_CAVEAT: &str = " (may be inaccurate with <{threshold} words)";

const DEFAULT_DECIMALS: usize = 3;

/// Most decimal places a window may request. An `f64` carries no more
/// significant digits than this.
pub const MAX_DECIMALS: usize = 17;

/// Display settings for one MATTR window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowDisplay {
    /// Window size in tokens.
    pub size: NonZeroUsize,
    /// Decimal places shown for the score.
    #[serde(default = "default_decimals")]
    pub decimals: usize,
    /// Typical score shown in parentheses, rendered verbatim (e.g. "0.80").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<String>,
    /// Hide this window's line until the text has at least this many words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_words: Option<usize>,
}

const fn default_decimals() -> usize {
    DEFAULT_DECIMALS
}

impl WindowDisplay {
    /// A window with default precision, no baseline and no word minimum.
    pub const fn new(size: NonZeroUsize) -> Self {
        Self {
            size,
            decimals: DEFAULT_DECIMALS,
            baseline: None,
            min_words: None,
        }
    }

    /// Set the number of decimal places.
    #[must_use]
    pub const fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Set the typical-score text.
    #[must_use]
    pub fn with_baseline(mut self, baseline: impl Into<String>) -> Self {
        self.baseline = Some(baseline.into());
        self
    }

    /// Set the minimum word count before the line is shown.
    #[must_use]
    pub const fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = Some(min_words);
        self
    }

    /// Whether the line is shown for a text of `words` words.
    pub fn is_shown(&self, words: usize) -> bool {
        self.min_words.is_none_or(|min| words >= min)
    }

    fn render(&self, score: f64) -> String {
        let mut line = format!(
            "{} MATTR-{} score",
            format_score(score, self.decimals),
            self.size
        );
        if let Some(ref baseline) = self.baseline {
            line.push_str(&format!(" ({baseline} typical)"));
        }
        line
    }
}

/// Stock report layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Preset {
    /// MATTR-100 and MATTR-500 at three decimals, grouped word count,
    /// caveat under 100 words.
    #[default]
    Dual,
    /// MATTR-100 at two decimals, plain word count, caveat under 150 words.
    Single,
}

impl Preset {
    /// Returns the preset name as used in configuration files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dual => "dual",
            Self::Single => "single",
        }
    }

    /// The window list for this preset.
    pub fn windows(self) -> Vec<WindowDisplay> {
        match self {
            Self::Dual => vec![
                WindowDisplay::new(HUNDRED).with_baseline("0.80"),
                WindowDisplay::new(FIVE_HUNDRED)
                    .with_baseline("0.58")
                    .with_min_words(500),
            ],
            Self::Single => vec![
                WindowDisplay::new(HUNDRED)
                    .with_decimals(2)
                    .with_baseline("0.8"),
            ],
        }
    }

    /// Word count below which the caveat is shown.
    pub const fn inaccuracy_threshold(self) -> usize {
        match self {
            Self::Dual => 100,
            Self::Single => 150,
        }
    }

    /// Whether the word count uses thousands separators.
    pub const fn group_thousands(self) -> bool {
        matches!(self, Self::Dual)
    }

    /// Full report configuration for this preset.
    pub fn report_config(self) -> ReportConfig {
        ReportConfig {
            windows: self.windows(),
            inaccuracy_threshold: self.inaccuracy_threshold(),
            caveat: DEFAULT_CAVEAT.to_string(),
            group_thousands: self.group_thousands(),
            thousands_separator: ",".to_string(),
            word_class: WordClass::default(),
            surrogates: SurrogatePolicy::default(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const HUNDRED: NonZeroUsize = NonZeroUsize::new(100).expect("non-zero");
const FIVE_HUNDRED: NonZeroUsize = NonZeroUsize::new(500).expect("non-zero");

/// Everything that shapes a report, from input cleanup to rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Windows to score, in display order.
    pub windows: Vec<WindowDisplay>,
    /// Word count below which the caveat is appended.
    pub inaccuracy_threshold: usize,
    /// Caveat text; `{threshold}` is substituted.
    pub caveat: String,
    /// Group the word count in thousands.
    pub group_thousands: bool,
    /// Separator used when grouping.
    pub thousands_separator: String,
    /// Which characters form words.
    pub word_class: WordClass,
    /// How surrogates are treated when sanitizing.
    pub surrogates: SurrogatePolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Preset::default().report_config()
    }
}

impl ReportConfig {
    /// Check that the configuration can produce a meaningful report.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.windows.is_empty() {
            return Err(ConfigError::NoWindows);
        }
        if let Some(w) = self.windows.iter().find(|w| w.decimals > MAX_DECIMALS) {
            return Err(ConfigError::TooManyDecimals {
                window: w.size.get(),
                decimals: w.decimals,
                max: MAX_DECIMALS,
            });
        }
        Ok(())
    }

    /// Whether a text of `words` words gets the caveat.
    pub const fn is_inaccurate(&self, words: usize) -> bool {
        words < self.inaccuracy_threshold
    }

    fn caveat_text(&self) -> String {
        self.caveat
            .replace("{threshold}", &self.inaccuracy_threshold.to_string())
    }

    fn word_count_text(&self, words: usize) -> String {
        if self.group_thousands {
            group_thousands(words, &self.thousands_separator)
        } else {
            words.to_string()
        }
    }
}

/// The rendered description. Regenerated per input, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayReport(String);

impl DisplayReport {
    /// The description text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the description text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for DisplayReport {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DisplayReport {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Score for one configured window.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WindowReport {
    /// Window size in tokens.
    pub window: usize,
    /// MATTR score in `[0, 1]`; 1 for empty input.
    pub score: f64,
    /// `true` when the text is shorter than the window and the score is a
    /// whole-text type-token ratio.
    pub whole_text: bool,
    /// Whether the description includes this window.
    pub shown: bool,
    /// Typical score for comparison.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<String>,
}

/// Structured result of scoring one text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DiversityReport {
    /// Number of word tokens.
    pub words: usize,
    /// Number of distinct word tokens.
    pub distinct_words: usize,
    /// One entry per configured window, in display order.
    pub windows: Vec<WindowReport>,
    /// Whether the word count is below the inaccuracy threshold.
    pub inaccurate: bool,
    /// The threshold the caveat is gated on.
    pub inaccuracy_threshold: usize,
    /// The rendered description.
    pub description: String,
}

/// Sanitize, tokenize, score and render `raw` in one call.
pub fn compute_report(raw: &str, config: &ReportConfig) -> DisplayReport {
    DisplayReport(analyze(raw, config).description)
}

/// Sanitize, tokenize and score `raw`, returning the structured report.
#[tracing::instrument(skip_all, fields(text_len = raw.len(), windows = config.windows.len()))]
pub fn analyze(raw: &str, config: &ReportConfig) -> DiversityReport {
    let clean = sanitize::sanitize_with(raw, config.surrogates);
    let tokens = tokenize::tokenize_with(&clean, config.word_class);
    analyze_tokens(&tokens, config)
}

/// Score an already tokenized text.
pub fn analyze_tokens<S: AsRef<str>>(tokens: &[S], config: &ReportConfig) -> DiversityReport {
    let words = tokens.len();
    let results: Vec<MattrResult> = config
        .windows
        .iter()
        .filter_map(|w| MattrResult::compute(tokens, w.size))
        .collect();

    let windows = config
        .windows
        .iter()
        .map(|w| WindowReport {
            window: w.size.get(),
            score: score_for(&results, w.size, words),
            whole_text: words < w.size.get(),
            shown: w.is_shown(words),
            baseline: w.baseline.clone(),
        })
        .collect();

    let distinct_words = mattr::distinct_count(tokens);

    tracing::debug!(words, distinct_words, "scored text");

    DiversityReport {
        words,
        distinct_words,
        windows,
        inaccurate: config.is_inaccurate(words),
        inaccuracy_threshold: config.inaccuracy_threshold,
        description: format_report(&results, words, config),
    }
}

/// Render the description for precomputed results.
///
/// Every window in `config` gets a line unless its `min_words` hides it.
/// With zero words, or when a window has no matching result, the score is 1.
pub fn format_report(results: &[MattrResult], words: usize, config: &ReportConfig) -> String {
    let mut lines: Vec<String> = config
        .windows
        .iter()
        .filter(|w| w.is_shown(words))
        .map(|w| w.render(score_for(results, w.size, words)))
        .collect();

    let mut count_line = format!("{} words", config.word_count_text(words));
    if config.is_inaccurate(words) {
        count_line.push_str(&config.caveat_text());
    }
    lines.push(count_line);

    lines.join("\n")
}

fn score_for(results: &[MattrResult], window: NonZeroUsize, words: usize) -> f64 {
    if words == 0 {
        return 1.0;
    }
    results
        .iter()
        .find(|r| r.window == window)
        .map_or(1.0, |r| r.score)
}

/// Format a non-negative score to `decimals` places, rounding a value that
/// sits exactly halfway between two outputs up (0.0625 to 3 places is
/// "0.063"). Everything else rounds to the nearest output. Precision is
/// capped at [`MAX_DECIMALS`].
pub fn format_score(score: f64, decimals: usize) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let next = decimals + 1;
    // `{:.N}` rounds exact ties to even. A tie needs the binary value to end
    // within N + 1 decimal places, which holds iff score * 2^(N+1) is an
    // integer.
    let tie = i32::try_from(next).is_ok_and(|exp| (score * 2f64.powi(exp)).fract() == 0.0)
        && format!("{score:.next$}").ends_with('5');
    let score = if tie { score.next_up() } else { score };
    format!("{score:.decimals$}")
}

/// Format `n` with `separator` between groups of three digits.
pub fn group_thousands(n: usize, separator: &str) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + separator.len() * (len / 3));
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
