//! Word tokenization.
//!
//! Text is lowercased with Unicode case mapping, then split into maximal runs
//! of word characters. Everything else is a delimiter.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// ASCII word characters: `[A-Za-z0-9_]`.
static ASCII_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid regex"));

/// Unicode word characters (letters, marks, digits, connector punctuation).
static UNICODE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Which characters count as part of a word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum WordClass {
    /// Only `[A-Za-z0-9_]`. Accented letters and non-Latin scripts split words.
    #[default]
    Ascii,
    /// Any Unicode word character.
    Unicode,
}

impl WordClass {
    /// Returns the class name as used in configuration files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Unicode => "unicode",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Ascii => &ASCII_WORD,
            Self::Unicode => &UNICODE_WORD,
        }
    }
}

/// Split text into lowercase word tokens using [`WordClass::Ascii`].
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_with(text, WordClass::default())
}

/// Split text into lowercase word tokens.
///
/// Tokens keep their order in the source text and are never empty.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn tokenize_with(text: &str, class: WordClass) -> Vec<String> {
    let lowered = text.to_lowercase();
    class
        .pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        assert_eq!(
            tokenize("Hello, world! It's snake_case 42."),
            vec!["hello", "world", "it", "s", "snake_case", "42"]
        );
    }

    #[test]
    fn empty_and_delimiter_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ...  --- !!").is_empty());
    }

    #[test]
    fn leading_and_trailing_delimiters_discarded() {
        assert_eq!(tokenize("  --a--b--  "), vec!["a", "b"]);
    }

    #[test]
    fn lowercases_everything() {
        assert_eq!(tokenize("The THE the ThE"), vec!["the"; 4]);
    }

    #[test]
    fn ascii_class_splits_accented_words() {
        assert_eq!(tokenize("Café naïve"), vec!["caf", "na", "ve"]);
    }

    #[test]
    fn unicode_class_keeps_accented_words() {
        assert_eq!(
            tokenize_with("Café naïve Ελληνικά", WordClass::Unicode),
            vec!["café", "naïve", "ελληνικά"]
        );
    }

    #[test]
    fn case_mapping_can_produce_ascii() {
        // KELVIN SIGN lowercases to ASCII 'k'.
        assert_eq!(tokenize("\u{212A}ilo"), vec!["kilo"]);
    }
}
