//! Tokens command: print the word tokens the score is computed from.

use clap::Args;
use lexdiv_core::config::Config;
use lexdiv_core::{SurrogatePolicy, WordClass, mattr, sanitize, tokenize};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::InputArgs;

/// Arguments for the `tokens` subcommand.
#[derive(Args, Debug, Default)]
pub struct TokensArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print only the word and distinct word counts
    #[arg(long)]
    pub count: bool,

    /// Count any Unicode letters and digits as word characters
    #[arg(long)]
    pub unicode_words: bool,

    /// Drop every character outside the Basic Multilingual Plane
    #[arg(long)]
    pub strip_surrogates: bool,
}

#[derive(Debug, Serialize)]
struct TokenListing {
    words: usize,
    distinct_words: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<String>>,
}

fn listing(text: &str, class: WordClass, policy: SurrogatePolicy, with_tokens: bool) -> TokenListing {
    let clean = sanitize::sanitize_with(text, policy);
    let tokens = tokenize::tokenize_with(&clean, class);
    TokenListing {
        words: tokens.len(),
        distinct_words: mattr::distinct_count(&tokens),
        tokens: with_tokens.then_some(tokens),
    }
}

/// Tokenize the input and print one token per line, or counts only.
#[instrument(name = "cmd_tokens", skip_all, fields(input = %args.input.label()))]
pub fn cmd_tokens(
    args: TokensArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(count_only = args.count, "executing tokens command");

    let class = if args.unicode_words {
        WordClass::Unicode
    } else {
        config.word_class
    };
    let policy = if args.strip_surrogates {
        SurrogatePolicy::StripAll
    } else {
        config.surrogates
    };

    let text = super::read_input(&args.input, max_input, config.strip_markdown)?;
    let listing = listing(&text, class, policy, !args.count);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else if let Some(ref tokens) = listing.tokens {
        for token in tokens {
            println!("{token}");
        }
    } else {
        println!(
            "{} words, {} distinct",
            listing.words.bold(),
            listing.distinct_words
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_counts_and_tokens() {
        let listing = listing(
            "The cat saw the dog.",
            WordClass::Ascii,
            SurrogatePolicy::StripUnpaired,
            true,
        );
        assert_eq!(listing.words, 5);
        assert_eq!(listing.distinct_words, 4);
        assert_eq!(
            listing.tokens.as_deref(),
            Some(&["the", "cat", "saw", "the", "dog"].map(String::from)[..])
        );
    }

    #[test]
    fn count_only_omits_tokens() {
        let listing = listing("one two", WordClass::Ascii, SurrogatePolicy::StripUnpaired, false);
        assert!(listing.tokens.is_none());
        let json = serde_json::to_value(&listing).unwrap();
        assert!(json.get("tokens").is_none());
        assert_eq!(json["words"], 2);
    }

    #[test]
    fn unicode_class_keeps_accented_words() {
        let listing = listing("Café naïve", WordClass::Unicode, SurrogatePolicy::StripUnpaired, true);
        assert_eq!(
            listing.tokens.unwrap(),
            vec!["café".to_string(), "naïve".to_string()]
        );
    }
}
