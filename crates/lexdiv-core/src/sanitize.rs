//! Input sanitizing.
//!
//! Replaces ASCII control characters with spaces and drops code units that
//! cannot be represented as text. Raw host input arrives as bytes in UTF-8 or
//! BOM-marked UTF-16; [`decode_text`] turns it into a string and
//! [`sanitize_with`] applies the character-level cleanup.
//!
//! All functions here are total: they never fail and never panic.

use serde::{Deserialize, Serialize};

/// How surrogate-range code units are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SurrogatePolicy {
    /// Drop only code units that do not decode (lone surrogates, invalid
    /// UTF-8). Characters outside the Basic Multilingual Plane survive.
    #[default]
    StripUnpaired,
    /// Drop every surrogate-range code unit, including both halves of valid
    /// pairs. Every character above U+FFFF is removed.
    StripAll,
}

impl SurrogatePolicy {
    /// Returns the policy name as used in configuration files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StripUnpaired => "strip-unpaired",
            Self::StripAll => "strip-all",
        }
    }
}

impl std::fmt::Display for SurrogatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sanitize text with the default [`SurrogatePolicy`].
pub fn sanitize(text: &str) -> String {
    sanitize_with(text, SurrogatePolicy::default())
}

/// Sanitize text, replacing ASCII control characters with a space.
///
/// A `&str` never holds unpaired surrogates, so under
/// [`SurrogatePolicy::StripUnpaired`] only control characters change.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn sanitize_with(text: &str, policy: SurrogatePolicy) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_clean(&mut out, ch, policy);
    }
    out
}

/// Decode raw input bytes into text.
///
/// A UTF-16 byte-order mark selects UTF-16 in that byte order; anything else
/// is read as UTF-8 with a leading BOM skipped. Undecodable input (invalid
/// UTF-8 sequences, lone surrogates, a dangling odd byte) is dropped rather
/// than replaced. Control characters are left alone so that line structure
/// survives for later processing (e.g. Markdown parsing).
pub fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => decode_utf8(rest),
        _ => decode_utf8(bytes),
    }
}

fn decode_utf8(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut dropped = 0usize;
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }
    if dropped > 0 {
        tracing::debug!(dropped, "dropped invalid UTF-8 bytes");
    }
    out
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let pairs = bytes.chunks_exact(2);
    let mut dropped = pairs.remainder().len();
    let units = pairs.map(|pair| unit([pair[0], pair[1]]));

    let mut out = String::with_capacity(bytes.len() / 2);
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(ch) => out.push(ch),
            Err(_) => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!(dropped, "dropped unpaired UTF-16 code units");
    }
    out
}

fn push_clean(out: &mut String, ch: char, policy: SurrogatePolicy) {
    if ch.is_ascii_control() {
        out.push(' ');
    } else if policy == SurrogatePolicy::StripAll && u32::from(ch) > 0xFFFF {
        // Encoded as a surrogate pair in UTF-16; both halves go.
    } else {
        out.push(ch);
    }
}
