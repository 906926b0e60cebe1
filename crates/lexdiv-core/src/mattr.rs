//! Moving-Average Type-Token Ratio.
//!
//! MATTR slides a window of fixed size across the token sequence, takes the
//! type-token ratio (distinct tokens ÷ window size) of every window, and
//! averages them. Because every window has the same size, the score does not
//! drift with text length the way a plain TTR does.
//!
//! The window is maintained incrementally by [`WindowCounts`]: each slide
//! evicts one token and admits one, so a full pass costs O(n) no matter how
//! large the window is.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Occurrence counts for the tokens currently inside a window.
///
/// A token whose count drops to zero is removed, so [`distinct`](Self::distinct)
/// is always the number of types in the window.
#[derive(Debug, Default, Clone)]
pub struct WindowCounts<'a> {
    counts: HashMap<&'a str, usize>,
}

impl<'a> WindowCounts<'a> {
    /// Create an empty table sized for `capacity` distinct tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity(capacity),
        }
    }

    /// Record a token entering the window.
    pub fn admit(&mut self, token: &'a str) {
        *self.counts.entry(token).or_insert(0) += 1;
    }

    /// Record a token leaving the window.
    ///
    /// Evicting a token that is not in the window does nothing.
    pub fn evict(&mut self, token: &str) {
        if let Some(count) = self.counts.get_mut(token) {
            if *count > 1 {
                *count -= 1;
            } else {
                self.counts.remove(token);
            }
        }
    }

    /// Number of distinct tokens in the window.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Occurrences of `token` in the window.
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Whether the window holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// One computed MATTR score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MattrResult {
    /// Window size in tokens.
    pub window: NonZeroUsize,
    /// Mean type-token ratio, in `[0, 1]`.
    pub score: f64,
}

impl MattrResult {
    /// Score `tokens` with the given window. `None` for an empty sequence.
    pub fn compute<S: AsRef<str>>(tokens: &[S], window: NonZeroUsize) -> Option<Self> {
        mattr(tokens, window).map(|score| Self { window, score })
    }
}

/// Compute the MATTR of a token sequence.
///
/// - Empty input has no score and returns `None`.
/// - Input shorter than the window returns the whole-text type-token ratio.
/// - Otherwise returns the mean TTR over all `len - window + 1` windows.
#[tracing::instrument(skip(tokens), fields(tokens = tokens.len(), window = window.get()))]
pub fn mattr<S: AsRef<str>>(tokens: &[S], window: NonZeroUsize) -> Option<f64> {
    if tokens.is_empty() {
        return None;
    }
    if tokens.len() < window.get() {
        tracing::debug!("fewer tokens than window; using whole-text TTR");
        return type_token_ratio(tokens);
    }

    let num_windows = tokens.len() - window.get() + 1;
    let sum: f64 = window_ttrs(tokens, window).sum();
    Some(sum / num_windows as f64)
}

/// Distinct tokens divided by total tokens. `None` for an empty sequence.
pub fn type_token_ratio<S: AsRef<str>>(tokens: &[S]) -> Option<f64> {
    if tokens.is_empty() {
        return None;
    }
    Some(distinct_count(tokens) as f64 / tokens.len() as f64)
}

/// Number of distinct tokens in the sequence.
pub fn distinct_count<S: AsRef<str>>(tokens: &[S]) -> usize {
    tokens.iter().map(AsRef::as_ref).collect::<HashSet<&str>>().len()
}

/// Iterate over the type-token ratio of every full window, in order.
///
/// Yields nothing when the sequence is shorter than the window.
pub fn window_ttrs<S: AsRef<str>>(tokens: &[S], window: NonZeroUsize) -> WindowTtrs<'_, S> {
    WindowTtrs {
        tokens,
        window: window.get(),
        counts: WindowCounts::with_capacity(window.get().min(tokens.len())),
        next_start: 0,
    }
}

/// Iterator returned by [`window_ttrs`].
#[derive(Debug)]
pub struct WindowTtrs<'a, S> {
    tokens: &'a [S],
    window: usize,
    counts: WindowCounts<'a>,
    /// Start index of the window yielded by the next call.
    next_start: usize,
}

impl<S> WindowTtrs<'_, S> {
    fn remaining(&self) -> usize {
        (self.tokens.len() + 1)
            .saturating_sub(self.window)
            .saturating_sub(self.next_start)
    }
}

impl<'a, S: AsRef<str>> Iterator for WindowTtrs<'a, S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining() == 0 {
            return None;
        }

        let tokens: &'a [S] = self.tokens;
        let start = self.next_start;
        if start == 0 {
            for token in &tokens[..self.window] {
                self.counts.admit(token.as_ref());
            }
        } else {
            self.counts.evict(tokens[start - 1].as_ref());
            self.counts.admit(tokens[start + self.window - 1].as_ref());
        }
        self.next_start += 1;

        Some(self.counts.distinct() as f64 / self.window as f64)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<S: AsRef<str>> ExactSizeIterator for WindowTtrs<'_, S> {}
