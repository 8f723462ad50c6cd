//! Stop word filter.
//!
//! A removed stop word leaves a hole in the position sequence: its
//! increment moves onto the next kept token. Stop words can also be kept in
//! the stream, marked as stopped; the span tree builder then skips them while
//! still counting their position.
//!
//! ```
//! use spanfold::analysis::token_filter::Filter;
//! use spanfold::analysis::token_filter::stop::StopFilter;
//! use spanfold::analysis::token::Token;
//!
//! let tokens = vec![Token::new("the", 0), Token::new("hotspot", 1)];
//! let kept: Vec<_> = StopFilter::new()
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].position_increment, 2);
//! ```

use std::sync::Arc;

use ahash::AHashSet;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// English words dropped by the standard analyzer.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Drops (or marks) stop words.
#[derive(Clone, Debug)]
pub struct StopFilter {
    words: Arc<AHashSet<String>>,
    mark_only: bool,
}

impl StopFilter {
    /// A filter removing [`ENGLISH_STOP_WORDS`].
    pub fn new() -> Self {
        Self::from_words(ENGLISH_STOP_WORDS.iter().copied())
    }

    /// A filter removing `words`.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            words: Arc::new(words.into_iter().map(Into::into).collect()),
            mark_only: false,
        }
    }

    /// Keep stop words in the stream, marked as stopped.
    pub fn mark_only(mut self) -> Self {
        self.mark_only = true;
        self
    }

    /// Whether `word` is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the filter knows no stop word.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut out: Vec<Token> = Vec::new();
        let mut carried = 0;

        for token in tokens {
            let is_stop = !token.is_stopped() && self.is_stop_word(&token.text);
            match (is_stop, self.mark_only) {
                (true, true) => out.push(token.stop()),
                (true, false) => carried += token.position_increment,
                (false, _) => {
                    let increment = token.position_increment + carried;
                    carried = 0;
                    out.push(token.with_position_increment(increment));
                }
            }
        }

        Ok(Box::new(out.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
