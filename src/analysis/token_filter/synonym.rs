//! Single-word synonym filter.
//!
//! Every token found in the dictionary is followed by its synonyms, stacked
//! on the same position with the same offsets. The span tree therefore sees
//! them as alternate writings of one concept.
//!
//! # Examples
//!
//! ```
//! use spanfold::analysis::token_filter::Filter;
//! use spanfold::analysis::token_filter::synonym::SynonymFilter;
//! use spanfold::analysis::token::Token;
//!
//! let filter = SynonymFilter::new().with_synonyms("colour", ["color"]);
//! let tokens = vec![Token::with_offsets("colour", 0, 0, 6)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[1].text, "color");
//! assert_eq!(result[1].position_increment, 0);
//! assert_eq!(result[1].end_offset, 6);
//! ```

use ahash::AHashMap;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that injects synonyms at the position of the word they replace.
#[derive(Clone, Debug, Default)]
pub struct SynonymFilter {
    synonyms: AHashMap<String, Vec<String>>,
}

impl SynonymFilter {
    /// Create a filter with an empty dictionary.
    pub fn new() -> Self {
        SynonymFilter::default()
    }

    /// Register synonyms for `word`, in the order they should be emitted.
    pub fn with_synonyms<W, I, S>(mut self, word: W, synonyms: I) -> Self
    where
        W: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms
            .entry(word.into())
            .or_default()
            .extend(synonyms.into_iter().map(Into::into));
        self
    }

    /// Synonyms registered for `word`.
    pub fn synonyms_of(&self, word: &str) -> &[String] {
        self.synonyms.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of words with synonyms.
    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    /// Check if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}

impl Filter for SynonymFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut out: Vec<Token> = Vec::new();

        for token in tokens {
            let synonyms = if token.is_stopped() {
                &[][..]
            } else {
                self.synonyms_of(&token.text)
            };
            let stacked: Vec<Token> = synonyms
                .iter()
                .map(|synonym| token.with_text(synonym.as_str()).with_position_increment(0))
                .collect();
            out.push(token);
            out.extend(stacked);
        }

        Ok(Box::new(out.into_iter()))
    }

    fn name(&self) -> &'static str {
        "synonym"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms_follow_their_word() {
        let filter = SynonymFilter::new()
            .with_synonyms("tv", ["television", "telly"])
            .with_synonyms("big", ["large"]);
        let tokens = vec![
            Token::with_offsets("big", 0, 0, 3),
            Token::with_offsets("tv", 1, 4, 6),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
        let texts: Vec<(&str, usize)> = result
            .iter()
            .map(|t| (t.text.as_str(), t.position_increment))
            .collect();

        assert_eq!(
            texts,
            vec![("big", 1), ("large", 0), ("tv", 1), ("television", 0), ("telly", 0)]
        );
        assert_eq!(result[4].start_offset, 4);
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_unknown_word() {
        let filter = SynonymFilter::new();
        assert!(filter.synonyms_of("anything").is_empty());
        assert!(filter.is_empty());
    }
}
