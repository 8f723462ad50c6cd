//! Word delimiter filter implementation.
//!
//! Splits compound tokens such as `wi-fi` or `e_mail` at their delimiters and
//! stacks the parts on the position of the compound. The parts keep offsets
//! inside the compound's span, so the span tree nests them as its
//! decomposition.
//!
//! # Examples
//!
//! ```
//! use spanfold::analysis::token_filter::Filter;
//! use spanfold::analysis::token_filter::word_delimiter::WordDelimiterFilter;
//! use spanfold::analysis::token::Token;
//!
//! let filter = WordDelimiterFilter::new();
//! let tokens = vec![Token::with_offsets("wi-fi", 0, 0, 5)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["wi-fi", "wi", "fi"]);
//! assert_eq!(result[2].start_offset, 3);
//! assert_eq!(result[2].position_increment, 0);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that emits the alphanumeric parts of delimited tokens.
#[derive(Clone, Debug)]
pub struct WordDelimiterFilter {
    /// Keep the compound token in front of its parts
    preserve_original: bool,
}

impl WordDelimiterFilter {
    /// Create a filter that keeps the original token.
    pub fn new() -> Self {
        WordDelimiterFilter {
            preserve_original: true,
        }
    }

    /// Set whether the compound token itself stays in the stream.
    pub fn preserve_original(mut self, preserve: bool) -> Self {
        self.preserve_original = preserve;
        self
    }

    /// Byte ranges of the alphanumeric runs of `text`.
    fn parts(text: &str) -> Vec<(usize, usize)> {
        let mut parts = Vec::new();
        let mut start: Option<usize> = None;

        for (index, c) in text.char_indices() {
            if c.is_alphanumeric() {
                if start.is_none() {
                    start = Some(index);
                }
            } else if let Some(begin) = start.take() {
                parts.push((begin, index));
            }
        }
        if let Some(begin) = start {
            parts.push((begin, text.len()));
        }

        parts
    }

    fn split(&self, token: Token, out: &mut Vec<Token>) {
        let parts = Self::parts(&token.text);
        let is_compound = !(parts.len() == 1 && parts[0] == (0, token.text.len()));

        if token.is_stopped() || parts.is_empty() || !is_compound {
            out.push(token);
            return;
        }

        let mut increment = token.position_increment;
        if self.preserve_original {
            out.push(token.clone());
            increment = 0;
        }

        for (start, end) in parts {
            let mut part = token.with_text(&token.text[start..end]);
            part.start_offset = token.start_offset + start;
            part.end_offset = token.start_offset + end;
            part.position_increment = increment;
            out.push(part);
            increment = 0;
        }
    }
}

impl Default for WordDelimiterFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for WordDelimiterFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut out = Vec::new();
        for token in tokens {
            self.split(token, &mut out);
        }
        Ok(Box::new(out.into_iter()))
    }

    fn name(&self) -> &'static str {
        "word_delimiter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(filter: &WordDelimiterFilter, tokens: Vec<Token>) -> Vec<Token> {
        filter.filter(Box::new(tokens.into_iter())).unwrap().collect()
    }

    #[test]
    fn test_compound_is_split() {
        let filter = WordDelimiterFilter::new();
        let result = run(
            &filter,
            vec![
                Token::with_offsets("a", 0, 0, 1),
                Token::with_offsets("wi-fi", 1, 2, 7),
                Token::with_offsets("hotspot", 2, 8, 15),
            ],
        );

        let spans: Vec<(&str, usize, usize, usize)> = result
            .iter()
            .map(|t| (t.text.as_str(), t.position_increment, t.start_offset, t.end_offset))
            .collect();
        assert_eq!(
            spans,
            vec![
                ("a", 1, 0, 1),
                ("wi-fi", 1, 2, 7),
                ("wi", 0, 2, 4),
                ("fi", 0, 5, 7),
                ("hotspot", 1, 8, 15),
            ]
        );
    }

    #[test]
    fn test_without_original() {
        let filter = WordDelimiterFilter::new().preserve_original(false);
        let result = run(&filter, vec![Token::with_offsets("e_mail", 0, 0, 6)]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "e");
        assert_eq!(result[0].position_increment, 1);
        assert_eq!(result[1].text, "mail");
        assert_eq!(result[1].position_increment, 0);
    }

    #[test]
    fn test_plain_and_punctuation_only_tokens_pass_through() {
        let filter = WordDelimiterFilter::new();
        let result = run(
            &filter,
            vec![Token::with_offsets("plain", 0, 0, 5), Token::with_offsets("--", 1, 6, 8)],
        );

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "plain");
        assert_eq!(result[1].text, "--");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(WordDelimiterFilter::new().name(), "word_delimiter");
    }
}
