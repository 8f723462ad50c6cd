//! Tokens cut by a regular expression.
//!
//! The pattern either describes the tokens themselves ([`RegexMode::Matches`])
//! or the separators between them ([`RegexMode::Gaps`], the behaviour of a
//! "pattern" tokenizer such as one splitting on `[\s-]+`).

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, SpanfoldError};

/// What the regex of a [`RegexTokenizer`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegexMode {
    /// Every match is a token.
    Matches,
    /// Every match is a separator; the text in between is a token.
    Gaps,
}

/// A regex-based tokenizer.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
    mode: RegexMode,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default pattern `\w+`.
    pub fn new() -> Result<Self> {
        Self::with_pattern(r"\w+")
    }

    /// Create a tokenizer whose matches are the tokens.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Self::build(pattern, RegexMode::Matches)
    }

    /// Create a tokenizer whose matches separate the tokens.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        Self::build(pattern, RegexMode::Gaps)
    }

    fn build(pattern: &str, mode: RegexMode) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| SpanfoldError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
            mode,
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Get what the pattern describes.
    pub fn mode(&self) -> RegexMode {
        self.mode
    }

    fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        match self.mode {
            RegexMode::Matches => self
                .pattern
                .find_iter(text)
                .map(|m| (m.start(), m.end()))
                .filter(|(start, end)| end > start)
                .collect(),
            RegexMode::Gaps => {
                let mut spans = Vec::new();
                let mut last_end = 0;
                for m in self.pattern.find_iter(text) {
                    if m.start() > last_end {
                        spans.push((last_end, m.start()));
                    }
                    last_end = m.end();
                }
                if last_end < text.len() {
                    spans.push((last_end, text.len()));
                }
                spans
            }
        }
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .spans(text)
            .into_iter()
            .enumerate()
            .map(|(position, (start, end))| {
                Token::with_offsets(&text[start..end], position, start, end)
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_keep_byte_offsets() {
        let tokenizer = RegexTokenizer::new().unwrap();
        let spans: Vec<(String, usize, usize, usize)> = tokenizer
            .tokenize("wi-fi  zone")
            .unwrap()
            .map(|t| (t.text, t.position, t.start_offset, t.end_offset))
            .collect();

        assert_eq!(
            spans,
            vec![
                ("wi".to_string(), 0, 0, 2),
                ("fi".to_string(), 1, 3, 5),
                ("zone".to_string(), 2, 7, 11),
            ]
        );
        assert_eq!(tokenizer.mode(), RegexMode::Matches);
    }

    #[test]
    fn test_gaps_split_on_hyphen() {
        let tokenizer = RegexTokenizer::with_gaps(r"[\s-]+").unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("a-b c").unwrap().collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(tokens[2].start_offset, 4);
        assert_eq!(tokenizer.mode(), RegexMode::Gaps);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(RegexTokenizer::with_pattern("(").is_err());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(RegexTokenizer::new().unwrap().name(), "regex");
    }
}
