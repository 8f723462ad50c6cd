//! Words by Unicode segmentation (UAX #29).
//!
//! Segments without any alphanumeric character (spaces, punctuation) are
//! not tokens. `wi-fi` therefore yields two words; use the whitespace
//! tokenizer with the word delimiter filter to keep the compound as well.

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Unicode word tokenizer.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        for (start, segment) in text.split_word_bound_indices() {
            if is_word(segment) {
                let end = start + segment.len();
                tokens.push(Token::with_offsets(segment, tokens.len(), start, end));
            }
        }
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<(String, usize, usize)> {
        UnicodeWordTokenizer::new()
            .tokenize(text)
            .unwrap()
            .map(|t| (t.text, t.start_offset, t.end_offset))
            .collect()
    }

    #[test]
    fn test_compound_is_split() {
        assert_eq!(
            spans("a wi-fi, hotspot!"),
            vec![
                ("a".to_string(), 0, 1),
                ("wi".to_string(), 2, 4),
                ("fi".to_string(), 5, 7),
                ("hotspot".to_string(), 9, 16),
            ]
        );
    }

    #[test]
    fn test_byte_offsets() {
        let spans = spans("café résumé");
        assert_eq!(spans[1], ("résumé".to_string(), "café ".len(), "café résumé".len()));
    }
}
