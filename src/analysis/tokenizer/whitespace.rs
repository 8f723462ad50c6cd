//! Runs of non-whitespace characters.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Whitespace tokenizer. Punctuation stays inside the token, so `wi-fi` is
/// one token for the word delimiter filter to split.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut word_start = None;

        let boundaries = text
            .char_indices()
            .map(|(offset, c)| (offset, c.is_whitespace()))
            .chain(std::iter::once((text.len(), true)));
        for (offset, at_space) in boundaries {
            match (word_start, at_space) {
                (Some(start), true) => {
                    let word = &text[start..offset];
                    tokens.push(Token::with_offsets(word, tokens.len(), start, offset));
                    word_start = None;
                }
                (None, false) => word_start = Some(offset),
                _ => {}
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
