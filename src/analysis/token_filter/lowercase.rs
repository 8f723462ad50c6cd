//! Lowercasing.
//!
//! Offsets and increments are untouched, so a lowercased token keeps its
//! span and an alternate writing that only differs in case collapses into
//! a duplicate of its concept.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Lowercases every token not marked as a stop word.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }

    fn lower(mut token: Token) -> Token {
        if !token.is_stopped() && token.text.chars().any(char::is_uppercase) {
            token.text = token.text.to_lowercase();
        }
        token
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(Self::lower)))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
