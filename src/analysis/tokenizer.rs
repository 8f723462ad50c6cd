//! Tokenizers: the first stage of an analyzer.
//!
//! A tokenizer cuts the text into tokens, each moving the position by one
//! and carrying the byte range it was cut from. The span tree relies on
//! those ranges, so every tokenizer here reports exact byte offsets.
//!
//! - [`whitespace::WhitespaceTokenizer`]: runs of non-whitespace
//! - [`unicode_word::UnicodeWordTokenizer`]: Unicode word boundaries
//! - [`regex::RegexTokenizer`]: regex matches, or the text between them

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Cuts text into tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Short name shown in analyzer descriptions.
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod unicode_word;
pub mod whitespace;

pub use self::regex::RegexTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;
