//! Text analysis for Spanfold.
//!
//! Tokenizers, token filters and analyzers that produce the positioned token
//! streams the query compiler consumes.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
