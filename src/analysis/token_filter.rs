//! Token filters: the stages after the tokenizer.
//!
//! A filter may rewrite, drop or add tokens. Added tokens with a position
//! increment of zero land on the previous position; with a span equal to
//! the original they become alternate writings, with a span inside it they
//! become its decomposition.
//!
//! - [`lowercase::LowercaseFilter`]
//! - [`stop::StopFilter`]: drops or marks stop words
//! - [`word_delimiter::WordDelimiterFilter`]: stacks the parts of `wi-fi`-like words
//! - [`synonym::SynonymFilter`]: stacks synonyms on the word's span
//!
//! ```
//! use spanfold::analysis::token::{Token, TokenStream};
//! use spanfold::analysis::token_filter::Filter;
//! use spanfold::error::Result;
//!
//! /// Stacks the plural of every word on the word itself.
//! struct PluralFilter;
//!
//! impl Filter for PluralFilter {
//!     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
//!         let out: Vec<Token> = tokens
//!             .flat_map(|token| {
//!                 let plural = token
//!                     .with_text(format!("{}s", token.text))
//!                     .with_position_increment(0);
//!                 [token, plural]
//!             })
//!             .collect();
//!         Ok(Box::new(out.into_iter()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "plural"
//!     }
//! }
//!
//! let out: Vec<Token> = PluralFilter
//!     .filter(Box::new(vec![Token::with_offsets("hotspot", 0, 0, 7)].into_iter()))
//!     .unwrap()
//!     .collect();
//! assert_eq!(out[1].text, "hotspots");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Transforms a token stream.
pub trait Filter: Send + Sync {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Short name shown in analyzer descriptions.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod stop;
pub mod synonym;
pub mod word_delimiter;

pub use lowercase::LowercaseFilter;
pub use stop::StopFilter;
pub use synonym::SynonymFilter;
pub use word_delimiter::WordDelimiterFilter;
