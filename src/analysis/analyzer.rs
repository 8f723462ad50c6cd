//! Analyzers: text in, positioned tokens out.
//!
//! The query layer only needs a finite stream of tokens with text, byte
//! offsets and position increments; everything here produces one.
//!
//! - [`StandardAnalyzer`]: Unicode words, lowercase, English stop words
//! - [`WhitespaceAnalyzer`]: whitespace split, nothing else
//! - [`PipelineAnalyzer`]: any tokenizer followed by any filters
//! - [`ReplayAnalyzer`]: a recorded token stream, whatever the text
//! - [`AnalyzerRegistry`]: analyzers by name
//!
//! ```
//! use spanfold::analysis::analyzer::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let tokens: Vec<_> = analyzer.analyze("Hello the World").unwrap().collect();
//!
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[1].position_increment, 2);
//! ```

use std::fmt;

use crate::analysis::token::TokenStream;
use crate::error::Result;

mod pipeline;
mod registry;
mod replay;
mod standard;
mod whitespace;

pub use pipeline::PipelineAnalyzer;
pub use registry::{AnalyzerRegistry, DEFAULT_ANALYZER};
pub use replay::ReplayAnalyzer;
pub use standard::StandardAnalyzer;
pub use whitespace::WhitespaceAnalyzer;

/// Turns text into tokens. Shared between concurrent queries.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Name the analyzer is known by.
    fn name(&self) -> &str;
}

impl fmt::Debug for dyn Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Analyzer({})", self.name())
    }
}
