//! Tokenizer followed by a chain of filters.
//!
//! Filter order matters: a word delimiter placed before the lowercase
//! filter sees the original casing, a synonym filter placed after it sees
//! lowercased words.
//!
//! ```
//! use spanfold::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use spanfold::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//! use spanfold::analysis::token_filter::lowercase::LowercaseFilter;
//! use spanfold::analysis::token_filter::word_delimiter::WordDelimiterFilter;
//! use std::sync::Arc;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_filter(Arc::new(WordDelimiterFilter::new()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .with_name("compound");
//!
//! let tokens: Vec<_> = analyzer.analyze("Wi-Fi").unwrap().collect();
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["wi-fi", "wi", "fi"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// An analyzer assembled from parts.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    name: String,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// A pipeline with no filter yet, named after its tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: tokenizer.name().to_string(),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Append a filter.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Rename the analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.filters
            .iter()
            .try_fold(self.tokenizer.tokenize(text)?, |tokens, filter| filter.filter(tokens))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters: Vec<&str> = self.filters.iter().map(|filter| filter.name()).collect();
        write!(f, "{}({} -> {})", self.name, self.tokenizer.name(), filters.join(" -> "))
    }
}
