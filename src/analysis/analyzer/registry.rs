//! Analyzers looked up by name.
//!
//! Requests name the analyzer to run over their text. The registry resolves
//! those names and knows which analyzer is the default search analyzer.

use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analysis::analyzer::whitespace::WhitespaceAnalyzer;
use crate::analysis::analyzer::Analyzer;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::word_delimiter::WordDelimiterFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::{Result, SpanfoldError};

/// Name of the analyzer used when a request names none.
pub const DEFAULT_ANALYZER: &str = "standard";

/// A name → analyzer map.
///
/// # Example
///
/// ```
/// use spanfold::analysis::analyzer::{Analyzer, AnalyzerRegistry, WhitespaceAnalyzer};
/// use std::sync::Arc;
///
/// let mut registry = AnalyzerRegistry::with_defaults().unwrap();
/// registry.register("raw", Arc::new(WhitespaceAnalyzer::new()));
///
/// assert_eq!(registry.get("raw").unwrap().name(), "whitespace");
/// assert_eq!(registry.default_analyzer().unwrap().name(), "standard");
/// assert!(registry.get("missing").is_err());
/// ```
#[derive(Clone, Default)]
pub struct AnalyzerRegistry {
    analyzers: AHashMap<String, Arc<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        AnalyzerRegistry::default()
    }

    /// Create a registry holding the built-in analyzers:
    /// `standard`, `simple`, `whitespace`, `word_delimiter` and `pattern`
    /// (lowercased parts split on whitespace, hyphens and underscores).
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(DEFAULT_ANALYZER, Arc::new(StandardAnalyzer::new()?));
        registry.register("simple", Arc::new(StandardAnalyzer::without_stop_words()?));
        registry.register("whitespace", Arc::new(WhitespaceAnalyzer::new()));
        registry.register(
            "word_delimiter",
            Arc::new(
                PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
                    .add_filter(Arc::new(WordDelimiterFilter::new()))
                    .add_filter(Arc::new(LowercaseFilter::new()))
                    .with_name("word_delimiter"),
            ),
        );
        registry.register(
            "pattern",
            Arc::new(
                PipelineAnalyzer::new(Arc::new(RegexTokenizer::with_gaps(r"[\s\-_]+")?))
                    .add_filter(Arc::new(LowercaseFilter::new()))
                    .with_name("pattern"),
            ),
        );
        Ok(registry)
    }

    /// Register (or replace) an analyzer under `name`.
    pub fn register(&mut self, name: impl Into<String>, analyzer: Arc<dyn Analyzer>) {
        self.analyzers.insert(name.into(), analyzer);
    }

    /// Look up an analyzer by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Analyzer>> {
        self.analyzers
            .get(name)
            .cloned()
            .ok_or_else(|| SpanfoldError::analysis(format!("Unknown analyzer [{name}]")))
    }

    /// The analyzer registered as [`DEFAULT_ANALYZER`].
    pub fn default_analyzer(&self) -> Result<Arc<dyn Analyzer>> {
        self.get(DEFAULT_ANALYZER)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.analyzers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for AnalyzerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerRegistry")
            .field("analyzers", &self.names())
            .finish()
    }
}
