//! The default search analyzer.
//!
//! Unicode words, lowercased, with common English stop words dropped. A
//! dropped stop word still takes up its position: the next word carries a
//! larger position increment.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::token_filter::synonym::SynonymFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// Word analysis used when a request names no analyzer.
#[derive(Clone, Debug)]
pub struct StandardAnalyzer {
    pipeline: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Words, lowercase, stop words removed.
    pub fn new() -> Result<Self> {
        Ok(Self::assemble("standard", true, None))
    }

    /// Words and lowercase only; registered as `simple`.
    pub fn without_stop_words() -> Result<Self> {
        Ok(Self::assemble("simple", false, None))
    }

    /// Standard analysis followed by `synonyms`, which stacks each synonym
    /// on the span of the word it replaces.
    pub fn with_synonyms(synonyms: SynonymFilter) -> Result<Self> {
        Ok(Self::assemble("standard_synonyms", true, Some(synonyms)))
    }

    fn assemble(name: &str, stop_words: bool, synonyms: Option<SynonymFilter>) -> Self {
        let mut pipeline = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()));
        if stop_words {
            pipeline = pipeline.add_filter(Arc::new(StopFilter::new()));
        }
        if let Some(synonyms) = synonyms {
            pipeline = pipeline.add_filter(Arc::new(synonyms));
        }

        StandardAnalyzer {
            pipeline: pipeline.with_name(name),
        }
    }

    /// The underlying tokenizer and filters.
    pub fn pipeline(&self) -> &PipelineAnalyzer {
        &self.pipeline
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.pipeline.analyze(text)
    }

    fn name(&self) -> &str {
        self.pipeline.name()
    }
}
