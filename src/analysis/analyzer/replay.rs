//! Replay analyzer: hands out a fixed token stream whatever the input text.
//!
//! Useful to reproduce the exact token graph of another analysis chain, for
//! instance when testing how nested spans compile.
//!
//! # Examples
//!
//! ```
//! use spanfold::analysis::analyzer::{Analyzer, ReplayAnalyzer};
//!
//! //                                 text  incr start end
//! let analyzer = ReplayAnalyzer::new(vec![("a", 0, 0, 1), ("A", 0, 0, 1)]);
//! let tokens: Vec<_> = analyzer.analyze("ignored").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[1].text, "A");
//! assert_eq!(tokens[1].position_increment, 0);
//! ```

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, SpanfoldError};

/// An analyzer replaying a recorded token stream.
#[derive(Clone, Debug)]
pub struct ReplayAnalyzer {
    tokens: Vec<Token>,
}

impl ReplayAnalyzer {
    /// Create an analyzer from `(text, position_increment, start, end)` records.
    pub fn new<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, usize, usize, usize)>,
        S: Into<String>,
    {
        let mut position = 0;
        let tokens = records
            .into_iter()
            .map(|(text, increment, start, end)| {
                position += increment;
                Token::with_offsets(text, position, start, end).with_position_increment(increment)
            })
            .collect();

        ReplayAnalyzer { tokens }
    }

    /// Create an analyzer from parallel columns of texts, increments and offsets.
    pub fn from_columns(
        texts: &[&str],
        increments: &[usize],
        starts: &[usize],
        ends: &[usize],
    ) -> Result<Self> {
        let len = texts.len();
        if increments.len() != len || starts.len() != len || ends.len() != len {
            return Err(SpanfoldError::analysis(format!(
                "Replay columns differ in length: {} texts, {} increments, {} starts, {} ends",
                len,
                increments.len(),
                starts.len(),
                ends.len()
            )));
        }

        Ok(Self::new((0..len).map(|i| (texts[i], increments[i], starts[i], ends[i]))))
    }

    /// Get the replayed tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl Analyzer for ReplayAnalyzer {
    fn analyze(&self, _text: &str) -> Result<TokenStream> {
        Ok(Box::new(self.tokens.clone().into_iter()))
    }

    fn name(&self) -> &str {
        "replay"
    }
}
