//! Tokens as analyzers hand them to the query layer.
//!
//! Besides its text a [`Token`] records the byte range it was cut from and
//! how far it moves the position counter. An increment of zero stacks the
//! token on the previous position, which is how filters emit decompositions
//! and alternate spellings:
//!
//! ```text
//! "wi-fi hotspot"
//!
//!   "wi-fi"   +1  0..5
//!   "wi"      +0  0..2    nested in wi-fi
//!   "fi"      +0  3..5    nested in wi-fi
//!   "hotspot" +1  6..13
//! ```
//!
//! ```
//! use spanfold::analysis::token::Token;
//!
//! let part = Token::with_offsets("wi-fi", 0, 0, 5).with_text("fi").with_position_increment(0);
//! assert_eq!((part.start_offset, part.end_offset), (0, 5));
//! assert_eq!(part.position_increment, 0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One analyzed token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,

    /// Index assigned by the tokenizer; filters do not maintain it.
    pub position: usize,

    /// Byte offsets into the analyzed text.
    pub start_offset: usize,
    pub end_offset: usize,

    /// Set by a filter that keeps a stop word in the stream.
    pub stopped: bool,

    /// Positions moved since the previous token: 1 for the next word, 0 for
    /// a token stacked on the previous one, more after removed words.
    pub position_increment: usize,
}

impl Token {
    /// A token without offsets.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::with_offsets(text, position, 0, 0)
    }

    /// A token cut from `start_offset..end_offset`.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            stopped: false,
            position_increment: 1,
        }
    }

    /// Byte length of the text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark as a stop word kept in the stream.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// A copy of this token, same span and position, with other text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        Token {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@+{}[{}..{}]",
            self.text, self.position_increment, self.start_offset, self.end_offset
        )
    }
}

/// The stream an analyzer produces.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
