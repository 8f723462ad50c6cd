//! Positioned terms: the span model the span tree is built on.
//!
//! A [`PositionedTerm`] is one token occurrence reduced to what the tree
//! needs: its text, its `[start, end]` byte range and its absolute position.
//! Terms are totally ordered by position, then start offset ascending, then
//! end offset *descending*, so that among terms starting at the same place
//! the longest one comes first and is seen before the terms it contains.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;

/// One token occurrence with its span.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionedTerm {
    /// The token's surface form.
    pub text: String,
    /// Byte offset where the token starts.
    pub start: usize,
    /// Byte offset where the token ends.
    pub end: usize,
    /// Absolute position; equal positions denote the same logical slot.
    pub position: usize,
}

impl PositionedTerm {
    /// Create a new positioned term.
    pub fn new<S: Into<String>>(text: S, start: usize, end: usize, position: usize) -> Self {
        PositionedTerm {
            text: text.into(),
            start,
            end,
            position,
        }
    }

    /// Compare the spans of two terms, ignoring their text.
    pub fn cmp_span(&self, other: &PositionedTerm) -> Ordering {
        self.position
            .cmp(&other.position)
            .then(self.start.cmp(&other.start))
            .then(other.end.cmp(&self.end))
    }

    /// Whether both terms cover the very same span at the same position.
    pub fn same_span(&self, other: &PositionedTerm) -> bool {
        self.cmp_span(other) == Ordering::Equal
    }

    /// Whether this term's span encloses `other`'s at the same position.
    pub fn contains(&self, other: &PositionedTerm) -> bool {
        self.position == other.position && self.start <= other.start && self.end >= other.end
    }

    /// Whether the two spans overlap without one containing the other.
    pub fn partially_overlaps(&self, other: &PositionedTerm) -> bool {
        self.position == other.position
            && self.start < other.end
            && other.start < self.end
            && !self.contains(other)
            && !other.contains(self)
    }
}

impl Ord for PositionedTerm {
    /// Span order first; text only breaks ties so that `Ord` agrees with `Eq`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_span(other).then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for PositionedTerm {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PositionedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\":[{},{}:{}]",
            self.text, self.position, self.start, self.end
        )
    }
}

/// Turn an analyzed token stream into positioned terms.
///
/// Absolute positions are the running sum of the tokens' position
/// increments. Stopped tokens are dropped but their increment still counts.
pub fn collect_terms<I>(tokens: I) -> Vec<PositionedTerm>
where
    I: IntoIterator<Item = Token>,
{
    let mut position = 0;
    let mut terms = Vec::new();

    for token in tokens {
        position += token.position_increment;
        if token.is_stopped() {
            continue;
        }
        terms.push(PositionedTerm::new(
            token.text,
            token.start_offset,
            token.end_offset,
            position,
        ));
    }

    terms
}
