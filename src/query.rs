//! Query compilation: from analyzed text to boolean expressions.
//!
//! ```text
//! tokens → positioned terms → span tree → compiler → Expression
//!                                            ↑
//!                               fields + provider + combine mode
//! ```

use std::fmt;

use crate::error::Result;

pub mod across_fields;
pub mod across_variants;
pub mod compiler;
pub mod expression;
pub mod fields;
pub mod matcher;
pub mod positioned_term;
pub mod provider;
pub mod span_tree;

pub use across_fields::AcrossFieldsQuery;
pub use across_variants::AcrossVariantsQuery;
pub use compiler::{CombineMode, CompilerConfig, TreeCompiler};
pub use expression::Expression;
pub use fields::BoostedFields;
pub use matcher::{MemoryDocument, MemoryIndex};
pub use positioned_term::PositionedTerm;
pub use provider::{ProviderRegistry, TermExpressionProvider, TermProvider};
pub use span_tree::SpanNode;

/// A query that compiles to an [`Expression`].
pub trait ExpressionQuery: fmt::Display + fmt::Debug + Send + Sync {
    /// The scoring expression, query boost included.
    fn to_expression(&self) -> Result<Expression>;

    /// The expression to use as a filter: no weights, no soft disjunctions.
    fn to_filter_expression(&self) -> Result<Expression>;

    /// Weight of the whole query.
    fn boost(&self) -> f32;
}
