//! # Spanfold
//!
//! Compiles free query text into boolean match expressions that require
//! every concept of the text in at least one field, while treating tokens
//! nested inside other tokens (decompositions) and tokens sharing a span
//! (alternate spellings) as alternatives of one concept.
//!
//! ## Features
//!
//! - Span containment tree over analyzed tokens
//! - Across-variants and across-fields compilation
//! - Plain or soft (tie-breaker) disjunctions
//! - Pluggable per-term expression providers
//! - Engine-agnostic expression output with in-memory evaluation
//! - JSON request layer and CLI
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use spanfold::analysis::analyzer::ReplayAnalyzer;
//! use spanfold::query::{AcrossVariantsQuery, BoostedFields, Expression, ExpressionQuery};
//!
//! // "wi-fi" also emitted as "wi" + "fi" at the same position
//! let analyzer = Arc::new(ReplayAnalyzer::new(vec![
//!     ("wi-fi", 1, 0, 5),
//!     ("wi", 0, 0, 2),
//!     ("fi", 0, 3, 5),
//! ]));
//! let fields = BoostedFields::from_names(["f"]);
//! let query = AcrossVariantsQuery::new(fields, analyzer, "wi-fi").unwrap();
//!
//! assert_eq!(
//!     query.to_expression().unwrap(),
//!     Expression::or(vec![
//!         Expression::leaf("f", "wi-fi"),
//!         Expression::and(vec![Expression::leaf("f", "wi"), Expression::leaf("f", "fi")]),
//!     ])
//! );
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod query;
pub mod request;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
