//! JSON request layer.
//!
//! [`RequestParser`] turns request documents into queries, resolving analyzer
//! and provider names through registries. The builders render the same
//! documents from code.

pub mod builder;
pub mod parser;

pub use builder::{AcrossFieldsRequestBuilder, AcrossVariantsRequestBuilder};
pub use parser::RequestParser;
