//! In-memory evaluation of expressions.
//!
//! A [`MemoryDocument`] is the set of terms indexed in each of its fields.
//! [`Expression::matches`] decides whether a document satisfies an
//! expression, and [`MemoryIndex`] runs an expression over a document set.
//! Weights play no part in matching.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;
use crate::query::expression::Expression;

/// Indexed terms of one document, per field.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    fields: AHashMap<String, AHashSet<String>>,
}

impl MemoryDocument {
    /// An empty document.
    pub fn new() -> Self {
        MemoryDocument::default()
    }

    /// Index one term in a field.
    pub fn add_term<F: Into<String>, T: Into<String>>(&mut self, field: F, term: T) {
        self.fields.entry(field.into()).or_default().insert(term.into());
    }

    /// Builder form of [`MemoryDocument::add_term`] for several terms.
    pub fn with_terms<I, T>(mut self, field: &str, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for term in terms {
            self.add_term(field, term);
        }
        self
    }

    /// Index every token the analyzer produces for `text`.
    pub fn add_text(&mut self, field: &str, text: &str, analyzer: &dyn Analyzer) -> Result<()> {
        for token in analyzer.analyze(text)? {
            if !token.is_stopped() {
                self.add_term(field, token.text);
            }
        }
        Ok(())
    }

    /// Whether `field` holds `term`.
    pub fn has_term(&self, field: &str, term: &str) -> bool {
        self.fields
            .get(field)
            .is_some_and(|terms| terms.contains(term))
    }

    /// Number of distinct terms in a field.
    pub fn term_count(&self, field: &str) -> usize {
        self.fields.get(field).map_or(0, |terms| terms.len())
    }
}

impl Expression {
    /// Whether `document` satisfies the expression.
    pub fn matches(&self, document: &MemoryDocument) -> bool {
        match self {
            Expression::Leaf { field, term, .. } => document.has_term(field, term),
            Expression::And(clauses) => clauses.iter().all(|clause| clause.matches(document)),
            Expression::Or(clauses) | Expression::SoftOr { clauses, .. } => {
                clauses.iter().any(|clause| clause.matches(document))
            }
            Expression::Boost { expression, .. } => expression.matches(document),
            Expression::MatchAll => true,
            Expression::MatchNone => false,
        }
    }
}

/// Documents indexed with one analyzer, addressed by id.
pub struct MemoryIndex {
    analyzer: Arc<dyn Analyzer>,
    documents: Vec<(String, MemoryDocument)>,
}

impl std::fmt::Debug for MemoryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryIndex")
            .field("documents", &self.documents)
            .finish_non_exhaustive()
    }
}

impl MemoryIndex {
    /// An empty index analyzing texts with `analyzer`.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        MemoryIndex {
            analyzer,
            documents: Vec::new(),
        }
    }

    /// Index a document given as `(field, text)` pairs.
    pub fn add_document<'t, I>(&mut self, id: &str, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'t str, &'t str)>,
    {
        let mut document = MemoryDocument::new();
        for (field, text) in fields {
            document.add_text(field, text, self.analyzer.as_ref())?;
        }
        self.documents.push((id.to_string(), document));
        Ok(())
    }

    /// Add an already indexed document.
    pub fn add_indexed(&mut self, id: &str, document: MemoryDocument) {
        self.documents.push((id.to_string(), document));
    }

    /// Ids of the matching documents, in indexing order.
    pub fn search(&self, expression: &Expression) -> Vec<&str> {
        self.documents
            .iter()
            .filter(|(_, document)| expression.matches(document))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index holds no document.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::WhitespaceAnalyzer;

    #[test]
    fn test_leaf_and_combinations() {
        let document = MemoryDocument::new()
            .with_terms("title", ["wi", "fi"])
            .with_terms("body", ["hotspot"]);

        assert!(Expression::leaf("title", "wi").matches(&document));
        assert!(!Expression::leaf("body", "wi").matches(&document));

        let and = Expression::and(vec![
            Expression::leaf("title", "wi"),
            Expression::leaf("body", "hotspot"),
        ]);
        assert!(and.matches(&document));

        let or = Expression::or(vec![
            Expression::leaf("title", "wi-fi"),
            Expression::leaf("title", "fi"),
        ]);
        assert!(or.matches(&document));

        let soft = Expression::soft_or(
            0.2,
            vec![Expression::leaf("title", "x"), Expression::leaf("title", "y")],
        );
        assert!(!soft.matches(&document));

        assert!(Expression::MatchAll.matches(&document));
        assert!(!Expression::MatchNone.matches(&document));
        assert!(Expression::leaf("title", "fi").with_boost(3.0).matches(&document));
    }

    #[test]
    fn test_index_search() {
        let mut index = MemoryIndex::new(Arc::new(WhitespaceAnalyzer::new()));
        index.add_document("1", [("text", "a b c")]).unwrap();
        index.add_document("2", [("text", "a c")]).unwrap();
        index.add_document("3", [("other", "a b")]).unwrap();

        let expression =
            Expression::and(vec![Expression::leaf("text", "a"), Expression::leaf("text", "b")]);
        assert_eq!(index.search(&expression), vec!["1"]);
        assert_eq!(index.search(&Expression::MatchAll), vec!["1", "2", "3"]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_term_count() {
        let mut document = MemoryDocument::new();
        document
            .add_text("text", "a a b", &WhitespaceAnalyzer::new())
            .unwrap();
        assert_eq!(document.term_count("text"), 2);
        assert_eq!(document.term_count("missing"), 0);
    }
}
