//! The across-variants query.
//!
//! Every concept of the text must be found in at least one field. A concept
//! whose token was also emitted in decomposed form (`wi-fi` → `wi` + `fi`) or
//! with other spellings at the same span may be matched through any of them.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use spanfold::analysis::analyzer::WhitespaceAnalyzer;
//! use spanfold::query::ExpressionQuery;
//! use spanfold::query::across_variants::AcrossVariantsQuery;
//! use spanfold::query::expression::Expression;
//! use spanfold::query::fields::BoostedFields;
//!
//! let query = AcrossVariantsQuery::new(
//!     BoostedFields::from_names(["title", "body"]),
//!     Arc::new(WhitespaceAnalyzer::new()),
//!     "a",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     query.to_expression().unwrap(),
//!     Expression::or(vec![Expression::leaf("title", "a"), Expression::leaf("body", "a")])
//! );
//! assert_eq!(query.to_string(), "[title,body]:\"a\"");
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::Analyzer;
use crate::error::{Result, SpanfoldError};
use crate::query::ExpressionQuery;
use crate::query::compiler::{CombineMode, TreeCompiler};
use crate::query::expression::Expression;
use crate::query::fields::BoostedFields;
use crate::query::positioned_term::collect_terms;
use crate::query::provider::{TermExpressionProvider, TermProvider};
use crate::query::span_tree::SpanNode;

/// Query matching every concept of a text across fields and variants.
pub struct AcrossVariantsQuery {
    fields: BoostedFields,
    analyzer: Arc<dyn Analyzer>,
    text: String,
    provider: Arc<dyn TermExpressionProvider>,
    mode: CombineMode,
    boost: f32,
    tree: SpanNode,
}

impl AcrossVariantsQuery {
    /// Analyze `text` and build its span tree.
    ///
    /// Fails with a configuration error when `fields` is empty, before the
    /// analyzer runs.
    pub fn new<S: Into<String>>(
        fields: BoostedFields,
        analyzer: Arc<dyn Analyzer>,
        text: S,
    ) -> Result<Self> {
        if fields.is_empty() {
            return Err(SpanfoldError::configuration("[across_variants] no fields given"));
        }

        let text = text.into();
        let terms = collect_terms(analyzer.analyze(&text)?);
        debug!(
            "Analyzed {:?} with [{}] into {} terms",
            text,
            analyzer.name(),
            terms.len()
        );
        let tree = SpanNode::build(terms);

        Ok(AcrossVariantsQuery {
            fields,
            analyzer,
            text,
            provider: Arc::new(TermProvider),
            mode: CombineMode::AndOr,
            boost: 1.0,
            tree,
        })
    }

    /// Use `provider` to build the expression of each field/term pair.
    pub fn with_provider(mut self, provider: Arc<dyn TermExpressionProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Set how the alternatives of a concept are combined.
    pub fn with_combine_mode(mut self, mode: CombineMode) -> Self {
        self.mode = mode;
        self
    }

    /// Combine alternatives with soft disjunctions.
    pub fn with_dis_max(self, tie_breaker: f32) -> Result<Self> {
        Ok(self.with_combine_mode(CombineMode::dis_max(tie_breaker)?))
    }

    /// Set the weight of the whole query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// The configured fields.
    pub fn fields(&self) -> &BoostedFields {
        &self.fields
    }

    /// The analyzer the text was analyzed with.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// The query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The provider used for field/term pairs.
    pub fn provider(&self) -> &Arc<dyn TermExpressionProvider> {
        &self.provider
    }

    /// The combine mode.
    pub fn combine_mode(&self) -> CombineMode {
        self.mode
    }

    /// The span tree of the text.
    pub fn tree(&self) -> &SpanNode {
        &self.tree
    }
}

impl ExpressionQuery for AcrossVariantsQuery {
    fn to_expression(&self) -> Result<Expression> {
        let compiler = TreeCompiler::new(&self.fields, self.provider.as_ref(), self.mode);
        let expression = compiler.compile(&self.tree)?;
        if self.boost == 1.0 {
            return Ok(expression);
        }
        Ok(Expression::Boost {
            boost: self.boost,
            expression: Box::new(expression),
        })
    }

    fn to_filter_expression(&self) -> Result<Expression> {
        let fields = self.fields.unweighted();
        let compiler = TreeCompiler::new(&fields, self.provider.as_ref(), CombineMode::AndOr);
        Ok(compiler.compile(&self.tree)?.without_scoring())
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for AcrossVariantsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]:\"{}\"", self.fields, self.text)?;
        if self.boost != 1.0 {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}

impl fmt::Debug for AcrossVariantsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcrossVariantsQuery")
            .field("fields", &self.fields)
            .field("analyzer", &self.analyzer.name())
            .field("text", &self.text)
            .field("provider", &self.provider.name())
            .field("mode", &self.mode)
            .field("boost", &self.boost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::{ReplayAnalyzer, WhitespaceAnalyzer};

    fn whitespace() -> Arc<dyn Analyzer> {
        Arc::new(WhitespaceAnalyzer::new())
    }

    #[test]
    fn test_no_fields_is_a_configuration_error() {
        let result = AcrossVariantsQuery::new(BoostedFields::new(), whitespace(), "a");
        assert!(matches!(result, Err(SpanfoldError::Configuration(_))));
    }

    #[test]
    fn test_empty_text_matches_all() {
        let query =
            AcrossVariantsQuery::new(BoostedFields::from_names(["f"]), whitespace(), "").unwrap();
        assert_eq!(query.to_expression().unwrap(), Expression::MatchAll);
    }

    #[test]
    fn test_tree_is_built_eagerly() {
        let analyzer = Arc::new(ReplayAnalyzer::new(vec![
            ("wi-fi", 1, 0, 5),
            ("wi", 0, 0, 2),
            ("fi", 0, 3, 5),
        ]));
        let query =
            AcrossVariantsQuery::new(BoostedFields::from_names(["f"]), analyzer, "wi-fi").unwrap();
        assert_eq!(query.tree().concept_count(), 3);
        assert_eq!(query.tree().depth(), 2);
    }

    #[test]
    fn test_query_boost_wraps_expression() {
        let query = AcrossVariantsQuery::new(BoostedFields::from_names(["f"]), whitespace(), "a")
            .unwrap()
            .with_boost(2.0);
        assert_eq!(
            query.to_expression().unwrap(),
            Expression::Boost {
                boost: 2.0,
                expression: Box::new(Expression::leaf("f", "a")),
            }
        );
    }

    #[test]
    fn test_filter_expression_ignores_weights() {
        let fields = BoostedFields::parse("f1,f2^3").unwrap();
        let query = AcrossVariantsQuery::new(fields, whitespace(), "a")
            .unwrap()
            .with_dis_max(0.5)
            .unwrap()
            .with_boost(2.0);
        assert_eq!(
            query.to_filter_expression().unwrap(),
            Expression::Or(vec![Expression::leaf("f1", "a"), Expression::leaf("f2", "a")])
        );
    }

    #[test]
    fn test_display() {
        let fields = BoostedFields::parse("title,body^2").unwrap();
        let query = AcrossVariantsQuery::new(fields, whitespace(), "wi-fi hotspot").unwrap();
        assert_eq!(query.to_string(), "[title,body^2]:\"wi-fi hotspot\"");
        assert_eq!(query.with_boost(1.5).to_string(), "[title,body^2]:\"wi-fi hotspot\"^1.5");
    }

    #[test]
    fn test_invalid_tie_breaker() {
        let query =
            AcrossVariantsQuery::new(BoostedFields::from_names(["f"]), whitespace(), "a").unwrap();
        assert!(query.with_dis_max(3.0).is_err());
    }
}
