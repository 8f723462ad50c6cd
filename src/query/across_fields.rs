//! The across-fields query: the flat predecessor of the across-variants query.
//!
//! Every analyzed token must be found in at least one field. Tokens stacked
//! on the same position are alternatives of each other; offsets are ignored,
//! so decompositions are not recognised as such.

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::{Result, SpanfoldError};
use crate::query::ExpressionQuery;
use crate::query::expression::Expression;
use crate::query::fields::BoostedFields;
use crate::query::positioned_term::{PositionedTerm, collect_terms};

/// Query requiring each position of the text in some field.
pub struct AcrossFieldsQuery {
    fields: BoostedFields,
    analyzer: Arc<dyn Analyzer>,
    text: String,
    boost: f32,
    positions: Vec<Vec<String>>,
}

impl AcrossFieldsQuery {
    /// Analyze `text`, grouping its tokens by position.
    pub fn new<S: Into<String>>(
        fields: BoostedFields,
        analyzer: Arc<dyn Analyzer>,
        text: S,
    ) -> Result<Self> {
        if fields.is_empty() {
            return Err(SpanfoldError::configuration("[across_fields] no fields given"));
        }

        let text = text.into();
        let mut terms = collect_terms(analyzer.analyze(&text)?);
        terms.sort_by_key(|term| term.position);

        Ok(AcrossFieldsQuery {
            fields,
            analyzer,
            text,
            boost: 1.0,
            positions: group_by_position(terms),
        })
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

    /// Token texts per position, in position order.
    pub fn positions(&self) -> &[Vec<String>] {
        &self.positions
    }

    fn compile(&self, fields: &BoostedFields) -> Expression {
        let clauses = self
            .positions
            .iter()
            .map(|texts| {
                let mut alternatives = Vec::with_capacity(texts.len() * fields.len());
                for text in texts {
                    for (field, boost) in fields.iter() {
                        alternatives.push(Expression::boosted_leaf(field, text.as_str(), boost));
                    }
                }
                Expression::or(alternatives)
            })
            .collect();
        Expression::and(clauses)
    }
}

fn group_by_position(terms: Vec<PositionedTerm>) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut current = None;
    for term in terms {
        if current != Some(term.position) {
            current = Some(term.position);
            groups.push(Vec::new());
        }
        if let Some(group) = groups.last_mut() {
            group.push(term.text);
        }
    }
    groups
}

impl ExpressionQuery for AcrossFieldsQuery {
    fn to_expression(&self) -> Result<Expression> {
        Ok(self.compile(&self.fields).with_boost(self.boost))
    }

    fn to_filter_expression(&self) -> Result<Expression> {
        Ok(self.compile(&self.fields.unweighted()))
    }

    fn boost(&self) -> f32 {
        self.boost
    }
}

impl fmt::Display for AcrossFieldsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]:\"{}\"", self.fields, self.text)?;
        if self.boost != 1.0 {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}

impl fmt::Debug for AcrossFieldsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcrossFieldsQuery")
            .field("fields", &self.fields)
            .field("analyzer", &self.analyzer.name())
            .field("text", &self.text)
            .field("boost", &self.boost)
            .finish()
    }
}
