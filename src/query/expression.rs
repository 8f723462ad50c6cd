//! Engine-agnostic boolean expressions.
//!
//! [`Expression`] is what the compiler produces and what a downstream
//! materializer walks to build native query or filter objects. The
//! constructors [`Expression::and`], [`Expression::or`] and
//! [`Expression::soft_or`] collapse single-clause wrappers, so a
//! one-element conjunction or disjunction never appears in a built tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A boolean match expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// A single field/term match.
    Leaf {
        /// Field to look the term up in.
        field: String,
        /// Exact term text.
        term: String,
        /// Weight of the match; 1.0 when unweighted.
        boost: f32,
    },
    /// Every clause must match.
    And(Vec<Expression>),
    /// At least one clause must match.
    Or(Vec<Expression>),
    /// At least one clause must match; when scored, the best clause
    /// dominates and the others contribute `tie_breaker` of their score.
    SoftOr {
        /// Share of the non-best clauses' scores, in `[0, 1]`.
        tie_breaker: f32,
        /// The alternatives.
        clauses: Vec<Expression>,
    },
    /// A weighted sub-expression.
    Boost {
        /// Weight applied to the whole sub-expression.
        boost: f32,
        /// The weighted expression.
        expression: Box<Expression>,
    },
    /// Matches everything: the expression of an empty query.
    MatchAll,
    /// Matches nothing: the expression of an empty disjunction.
    MatchNone,
}

impl Expression {
    /// An unweighted leaf.
    pub fn leaf<F: Into<String>, T: Into<String>>(field: F, term: T) -> Self {
        Expression::Leaf {
            field: field.into(),
            term: term.into(),
            boost: 1.0,
        }
    }

    /// A weighted leaf.
    pub fn boosted_leaf<F: Into<String>, T: Into<String>>(field: F, term: T, boost: f32) -> Self {
        Expression::Leaf {
            field: field.into(),
            term: term.into(),
            boost,
        }
    }

    /// Conjunction of `clauses`.
    ///
    /// One clause is returned as is and no clause yields [`Expression::MatchAll`].
    pub fn and(mut clauses: Vec<Expression>) -> Self {
        match clauses.len() {
            0 => Expression::MatchAll,
            1 => clauses.remove(0),
            _ => Expression::And(clauses),
        }
    }

    /// Disjunction of `clauses`.
    ///
    /// One clause is returned as is and no clause yields [`Expression::MatchNone`].
    pub fn or(mut clauses: Vec<Expression>) -> Self {
        match clauses.len() {
            0 => Expression::MatchNone,
            1 => clauses.remove(0),
            _ => Expression::Or(clauses),
        }
    }

    /// Soft disjunction of `clauses`, collapsing like [`Expression::or`].
    pub fn soft_or(tie_breaker: f32, mut clauses: Vec<Expression>) -> Self {
        match clauses.len() {
            0 => Expression::MatchNone,
            1 => clauses.remove(0),
            _ => Expression::SoftOr {
                tie_breaker,
                clauses,
            },
        }
    }

    /// Apply a weight to this expression.
    ///
    /// A weight of 1.0 leaves the expression untouched. Leaves and boosts
    /// multiply their own weight; anything else gets wrapped.
    pub fn with_boost(self, weight: f32) -> Self {
        if weight == 1.0 {
            return self;
        }
        match self {
            Expression::Leaf { field, term, boost } => Expression::Leaf {
                field,
                term,
                boost: boost * weight,
            },
            Expression::Boost { boost, expression } => Expression::Boost {
                boost: boost * weight,
                expression,
            },
            other => Expression::Boost {
                boost: weight,
                expression: Box::new(other),
            },
        }
    }

    /// The same expression with every scoring aspect removed: weights reset
    /// to 1.0, boost wrappers dropped and soft disjunctions turned into plain ones.
    pub fn without_scoring(self) -> Self {
        match self {
            Expression::Leaf { field, term, .. } => Expression::Leaf {
                field,
                term,
                boost: 1.0,
            },
            Expression::And(clauses) => {
                Expression::And(clauses.into_iter().map(Expression::without_scoring).collect())
            }
            Expression::Or(clauses) | Expression::SoftOr { clauses, .. } => {
                Expression::Or(clauses.into_iter().map(Expression::without_scoring).collect())
            }
            Expression::Boost { expression, .. } => expression.without_scoring(),
            other => other,
        }
    }

    /// Whether this is [`Expression::MatchAll`].
    pub fn is_match_all(&self) -> bool {
        matches!(self, Expression::MatchAll)
    }

    /// Sub-expressions of a compound expression.
    pub fn clauses(&self) -> &[Expression] {
        match self {
            Expression::And(clauses)
            | Expression::Or(clauses)
            | Expression::SoftOr { clauses, .. } => clauses,
            Expression::Boost { expression, .. } => std::slice::from_ref(expression.as_ref()),
            _ => &[],
        }
    }

    /// Number of leaves in the expression.
    pub fn leaf_count(&self) -> usize {
        match self {
            Expression::Leaf { .. } => 1,
            _ => self.clauses().iter().map(Expression::leaf_count).sum(),
        }
    }

    /// Nesting depth; leaves and match-all/none count as 1.
    pub fn depth(&self) -> usize {
        1 + self
            .clauses()
            .iter()
            .map(Expression::depth)
            .max()
            .unwrap_or(0)
    }
}

fn write_clauses(
    f: &mut fmt::Formatter<'_>,
    clauses: &[Expression],
    prefix: &str,
    separator: &str,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{prefix}{clause}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Leaf { field, term, boost } => {
                write!(f, "{field}:{term}")?;
                if *boost != 1.0 {
                    write!(f, "^{boost}")?;
                }
                Ok(())
            }
            Expression::And(clauses) => write_clauses(f, clauses, "+", " "),
            Expression::Or(clauses) => write_clauses(f, clauses, "", " "),
            Expression::SoftOr {
                tie_breaker,
                clauses,
            } => {
                write_clauses(f, clauses, "", " | ")?;
                write!(f, "~{tie_breaker}")
            }
            Expression::Boost { boost, expression } => write!(f, "{expression}^{boost}"),
            Expression::MatchAll => write!(f, "*:*"),
            Expression::MatchNone => write!(f, "-*:*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clause_collapses() {
        let leaf = Expression::leaf("title", "a");
        assert_eq!(Expression::and(vec![leaf.clone()]), leaf);
        assert_eq!(Expression::or(vec![leaf.clone()]), leaf);
        assert_eq!(Expression::soft_or(0.3, vec![leaf.clone()]), leaf);
    }

    #[test]
    fn test_empty_clauses() {
        assert_eq!(Expression::and(vec![]), Expression::MatchAll);
        assert_eq!(Expression::or(vec![]), Expression::MatchNone);
        assert_eq!(Expression::soft_or(0.1, vec![]), Expression::MatchNone);
    }

    #[test]
    fn test_with_boost() {
        let leaf = Expression::boosted_leaf("title", "a", 2.0).with_boost(3.0);
        assert_eq!(leaf, Expression::boosted_leaf("title", "a", 6.0));

        let unchanged = Expression::leaf("title", "a").with_boost(1.0);
        assert_eq!(unchanged, Expression::leaf("title", "a"));

        let or = Expression::or(vec![Expression::leaf("f", "a"), Expression::leaf("f", "b")]);
        match or.clone().with_boost(2.0) {
            Expression::Boost { boost, expression } => {
                assert_eq!(boost, 2.0);
                assert_eq!(*expression, or);
            }
            other => panic!("expected a boost wrapper, got {other:?}"),
        }
    }

    #[test]
    fn test_without_scoring() {
        let scored = Expression::soft_or(
            0.5,
            vec![
                Expression::boosted_leaf("f1", "a", 2.0),
                Expression::leaf("f2", "a").with_boost(1.0),
            ],
        )
        .with_boost(4.0);

        assert_eq!(
            scored.without_scoring(),
            Expression::Or(vec![Expression::leaf("f1", "a"), Expression::leaf("f2", "a")])
        );
    }

    #[test]
    fn test_display() {
        let expression = Expression::and(vec![
            Expression::leaf("f", "a"),
            Expression::or(vec![
                Expression::boosted_leaf("f", "wi-fi", 2.0),
                Expression::and(vec![Expression::leaf("f", "wi"), Expression::leaf("f", "fi")]),
            ]),
        ]);
        assert_eq!(expression.to_string(), "(+f:a +(f:wi-fi^2 (+f:wi +f:fi)))");

        let soft = Expression::soft_or(
            0.1,
            vec![Expression::leaf("f1", "a"), Expression::leaf("f2", "a")],
        );
        assert_eq!(soft.to_string(), "(f1:a | f2:a)~0.1");
        assert_eq!(soft.with_boost(2.0).to_string(), "(f1:a | f2:a)~0.1^2");
        assert_eq!(Expression::MatchAll.to_string(), "*:*");
    }

    #[test]
    fn test_counts() {
        let expression = Expression::and(vec![
            Expression::leaf("f", "a"),
            Expression::or(vec![Expression::leaf("f", "b"), Expression::leaf("f", "c")]),
        ]);
        assert_eq!(expression.leaf_count(), 3);
        assert_eq!(expression.depth(), 3);
        assert_eq!(Expression::MatchAll.leaf_count(), 0);
    }

    #[test]
    fn test_serde() {
        let expression = Expression::or(vec![
            Expression::boosted_leaf("f", "a", 2.0),
            Expression::MatchAll,
        ]);
        let json = serde_json::to_value(&expression).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "or": [
                    { "leaf": { "field": "f", "term": "a", "boost": 2.0 } },
                    "match_all"
                ]
            })
        );
        let back: Expression = serde_json::from_value(json).unwrap();
        assert_eq!(back, expression);
    }
}
