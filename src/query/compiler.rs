//! Span tree to boolean expression compiler.
//!
//! The tree is folded bottom-up. Sibling concepts are always conjoined;
//! a concept is matched either directly, through any of its writings in any
//! field, or through the conjunction of its decomposition:
//!
//! ```text
//! <root>[ a, wi-fi[ wi, fi ], hotspot ]
//!
//! +a  +(wi-fi  (+wi +fi))  +hotspot
//! ```
//!
//! [`CombineMode`] only decides how the alternatives of one concept are
//! combined: a plain disjunction, or a soft disjunction with a tie breaker.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanfoldError};
use crate::query::expression::Expression;
use crate::query::fields::BoostedFields;
use crate::query::provider::TermExpressionProvider;
use crate::query::span_tree::SpanNode;

/// How the alternatives of a single concept are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombineMode {
    /// Plain disjunction.
    #[default]
    AndOr,
    /// Soft disjunction: the best alternative dominates.
    DisMax {
        /// Share of the other alternatives' scores, in `[0, 1]`.
        tie_breaker: f32,
    },
}

impl CombineMode {
    /// Soft disjunction mode, validating the tie breaker.
    pub fn dis_max(tie_breaker: f32) -> Result<Self> {
        validate_tie_breaker(tie_breaker)?;
        Ok(CombineMode::DisMax { tie_breaker })
    }

    /// Combine alternatives according to the mode.
    pub fn combine(&self, clauses: Vec<Expression>) -> Expression {
        match self {
            CombineMode::AndOr => Expression::or(clauses),
            CombineMode::DisMax { tie_breaker } => Expression::soft_or(*tie_breaker, clauses),
        }
    }
}

fn validate_tie_breaker(tie_breaker: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&tie_breaker) {
        return Err(SpanfoldError::configuration(format!(
            "tie_breaker must be within [0, 1], got {tie_breaker}"
        )));
    }
    Ok(())
}

fn default_boost() -> f32 {
    1.0
}

/// Serializable compiler settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Use soft disjunctions for concept alternatives.
    #[serde(default)]
    pub use_dis_max: bool,

    /// Tie breaker of the soft disjunctions.
    #[serde(default)]
    pub tie_breaker: f32,

    /// Weight of the whole query.
    #[serde(default = "default_boost")]
    pub boost: f32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            use_dis_max: false,
            tie_breaker: 0.0,
            boost: default_boost(),
        }
    }
}

impl CompilerConfig {
    /// Check the values are usable.
    pub fn validate(&self) -> Result<()> {
        validate_tie_breaker(self.tie_breaker)?;
        if !self.boost.is_finite() || self.boost < 0.0 {
            return Err(SpanfoldError::configuration(format!(
                "boost must be a non-negative number, got {}",
                self.boost
            )));
        }
        Ok(())
    }

    /// The combine mode these settings select.
    pub fn combine_mode(&self) -> Result<CombineMode> {
        self.validate()?;
        if self.use_dis_max {
            CombineMode::dis_max(self.tie_breaker)
        } else {
            Ok(CombineMode::AndOr)
        }
    }
}

/// Compiles span trees for a fixed set of fields, provider and mode.
pub struct TreeCompiler<'a> {
    fields: &'a BoostedFields,
    provider: &'a dyn TermExpressionProvider,
    mode: CombineMode,
}

impl<'a> TreeCompiler<'a> {
    /// Create a compiler.
    pub fn new(
        fields: &'a BoostedFields,
        provider: &'a dyn TermExpressionProvider,
        mode: CombineMode,
    ) -> Self {
        TreeCompiler {
            fields,
            provider,
            mode,
        }
    }

    /// Compile a whole tree.
    ///
    /// An empty tree compiles to [`Expression::MatchAll`]. The first provider
    /// error aborts the compilation and is returned as is.
    pub fn compile(&self, root: &SpanNode) -> Result<Expression> {
        let expression = self.compile_node(root)?;
        debug!(
            "Compiled {} concepts over {} fields into {} leaves ({} mode)",
            root.concept_count(),
            self.fields.len(),
            expression.leaf_count(),
            match self.mode {
                CombineMode::AndOr => "and_or",
                CombineMode::DisMax { .. } => "dis_max",
            }
        );
        Ok(expression)
    }

    fn compile_node(&self, node: &SpanNode) -> Result<Expression> {
        let children = node
            .children()
            .iter()
            .map(|child| self.compile_node(child))
            .collect::<Result<Vec<_>>>()?;

        let decomposition = if children.is_empty() {
            None
        } else {
            Some(Expression::and(children))
        };

        if node.is_root() {
            return Ok(decomposition.unwrap_or(Expression::MatchAll));
        }

        let direct = self.mode.combine(self.expand_writings(node)?);
        Ok(match decomposition {
            None => direct,
            Some(decomposition) => self.mode.combine(vec![direct, decomposition]),
        })
    }

    /// Every writing of the node in every field: the term in each field
    /// first, then each alternate writing in each field.
    fn expand_writings(&self, node: &SpanNode) -> Result<Vec<Expression>> {
        let writings = 1 + node.alternate_writings().len();
        let mut clauses = Vec::with_capacity(self.fields.len() * writings);
        for writing in node.writings() {
            for (field, boost) in self.fields.iter() {
                clauses.push(self.provider.expand(field, writing)?.with_boost(boost));
            }
        }
        Ok(clauses)
    }
}

/// Compile `root` in one call.
pub fn compile(
    root: &SpanNode,
    fields: &BoostedFields,
    provider: &dyn TermExpressionProvider,
    mode: CombineMode,
) -> Result<Expression> {
    TreeCompiler::new(fields, provider, mode).compile(root)
}
