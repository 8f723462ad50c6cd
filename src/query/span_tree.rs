//! Span containment tree.
//!
//! Tokens of one query text are arranged in a tree where a node's children
//! are the tokens whose span lies inside the node's span, and siblings are
//! disjoint spans in text order. Tokens sharing the exact span of a node are
//! folded into it as alternate writings.
//!
//! ```text
//! "a wi-fi hotspot"  with "wi-fi" also emitted as "wi" + "fi"
//!
//! <root>
//! ├── "a"
//! ├── "wi-fi"
//! │   ├── "wi"
//! │   └── "fi"
//! └── "hotspot"
//! ```
//!
//! Only nesting and adjacency are modelled. A span that partially overlaps
//! its preceding sibling is logged and inserted as a plain sibling.

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace, warn};

use crate::query::positioned_term::PositionedTerm;

/// Where [`SpanNode::add`] put a term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Recorded as an alternate writing of an existing node.
    AlternateWriting {
        /// Depth of the node that received it (1 = top level).
        depth: usize,
    },
    /// Inserted as a new node.
    NewConcept {
        /// Depth of the new node (1 = top level).
        depth: usize,
    },
}

impl Placement {
    fn nested(self) -> Self {
        match self {
            Placement::AlternateWriting { depth } => {
                Placement::AlternateWriting { depth: depth + 1 }
            }
            Placement::NewConcept { depth } => Placement::NewConcept { depth: depth + 1 },
        }
    }
}

/// A node of the containment tree: one concept of the query text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanNode {
    term: Option<PositionedTerm>,
    alternate_writings: Vec<String>,
    children: Vec<SpanNode>,
}

impl SpanNode {
    /// Create an empty root node.
    pub fn root() -> Self {
        SpanNode::default()
    }

    fn leaf(term: PositionedTerm) -> Self {
        SpanNode {
            term: Some(term),
            alternate_writings: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Build the tree for a token stream.
    ///
    /// The terms are stably sorted by span first, so the input order only
    /// matters between terms with identical spans: it becomes the order of
    /// the alternate writings.
    pub fn build<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = PositionedTerm>,
    {
        let mut terms: Vec<PositionedTerm> = terms.into_iter().collect();
        terms.sort_by(PositionedTerm::cmp_span);

        let token_count = terms.len();
        let mut root = SpanNode::root();
        for term in terms {
            root.add(term);
        }

        debug!(
            "Built span tree from {} tokens: {} top-level concepts, depth {}",
            token_count,
            root.children.len(),
            root.depth()
        );
        root
    }

    /// Place one term below this node.
    ///
    /// Terms must arrive in span order (see [`PositionedTerm::cmp_span`]) for
    /// containment to be discovered: a containing span has to be added before
    /// the spans it contains.
    pub fn add(&mut self, term: PositionedTerm) -> Placement {
        let search = self.children.binary_search_by(|child| match &child.term {
            Some(existing) => existing.cmp_span(&term),
            None => Ordering::Greater,
        });

        match search {
            Ok(index) => {
                trace!("{} is an alternate writing of {}", term.text, self.children[index]);
                self.children[index].alternate_writings.push(term.text);
                Placement::AlternateWriting { depth: 1 }
            }
            Err(index) => {
                if index > 0 {
                    let previous = &mut self.children[index - 1];
                    if let Some(span) = &previous.term {
                        if span.contains(&term) {
                            return previous.add(term).nested();
                        }
                        if span.partially_overlaps(&term) {
                            warn!(
                                "{} partially overlaps {}; inserting it as a sibling",
                                term, span
                            );
                        }
                    }
                }
                trace!("{} starts a new concept", term);
                self.children.insert(index, SpanNode::leaf(term));
                Placement::NewConcept { depth: 1 }
            }
        }
    }

    /// The term of this node; `None` for the root.
    pub fn term(&self) -> Option<&PositionedTerm> {
        self.term.as_ref()
    }

    /// Other texts seen for exactly this node's span, in stream order.
    pub fn alternate_writings(&self) -> &[String] {
        &self.alternate_writings
    }

    /// Nested concepts, in span order.
    pub fn children(&self) -> &[SpanNode] {
        &self.children
    }

    /// Whether this node is the root of a tree.
    pub fn is_root(&self) -> bool {
        self.term.is_none()
    }

    /// Whether the node has no nested concepts.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Every text this node can be written as: its term first, then the alternates.
    pub fn writings(&self) -> impl Iterator<Item = &str> {
        self.term
            .iter()
            .map(|term| term.text.as_str())
            .chain(self.alternate_writings.iter().map(String::as_str))
    }

    /// Number of levels below this node.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of concept nodes in the subtree, this node excluded.
    pub fn concept_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.concept_count() + 1)
            .sum()
    }
}

impl fmt::Display for SpanNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for alternate in &self.alternate_writings {
            write!(f, "\"{alternate}\"|")?;
        }
        match &self.term {
            Some(term) => write!(f, "{term}")?,
            None => write!(f, "root")?,
        }
        write!(f, ">[")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, "]")
    }
}
