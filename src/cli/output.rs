//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpanfoldArgs};
use crate::error::Result;
use crate::query::expression::Expression;
use crate::query::positioned_term::PositionedTerm;
use crate::query::span_tree::SpanNode;

/// Result of the `tree` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeResult {
    pub text: String,
    pub analyzer: String,
    pub terms: Vec<PositionedTerm>,
    pub tree: String,
    pub concepts: usize,
    pub depth: usize,
    #[serde(skip)]
    pub outline: Vec<String>,
}

/// Result of the `compile` and `request` commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompileResult {
    pub query: String,
    pub filter: bool,
    pub expression: Expression,
    pub rendered: String,
    pub leaves: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<String>>,
}

/// Printable command result.
pub trait CommandOutput: Serialize {
    /// Print the result for a terminal.
    fn print_human(&self, verbosity: u8);
}

impl CommandOutput for TreeResult {
    fn print_human(&self, verbosity: u8) {
        if verbosity > 1 {
            println!("Analyzer: {}", self.analyzer);
            for term in &self.terms {
                println!("  {term}");
            }
            println!();
        }
        for line in &self.outline {
            println!("{line}");
        }
        if verbosity > 0 {
            println!();
            println!("{} concepts, depth {}", self.concepts, self.depth);
        }
    }
}

impl CommandOutput for CompileResult {
    fn print_human(&self, verbosity: u8) {
        if verbosity > 1 {
            println!("Query: {}", self.query);
            if self.filter {
                println!("Form: filter");
            }
        }
        println!("{}", self.rendered);
        if verbosity > 1 {
            println!("{} leaves", self.leaves);
        }
        if let Some(matches) = &self.matches {
            println!();
            if matches.is_empty() {
                println!("No matching documents");
            } else {
                println!("Matching documents: {}", matches.join(", "));
            }
        }
    }
}

/// Output a result in the requested format.
pub fn output_result<T: CommandOutput>(result: &T, args: &SpanfoldArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            result.print_human(args.verbosity());
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &SpanfoldArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Draw a span tree one concept per line.
pub fn outline_tree(root: &SpanNode) -> Vec<String> {
    let mut lines = vec!["<root>".to_string()];
    let count = root.children().len();
    for (i, child) in root.children().iter().enumerate() {
        outline_node(child, "", i + 1 == count, &mut lines);
    }
    lines
}

fn outline_node(node: &SpanNode, prefix: &str, last: bool, lines: &mut Vec<String>) {
    let label = node
        .writings()
        .map(|writing| format!("\"{writing}\""))
        .collect::<Vec<_>>()
        .join(" | ");
    let span = node
        .term()
        .map(|term| format!(" [{},{}:{}]", term.position, term.start, term.end))
        .unwrap_or_default();
    let branch = if last { "└── " } else { "├── " };
    lines.push(format!("{prefix}{branch}{label}{span}"));

    let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
    let count = node.children().len();
    for (i, child) in node.children().iter().enumerate() {
        outline_node(child, &child_prefix, i + 1 == count, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_tree() {
        let root = SpanNode::build(vec![
            PositionedTerm::new("a", 0, 1, 1),
            PositionedTerm::new("wi-fi", 2, 7, 2),
            PositionedTerm::new("WiFi", 2, 7, 2),
            PositionedTerm::new("wi", 2, 4, 2),
            PositionedTerm::new("fi", 5, 7, 2),
        ]);

        assert_eq!(
            outline_tree(&root),
            vec![
                "<root>",
                "├── \"a\" [1,0:1]",
                "└── \"wi-fi\" | \"WiFi\" [2,2:7]",
                "    ├── \"wi\" [2,2:4]",
                "    └── \"fi\" [2,5:7]",
            ]
        );
    }

    #[test]
    fn test_empty_outline() {
        assert_eq!(outline_tree(&SpanNode::root()), vec!["<root>"]);
    }
}
