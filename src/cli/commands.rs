//! Command implementations for the Spanfold CLI.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use crate::analysis::analyzer::{Analyzer, AnalyzerRegistry};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SpanfoldError};
use crate::query::ExpressionQuery;
use crate::query::across_variants::AcrossVariantsQuery;
use crate::query::compiler::CompilerConfig;
use crate::query::fields::BoostedFields;
use crate::query::matcher::{MemoryDocument, MemoryIndex};
use crate::query::positioned_term::collect_terms;
use crate::query::provider::{ProviderParams, ProviderRegistry};
use crate::query::span_tree::SpanNode;
use crate::request::RequestParser;

/// Execute a CLI command.
pub fn execute_command(args: SpanfoldArgs) -> Result<()> {
    match &args.command {
        Command::Tree(tree_args) => show_tree(tree_args, &args),
        Command::Compile(compile_args) => compile_text(compile_args, &args),
        Command::Request(request_args) => compile_request(request_args, &args),
    }
}

/// Show the span tree of a text.
fn show_tree(args: &TreeArgs, cli_args: &SpanfoldArgs) -> Result<()> {
    let analyzers = AnalyzerRegistry::with_defaults()?;
    let analyzer = analyzers.get(&args.analyzer)?;

    let terms = collect_terms(analyzer.analyze(&args.text)?);
    let tree = SpanNode::build(terms.clone());

    output_result(
        &TreeResult {
            text: args.text.clone(),
            analyzer: analyzer.name().to_string(),
            terms,
            tree: tree.to_string(),
            concepts: tree.concept_count(),
            depth: tree.depth(),
            outline: outline_tree(&tree),
        },
        cli_args,
    )
}

/// Compile a text given on the command line.
fn compile_text(args: &CompileArgs, cli_args: &SpanfoldArgs) -> Result<()> {
    let fields = BoostedFields::parse(&args.fields)?;
    let config = CompilerConfig {
        use_dis_max: args.dis_max,
        tie_breaker: args.tie_breaker,
        boost: args.boost,
    };

    let analyzers = AnalyzerRegistry::with_defaults()?;
    let analyzer = analyzers.get(&args.analyzer)?;
    let mut query = AcrossVariantsQuery::new(fields, analyzer, args.text.as_str())?
        .with_combine_mode(config.combine_mode()?)
        .with_boost(config.boost);

    if let Some(script) = &args.script {
        let params = match &args.params {
            Some(params) => parse_params(params)?,
            None => ProviderParams::new(),
        };
        query = query.with_provider(ProviderRegistry::with_defaults().create(script, &params)?);
    }

    let result = compile_query(&query, args.filter, None)?;
    output_result(&result, cli_args)
}

/// Compile a JSON request file, optionally matching it against documents.
fn compile_request(args: &RequestArgs, cli_args: &SpanfoldArgs) -> Result<()> {
    info!("Reading request from {}", args.request_file.display());
    let request = fs::read_to_string(&args.request_file)?;

    let parser = RequestParser::with_defaults()?;
    let query = parser.parse_str(&request)?;

    let index = match &args.documents {
        Some(path) => {
            let analyzer = AnalyzerRegistry::with_defaults()?.get(&args.index_analyzer)?;
            Some(load_documents(path, analyzer)?)
        }
        None => None,
    };

    let result = compile_query(query.as_ref(), args.filter, index.as_ref())?;
    output_result(&result, cli_args)
}

fn compile_query(
    query: &dyn ExpressionQuery,
    filter: bool,
    index: Option<&MemoryIndex>,
) -> Result<CompileResult> {
    let expression = if filter {
        query.to_filter_expression()?
    } else {
        query.to_expression()?
    };
    debug!("{query} compiled to {expression}");

    let matches = index.map(|index| {
        index
            .search(&expression)
            .into_iter()
            .map(str::to_string)
            .collect()
    });

    Ok(CompileResult {
        query: query.to_string(),
        filter,
        rendered: expression.to_string(),
        leaves: expression.leaf_count(),
        expression,
        matches,
    })
}

fn parse_params(params: &str) -> Result<ProviderParams> {
    match serde_json::from_str::<Value>(params)? {
        Value::Object(map) => Ok(map),
        other => Err(SpanfoldError::invalid_argument(format!(
            "provider parameters must be a JSON object, got {other}"
        ))),
    }
}

/// One line of a document file.
#[derive(Debug, Deserialize)]
struct DocumentLine {
    id: String,
    fields: serde_json::Map<String, Value>,
}

/// Load a JSONL document file into an in-memory index.
///
/// Each line is `{"id": "1", "fields": {"title": "text", "tags": ["a", "b"]}}`.
/// String values are analyzed; array entries are indexed as they are.
pub fn load_documents(path: &Path, analyzer: Arc<dyn Analyzer>) -> Result<MemoryIndex> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut index = MemoryIndex::new(analyzer.clone());

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parsed: DocumentLine = serde_json::from_str(&line)
            .map_err(|e| anyhow::anyhow!("{}: line {}: {e}", path.display(), line_number + 1))?;

        let mut document = MemoryDocument::new();
        for (field, value) in &parsed.fields {
            match value {
                Value::String(text) => document.add_text(field, text, analyzer.as_ref())?,
                Value::Array(terms) => {
                    for term in terms {
                        let term = term.as_str().ok_or_else(|| {
                            anyhow::anyhow!(
                                "{}: line {}: terms of [{field}] must be strings",
                                path.display(),
                                line_number + 1
                            )
                        })?;
                        document.add_term(field.as_str(), term);
                    }
                }
                other => {
                    return Err(anyhow::anyhow!(
                        "{}: line {}: unsupported value for [{field}]: {other}",
                        path.display(),
                        line_number + 1
                    )
                    .into());
                }
            }
        }
        index.add_indexed(&parsed.id, document);
    }

    info!("Loaded {} documents from {}", index.len(), path.display());
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::analysis::analyzer::WhitespaceAnalyzer;
    use crate::query::expression::Expression;

    #[test]
    fn test_load_documents() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"id": "1", "fields": {{"title": "Wi Fi", "tags": ["wi-fi"]}}}}"#
        )
        .unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"id": "2", "fields": {{"title": "hotspot"}}}}"#).unwrap();

        let index = load_documents(file.path(), Arc::new(WhitespaceAnalyzer::new())).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.search(&Expression::leaf("tags", "wi-fi")), vec!["1"]);
        assert_eq!(index.search(&Expression::leaf("title", "hotspot")), vec!["2"]);
    }

    #[test]
    fn test_load_documents_rejects_bad_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": "1", "fields": {{"n": 3}}}}"#).unwrap();
        let err = load_documents(file.path(), Arc::new(WhitespaceAnalyzer::new())).unwrap_err();
        assert!(matches!(err, SpanfoldError::Anyhow(_)));
        assert!(err.to_string().contains("line 1: unsupported value for [n]: 3"));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": "1", "fields": {{"t": "a"}}}}"#).unwrap();
        writeln!(file, "not json").unwrap();
        let err = load_documents(file.path(), Arc::new(WhitespaceAnalyzer::new())).unwrap_err();
        assert!(matches!(err, SpanfoldError::Anyhow(_)));
        assert!(err.to_string().contains("line 2: "));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": "1", "fields": {{"tags": ["a", 1]}}}}"#).unwrap();
        let err = load_documents(file.path(), Arc::new(WhitespaceAnalyzer::new())).unwrap_err();
        assert!(err.to_string().contains("terms of [tags] must be strings"));
    }

    #[test]
    fn test_compile_request_with_documents() {
        let parser = RequestParser::with_defaults().unwrap();
        let query = parser
            .parse_str(
                r#"{"across_variants": {"fields": "text", "value": "a b", "analyzer": "whitespace"}}"#,
            )
            .unwrap();

        let mut index = MemoryIndex::new(Arc::new(WhitespaceAnalyzer::new()));
        index.add_document("1", [("text", "a b c")]).unwrap();
        index.add_document("2", [("text", "a c")]).unwrap();

        let result = compile_query(query.as_ref(), false, Some(&index)).unwrap();
        assert_eq!(result.rendered, "(+text:a +text:b)");
        assert_eq!(result.matches, Some(vec!["1".to_string()]));
    }

    #[test]
    fn test_parse_params() {
        assert!(parse_params(r#"{"template": "{text}"}"#).is_ok());
        assert!(parse_params("[1]").is_err());
    }
}
