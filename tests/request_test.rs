//! Integration tests for JSON requests matched against in-memory documents.

use std::sync::Arc;

use serde_json::json;
use spanfold::analysis::analyzer::{StandardAnalyzer, WhitespaceAnalyzer};
use spanfold::error::{Result, SpanfoldError};
use spanfold::query::*;
use spanfold::request::{AcrossFieldsRequestBuilder, AcrossVariantsRequestBuilder, RequestParser};

/// Three documents: the first two hold `a b c`/`d e f` spread over both fields.
fn two_field_index() -> Result<MemoryIndex> {
    let mut index = MemoryIndex::new(Arc::new(WhitespaceAnalyzer::new()));
    index.add_document("1", [("field1", "a b c"), ("field2", "d e f")])?;
    index.add_document("2", [("field1", "a e c"), ("field2", "d b f")])?;
    index.add_document("3", [("field1", "y"), ("field2", "z")])?;
    Ok(index)
}

fn search(index: &MemoryIndex, request: serde_json::Value) -> Result<Vec<String>> {
    let query = RequestParser::with_defaults()?.parse(&request)?;
    let expression = query.to_expression()?;
    Ok(index.search(&expression).into_iter().map(str::to_string).collect())
}

#[test]
fn test_simple_request() -> Result<()> {
    let index = two_field_index()?;

    let request = AcrossVariantsRequestBuilder::new()
        .field("field1")
        .value("a b c")
        .analyzer("whitespace")
        .build()?;
    assert_eq!(search(&index, request)?, vec!["1"]);

    let request = AcrossVariantsRequestBuilder::new()
        .field("field1")
        .value("c a")
        .analyzer("whitespace")
        .build()?;
    assert_eq!(search(&index, request)?, vec!["1", "2"]);

    Ok(())
}

#[test]
fn test_terms_spread_across_fields() -> Result<()> {
    let index = two_field_index()?;

    let request = AcrossVariantsRequestBuilder::new()
        .fields(["field1", "field2"])
        .value("a b c")
        .analyzer("whitespace")
        .build()?;
    assert_eq!(search(&index, request)?, vec!["1", "2"]);

    let request = AcrossVariantsRequestBuilder::new()
        .fields(["field1", "field2"])
        .value("a z")
        .analyzer("whitespace")
        .build()?;
    assert!(search(&index, request)?.is_empty());

    Ok(())
}

#[test]
fn test_field_forms_are_equivalent() -> Result<()> {
    let index = two_field_index()?;

    let field_forms = [
        json!("field1, field2"),
        json!(["field1", " field2 "]),
        json!({"field1": 1, " field2 ": 1.0}),
    ];
    let mut requests: Vec<serde_json::Value> = field_forms
        .into_iter()
        .map(|fields| {
            json!({"across_variants": {"fields": fields, "value": "a e", "analyzer": "whitespace"}})
        })
        .collect();
    requests.push(json!({"acrossvariants": {
        "fields": ["field1,field2"],
        "text": "a e",
        "analyzer": "whitespace"
    }}));
    for request in requests {
        assert_eq!(search(&index, request)?, vec!["1", "2"]);
    }

    Ok(())
}

#[test]
fn test_default_analyzer_drops_stop_words() -> Result<()> {
    let mut index = MemoryIndex::new(Arc::new(StandardAnalyzer::new()?));
    index.add_document("1", [("title", "Quick brown fox")])?;
    index.add_document("2", [("title", "Slow brown dog")])?;

    let query = RequestParser::with_defaults()?
        .parse_str(r#"{"across_variants": {"fields": "title", "value": "the Quick Fox"}}"#)?;
    assert_eq!(query.to_expression()?.to_string(), "(+title:quick +title:fox)");

    let expression = query.to_expression()?;
    assert_eq!(index.search(&expression), vec!["1"]);

    Ok(())
}

#[test]
fn test_boosts_do_not_change_matches() -> Result<()> {
    let index = two_field_index()?;

    let request = AcrossVariantsRequestBuilder::new()
        .add_field_boosted("field1", 0.5)
        .add_field_boosted("field2", 2.0)
        .value("b d")
        .analyzer("whitespace")
        .boost(3.0)
        .build()?;
    let query = RequestParser::with_defaults()?.parse(&request)?;
    let expression = query.to_expression()?;

    assert_eq!(query.boost(), 3.0);
    assert_eq!(
        expression.to_string(),
        "(+(field1:b^0.5 field2:b^2) +(field1:d^0.5 field2:d^2))^3"
    );
    assert_eq!(index.search(&expression), vec!["1", "2"]);
    assert_eq!(index.search(&query.to_filter_expression()?), vec!["1", "2"]);

    Ok(())
}

#[test]
fn test_template_provider() -> Result<()> {
    let mut index = MemoryIndex::new(Arc::new(WhitespaceAnalyzer::new()));
    index.add_document("1", [("f", "aa")])?;
    index.add_document("2", [("f", "a")])?;

    let mut params = serde_json::Map::new();
    params.insert("template".to_string(), json!("{text}{text}"));
    let request = AcrossVariantsRequestBuilder::new()
        .field("f")
        .value("a")
        .analyzer("whitespace")
        .script("template")
        .params(params)
        .build()?;

    assert_eq!(search(&index, request)?, vec!["1"]);

    Ok(())
}

#[test]
fn test_registered_provider() -> Result<()> {
    let mut index = MemoryIndex::new(Arc::new(WhitespaceAnalyzer::new()));
    index.add_document("1", [("f", "x")])?;

    let mut parser = RequestParser::with_defaults()?;
    parser
        .providers_mut()
        .register("everything", |_: &str, _: &str| -> Result<Expression> {
            Ok(Expression::MatchAll)
        });

    let query = parser.parse(&json!({"across_variants": {
        "fields": "f",
        "value": "not indexed",
        "analyzer": "whitespace",
        "script": "everything"
    }}))?;
    assert_eq!(index.search(&query.to_expression()?), vec!["1"]);

    Ok(())
}

#[test]
fn test_dis_max_request() -> Result<()> {
    let request = AcrossVariantsRequestBuilder::new()
        .fields(["f1", "f2"])
        .value("a")
        .analyzer("whitespace")
        .use_dis_max(true)
        .tie_breaker(0.5)
        .build()?;
    let query = RequestParser::with_defaults()?.parse(&request)?;

    assert_eq!(query.to_expression()?.to_string(), "(f1:a | f2:a)~0.5");
    assert_eq!(query.to_filter_expression()?.to_string(), "(f1:a f2:a)");

    Ok(())
}

#[test]
fn test_across_fields_request() -> Result<()> {
    let index = two_field_index()?;

    let request = AcrossFieldsRequestBuilder::new()
        .fields(["field1", "field2"])
        .value("e c")
        .analyzer("whitespace")
        .build()?;
    assert_eq!(search(&index, request)?, vec!["1", "2"]);

    Ok(())
}

#[test]
fn test_invalid_requests() -> Result<()> {
    let parser = RequestParser::with_defaults()?;

    let no_fields = parser.parse(&json!({"across_variants": {"value": "a"}}));
    assert!(matches!(no_fields, Err(SpanfoldError::Configuration(_))));

    let empty_fields = parser.parse(&json!({"across_variants": {"fields": [], "value": "a"}}));
    assert!(matches!(empty_fields, Err(SpanfoldError::Configuration(_))));

    let unknown_analyzer = parser.parse(&json!({"across_variants": {
        "fields": "f", "value": "a", "analyzer": "nope"
    }}));
    assert!(unknown_analyzer.is_err());

    let unknown_script = parser.parse(&json!({"across_variants": {
        "fields": "f", "value": "a", "script": "nope"
    }}));
    assert!(matches!(unknown_script, Err(SpanfoldError::Provider(_))));

    let unknown_key =
        parser.parse(&json!({"across_variants": {"fields": "f", "value": "a", "slop": 2}}));
    assert!(unknown_key.is_err());

    let unknown_query = parser.parse(&json!({"match": {"fields": "f", "value": "a"}}));
    assert!(unknown_query.is_err());

    Ok(())
}
