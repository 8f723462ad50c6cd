//! JSON request parsing.
//!
//! A request is an object with a single key naming the query type
//! (`across_variants` / `acrossvariants` or `across_fields` / `acrossfields`)
//! whose value holds the query parameters:
//!
//! ```json
//! {
//!   "across_variants": {
//!     "fields": ["title^2", "body"],
//!     "value": "wi-fi hotspot",
//!     "analyzer": "word_delimiter",
//!     "use_dis_max": true,
//!     "tie_breaker": 0.1
//!   }
//! }
//! ```

use std::sync::Arc;

use log::debug;
use serde_json::{Map, Value};

use crate::analysis::analyzer::{Analyzer, AnalyzerRegistry};
use crate::error::{Result, SpanfoldError};
use crate::query::ExpressionQuery;
use crate::query::across_fields::AcrossFieldsQuery;
use crate::query::across_variants::AcrossVariantsQuery;
use crate::query::compiler::CompilerConfig;
use crate::query::fields::BoostedFields;
use crate::query::provider::{ProviderParams, ProviderRegistry};

/// Names accepted for the across-variants query.
pub const ACROSS_VARIANTS_NAMES: &[&str] = &["across_variants", "acrossvariants"];

/// Names accepted for the across-fields query.
pub const ACROSS_FIELDS_NAMES: &[&str] = &["across_fields", "acrossfields"];

/// Parameters shared by both query types.
struct CommonParams {
    fields: BoostedFields,
    value: String,
    analyzer: Arc<dyn Analyzer>,
    boost: f32,
}

/// Builds queries from JSON requests.
#[derive(Clone, Debug)]
pub struct RequestParser {
    analyzers: AnalyzerRegistry,
    providers: ProviderRegistry,
}

impl RequestParser {
    /// Create a parser resolving names through the given registries.
    pub fn new(analyzers: AnalyzerRegistry, providers: ProviderRegistry) -> Self {
        RequestParser {
            analyzers,
            providers,
        }
    }

    /// Create a parser with the built-in analyzers and providers.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            AnalyzerRegistry::with_defaults()?,
            ProviderRegistry::with_defaults(),
        ))
    }

    /// The analyzer registry.
    pub fn analyzers_mut(&mut self) -> &mut AnalyzerRegistry {
        &mut self.analyzers
    }

    /// The provider registry.
    pub fn providers_mut(&mut self) -> &mut ProviderRegistry {
        &mut self.providers
    }

    /// Parse a request from its JSON text.
    pub fn parse_str(&self, request: &str) -> Result<Box<dyn ExpressionQuery>> {
        let value: Value = serde_json::from_str(request)?;
        self.parse(&value)
    }

    /// Parse a request naming its query type.
    pub fn parse(&self, request: &Value) -> Result<Box<dyn ExpressionQuery>> {
        let object = request
            .as_object()
            .ok_or_else(|| SpanfoldError::parse("request must be a JSON object"))?;

        let mut entries = object.iter();
        let (name, body) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(SpanfoldError::parse(format!(
                    "request must hold exactly one query, got {}",
                    object.len()
                )));
            }
        };

        if ACROSS_VARIANTS_NAMES.contains(&name.as_str()) {
            Ok(Box::new(self.parse_across_variants(body)?))
        } else if ACROSS_FIELDS_NAMES.contains(&name.as_str()) {
            Ok(Box::new(self.parse_across_fields(body)?))
        } else {
            Err(SpanfoldError::parse(format!("no query registered for [{name}]")))
        }
    }

    /// Parse the body of an across-variants request.
    pub fn parse_across_variants(&self, body: &Value) -> Result<AcrossVariantsQuery> {
        let name = ACROSS_VARIANTS_NAMES[0];
        let object = body_object(name, body)?;

        let mut config = CompilerConfig::default();
        let mut script = None;
        let mut params = ProviderParams::new();
        let mut known = |key: &str, value: &Value| -> Result<bool> {
            match key {
                "script" => script = Some(string_value(name, key, value)?.to_string()),
                "params" => {
                    params = value.as_object().cloned().ok_or_else(|| {
                        SpanfoldError::parse(format!("[{name}] [params] must be an object"))
                    })?;
                }
                "use_dis_max" => {
                    config.use_dis_max = value.as_bool().ok_or_else(|| {
                        SpanfoldError::parse(format!("[{name}] [use_dis_max] must be a boolean"))
                    })?;
                }
                "tie_breaker" => config.tie_breaker = number_value(name, key, value)?,
                _ => return Ok(false),
            }
            Ok(true)
        };
        let common = self.common_params(name, object, &mut known)?;
        config.boost = common.boost;

        let mut query = AcrossVariantsQuery::new(common.fields, common.analyzer, common.value)?
            .with_combine_mode(config.combine_mode()?)
            .with_boost(config.boost);

        if let Some(script) = script {
            debug!("[{name}] expanding terms with provider [{script}]");
            query = query.with_provider(self.providers.create(&script, &params)?);
        }

        Ok(query)
    }

    /// Parse the body of an across-fields request.
    pub fn parse_across_fields(&self, body: &Value) -> Result<AcrossFieldsQuery> {
        let name = ACROSS_FIELDS_NAMES[0];
        let object = body_object(name, body)?;
        let mut no_extra = |_: &str, _: &Value| -> Result<bool> { Ok(false) };
        let common = self.common_params(name, object, &mut no_extra)?;

        Ok(
            AcrossFieldsQuery::new(common.fields, common.analyzer, common.value)?
                .with_boost(common.boost),
        )
    }

    /// Read the shared keys, handing the others to `extra`, which returns
    /// whether it knew the key.
    fn common_params(
        &self,
        name: &str,
        object: &Map<String, Value>,
        extra: &mut dyn FnMut(&str, &Value) -> Result<bool>,
    ) -> Result<CommonParams> {
        let mut fields = None;
        let mut value = None;
        let mut analyzer = None;
        let mut boost = 1.0;

        for (key, entry) in object {
            match key.as_str() {
                "fields" => fields = Some(BoostedFields::from_json(entry)?),
                "value" | "text" => value = Some(string_value(name, key, entry)?.to_string()),
                "analyzer" => analyzer = Some(string_value(name, key, entry)?.to_string()),
                "boost" => boost = number_value(name, key, entry)?,
                other => {
                    if !extra(other, entry)? {
                        return Err(SpanfoldError::parse(format!(
                            "[{name}] query does not support [{other}]"
                        )));
                    }
                }
            }
        }

        let fields = fields.unwrap_or_default();
        if fields.is_empty() {
            return Err(SpanfoldError::configuration(format!("[{name}] no fields given")));
        }
        let value = value.ok_or_else(|| {
            SpanfoldError::parse(format!("No value specified for [{name}] query"))
        })?;
        let analyzer = match analyzer {
            Some(analyzer) => self.analyzers.get(&analyzer)?,
            None => self.analyzers.default_analyzer()?,
        };

        Ok(CommonParams {
            fields,
            value,
            analyzer,
            boost,
        })
    }
}

fn body_object<'a>(name: &str, body: &'a Value) -> Result<&'a Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| SpanfoldError::parse(format!("[{name}] query must be a JSON object")))
}

fn string_value<'a>(name: &str, key: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| SpanfoldError::parse(format!("[{name}] [{key}] must be a string")))
}

fn number_value(name: &str, key: &str, value: &Value) -> Result<f32> {
    value
        .as_f64()
        .map(|number| number as f32)
        .ok_or_else(|| SpanfoldError::parse(format!("[{name}] [{key}] must be a number")))
}
