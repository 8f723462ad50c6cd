//! Fluent builders rendering JSON requests.
//!
//! The rendered requests are what [`RequestParser`](super::RequestParser)
//! reads back.
//!
//! ```
//! use spanfold::request::AcrossVariantsRequestBuilder;
//!
//! let request = AcrossVariantsRequestBuilder::new()
//!     .fields(["title", "body"])
//!     .value("wi-fi hotspot")
//!     .analyzer("word_delimiter")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(request["across_variants"]["fields"][1], "body");
//! ```

use serde_json::{Map, Value, json};

use crate::error::{Result, SpanfoldError};
use crate::query::fields::{BoostedFields, DEFAULT_FIELD_BOOST};
use crate::query::provider::ProviderParams;

/// Field list of a builder; remembers whether any boost was given so the
/// rendered request uses the array or the object form.
#[derive(Clone, Debug, Default)]
struct FieldList {
    fields: BoostedFields,
    boosted: bool,
}

impl FieldList {
    fn clear(&mut self) {
        self.fields = BoostedFields::new();
        self.boosted = false;
    }

    fn add(&mut self, name: &str) {
        self.fields.insert(name, DEFAULT_FIELD_BOOST);
    }

    fn add_boosted(&mut self, name: &str, boost: f32) {
        self.fields.insert(name, boost);
        self.boosted = true;
    }

    fn render(&self, query: &str) -> Result<Value> {
        if self.fields.is_empty() {
            return Err(SpanfoldError::configuration(format!("[{query}] no fields given")));
        }
        if self.boosted {
            let object: Map<String, Value> = self
                .fields
                .iter()
                .map(|(name, boost)| (name.to_string(), json!(boost)))
                .collect();
            Ok(Value::Object(object))
        } else {
            Ok(Value::Array(self.fields.names().map(Value::from).collect()))
        }
    }
}

macro_rules! field_methods {
    () => {
        /// Remove every field.
        pub fn clear_fields(mut self) -> Self {
            self.fields.clear();
            self
        }

        /// Add an unweighted field.
        pub fn add_field(mut self, name: &str) -> Self {
            self.fields.add(name);
            self
        }

        /// Replace the fields with a single unweighted field.
        pub fn field(self, name: &str) -> Self {
            self.clear_fields().add_field(name)
        }

        /// Add a weighted field.
        pub fn add_field_boosted(mut self, name: &str, boost: f32) -> Self {
            self.fields.add_boosted(name, boost);
            self
        }

        /// Replace the fields with a single weighted field.
        pub fn field_boosted(self, name: &str, boost: f32) -> Self {
            self.clear_fields().add_field_boosted(name, boost)
        }

        /// Add unweighted fields.
        pub fn add_fields<I, S>(mut self, names: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: AsRef<str>,
        {
            for name in names {
                self.fields.add(name.as_ref());
            }
            self
        }

        /// Replace the fields with unweighted fields.
        pub fn fields<I, S>(self, names: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: AsRef<str>,
        {
            self.clear_fields().add_fields(names)
        }

        /// Set the query text.
        pub fn value<S: Into<String>>(mut self, value: S) -> Self {
            self.value = Some(value.into());
            self
        }

        /// Name the analyzer to run over the text.
        pub fn analyzer<S: Into<String>>(mut self, analyzer: S) -> Self {
            self.analyzer = Some(analyzer.into());
            self
        }

        /// Set the weight of the whole query.
        pub fn boost(mut self, boost: f32) -> Self {
            self.boost = Some(boost);
            self
        }
    };
}

/// Renders `across_variants` requests.
#[derive(Clone, Debug, Default)]
pub struct AcrossVariantsRequestBuilder {
    fields: FieldList,
    value: Option<String>,
    analyzer: Option<String>,
    script: Option<String>,
    params: Option<ProviderParams>,
    boost: Option<f32>,
    use_dis_max: Option<bool>,
    tie_breaker: Option<f32>,
}

impl AcrossVariantsRequestBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    field_methods!();

    /// Name the provider expanding each field/term pair.
    pub fn script<S: Into<String>>(mut self, script: S) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Parameters for the provider.
    pub fn params(mut self, params: ProviderParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Combine alternatives with soft disjunctions.
    pub fn use_dis_max(mut self, use_dis_max: bool) -> Self {
        self.use_dis_max = Some(use_dis_max);
        self
    }

    /// Tie breaker of the soft disjunctions.
    pub fn tie_breaker(mut self, tie_breaker: f32) -> Self {
        self.tie_breaker = Some(tie_breaker);
        self
    }

    /// Render the request.
    pub fn build(&self) -> Result<Value> {
        let name = "across_variants";
        let mut body = Map::new();
        body.insert("fields".to_string(), self.fields.render(name)?);
        if let Some(value) = &self.value {
            body.insert("value".to_string(), json!(value));
        }
        if let Some(analyzer) = &self.analyzer {
            body.insert("analyzer".to_string(), json!(analyzer));
        }
        if let Some(script) = &self.script {
            body.insert("script".to_string(), json!(script));
        }
        if let Some(params) = &self.params {
            body.insert("params".to_string(), Value::Object(params.clone()));
        }
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), json!(boost));
        }
        if let Some(use_dis_max) = self.use_dis_max {
            body.insert("use_dis_max".to_string(), json!(use_dis_max));
        }
        if let Some(tie_breaker) = self.tie_breaker {
            body.insert("tie_breaker".to_string(), json!(tie_breaker));
        }
        Ok(json!({ name: body }))
    }

    /// Render the request as JSON text.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.build()?)?)
    }
}

/// Renders `across_fields` requests.
#[derive(Clone, Debug, Default)]
pub struct AcrossFieldsRequestBuilder {
    fields: FieldList,
    value: Option<String>,
    analyzer: Option<String>,
    boost: Option<f32>,
}

impl AcrossFieldsRequestBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    field_methods!();

    /// Render the request.
    pub fn build(&self) -> Result<Value> {
        let name = "across_fields";
        let mut body = Map::new();
        body.insert("fields".to_string(), self.fields.render(name)?);
        if let Some(value) = &self.value {
            body.insert("value".to_string(), json!(value));
        }
        if let Some(analyzer) = &self.analyzer {
            body.insert("analyzer".to_string(), json!(analyzer));
        }
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), json!(boost));
        }
        Ok(json!({ name: body }))
    }

    /// Render the request as JSON text.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.build()?)?)
    }
}
