//! Per-term expression providers.
//!
//! The compiler never builds leaves itself: for every `(field, term)` pair it
//! asks a [`TermExpressionProvider`] and multiplies whatever comes back by
//! the field's boost. [`TermProvider`] produces an exact term leaf; any closure
//! `Fn(&str, &str) -> Result<Expression>` works as a provider too.
//!
//! Providers can be looked up by name through a [`ProviderRegistry`], which
//! is how a request selects one and hands it parameters.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use serde_json::{Map, Value};

use crate::error::{Result, SpanfoldError};
use crate::query::expression::Expression;

/// Parameters handed to a named provider.
pub type ProviderParams = Map<String, Value>;

/// Turns a single field/term pair into an expression.
///
/// Field weights are not passed in. The compiler applies the weight of
/// `field` to the returned expression with [`Expression::with_boost`]: a
/// leaf's own boost is multiplied by it, any other expression is wrapped in
/// [`Expression::Boost`]. A weight of 1.0 leaves the result untouched.
pub trait TermExpressionProvider: Send + Sync {
    /// Build the expression matching `term` in `field`.
    ///
    /// Errors abort the compilation of the whole query.
    fn expand(&self, field: &str, term: &str) -> Result<Expression>;

    /// Name used in logs and displays.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> TermExpressionProvider for F
where
    F: Fn(&str, &str) -> Result<Expression> + Send + Sync,
{
    fn expand(&self, field: &str, term: &str) -> Result<Expression> {
        self(field, term)
    }
}

impl fmt::Debug for dyn TermExpressionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TermExpressionProvider({})", self.name())
    }
}

/// The default provider: an exact match of the term in the field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TermProvider;

impl TermExpressionProvider for TermProvider {
    fn expand(&self, field: &str, term: &str) -> Result<Expression> {
        Ok(Expression::leaf(field, term))
    }

    fn name(&self) -> &str {
        "term"
    }
}

/// Rewrites the term (and optionally the field) from a template before
/// producing an exact term leaf.
///
/// `{field}` and `{text}` in the templates are replaced by the field name and
/// the term text.
///
/// ```
/// use spanfold::query::expression::Expression;
/// use spanfold::query::provider::{TemplateProvider, TermExpressionProvider};
///
/// let provider = TemplateProvider::new("{text}{text}");
/// assert_eq!(provider.expand("title", "a").unwrap(), Expression::leaf("title", "aa"));
/// ```
#[derive(Clone, Debug)]
pub struct TemplateProvider {
    term_template: String,
    field_template: Option<String>,
}

impl TemplateProvider {
    /// Create a provider rewriting terms with `term_template`.
    pub fn new<S: Into<String>>(term_template: S) -> Self {
        TemplateProvider {
            term_template: term_template.into(),
            field_template: None,
        }
    }

    /// Also rewrite the field with `field_template`.
    pub fn with_field_template<S: Into<String>>(mut self, field_template: S) -> Self {
        self.field_template = Some(field_template.into());
        self
    }

    /// Build a provider from request parameters.
    ///
    /// Expects a string `template` and accepts an optional string `field`.
    pub fn from_params(params: &ProviderParams) -> Result<Self> {
        let template = match params.get("template") {
            Some(Value::String(template)) => template,
            Some(other) => {
                return Err(SpanfoldError::provider(format!(
                    "[template] parameter must be a string, got {other}"
                )));
            }
            None => return Err(SpanfoldError::provider("[template] parameter is required")),
        };

        let mut provider = TemplateProvider::new(template.as_str());
        match params.get("field") {
            Some(Value::String(field)) => provider = provider.with_field_template(field.as_str()),
            Some(other) => {
                return Err(SpanfoldError::provider(format!(
                    "[field] parameter must be a string, got {other}"
                )));
            }
            None => {}
        }
        Ok(provider)
    }

    fn render(template: &str, field: &str, term: &str) -> String {
        template.replace("{field}", field).replace("{text}", term)
    }
}

impl TermExpressionProvider for TemplateProvider {
    fn expand(&self, field: &str, term: &str) -> Result<Expression> {
        let text = Self::render(&self.term_template, field, term);
        if text.is_empty() {
            return Err(SpanfoldError::provider(format!(
                "template rendered an empty term for {field}:{term}"
            )));
        }
        let target = match &self.field_template {
            Some(template) => Self::render(template, field, term),
            None => field.to_string(),
        };
        Ok(Expression::leaf(target, text))
    }

    fn name(&self) -> &str {
        "template"
    }
}

/// Creates a provider from request parameters.
pub type ProviderFactory =
    Arc<dyn Fn(&ProviderParams) -> Result<Arc<dyn TermExpressionProvider>> + Send + Sync>;

/// Named provider factories.
#[derive(Clone)]
pub struct ProviderRegistry {
    factories: AHashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        ProviderRegistry {
            factories: AHashMap::new(),
        }
    }

    /// A registry with the built-in `term` and `template` providers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("term", TermProvider);
        registry.register_factory(
            "template",
            Arc::new(|params: &ProviderParams| {
                let provider: Arc<dyn TermExpressionProvider> =
                    Arc::new(TemplateProvider::from_params(params)?);
                Ok(provider)
            }),
        );
        registry
    }

    /// Register a provider that ignores parameters.
    pub fn register<P>(&mut self, name: &str, provider: P)
    where
        P: TermExpressionProvider + 'static,
    {
        let provider: Arc<dyn TermExpressionProvider> = Arc::new(provider);
        self.register_factory(name, Arc::new(move |_: &ProviderParams| Ok(provider.clone())));
    }

    /// Register a factory building a provider from parameters.
    pub fn register_factory(&mut self, name: &str, factory: ProviderFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    /// Create the provider registered under `name`.
    pub fn create(
        &self,
        name: &str,
        params: &ProviderParams,
    ) -> Result<Arc<dyn TermExpressionProvider>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SpanfoldError::provider(format!("Unknown provider [{name}]")))?;
        factory(params)
    }

    /// Whether a provider is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> ProviderParams {
        match value {
            Value::Object(map) => map,
            _ => panic!("params must be an object"),
        }
    }

    #[test]
    fn test_term_provider() {
        let expression = TermProvider.expand("title", "wi-fi").unwrap();
        assert_eq!(expression, Expression::leaf("title", "wi-fi"));
    }

    #[test]
    fn test_closure_provider() {
        let provider = |field: &str, term: &str| -> Result<Expression> {
            Ok(Expression::leaf(format!("{field}.raw"), term.to_uppercase()))
        };
        assert_eq!(provider.expand("title", "a").unwrap(), Expression::leaf("title.raw", "A"));
        assert_eq!(provider.name(), "custom");
    }

    #[test]
    fn test_template_provider() {
        let provider = TemplateProvider::new("{text}-{field}").with_field_template("{field}_exact");
        assert_eq!(
            provider.expand("title", "a").unwrap(),
            Expression::leaf("title_exact", "a-title")
        );
    }

    #[test]
    fn test_template_from_params() {
        let provider =
            TemplateProvider::from_params(&params(json!({"template": "{text}{text}"}))).unwrap();
        assert_eq!(provider.expand("f", "ab").unwrap(), Expression::leaf("f", "abab"));

        let missing = TemplateProvider::from_params(&params(json!({})));
        assert!(matches!(missing, Err(SpanfoldError::Provider(_))));

        let wrong = TemplateProvider::from_params(&params(json!({"template": 3})));
        assert!(wrong.is_err());
    }

    #[test]
    fn test_empty_rendering_fails() {
        let provider = TemplateProvider::new("");
        assert!(provider.expand("f", "a").is_err());
    }

    #[test]
    fn test_registry() {
        let registry = ProviderRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["template", "term"]);

        let term = registry.create("term", &ProviderParams::new()).unwrap();
        assert_eq!(term.name(), "term");

        let template = registry
            .create("template", &params(json!({"template": "x{text}"})))
            .unwrap();
        assert_eq!(template.expand("f", "a").unwrap(), Expression::leaf("f", "xa"));

        let unknown = registry.create("groovy", &ProviderParams::new());
        assert!(matches!(unknown, Err(SpanfoldError::Provider(_))));
    }
}
