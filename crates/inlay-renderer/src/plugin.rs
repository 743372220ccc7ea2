//! Block plugin trait and implementation registry.
//!
//! A [`BlockPlugin`] turns a directive's parameters into an HTML fragment.
//! The [`BlockRegistry`] maps type keys to implementations; resolution is a
//! pure lookup with no I/O, so any loading must happen before render time.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Error from a block implementation.
///
/// Implementation failures are contained per directive: the composer
/// converts them into placeholder nodes instead of propagating them.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// A required parameter is absent from the payload.
    #[error("missing required parameter `{0}`")]
    MissingParam(&'static str),
    /// A parameter is present but has the wrong shape or value.
    #[error("invalid value for parameter `{0}`: {1}")]
    InvalidParam(&'static str, String),
    /// The implementation failed while producing output.
    #[error("{0}")]
    Render(String),
}

/// A renderable block implementation.
///
/// Implementations receive the parsed payload parameters and produce an HTML
/// fragment. They are responsible for escaping any parameter values they
/// interpolate into their output.
///
/// # Thread Safety
///
/// Implementations are `Send + Sync`: the registry is populated once and
/// then shared read-only across concurrent renders.
///
/// # Example
///
/// ```
/// use inlay_renderer::{BlockPlugin, PluginError, escape_html};
/// use serde_json::{Map, Value};
///
/// struct Greeting;
///
/// impl BlockPlugin for Greeting {
///     fn type_key(&self) -> &str { "greeting" }
///
///     fn render(&self, params: &Map<String, Value>) -> Result<String, PluginError> {
///         let name = params.get("name").and_then(Value::as_str).unwrap_or("Guest");
///         Ok(format!("<p>Hello, {}!</p>", escape_html(name)))
///     }
/// }
/// ```
pub trait BlockPlugin: Send + Sync {
    /// Block type key (e.g. "greeting", "videoEmbed").
    ///
    /// Matched against the directive syntax: `[plugin:typeKey ...]`.
    fn type_key(&self) -> &str;

    /// Render this block from the directive's payload parameters.
    fn render(&self, params: &Map<String, Value>) -> Result<String, PluginError>;
}

/// Registry mapping block type keys to implementations.
///
/// Populated at startup (or once, lazily, behind a single-initialization
/// guard) and read-only afterwards. Registering the same type key twice
/// keeps the later implementation and logs a warning.
#[derive(Default)]
pub struct BlockRegistry {
    plugins: HashMap<String, Box<dyn BlockPlugin>>,
}

impl BlockRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block implementation under its own type key.
    ///
    /// Last registration wins on collision.
    pub fn register<P: BlockPlugin + 'static>(&mut self, plugin: P) {
        let key = plugin.type_key().to_owned();
        if self.plugins.contains_key(&key) {
            tracing::warn!(
                type_key = %key,
                "Block type registered twice; keeping the later implementation"
            );
        }
        self.plugins.insert(key, Box::new(plugin));
    }

    /// Register a block implementation, builder style.
    #[must_use]
    pub fn with<P: BlockPlugin + 'static>(mut self, plugin: P) -> Self {
        self.register(plugin);
        self
    }

    /// Resolve a type key to its implementation.
    ///
    /// A miss is not fatal to a render; the composer degrades the one
    /// directive into a placeholder.
    #[must_use]
    pub fn resolve(&self, type_key: &str) -> Option<&dyn BlockPlugin> {
        self.plugins.get(type_key).map(|plugin| &**plugin)
    }

    /// Type keys of all registered implementations.
    pub fn type_keys(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Number of registered implementations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// True when no implementations are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
