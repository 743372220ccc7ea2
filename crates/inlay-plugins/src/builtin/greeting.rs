//! Greeting block.

use inlay_renderer::{BlockPlugin, PluginError, escape_html};
use serde_json::{Map, Value};

/// Renders a greeting card: `{ "name": "Ada" }`, defaulting to "Guest".
pub struct Greeting;

impl BlockPlugin for Greeting {
    fn type_key(&self) -> &str {
        "greeting"
    }

    fn render(&self, params: &Map<String, Value>) -> Result<String, PluginError> {
        let name = params.get("name").and_then(Value::as_str).unwrap_or("Guest");
        Ok(format!(
            "<div class=\"greeting-block\"><h3>Greeting Block</h3><p>Hello, {}!</p></div>",
            escape_html(name)
        ))
    }
}
