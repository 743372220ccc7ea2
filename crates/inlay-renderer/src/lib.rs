//! Directive parsing and block rendering pipeline for Inlay.
//!
//! Stored content is plain markup with inline block directives of the form
//! `[plugin:typeKey data='{...json...}']`. This crate splits content into
//! literal and directive spans, parses each directive, resolves its type key
//! against a [`BlockRegistry`], and produces an ordered sequence of
//! [`RenderNode`]s. A malformed or unknown directive never aborts the render;
//! it degrades into a visible [`RenderNode::ErrorPlaceholder`] while the rest
//! of the document renders normally.
//!
//! # Architecture
//!
//! The pipeline is a single synchronous pass:
//!
//! 1. **Tokenization** ([`tokenize`]): lossless split into [`Token::Literal`]
//!    and [`Token::DirectiveRaw`] spans.
//! 2. **Parsing** ([`directive::parse`]): strict grammar match plus JSON
//!    payload extraction, per directive token.
//! 3. **Composition** ([`render`]): per-token dispatch against the registry,
//!    one [`RenderNode`] per token, order preserved.
//!
//! # Trust boundary
//!
//! Literal spans are emitted verbatim: the authoring/storage layer is
//! responsible for sanitizing stored markup, and plugin implementations are
//! responsible for their own output. Error placeholders only ever contain
//! engine-controlled text with interpolated fragments HTML-escaped.
//!
//! # Example
//!
//! ```
//! use inlay_renderer::{render, BlockPlugin, BlockRegistry, PluginError, RenderNode};
//! use serde_json::{Map, Value};
//!
//! struct Greeting;
//!
//! impl BlockPlugin for Greeting {
//!     fn type_key(&self) -> &str { "greeting" }
//!
//!     fn render(&self, params: &Map<String, Value>) -> Result<String, PluginError> {
//!         let name = params.get("name").and_then(Value::as_str).unwrap_or("Guest");
//!         Ok(format!("<p>Hello, {name}!</p>"))
//!     }
//! }
//!
//! let registry = BlockRegistry::new().with(Greeting);
//! let nodes = render(r#"[plugin:greeting data='{"name":"Ada"}']"#, &registry);
//! assert_eq!(nodes, vec![RenderNode::PluginOutput("<p>Hello, Ada!</p>".to_owned())]);
//! ```

mod composer;
pub mod directive;
mod node;
mod plugin;
mod token;
mod util;

pub use composer::{render, render_opt, render_to_html};
pub use directive::{Directive, ParseError};
pub use node::RenderNode;
pub use plugin::{BlockPlugin, BlockRegistry, PluginError};
pub use token::{Token, tokenize};
pub use util::escape_html;
