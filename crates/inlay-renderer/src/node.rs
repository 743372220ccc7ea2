//! Render output types.
//!
//! Defines the node variants the composer can produce for each token.

use crate::util::escape_html;

/// One unit of the final output sequence.
///
/// The composer produces exactly one node per input token, in document
/// order:
///
/// - [`Markup`](Self::Markup): a literal span from the stored document,
///   emitted verbatim (sanitization is the storage layer's responsibility)
/// - [`PluginOutput`](Self::PluginOutput): HTML produced by a resolved block
///   implementation
/// - [`ErrorPlaceholder`](Self::ErrorPlaceholder): a visible diagnostic for
///   a directive that failed to parse, resolve, or render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    /// Trusted literal markup, rendered verbatim.
    Markup(String),
    /// Output of a resolved block implementation.
    PluginOutput(String),
    /// Human-readable diagnostic for one failed directive.
    ///
    /// Holds the message only; [`to_html`](Self::to_html) escapes it, so
    /// untrusted payload text can never reach the page as markup.
    ErrorPlaceholder(String),
}

impl RenderNode {
    /// Create a markup node.
    #[must_use]
    pub fn markup(s: impl Into<String>) -> Self {
        Self::Markup(s.into())
    }

    /// Create an error placeholder node.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::ErrorPlaceholder(message.into())
    }

    /// Render this node as an HTML fragment.
    ///
    /// Markup and plugin output pass through unchanged. Placeholders render
    /// as a styled diagnostic block with the message HTML-escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Markup(html) | Self::PluginOutput(html) => html.clone(),
            Self::ErrorPlaceholder(message) => {
                format!(r#"<div class="plugin-error">{}</div>"#, escape_html(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_markup_passthrough() {
        let node = RenderNode::markup("<p>hello</p>");
        assert_eq!(node.to_html(), "<p>hello</p>");
    }

    #[test]
    fn test_plugin_output_passthrough() {
        let node = RenderNode::PluginOutput("<div>block</div>".to_owned());
        assert_eq!(node.to_html(), "<div>block</div>");
    }

    #[test]
    fn test_placeholder_is_escaped() {
        let node = RenderNode::error("bad span: <script>alert(1)</script>");
        let html = node.to_html();
        assert!(html.starts_with(r#"<div class="plugin-error">"#));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
