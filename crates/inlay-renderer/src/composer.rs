//! Content composition.
//!
//! Walks the token sequence, resolving each directive against the registry
//! and producing one [`RenderNode`] per token, in document order. Every
//! failure mode (parse, resolution, implementation) is contained to its own
//! directive; the rest of the document renders normally.

use crate::directive;
use crate::node::RenderNode;
use crate::plugin::BlockRegistry;
use crate::token::{Token, tokenize};

/// Render a content document against a registry of block implementations.
///
/// Produces exactly one node per token the tokenizer emits, preserving
/// order. Literal spans pass through verbatim (the storage layer owns their
/// sanitization); directives resolve to plugin output or degrade into
/// placeholder nodes. An empty document yields an empty node list.
///
/// The pass is synchronous and touches no shared mutable state, so callers
/// may run any number of renders concurrently against the same registry.
#[must_use]
pub fn render(content: &str, registry: &BlockRegistry) -> Vec<RenderNode> {
    tokenize(content)
        .into_iter()
        .map(|token| render_token(token, registry))
        .collect()
}

/// Render optional content, passing absent content through unchanged.
///
/// Content is owned by the surrounding CMS and may simply not exist for a
/// given page; that is a pass-through, not an error.
#[must_use]
pub fn render_opt(content: Option<&str>, registry: &BlockRegistry) -> Option<Vec<RenderNode>> {
    content.map(|c| render(c, registry))
}

/// Render a content document straight to concatenated HTML.
///
/// Convenience for consumers that do not inspect individual nodes.
#[must_use]
pub fn render_to_html(content: &str, registry: &BlockRegistry) -> String {
    render(content, registry)
        .iter()
        .map(RenderNode::to_html)
        .collect()
}

fn render_token(token: Token, registry: &BlockRegistry) -> RenderNode {
    match token {
        Token::Literal(text) => RenderNode::Markup(text),
        Token::DirectiveRaw(raw) => render_directive(&raw, registry),
    }
}

fn render_directive(raw: &str, registry: &BlockRegistry) -> RenderNode {
    let directive = match directive::parse(raw) {
        Ok(directive) => directive,
        Err(err) => {
            tracing::warn!(raw, %err, "Skipping malformed block directive");
            return RenderNode::error(err.to_string());
        }
    };

    let Some(plugin) = registry.resolve(&directive.type_key) else {
        tracing::warn!(
            type_key = %directive.type_key,
            "No implementation registered for block type"
        );
        return RenderNode::error(format!(
            "block type '{}' not found",
            directive.type_key
        ));
    };

    match plugin.render(&directive.params) {
        Ok(html) => RenderNode::PluginOutput(html),
        Err(err) => {
            tracing::warn!(
                type_key = %directive.type_key,
                %err,
                "Block implementation failed"
            );
            RenderNode::error(format!(
                "block type '{}' failed to render: {err}",
                directive.type_key
            ))
        }
    }
}
