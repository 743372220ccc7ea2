//! Lossless tokenization of stored content.
//!
//! Splits a content string into literal markup spans and raw
//! `[plugin:...]` directive spans without dropping or reordering a byte.

use std::sync::LazyLock;

use regex::Regex;

/// Any directive-shaped span: `[plugin:` up to the first `]`.
///
/// Matching is deliberately loose at this stage. A span only has to look
/// like a directive to be tokenized as one; strict validation happens in
/// [`crate::directive::parse`]. An opening marker with no closing bracket
/// never matches and stays inside the surrounding literal span.
static DIRECTIVE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[plugin:[^\]]*\]").unwrap());

/// One span of content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal markup, passed through untouched.
    Literal(String),
    /// A directive-shaped span, brackets included.
    DirectiveRaw(String),
}

impl Token {
    /// The raw content span this token covers.
    ///
    /// Concatenating `raw()` over all tokens of a document reconstructs the
    /// document exactly.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Literal(s) | Self::DirectiveRaw(s) => s,
        }
    }
}

/// Split content into an ordered sequence of tokens.
///
/// The split is lossless: every byte of the input lands in exactly one
/// token. Literal spans between two adjacent directives are preserved even
/// when empty, so the token sequence is order-stable for any input. Empty
/// spans at the very start and end of the document are omitted; an empty
/// document yields no tokens at all.
#[must_use]
pub fn tokenize(content: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in DIRECTIVE_SPAN.find_iter(content) {
        let gap = &content[last..m.start()];
        if !gap.is_empty() || !tokens.is_empty() {
            tokens.push(Token::Literal(gap.to_owned()));
        }
        tokens.push(Token::DirectiveRaw(m.as_str().to_owned()));
        last = m.end();
    }

    let tail = &content[last..];
    if !tail.is_empty() {
        tokens.push(Token::Literal(tail.to_owned()));
    }

    tokens
}
