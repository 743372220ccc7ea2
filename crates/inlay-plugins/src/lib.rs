//! Block plugin discovery and builtin implementations for Inlay.
//!
//! This crate feeds the rendering pipeline in `inlay-renderer`:
//!
//! - [`ManifestStore`] discovers installed block types from a plugins
//!   directory (one subdirectory per block, each with a `manifest.json`
//!   descriptor) and reports what is available for the authoring UI.
//! - [`builtin`] holds the stock block implementations (`greeting`,
//!   `videoEmbed`, `imageSlider`).
//! - [`default_registry`] exposes a process-wide registry of the builtins,
//!   populated once behind a one-time-initialization guard.
//!
//! # Example
//!
//! ```
//! use inlay_plugins::default_registry;
//! use inlay_renderer::render_to_html;
//!
//! let html = render_to_html(
//!     r#"[plugin:greeting data='{"name":"Ada"}']"#,
//!     default_registry(),
//! );
//! assert!(html.contains("Ada"));
//! ```

pub mod builtin;
mod manifest;

use std::sync::OnceLock;

use inlay_renderer::BlockRegistry;

pub use manifest::{
    DiscoveryError, DiscoveryFailure, DiscoveryReport, Manifest, ManifestStore, load_available,
};

static DEFAULT_REGISTRY: OnceLock<BlockRegistry> = OnceLock::new();

/// The process-wide registry of builtin block implementations.
///
/// Populated on first access; concurrent first callers are serialized by the
/// guard, so the registry is built exactly once and shared read-only
/// afterwards.
pub fn default_registry() -> &'static BlockRegistry {
    DEFAULT_REGISTRY.get_or_init(|| {
        tracing::debug!("Populating default block registry");
        BlockRegistry::new()
            .with(builtin::Greeting)
            .with(builtin::VideoEmbed)
            .with(builtin::ImageSlider)
    })
}
