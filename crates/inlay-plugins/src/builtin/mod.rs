//! Builtin block implementations.
//!
//! The stock block set: a greeting card, a video embed with YouTube/Vimeo
//! URL rewriting, and a static image slider shell. Each implements
//! [`BlockPlugin`](inlay_renderer::BlockPlugin) and escapes every parameter
//! value it interpolates.

mod greeting;
mod image_slider;
mod video_embed;

pub use greeting::Greeting;
pub use image_slider::ImageSlider;
pub use video_embed::VideoEmbed;
