//! Video embed block.

use std::sync::LazyLock;

use inlay_renderer::{BlockPlugin, PluginError, escape_html};
use regex::Regex;
use serde_json::{Map, Value};

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be/|youtube\.com/(?:embed/|v/|watch\?v=|watch\?.+&v=))([\w-]{11})")
        .unwrap()
});

static VIMEO_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"vimeo\.com/(\d+)").unwrap());

/// Renders a responsive video iframe: `{ "videoUrl": "https://..." }`.
///
/// YouTube and Vimeo page URLs are rewritten to their embed form; any other
/// URL is embedded as given. A missing or unrecognizable URL is a plugin
/// error, which the composer contains as a placeholder.
pub struct VideoEmbed;

impl VideoEmbed {
    fn embed_url(video_url: &str) -> Result<String, PluginError> {
        if video_url.contains("youtube.com") || video_url.contains("youtu.be") {
            let id = YOUTUBE_ID
                .captures(video_url)
                .map(|c| c[1].to_owned())
                .ok_or_else(|| {
                    PluginError::InvalidParam("videoUrl", "unrecognized YouTube URL".to_owned())
                })?;
            Ok(format!("https://www.youtube.com/embed/{id}"))
        } else if video_url.contains("vimeo.com") {
            let id = VIMEO_ID
                .captures(video_url)
                .map(|c| c[1].to_owned())
                .ok_or_else(|| {
                    PluginError::InvalidParam("videoUrl", "unrecognized Vimeo URL".to_owned())
                })?;
            Ok(format!("https://player.vimeo.com/video/{id}"))
        } else {
            Ok(video_url.to_owned())
        }
    }
}

impl BlockPlugin for VideoEmbed {
    fn type_key(&self) -> &str {
        "videoEmbed"
    }

    fn render(&self, params: &Map<String, Value>) -> Result<String, PluginError> {
        let video_url = params
            .get("videoUrl")
            .and_then(Value::as_str)
            .ok_or(PluginError::MissingParam("videoUrl"))?;

        let embed_url = Self::embed_url(video_url)?;

        Ok(format!(
            "<div class=\"video-embed-container\">\
             <iframe class=\"video-embed-iframe\" src=\"{}\" \
             frameborder=\"0\" allowfullscreen \
             allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\">\
             </iframe></div>",
            escape_html(&embed_url)
        ))
    }
}
