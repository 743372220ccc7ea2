//! Image slider block.

use inlay_renderer::{BlockPlugin, PluginError, escape_html};
use serde_json::{Map, Value};

/// Stock images used when a slider is inserted without a payload.
const DEFAULT_IMAGES: [&str; 4] = [
    "https://plus.unsplash.com/premium_photo-1675805015392-28fd80c551ec?q=80&w=1932&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1483206048520-2321c1a5fb36?q=80&w=2070&auto=format&fit=crop",
    "https://plus.unsplash.com/premium_photo-1666863909125-3a01f038e71f?q=80&w=1986&auto=format&fit=crop",
    "https://plus.unsplash.com/premium_photo-1666896192348-dbd2afd19b07?q=80&w=1975&auto=format&fit=crop",
];

/// Renders a slider shell: `{ "images": ["https://...", ...] }`.
///
/// Output is the static markup only (one `<figure>` per slide); slide
/// transitions are the consumer layer's client-side concern. With no
/// `images` parameter the stock image set is used.
pub struct ImageSlider;

impl BlockPlugin for ImageSlider {
    fn type_key(&self) -> &str {
        "imageSlider"
    }

    fn render(&self, params: &Map<String, Value>) -> Result<String, PluginError> {
        let images: Vec<String> = match params.get("images") {
            None => DEFAULT_IMAGES.iter().map(|&s| s.to_owned()).collect(),
            Some(Value::Array(urls)) => urls
                .iter()
                .map(|v| {
                    v.as_str().map(str::to_owned).ok_or_else(|| {
                        PluginError::InvalidParam(
                            "images",
                            "expected an array of image URL strings".to_owned(),
                        )
                    })
                })
                .collect::<Result<_, _>>()?,
            Some(_) => {
                return Err(PluginError::InvalidParam(
                    "images",
                    "expected an array of image URL strings".to_owned(),
                ));
            }
        };

        if images.is_empty() {
            return Err(PluginError::InvalidParam(
                "images",
                "image list is empty".to_owned(),
            ));
        }

        let mut html = String::from("<div class=\"image-slider-container\"><div class=\"image-slider\">");
        for (index, url) in images.iter().enumerate() {
            html.push_str(&format!(
                "<figure class=\"image-slide\" data-slide=\"{index}\">\
                 <img src=\"{}\" alt=\"Slide {}\" loading=\"lazy\">\
                 </figure>",
                escape_html(url),
                index + 1
            ));
        }
        html.push_str("</div></div>");
        Ok(html)
    }
}
