//! Inline image payload parsing.

use once_cell::sync::Lazy;
use regex::Regex;

/// MIME type assumed when the payload carries no data-URL prefix.
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

static DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^data:([^;,]*)(?:;[^,]*)?,(.*)$").expect("valid data url regex")
});

/// Image ready to forward to the model service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 payload without any data-URL prefix.
    pub data: String,
}

/// Splits a data URL into MIME type and payload; raw base64 is passed through
/// with the default MIME type.
pub fn parse_inline_image(raw: &str) -> InlineImage {
    let trimmed = raw.trim();
    if let Some(caps) = DATA_URL_RE.captures(trimmed) {
        let mime_type = caps.get(1).map_or("", |m| m.as_str().trim());
        let data = caps.get(2).map_or("", |m| m.as_str());
        return InlineImage {
            mime_type: if mime_type.is_empty() {
                DEFAULT_IMAGE_MIME_TYPE.to_string()
            } else {
                mime_type.to_string()
            },
            data: data.to_string(),
        };
    }

    InlineImage {
        mime_type: DEFAULT_IMAGE_MIME_TYPE.to_string(),
        data: trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_inline_image, DEFAULT_IMAGE_MIME_TYPE};

    #[test]
    fn data_url_mime_is_taken_between_colon_and_semicolon() {
        let image = parse_inline_image("data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "iVBORw0KGgo=");
    }

    #[test]
    fn raw_base64_uses_default_mime() {
        let image = parse_inline_image("  /9j/4AAQSkZJRg==  ");
        assert_eq!(image.mime_type, DEFAULT_IMAGE_MIME_TYPE);
        assert_eq!(image.data, "/9j/4AAQSkZJRg==");
    }

    #[test]
    fn data_url_without_parameters_strips_prefix() {
        let image = parse_inline_image("data:image/png,QUJD");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "QUJD");

        let bare = parse_inline_image("data:,QUJD");
        assert_eq!(bare.mime_type, DEFAULT_IMAGE_MIME_TYPE);
        assert_eq!(bare.data, "QUJD");
    }

    #[test]
    fn empty_mime_in_data_url_falls_back_to_default() {
        let image = parse_inline_image("data:;base64,QUJD");
        assert_eq!(image.mime_type, DEFAULT_IMAGE_MIME_TYPE);
        assert_eq!(image.data, "QUJD");
    }
}
