use base64::{engine::general_purpose, Engine};

/// Used when the caller gives no MIME type and the bytes are not recognised.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Raw recipe input handed to the converter: pasted text or a photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionInput {
    Text { content: String },
    Image { content: Vec<u8>, mime_type: String },
}

impl ConversionInput {
    pub fn text(content: impl Into<String>) -> Self {
        ConversionInput::Text {
            content: content.into(),
        }
    }

    /// Builds an image input. A caller-supplied MIME type wins, otherwise it is
    /// sniffed from the leading bytes.
    pub fn image(content: Vec<u8>, mime_type: Option<String>) -> Self {
        let mime_type = mime_type
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| detect_mime_type(&content).to_string());

        ConversionInput::Image { content, mime_type }
    }

    /// Accepts plain base64 or a `data:<mime>;base64,<payload>` URL as produced
    /// by browser file readers.
    pub fn image_base64(data: &str, mime_type: Option<String>) -> Result<Self, base64::DecodeError> {
        let (declared_mime, payload) = match data
            .trim()
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
        {
            // data:<mime>[;param=value]*;base64
            Some((header, payload)) => (
                header
                    .split(';')
                    .next()
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string),
                payload,
            ),
            None => (None, data),
        };

        let bytes = general_purpose::STANDARD.decode(payload.trim())?;
        Ok(Self::image(bytes, mime_type.or(declared_mime)))
    }

    /// Whitespace-only text and zero-length images count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            ConversionInput::Text { content } => content.trim().is_empty(),
            ConversionInput::Image { content, .. } => content.is_empty(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ConversionInput::Text { .. } => "text",
            ConversionInput::Image { .. } => "image",
        }
    }
}

pub fn detect_mime_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        DEFAULT_IMAGE_MIME
    }
}
