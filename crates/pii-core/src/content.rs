use serde::{Deserialize, Serialize};

/// Byte content types accepted by the DLP service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ByteContentType {
    #[default]
    #[serde(rename = "BYTES_TYPE_UNSPECIFIED")]
    Unspecified,
    TextUtf8,
    Image,
    ImageJpeg,
    ImagePng,
    ImageBmp,
    ImageSvg,
}

impl ByteContentType {
    /// Pick a specific image type from magic bytes, falling back to `Image`
    pub fn sniff_image(data: &[u8]) -> Self {
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            ByteContentType::ImageJpeg
        } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            ByteContentType::ImagePng
        } else if data.starts_with(b"BM") {
            ByteContentType::ImageBmp
        } else if looks_like_svg(data) {
            ByteContentType::ImageSvg
        } else {
            ByteContentType::Image
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(
            self,
            ByteContentType::Image
                | ByteContentType::ImageJpeg
                | ByteContentType::ImagePng
                | ByteContentType::ImageBmp
                | ByteContentType::ImageSvg
        )
    }
}

fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// Input content, read once into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub content_type: ByteContentType,
    pub data: Vec<u8>,
}

impl ContentItem {
    pub fn text(data: Vec<u8>) -> Self {
        Self {
            content_type: ByteContentType::TextUtf8,
            data,
        }
    }

    pub fn image(data: Vec<u8>) -> Self {
        Self {
            content_type: ByteContentType::sniff_image(&data),
            data,
        }
    }

    /// Content whose type is left for the service to infer
    pub fn untyped(data: Vec<u8>) -> Self {
        Self {
            content_type: ByteContentType::Unspecified,
            data,
        }
    }

    pub fn with_type(mut self, content_type: ByteContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_image() {
        assert_eq!(
            ByteContentType::sniff_image(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]),
            ByteContentType::ImageJpeg
        );
        assert_eq!(
            ByteContentType::sniff_image(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
            ByteContentType::ImagePng
        );
        assert_eq!(ByteContentType::sniff_image(b"BM6\0"), ByteContentType::ImageBmp);
        assert_eq!(
            ByteContentType::sniff_image(b"<?xml version=\"1.0\"?>\n<svg xmlns=\"\"/>"),
            ByteContentType::ImageSvg
        );
        assert_eq!(ByteContentType::sniff_image(b"GIF89a"), ByteContentType::Image);
        assert!(ByteContentType::sniff_image(b"").is_image());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&ByteContentType::TextUtf8).unwrap(),
            "\"TEXT_UTF8\""
        );
        assert_eq!(
            serde_json::to_string(&ByteContentType::Unspecified).unwrap(),
            "\"BYTES_TYPE_UNSPECIFIED\""
        );
        assert_eq!(
            serde_json::to_string(&ByteContentType::ImageJpeg).unwrap(),
            "\"IMAGE_JPEG\""
        );
    }
}
