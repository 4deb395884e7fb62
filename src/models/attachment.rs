use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// File attached to a notification, conveyed through request fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// MIME type of the content
    #[serde(rename = "contentType")]
    pub content_type: String,
    /// Base64-encoded content
    #[serde(rename = "content")]
    pub content_base64: String,
    pub name: String,
}

impl Attachment {
    /// Builds an attachment from raw bytes
    pub fn from_bytes(
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: impl AsRef<[u8]>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            content_base64: STANDARD.encode(content),
            name: name.into(),
        }
    }

    /// Decodes the base64 content
    pub fn decode_content(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.content_base64)
    }
}

/// Ordered list of attachments
pub type Attachments = Vec<Attachment>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_encodes_content() {
        let attachment = Attachment::from_bytes("hello.txt", "text/plain", b"hello");
        assert_eq!(attachment.content_base64, "aGVsbG8=");
        assert_eq!(attachment.decode_content().unwrap(), b"hello");
    }

    #[test]
    fn test_wire_field_names() {
        let attachment = Attachment::from_bytes("a.png", "image/png", [0u8, 1, 2]);
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["contentType"], "image/png");
        assert_eq!(json["content"], "AAEC");
        assert_eq!(json["name"], "a.png");
    }
}
