//! Attachments and attachment uploads

use crate::error::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An attachment carried inside an activity
///
/// Card content is kept as opaque JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// MIME type of the content
    pub content_type: String,

    /// Location of the content, when it is not embedded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,

    /// Embedded content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Thumbnail location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl Attachment {
    /// An attachment whose content is embedded JSON, such as a card
    pub fn with_content(content_type: impl Into<String>, content: Value) -> Self {
        Self {
            content_type: content_type.into(),
            content: Some(content),
            ..Default::default()
        }
    }
}

/// Payload of an attachment upload
///
/// Binary fields travel base64-encoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentData {
    /// MIME type of the attachment
    #[serde(rename = "type")]
    pub kind: String,

    /// Name of the attachment
    pub name: String,

    /// Base64 original content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_base64: Option<String>,

    /// Base64 thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_base64: Option<String>,
}

impl AttachmentData {
    /// Build an upload from raw bytes
    pub fn from_bytes(kind: impl Into<String>, name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            original_base64: Some(STANDARD.encode(bytes)),
            thumbnail_base64: None,
        }
    }

    /// Attach a thumbnail
    pub fn with_thumbnail(mut self, bytes: &[u8]) -> Self {
        self.thumbnail_base64 = Some(STANDARD.encode(bytes));
        self
    }

    /// Decode the original content
    pub fn original_bytes(&self) -> Result<Option<Vec<u8>>> {
        Ok(self
            .original_base64
            .as_deref()
            .map(|data| STANDARD.decode(data))
            .transpose()?)
    }
}

/// Metadata for an uploaded attachment
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentInfo {
    /// Name of the attachment
    #[serde(default)]
    pub name: Option<String>,

    /// MIME type of the attachment
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Views available for download
    #[serde(default)]
    pub views: Vec<AttachmentView>,
}

/// One downloadable rendition of an attachment
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentView {
    /// View id, used as the `view` path segment on download
    #[serde(default)]
    pub view_id: Option<String>,

    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,
}
