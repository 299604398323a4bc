//! Attachments API endpoint

use super::{Resource, require};
use crate::{client::Client, error::Result, http::encode_segment};
use botconnector_schema::AttachmentInfo;
use bytes::Bytes;

/// Attachments API resource.
///
/// Reads attachments previously uploaded with
/// [`Conversations::upload_attachment`](super::Conversations::upload_attachment).
#[derive(Clone)]
pub struct Attachments {
    client: Client,
}

impl Attachments {
    /// Create a new Attachments resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Name, type and available views of an attachment.
    pub async fn get_attachment_info(&self, attachment_id: &str) -> Result<AttachmentInfo> {
        let path = format!(
            "v3/attachments/{}",
            encode_segment(require(attachment_id, "attachment_id")?)
        );
        self.client
            .traced("get_attachment_info", async {
                self.client
                    .request(http::Method::GET, &path)?
                    .send()
                    .await?
                    .parse_result()
            })
            .await
    }

    /// Raw content of one view (`original`, `thumbnail`, ...) of an attachment.
    pub async fn get_attachment(&self, attachment_id: &str, view_id: &str) -> Result<Bytes> {
        let path = format!(
            "v3/attachments/{}/views/{}",
            encode_segment(require(attachment_id, "attachment_id")?),
            encode_segment(require(view_id, "view_id")?)
        );
        self.client
            .traced("get_attachment", async {
                self.client
                    .request(http::Method::GET, &path)?
                    .send()
                    .await?
                    .bytes_result()
            })
            .await
    }
}

impl Resource for Attachments {
    fn client(&self) -> &Client {
        &self.client
    }
}
