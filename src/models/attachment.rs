//! Attachment resource.

use crate::client::HalClient;
use crate::error::{HalError, Result};
use crate::formattable::Formattable;
use crate::models::API_V3;
use crate::traits::{Get, HalResource};

/// Links that may point at the file content, in order of preference.
const DOWNLOAD_LINKS: [&str; 2] = ["staticDownloadLocation", "downloadLocation"];

typed_resource! {
    /// A file attached to a work package or other container.
    Attachment => "Attachment"
}

impl Attachment {
    pub fn id(&self) -> i64 {
        self.int("id")
    }

    pub fn file_name(&self) -> &str {
        self.string("fileName")
    }

    /// Size in bytes.
    pub fn file_size(&self) -> i64 {
        self.int("fileSize")
    }

    pub fn content_type(&self) -> &str {
        self.string("contentType")
    }

    pub fn description(&self) -> Option<Formattable> {
        self.formattable("description").ok().flatten()
    }

    /// Download the file content.
    pub async fn download(&self, client: &HalClient) -> Result<Vec<u8>> {
        let link = DOWNLOAD_LINKS
            .iter()
            .find_map(|name| self.link(name).filter(|link| link.is_resolvable()))
            .ok_or_else(|| HalError::MissingLink(DOWNLOAD_LINKS[1].to_string()))?;

        let response = client.link_get_file(link).await?;
        let bytes = response.bytes().await.map_err(HalError::HttpError)?;
        Ok(bytes.to_vec())
    }
}

impl Get for Attachment {
    fn path(id: u64) -> String {
        format!("{API_V3}/attachments/{id}")
    }
}
