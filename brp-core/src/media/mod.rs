//! Publish target abstraction
//!
//! The publisher only needs three operations from the remote service: looking files up by
//! name, asking the service to ingest a file from an URL and creating a post. [`MediaStore`]
//! exposes exactly those; [`MisskeyApi`](misskey::MisskeyApi) implements them over HTTP.
use std::future::Future;

use brp_common::serde::{self, Deserialize};

use crate::error::PublishError;

pub mod misskey;

/// A file living in the target's media store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(crate = "self::serde")]
pub struct UploadedFile {
    #[serde(rename = "id")]
    pub file_id: String,
    #[serde(rename = "name", default)]
    pub file_name: String,
}

pub trait MediaStore {
    /// Lists the files called `name`. An empty list means there is none yet.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<UploadedFile>, PublishError>> + Send;

    /// Asks the service to fetch `url` into its media store. Ingestion is asynchronous, so the
    /// file usually isn't visible right after this returns.
    fn upload_from_url(
        &self,
        url: &str,
        is_sensitive: bool,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;

    /// Creates a post with `text` and the given attachments.
    fn create_post(
        &self,
        file_ids: &[String],
        text: &str,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;
}
