//! In-memory stand-ins for the remote services.
use std::sync::{Arc, Mutex};

use brp_common::tokio::time::Instant;

use crate::{
    error::PublishError,
    media::{MediaStore, UploadedFile},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Find,
    Upload { url: String, is_sensitive: bool },
    Post { file_ids: Vec<String>, text: String },
}

/// Media store whose file becomes visible after a fixed number of lookups.
#[derive(Default)]
pub struct FakeStore {
    /// Lookups before this index come back empty. `None` means the file never shows up.
    pub visible_after: Option<usize>,
    /// Lookups from this index on fail with the given status.
    pub find_status_from: Option<(usize, u16)>,
    /// Lookups before this index fail with the given status.
    pub find_status_until: Option<(usize, u16)>,
    pub upload_status: Option<u16>,
    pub post_status: Option<u16>,
    calls: Mutex<Vec<StoreCall>>,
    find_times: Mutex<Vec<Instant>>,
}

impl FakeStore {
    pub fn visible_after(lookups: usize) -> Self {
        Self {
            visible_after: Some(lookups),
            ..Default::default()
        }
    }

    pub fn never_visible() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn find_times(&self) -> Vec<Instant> {
        self.find_times.lock().unwrap().clone()
    }

    pub fn find_count(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::Find))
    }

    pub fn upload_count(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::Upload { .. }))
    }

    pub fn post_count(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::Post { .. }))
    }

    fn count(&self, f: impl Fn(&StoreCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| f(c)).count()
    }

    fn rejected(endpoint: &'static str, status: u16, message: &str) -> PublishError {
        PublishError::Api {
            endpoint,
            status,
            message: message.to_string(),
        }
    }
}

impl MediaStore for FakeStore {
    async fn find_by_name(&self, name: &str) -> Result<Vec<UploadedFile>, PublishError> {
        let index = {
            let mut times = self.find_times.lock().unwrap();
            times.push(Instant::now());
            times.len() - 1
        };
        self.calls.lock().unwrap().push(StoreCall::Find);

        if let Some((from, status)) = self.find_status_from {
            if index >= from {
                return Err(Self::rejected("drive/files/find", status, "lookup failed"));
            }
        }
        if let Some((until, status)) = self.find_status_until {
            if index < until {
                return Err(Self::rejected("drive/files/find", status, "lookup failed"));
            }
        }

        match self.visible_after {
            Some(after) if index >= after => Ok(vec![UploadedFile {
                file_id: format!("file-{name}"),
                file_name: name.to_string(),
            }]),
            _ => Ok(Vec::new()),
        }
    }

    async fn upload_from_url(&self, url: &str, is_sensitive: bool) -> Result<(), PublishError> {
        self.calls.lock().unwrap().push(StoreCall::Upload {
            url: url.to_string(),
            is_sensitive,
        });

        match self.upload_status {
            Some(status) => Err(Self::rejected(
                "drive/files/upload-from-url",
                status,
                "upload rejected",
            )),
            None => Ok(()),
        }
    }

    async fn create_post(&self, file_ids: &[String], text: &str) -> Result<(), PublishError> {
        self.calls.lock().unwrap().push(StoreCall::Post {
            file_ids: file_ids.to_vec(),
            text: text.to_string(),
        });

        match self.post_status {
            Some(status) => Err(Self::rejected("notes/create", status, "note rejected")),
            None => Ok(()),
        }
    }
}

impl MediaStore for Arc<FakeStore> {
    async fn find_by_name(&self, name: &str) -> Result<Vec<UploadedFile>, PublishError> {
        self.as_ref().find_by_name(name).await
    }

    async fn upload_from_url(&self, url: &str, is_sensitive: bool) -> Result<(), PublishError> {
        self.as_ref().upload_from_url(url, is_sensitive).await
    }

    async fn create_post(&self, file_ids: &[String], text: &str) -> Result<(), PublishError> {
        self.as_ref().create_post(file_ids, text).await
    }
}
