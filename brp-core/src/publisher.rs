//! Publishing a sampled image
//!
//! A publish goes through four steps:
//!
//! 1. **Presence check**: is the file already in the media store? Images this bot posted
//!    before are assumed to be, without asking.
//! 2. **Upload**: if not, ask the service to ingest it from its source URL.
//! 3. **Poll**: look the file up by name until it shows up, backing off quadratically.
//! 4. **Post**: create a note with the file attached.
//!
//! Failing any of the first three steps fails the publish. A failed note creation is only
//! logged: the image is in the media store by then, so it still counts as published.
use std::collections::BTreeSet;
use std::time::Duration;

use brp_common::{
    log::{debug, error, info, warn},
    post::CandidateImage,
    rand::{rngs::StdRng, Rng},
    tokio::time::sleep,
};

use crate::{
    error::PublishError,
    media::{MediaStore, UploadedFile},
};

/// Maximum number of lookups while waiting for an upload to show up.
pub const MAX_POLL_ATTEMPTS: u32 = 11;

/// Upper bound of the wait between two lookups.
pub const MAX_POLL_BACKOFF: Duration = Duration::from_secs(30);

/// Wait between a successful upload request and the first lookup.
pub const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// The hashtag block is appended when a roll in `[0, HASHTAG_ROLL_MAX]` falls below this.
pub const HASHTAG_THRESHOLD: u32 = 5;
pub const HASHTAG_ROLL_MAX: u32 = 100;

/// Wait after failed lookup number `attempt` (1-based): `min(30, attempt² / 2)` seconds.
#[inline]
pub fn poll_backoff(attempt: u32) -> Duration {
    let secs = f64::from(attempt).powi(2) / 2.0;
    Duration::from_secs_f64(secs).min(MAX_POLL_BACKOFF)
}

/// Builds the note body: the message, the hashtags when requested, and the source URL.
#[inline]
pub fn note_text(message: &str, hashtags: &str, with_hashtags: bool, url: &str) -> String {
    if with_hashtags && !hashtags.is_empty() {
        format!("{message} {hashtags}\nURL: {url}\n")
    } else {
        format!("{message}\nURL: {url}\n")
    }
}

/// What a successful publish did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// The source URL of the published image.
    pub source_url: String,
    /// The file the note points to.
    pub file: UploadedFile,
    /// Whether an upload was requested during this publish.
    pub uploaded: bool,
    /// Whether the note itself got created.
    pub note_created: bool,
}

pub struct Publisher<M> {
    store: M,
    message: String,
    hashtags: String,
    rng: StdRng,
}

impl<M: MediaStore + Sync> Publisher<M> {
    pub fn with_rng(store: M, message: &str, hashtags: &str, rng: StdRng) -> Self {
        Self {
            store,
            message: message.to_string(),
            hashtags: hashtags.to_string(),
            rng,
        }
    }

    #[inline]
    pub const fn store(&self) -> &M {
        &self.store
    }

    /// Publishes `candidate`. `posted` is the bot's history; the caller is expected to add the
    /// candidate URL to it when this returns `Ok`.
    pub async fn publish(
        &mut self,
        candidate: &CandidateImage,
        posted: &BTreeSet<String>,
    ) -> Result<PublishOutcome, PublishError> {
        let file_name = candidate.file_name();
        if file_name.is_empty() {
            return Err(PublishError::InvalidImageUrl {
                url: candidate.url.clone(),
            });
        }

        let uploaded = if self.is_present(candidate, &file_name, posted).await {
            debug!("{file_name} is already in the media store");
            false
        } else {
            self.upload(candidate).await?;
            true
        };

        let file = self.wait_for_file(&file_name).await?;

        let note_created = self.create_note(&candidate.url, &file).await;

        Ok(PublishOutcome {
            source_url: candidate.url.clone(),
            file,
            uploaded,
            note_created,
        })
    }

    async fn is_present(
        &self,
        candidate: &CandidateImage,
        file_name: &str,
        posted: &BTreeSet<String>,
    ) -> bool {
        if posted.contains(&candidate.url) {
            return true;
        }

        match self.store.find_by_name(file_name).await {
            Ok(files) => !files.is_empty(),
            Err(e) => {
                warn!("Presence check for {file_name} failed, uploading anyway: {e}");
                false
            }
        }
    }

    async fn upload(&self, candidate: &CandidateImage) -> Result<(), PublishError> {
        let is_sensitive = candidate.rating.is_sensitive();
        info!(
            "Uploading {} (rating: {}, sensitive: {})",
            candidate.url, candidate.rating, is_sensitive
        );

        self.store
            .upload_from_url(&candidate.url, is_sensitive)
            .await?;

        sleep(SETTLE_DELAY).await;
        Ok(())
    }

    async fn wait_for_file(&self, file_name: &str) -> Result<UploadedFile, PublishError> {
        for attempt in 1..=MAX_POLL_ATTEMPTS {
            let files = self.store.find_by_name(file_name).await?;

            if let Some(file) = files.into_iter().next() {
                debug!("Found {} as file {}", file_name, file.file_id);
                return Ok(file);
            }

            if attempt == MAX_POLL_ATTEMPTS {
                break;
            }

            let backoff = poll_backoff(attempt);
            debug!("{file_name} not there yet (attempt {attempt}), waiting {backoff:?}");
            sleep(backoff).await;
        }

        Err(PublishError::NotUploaded {
            attempts: MAX_POLL_ATTEMPTS,
        })
    }

    async fn create_note(&mut self, source_url: &str, file: &UploadedFile) -> bool {
        let with_hashtags = self.rng.gen_range(0..=HASHTAG_ROLL_MAX) < HASHTAG_THRESHOLD;
        let text = note_text(&self.message, &self.hashtags, with_hashtags, source_url);

        match self
            .store
            .create_post(std::slice::from_ref(&file.file_id), &text)
            .await
        {
            Ok(()) => {
                info!("Posted {source_url}");
                true
            }
            Err(e) => {
                error!("Failed to create note for {source_url}: {e}");
                false
            }
        }
    }
}
