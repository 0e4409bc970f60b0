use brp_common::{reqwest, serde_json};
use brp_extractors::error::ExtractorError;
use thiserror::Error;

/// Errors raised while talking to the publish target.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The request never got a usable response (connection, TLS, decoding...).
    #[error("Connection Error: {0}")]
    ConnectionError(#[from] reqwest::Error),

    /// The server answered with a status that isn't accepted for this endpoint.
    #[error("{endpoint} failed with status {status}: {message}")]
    Api {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    /// The file never showed up in the media store.
    #[error("Image not uploaded after {attempts} attempts")]
    NotUploaded { attempts: u32 },

    /// The source URL has no file name to look the upload up by.
    #[error("Image URL has no file name: {url}")]
    InvalidImageUrl { url: String },

    #[error("Error while deserializing JSON: {0}")]
    JsonSerializeFail(#[from] serde_json::Error),
}

/// Everything that can make a single bot run fail.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Bot configuration is missing a value for \"{field}\"")]
    InvalidConfig { field: &'static str },

    #[error("Failed to pick an image: {source}")]
    Sampling {
        #[from]
        source: ExtractorError,
    },

    #[error("Failed to publish image: {source}")]
    Publishing {
        #[from]
        source: PublishError,
    },
}
