use thiserror::Error;

/// Enumerates the possible errors that can arise while searching for an image.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The search API reported no posts at all for the given tags.
    #[error("No posts found for tag selection")]
    ZeroPosts,

    /// Too many consecutive random pages came back empty while the search still
    /// reported results.
    #[error("Got {attempts} empty pages in a row, giving up on this tag selection")]
    TooManyEmptyPages { attempts: u32 },

    /// The imageboard server returned a response that could not be understood or was not in the expected format.
    #[error("Imageboard returned an invalid response")]
    InvalidServerResponse,

    /// An error occurred during a network request (e.g., connection timeout, DNS resolution failure,
    /// non-success status).
    #[error("Connection Error: {0}")]
    ConnectionError(#[from] brp_common::reqwest::Error),

    /// An error occurred while deserializing a JSON response from the imageboard API.
    #[error("Error while deserializing JSON: {0}")]
    JsonSerializeFail(#[from] brp_common::serde_json::Error),
}
