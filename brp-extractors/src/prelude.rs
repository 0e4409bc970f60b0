pub use crate::error::ExtractorError;
pub use crate::imageboards::gelbooru::GelbooruApi;
pub use crate::imageboards::{SearchApi, SearchPage, SearchPost};
pub use crate::sampler::{Sample, Sampler};
