//! Representation of an image picked from a search result page
//!
//! # CandidateImage
//! A [`CandidateImage`] only lives for a single bot run. It holds what the publisher needs to
//! upload the file (`url`, `rating`) plus where it was found, for logging.
use std::fmt::Debug;

use crate::extract_file_name_from_url;

use self::rating::Rating;

pub mod rating;

/// Number of posts requested for every search page.
pub const PAGE_SIZE: u32 = 100;

#[derive(Clone, PartialEq, Eq)]
pub struct CandidateImage {
    /// Direct URL of the original image file located inside the imageboard's server
    pub url: String,
    /// Rating of the post. Anything but `Rating::General` is uploaded as sensitive.
    pub rating: Rating,
    /// Zero-based page the image was taken from.
    pub source_page_index: u32,
    /// Total number of results the search reported when this image was picked.
    pub total_result_count: u64,
}

impl Debug for CandidateImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateImage")
            .field("Source URL", &self.url)
            .field("Rating", &self.rating)
            .field("Page", &self.source_page_index)
            .field("Total results", &self.total_result_count)
            .finish()
    }
}

impl CandidateImage {
    /// Name of the file as it is stored by the publish target, which is the last path segment
    /// of the source URL.
    #[inline]
    pub fn file_name(&self) -> String {
        extract_file_name_from_url!(self.url)
    }
}

/// Highest usable page index for a search that reported `count` results.
///
/// This is `ceil(count / PAGE_SIZE) - 1`, saturating at zero for an empty search.
#[inline]
pub const fn max_page_index_for(count: u64) -> u32 {
    let pages = count.div_ceil(PAGE_SIZE as u64);
    if pages == 0 {
        0
    } else if pages - 1 > u32::MAX as u64 {
        u32::MAX
    } else {
        (pages - 1) as u32
    }
}
