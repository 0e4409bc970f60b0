//! Search API abstraction
//!
//! A [`SearchApi`] answers a single question: "what is on page `n` of this tag search, and how
//! many results are there in total?". The sampler only ever asks that, so every other
//! imageboard capability is left out.
use std::future::Future;
use std::sync::Arc;

use brp_common::post::rating::Rating;

use crate::error::ExtractorError;

pub mod gelbooru;

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Total number of posts matching the query, as reported by the server.
    pub total_count: u64,
    /// Posts on the requested page, in server order. Empty past the last page.
    pub posts: Vec<SearchPost>,
}

/// The parts of a search result the bot cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPost {
    /// Direct URL of the original file.
    pub file_url: String,
    pub rating: Rating,
}

pub trait SearchApi {
    /// Fetches the zero-based `page` of results for `tags`.
    ///
    /// `tags` is a space separated tag expression, exclusions included.
    fn search_page(
        &self,
        tags: &str,
        page: u32,
    ) -> impl Future<Output = Result<SearchPage, ExtractorError>> + Send;
}

impl<T: SearchApi + Send + Sync> SearchApi for Arc<T> {
    async fn search_page(&self, tags: &str, page: u32) -> Result<SearchPage, ExtractorError> {
        self.as_ref().search_page(tags, page).await
    }
}

/// Joins the positive and negative filters into a single tag expression.
///
/// An empty exclusion filter adds nothing, not even a separator.
#[inline]
pub fn tag_expression(tags: &str, exclude_tags: &str) -> String {
    let tags = tags.trim();
    let exclude_tags = exclude_tags.trim();

    if exclude_tags.is_empty() {
        tags.to_string()
    } else {
        format!("{tags} {exclude_tags}")
    }
}
