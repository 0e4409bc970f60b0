//! Random image selection over a paginated search
//!
//! The search API can't enumerate results, it only hands out pages and an approximate total.
//! The [`Sampler`] picks a random page below a known-good bound, then a random post on that
//! page, and reports a tightened bound computed from the total the server returned.
//!
//! The bound is only ever lowered.
use std::collections::BTreeSet;

use brp_common::{
    log::{debug, info},
    post::{CandidateImage, max_page_index_for, PAGE_SIZE},
    rand::{rngs::StdRng, Rng},
};

use crate::{
    error::ExtractorError,
    imageboards::{tag_expression, SearchApi},
};

/// How many times an already posted image is thrown back before it is accepted anyway.
pub const MAX_REPEAT_REROLLS: u32 = 10;

/// How many empty pages in a row [`Sampler::pick`] tolerates while the search still claims
/// to have results.
pub const MAX_EMPTY_PAGES: u32 = 100;

/// Outcome of a single sampling attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// The chosen image, or `None` when the random page was empty.
    pub candidate: Option<CandidateImage>,
    /// Page bound derived from the total result count of this search.
    pub refined_max_page_index: u32,
    /// Total result count as reported by the server.
    pub total_result_count: u64,
}

pub struct Sampler<S> {
    api: S,
    rng: StdRng,
}

impl<S: SearchApi + Sync> Sampler<S> {
    /// Sampler drawing pages and offsets from `rng`.
    pub const fn with_rng(api: S, rng: StdRng) -> Self {
        Self { api, rng }
    }

    #[inline]
    pub const fn api(&self) -> &S {
        &self.api
    }

    /// Runs one sampling attempt on a random page in `[0, max_page_index]`.
    ///
    /// An empty page is not an error: the returned [`Sample`] simply has no candidate.
    /// Network and parsing failures are returned as is.
    pub async fn sample(
        &mut self,
        tags: &str,
        exclude_tags: &str,
        max_page_index: u32,
    ) -> Result<Sample, ExtractorError> {
        let page = self.rng.gen_range(0..=max_page_index);
        let mut offset = self.rng.gen_range(0..=PAGE_SIZE) as usize;

        let query = tag_expression(tags, exclude_tags);
        let result = self.api.search_page(&query, page).await?;

        let refined_max_page_index = max_page_index_for(result.total_count);
        debug!(
            "Page {page}: {} posts, {} results in total",
            result.posts.len(),
            result.total_count
        );

        if result.posts.is_empty() {
            return Ok(Sample {
                candidate: None,
                refined_max_page_index,
                total_result_count: result.total_count,
            });
        }

        if offset >= result.posts.len() {
            offset = self.rng.gen_range(0..result.posts.len());
        }

        let Some(post) = result.posts.into_iter().nth(offset) else {
            return Err(ExtractorError::InvalidServerResponse);
        };

        Ok(Sample {
            candidate: Some(CandidateImage {
                url: post.file_url,
                rating: post.rating,
                source_page_index: page,
                total_result_count: result.total_count,
            }),
            refined_max_page_index,
            total_result_count: result.total_count,
        })
    }

    /// Samples until an image is found, lowering `max_page_index` along the way.
    ///
    /// Images whose URL is in `posted` are rerolled up to [`MAX_REPEAT_REROLLS`] times.
    pub async fn pick(
        &mut self,
        tags: &str,
        exclude_tags: &str,
        max_page_index: &mut u32,
        posted: &BTreeSet<String>,
    ) -> Result<CandidateImage, ExtractorError> {
        let mut rerolls = 0;
        let mut empty_pages = 0;

        loop {
            let sample = self.sample(tags, exclude_tags, *max_page_index).await?;

            if sample.refined_max_page_index < *max_page_index {
                info!(
                    "Lowering max page index from {} to {}",
                    max_page_index, sample.refined_max_page_index
                );
                *max_page_index = sample.refined_max_page_index;
            }

            let Some(candidate) = sample.candidate else {
                if sample.total_result_count == 0 {
                    return Err(ExtractorError::ZeroPosts);
                }

                empty_pages += 1;
                if empty_pages >= MAX_EMPTY_PAGES {
                    return Err(ExtractorError::TooManyEmptyPages {
                        attempts: empty_pages,
                    });
                }

                debug!("Landed on an empty page, sampling again");
                continue;
            };

            if posted.contains(&candidate.url) && rerolls < MAX_REPEAT_REROLLS {
                rerolls += 1;
                debug!("{} was already posted, rerolling", candidate.url);
                continue;
            }

            return Ok(candidate);
        }
    }
}
