//! In-memory [`SearchApi`] for tests, here and in the crates built on top of this one.
use std::collections::HashMap;
use std::sync::Mutex;

use brp_common::post::rating::Rating;

use crate::{
    error::ExtractorError,
    imageboards::{SearchApi, SearchPage, SearchPost},
};

/// Search API backed by a page map. Pages not present in `pages` come back empty.
pub struct FakeSearch {
    pub total_count: u64,
    pub pages: HashMap<u32, Vec<SearchPost>>,
    /// Every `(tags, page)` asked for, in order.
    pub requests: Mutex<Vec<(String, u32)>>,
}

impl FakeSearch {
    pub fn new(total_count: u64) -> Self {
        Self {
            total_count,
            pages: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fills pages with `count` posts, 100 per page, named after their position.
    pub fn with_posts(count: u64, rating: Rating) -> Self {
        let mut search = Self::new(count);
        for idx in 0..count {
            let page = u32::try_from(idx / 100).unwrap();
            search.pages.entry(page).or_default().push(SearchPost {
                file_url: format!("https://img.example/images/{idx}.jpg"),
                rating,
            });
        }
        search
    }

    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests().into_iter().map(|(_, p)| p).collect()
    }
}

impl SearchApi for FakeSearch {
    async fn search_page(&self, tags: &str, page: u32) -> Result<SearchPage, ExtractorError> {
        self.requests.lock().unwrap().push((tags.to_string(), page));
        Ok(SearchPage {
            total_count: self.total_count,
            posts: self.pages.get(&page).cloned().unwrap_or_default(),
        })
    }
}
