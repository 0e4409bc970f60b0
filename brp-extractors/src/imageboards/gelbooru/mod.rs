//! Search client for Gelbooru-based imageboards
//!
//! Only the JSON flavour of the DAPI (`json=1`) is supported, since it is the only one that
//! reports the total result count next to the posts, in the `@attributes` block.

use brp_common::{
    client,
    log::debug,
    post::{rating::Rating, PAGE_SIZE},
    reqwest::Client,
    serde_json,
};

use crate::error::ExtractorError;
use crate::imageboards::{SearchApi, SearchPage, SearchPost};

use self::models::GelbooruTopLevel;

mod models;

pub struct GelbooruApi {
    client: Client,
    search_url: String,
    api_key: Option<String>,
    user_id: Option<String>,
}

impl GelbooruApi {
    /// Sets up a client for `search_url`, which is expected to already carry the fixed DAPI
    /// parameters, like `https://gelbooru.com/index.php?page=dapi&s=post&q=index&json=1`.
    pub fn new(search_url: &str) -> Result<Self, ExtractorError> {
        Ok(Self {
            client: client!()?,
            search_url: search_url.to_string(),
            api_key: None,
            user_id: None,
        })
    }

    /// Sends the API credentials along with every search. Both values must be set for Gelbooru
    /// to accept them.
    #[must_use]
    pub fn with_credentials(mut self, api_key: Option<String>, user_id: Option<String>) -> Self {
        self.api_key = api_key;
        self.user_id = user_id;
        self
    }

    /// Parses a raw DAPI JSON response.
    pub fn map_page(raw_json: &str) -> Result<SearchPage, ExtractorError> {
        let response = serde_json::from_str::<GelbooruTopLevel>(raw_json)?;

        let posts = response
            .post
            .into_iter()
            .filter_map(|post| {
                let file_url = post.file_url?;
                let rating = post
                    .rating
                    .as_deref()
                    .map_or(Rating::Unknown, Rating::from_rating_str);
                Some(SearchPost { file_url, rating })
            })
            .collect::<Vec<_>>();

        debug!("List size: {}", posts.len());

        Ok(SearchPage {
            total_count: response.attributes.count,
            posts,
        })
    }
}

impl SearchApi for GelbooruApi {
    async fn search_page(&self, tags: &str, page: u32) -> Result<SearchPage, ExtractorError> {
        debug!("Searching page {page} of \"{tags}\"");

        let mut request = self.client.get(&self.search_url).query(&[
            ("limit", PAGE_SIZE.to_string()),
            ("pid", page.to_string()),
            ("tags", tags.to_string()),
        ]);

        if let (Some(api_key), Some(user_id)) = (&self.api_key, &self.user_id) {
            request = request.query(&[("api_key", api_key), ("user_id", user_id)]);
        }

        let body = request.send().await?.error_for_status()?.text().await?;

        Self::map_page(&body)
    }
}

#[cfg(test)]
mod test {
    use brp_common::post::rating::Rating;

    use super::GelbooruApi;
    use crate::error::ExtractorError;

    const FULL_PAGE: &str = r#"{
        "@attributes": {"limit": 100, "offset": 0, "count": 250},
        "post": [
            {"id": 1, "md5": "aa", "file_url": "https://img3.gelbooru.com/images/aa/aa/aa.jpg", "tags": "1girl solo", "rating": "general"},
            {"id": 2, "md5": "bb", "file_url": "https://img3.gelbooru.com/images/bb/bb/bb.png", "tags": "cat", "rating": "questionable"},
            {"id": 3, "md5": "cc", "tags": "deleted", "rating": "explicit"}
        ]
    }"#;

    const EMPTY_PAGE: &str = r#"{"@attributes": {"limit": 100, "offset": 300, "count": 250}}"#;

    #[test]
    fn maps_posts_and_count() {
        let page = GelbooruApi::map_page(FULL_PAGE).unwrap();

        assert_eq!(page.total_count, 250);
        assert_eq!(page.posts.len(), 2, "posts without a file URL are skipped");
        assert_eq!(page.posts[0].rating, Rating::General);
        assert_eq!(page.posts[1].rating, Rating::Questionable);
        assert_eq!(
            page.posts[1].file_url,
            "https://img3.gelbooru.com/images/bb/bb/bb.png"
        );
    }

    #[test]
    fn missing_post_array_is_an_empty_page() {
        let page = GelbooruApi::map_page(EMPTY_PAGE).unwrap();

        assert_eq!(page.total_count, 250);
        assert!(page.posts.is_empty());
    }

    #[test]
    fn garbage_is_a_json_error() {
        let result = GelbooruApi::map_page("<html>rate limited</html>");

        assert!(matches!(result, Err(ExtractorError::JsonSerializeFail(_))));
    }
}
