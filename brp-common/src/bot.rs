//! Per-bot configuration
//!
//! Stored bot entries and the defaults record are both [`PartialBotConfig`]s: every field is
//! optional so a bot only needs to spell out what differs from the defaults.
//! [`PartialBotConfig::merge`] overlays an entry on the defaults and yields the [`BotConfig`]
//! used for a single run.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default search endpoint, the Gelbooru DAPI in JSON mode.
pub const DEFAULT_SEARCH_URL: &str = "https://gelbooru.com/index.php?page=dapi&s=post&q=index&json=1";

/// Page bound given to bots that never ran before.
pub const DEFAULT_MAX_PAGE_INDEX: u32 = 100;

/// Fully resolved configuration of a single bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Positive search filter, in the imageboard's tag syntax.
    pub tags: String,
    /// Negative search filter. Empty means no exclusion clause is sent.
    pub exclude_tags: String,
    /// First line of every post.
    pub message: String,
    /// Hashtag block appended to the message once in a while.
    pub hashtags: String,
    /// API root of the Misskey instance, like `https://example.social/api/`.
    pub service_url: String,
    /// Access token of the bot account.
    pub service_token: String,
    /// Search endpoint, including the fixed DAPI query parameters.
    pub search_url: String,
    pub search_api_key: Option<String>,
    pub search_user_id: Option<String>,
    /// Inclusive upper bound for the random page index.
    pub max_page_index: u32,
    /// Every image URL this bot already published.
    pub posted_image_urls: BTreeSet<String>,
}

/// A bot entry as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialBotConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_page_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_image_urls: Option<BTreeSet<String>>,
}

impl PartialBotConfig {
    /// The entry written by `--gen-config` and the fallback defaults when no defaults file exists.
    pub fn template() -> Self {
        Self {
            tags: Some(String::from("rating:general")),
            exclude_tags: Some(String::new()),
            message: Some(String::from("Random image from Gelbooru")),
            hashtags: Some(String::new()),
            service_url: Some(String::from("https://misskey.example/api/")),
            service_token: Some(String::from("NONE")),
            search_url: Some(String::from(DEFAULT_SEARCH_URL)),
            search_api_key: None,
            search_user_id: None,
            max_page_index: Some(DEFAULT_MAX_PAGE_INDEX),
            posted_image_urls: Some(BTreeSet::new()),
        }
    }

    /// Overlays `self` on `defaults`. Fields missing from both fall back to empty values,
    /// [`DEFAULT_SEARCH_URL`] and [`DEFAULT_MAX_PAGE_INDEX`].
    pub fn merge(&self, defaults: &Self) -> BotConfig {
        macro_rules! pick {
            ($field:ident) => {
                self.$field
                    .as_ref()
                    .or(defaults.$field.as_ref())
                    .cloned()
            };
        }

        BotConfig {
            tags: pick!(tags).unwrap_or_default(),
            exclude_tags: pick!(exclude_tags).unwrap_or_default(),
            message: pick!(message).unwrap_or_default(),
            hashtags: pick!(hashtags).unwrap_or_default(),
            service_url: pick!(service_url).unwrap_or_default(),
            service_token: pick!(service_token).unwrap_or_default(),
            search_url: pick!(search_url).unwrap_or_else(|| String::from(DEFAULT_SEARCH_URL)),
            search_api_key: pick!(search_api_key),
            search_user_id: pick!(search_user_id),
            max_page_index: pick!(max_page_index).unwrap_or(DEFAULT_MAX_PAGE_INDEX),
            // History belongs to the bot, never to the defaults record.
            posted_image_urls: self.posted_image_urls.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{BotConfig, PartialBotConfig, DEFAULT_MAX_PAGE_INDEX, DEFAULT_SEARCH_URL};
    use std::collections::BTreeSet;

    #[test]
    fn entry_overrides_defaults() {
        let defaults = PartialBotConfig::template();
        let entry = PartialBotConfig {
            tags: Some(String::from("rating:safe cat_ears")),
            max_page_index: Some(7),
            ..Default::default()
        };

        let merged = entry.merge(&defaults);

        assert_eq!(merged.tags, "rating:safe cat_ears");
        assert_eq!(merged.max_page_index, 7);
        assert_eq!(merged.message, "Random image from Gelbooru");
        assert_eq!(merged.search_url, DEFAULT_SEARCH_URL);
    }

    #[test]
    fn missing_everywhere_uses_fallbacks() {
        let merged: BotConfig = PartialBotConfig::default().merge(&PartialBotConfig::default());

        assert!(merged.tags.is_empty());
        assert!(merged.exclude_tags.is_empty());
        assert_eq!(merged.max_page_index, DEFAULT_MAX_PAGE_INDEX);
        assert!(merged.posted_image_urls.is_empty());
    }

    #[test]
    fn posted_history_is_not_inherited() {
        let defaults = PartialBotConfig {
            posted_image_urls: Some(BTreeSet::from([String::from("https://a/b.png")])),
            ..Default::default()
        };

        let merged = PartialBotConfig::default().merge(&defaults);

        assert!(merged.posted_image_urls.is_empty());
    }

    #[test]
    fn sparse_entry_serializes_sparse() {
        let entry = PartialBotConfig {
            tags: Some(String::from("1girl")),
            ..Default::default()
        };

        let json = serde_json::to_string(&entry).unwrap();

        assert_eq!(json, r#"{"tags":"1girl"}"#);
    }
}
