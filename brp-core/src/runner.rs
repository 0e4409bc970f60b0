//! Batch runner
//!
//! The runner takes the stored bot entries and the defaults record, and runs every bot once,
//! one after another. A bot failing never stops the batch: each bot gets a [`BotReport`] with
//! either the publish outcome or the error, plus the state to persist for the next run.
//!
//! The runner itself never touches storage. Reading the entries and writing the updated
//! [`BotState`]s back is up to the caller.
use std::collections::BTreeSet;

use brp_common::{
    bot::{BotConfig, PartialBotConfig},
    log::{error, info, warn},
    rand::{rngs::StdRng, SeedableRng},
};
use brp_extractors::{
    imageboards::{gelbooru::GelbooruApi, SearchApi},
    sampler::Sampler,
};

use crate::{
    error::BotError,
    media::{misskey::MisskeyApi, MediaStore},
    publisher::{PublishOutcome, Publisher},
};

/// Builds the remote clients a bot talks to.
pub trait Backend {
    type Search: SearchApi + Sync;
    type Store: MediaStore + Sync;

    fn search_api(&self, bot: &BotConfig) -> Result<Self::Search, BotError>;

    fn media_store(&self, bot: &BotConfig) -> Result<Self::Store, BotError>;

    /// Randomness source for the sampler and the hashtag roll.
    fn rng(&self) -> StdRng {
        StdRng::from_entropy()
    }
}

/// Gelbooru for searching, Misskey for publishing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpBackend;

impl Backend for HttpBackend {
    type Search = GelbooruApi;
    type Store = MisskeyApi;

    fn search_api(&self, bot: &BotConfig) -> Result<Self::Search, BotError> {
        Ok(GelbooruApi::new(&bot.search_url)?
            .with_credentials(bot.search_api_key.clone(), bot.search_user_id.clone()))
    }

    fn media_store(&self, bot: &BotConfig) -> Result<Self::Store, BotError> {
        Ok(MisskeyApi::new(&bot.service_url, &bot.service_token)?)
    }
}

/// State carried over to the next run of a bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotState {
    pub max_page_index: u32,
    pub posted_image_urls: BTreeSet<String>,
}

impl From<&BotConfig> for BotState {
    fn from(bot: &BotConfig) -> Self {
        Self {
            max_page_index: bot.max_page_index,
            posted_image_urls: bot.posted_image_urls.clone(),
        }
    }
}

impl BotState {
    /// Writes this state into a stored entry.
    pub fn apply_to(&self, entry: &mut PartialBotConfig) {
        entry.max_page_index = Some(self.max_page_index);
        entry.posted_image_urls = Some(self.posted_image_urls.clone());
    }
}

/// Result of running a single bot.
#[derive(Debug)]
pub struct BotReport {
    pub name: String,
    /// What should be persisted, whether the run succeeded or not.
    pub state: BotState,
    pub result: Result<PublishOutcome, BotError>,
}

impl BotReport {
    #[inline]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct Runner<B> {
    backend: B,
}

impl Runner<HttpBackend> {
    pub const fn http() -> Self {
        Self::new(HttpBackend)
    }
}

impl<B: Backend> Runner<B> {
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    #[inline]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs every bot in `entries`, in order, merging each one over `defaults`.
    pub async fn run_all<'a, I>(&self, entries: I, defaults: &PartialBotConfig) -> Vec<BotReport>
    where
        I: IntoIterator<Item = (&'a String, &'a PartialBotConfig)>,
    {
        let mut reports = Vec::new();

        for (name, entry) in entries {
            let bot = entry.merge(defaults);
            reports.push(self.run_bot(name, &bot).await);
        }

        let failed = reports.iter().filter(|r| !r.is_success()).count();
        if failed > 0 {
            warn!("{} of {} bots failed", failed, reports.len());
        } else {
            info!("All {} bots ran successfully", reports.len());
        }

        reports
    }

    /// Runs a single, already merged, bot.
    pub async fn run_bot(&self, name: &str, bot: &BotConfig) -> BotReport {
        info!("[{name}] Starting run for \"{}\"", bot.tags);

        let mut state = BotState::from(bot);
        let result = self.process(bot, &mut state).await;

        match &result {
            Ok(outcome) if outcome.note_created => {
                info!("[{name}] Published {}", outcome.source_url);
            }
            Ok(outcome) => {
                warn!(
                    "[{name}] Uploaded {} but the note could not be created",
                    outcome.source_url
                );
            }
            Err(e) => error!("[{name}] {e}"),
        }

        BotReport {
            name: name.to_string(),
            state,
            result,
        }
    }

    async fn process(
        &self,
        bot: &BotConfig,
        state: &mut BotState,
    ) -> Result<PublishOutcome, BotError> {
        validate(bot)?;

        let mut sampler = Sampler::with_rng(self.backend.search_api(bot)?, self.backend.rng());
        let candidate = sampler
            .pick(
                &bot.tags,
                &bot.exclude_tags,
                &mut state.max_page_index,
                &state.posted_image_urls,
            )
            .await?;

        info!(
            "Picked {} (rating: {}) from page {} of {}",
            candidate.url, candidate.rating, candidate.source_page_index, state.max_page_index
        );

        let mut publisher = Publisher::with_rng(
            self.backend.media_store(bot)?,
            &bot.message,
            &bot.hashtags,
            self.backend.rng(),
        );
        let outcome = publisher
            .publish(&candidate, &state.posted_image_urls)
            .await?;

        state.posted_image_urls.insert(candidate.url);

        Ok(outcome)
    }
}

fn validate(bot: &BotConfig) -> Result<(), BotError> {
    let required = [
        ("tags", &bot.tags),
        ("service_url", &bot.service_url),
        ("service_token", &bot.service_token),
        ("search_url", &bot.search_url),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(BotError::InvalidConfig { field });
        }
    }

    Ok(())
}
