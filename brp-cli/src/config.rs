//! Bot configuration storage
//!
//! Two JSON files live in the configuration directory:
//! * `config.json`: an object mapping bot names to their (partial) settings. Bots run in the
//!   order they appear in this file.
//! * `defaults.json`: a single partial record every bot falls back to.
//!
//! Both are rewritten pretty-printed. `config.json` is written to a temporary file first and
//! then renamed over the original, so an interrupted write never leaves a truncated config.
use std::path::{Path, PathBuf};

use brp_common::{
    bot::PartialBotConfig,
    log::{debug, warn},
    serde_json::{self, Map, Value},
    tokio::fs::{read_to_string, rename, write},
};

use brp_core::runner::BotReport;

use crate::error::CliError;

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULTS_FILE: &str = "defaults.json";

/// Bot entries in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotEntries(Vec<(String, PartialBotConfig)>);

impl BotEntries {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PartialBotConfig> {
        self.0.iter_mut().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn push(&mut self, name: String, entry: PartialBotConfig) {
        self.0.push((name, entry));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PartialBotConfig)> {
        self.0.iter().map(|(n, e)| (n, e))
    }

    /// Stores the state each report carries back into the matching entry.
    pub fn record(&mut self, reports: &[BotReport]) {
        for report in reports {
            match self.get_mut(&report.name) {
                Some(entry) => report.state.apply_to(entry),
                None => warn!("No stored entry for bot {}", report.name),
            }
        }
    }

    /// First free name of the form `bot_<n>`, counting from the current number of bots.
    pub fn next_free_name(&self) -> String {
        (self.len()..)
            .map(|n| format!("bot_{n}"))
            .find(|name| !self.contains(name))
            .unwrap_or_default()
    }

    fn from_json(file: &Path, raw: &str) -> Result<Self, CliError> {
        let parse_fail = |source| CliError::ConfigParseFail {
            file: file.to_path_buf(),
            source,
        };

        let map = serde_json::from_str::<Map<String, Value>>(raw).map_err(parse_fail)?;

        let mut entries = Self::default();
        for (name, value) in map {
            let entry = serde_json::from_value::<PartialBotConfig>(value).map_err(parse_fail)?;
            entries.push(name, entry);
        }

        Ok(entries)
    }

    fn to_json(&self) -> Result<String, CliError> {
        let mut map = Map::with_capacity(self.len());
        for (name, entry) in self.iter() {
            let value = serde_json::to_value(entry)
                .map_err(|source| CliError::ConfigSerializeFail { source })?;
            map.insert(name.clone(), value);
        }

        serde_json::to_string_pretty(&map).map_err(|source| CliError::ConfigSerializeFail { source })
    }
}

pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[inline]
    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    #[inline]
    pub fn defaults_path(&self) -> PathBuf {
        self.dir.join(DEFAULTS_FILE)
    }

    /// Reads `config.json`. A missing file means no bots.
    pub async fn load_bots(&self) -> Result<BotEntries, CliError> {
        let path = self.config_path();

        if !path.exists() {
            warn!(
                "{} not found, nothing to run. Use --gen-config to create a bot",
                path.display()
            );
            return Ok(BotEntries::default());
        }

        let raw = read_to_string(&path).await?;
        let entries = BotEntries::from_json(&path, &raw)?;
        debug!("Loaded {} bots from {}", entries.len(), path.display());

        Ok(entries)
    }

    /// Reads `defaults.json`, falling back to [`PartialBotConfig::template`] when it is missing.
    pub async fn load_defaults(&self) -> Result<PartialBotConfig, CliError> {
        let path = self.defaults_path();

        if !path.exists() {
            debug!("{} not found, using built-in defaults", path.display());
            return Ok(PartialBotConfig::template());
        }

        let raw = read_to_string(&path).await?;
        serde_json::from_str(&raw).map_err(|source| CliError::ConfigParseFail { file: path, source })
    }

    pub async fn save_bots(&self, entries: &BotEntries) -> Result<(), CliError> {
        let path = self.config_path();
        let tmp = self.dir.join(format!("{CONFIG_FILE}.tmp"));

        write(&tmp, entries.to_json()?).await?;
        rename(&tmp, &path).await?;

        debug!("Saved {} bots to {}", entries.len(), path.display());
        Ok(())
    }

    /// Applies `reports` to `entries` and writes them back. Nothing is written when there are
    /// no stored bots. Returns whether `config.json` was written.
    pub async fn save_run(
        &self,
        entries: &mut BotEntries,
        reports: &[BotReport],
    ) -> Result<bool, CliError> {
        if entries.is_empty() {
            debug!("No bots stored, leaving {} alone", self.config_path().display());
            return Ok(false);
        }

        entries.record(reports);
        self.save_bots(entries).await?;

        Ok(true)
    }

    /// Appends a templated bot to `config.json` and returns its name.
    pub async fn add_bot(&self, name: Option<&str>) -> Result<String, CliError> {
        let mut entries = self.load_bots().await?;

        let name = match name {
            Some(name) if entries.contains(name) => {
                return Err(CliError::BotAlreadyExists {
                    name: name.to_string(),
                });
            }
            Some(name) => name.to_string(),
            None => entries.next_free_name(),
        };

        entries.push(name.clone(), PartialBotConfig::template());
        self.save_bots(&entries).await?;

        Ok(name)
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;
    use std::fs;

    use brp_common::bot::PartialBotConfig;
    use brp_core::error::BotError;
    use brp_core::runner::{BotReport, BotState};
    use tempfile::tempdir;

    use super::{BotEntries, ConfigStore};
    use crate::error::CliError;

    #[tokio::test]
    async fn missing_files_mean_no_bots_and_template_defaults() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());

        assert!(store.load_bots().await.unwrap().is_empty());
        assert_eq!(
            store.load_defaults().await.unwrap(),
            PartialBotConfig::template()
        );
    }

    #[tokio::test]
    async fn bots_keep_file_order() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"zeta": {"tags": "z"}, "alpha": {"tags": "a"}, "mid": {"tags": "m"}}"#,
        )
        .unwrap();
        let store = ConfigStore::new(dir.path());

        let entries = store.load_bots().await.unwrap();
        let names: Vec<&String> = entries.iter().map(|(n, _)| n).collect();

        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn saved_state_round_trips() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let mut entries = BotEntries::default();
        entries.push(
            String::from("cats"),
            PartialBotConfig {
                tags: Some(String::from("cat_ears")),
                ..Default::default()
            },
        );

        let entry = entries.get_mut("cats").unwrap();
        entry.max_page_index = Some(4);
        entry.posted_image_urls = Some(BTreeSet::from([String::from("https://img/a.png")]));
        store.save_bots(&entries).await.unwrap();

        let loaded = store.load_bots().await.unwrap();
        assert_eq!(loaded, entries);
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[tokio::test]
    async fn gen_config_appends_entries() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());

        assert_eq!(store.add_bot(None).await.unwrap(), "bot_0");
        assert_eq!(store.add_bot(Some("cats")).await.unwrap(), "cats");
        assert_eq!(store.add_bot(None).await.unwrap(), "bot_2");

        let loaded = store.load_bots().await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert!(loaded.contains("cats"));
    }

    #[tokio::test]
    async fn gen_config_refuses_duplicates() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        store.add_bot(Some("cats")).await.unwrap();

        let result = store.add_bot(Some("cats")).await;

        assert!(matches!(result, Err(CliError::BotAlreadyExists { .. })));
        assert_eq!(store.load_bots().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn broken_config_is_reported_with_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("config.json"), "{ not json").unwrap();
        let store = ConfigStore::new(dir.path());

        match store.load_bots().await {
            Err(CliError::ConfigParseFail { file, .. }) => {
                assert_eq!(file, dir.path().join("config.json"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn run_without_bots_creates_no_config() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let mut entries = store.load_bots().await.unwrap();

        let written = store.save_run(&mut entries, &[]).await.unwrap();

        assert!(!written);
        assert!(!dir.path().join("config.json").exists());
    }

    #[tokio::test]
    async fn run_state_is_written_back() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        store.add_bot(Some("cats")).await.unwrap();
        let mut entries = store.load_bots().await.unwrap();

        let report = BotReport {
            name: String::from("cats"),
            state: BotState {
                max_page_index: 3,
                posted_image_urls: BTreeSet::new(),
            },
            result: Err(BotError::InvalidConfig { field: "tags" }),
        };
        let written = store.save_run(&mut entries, &[report]).await.unwrap();

        assert!(written);
        let mut loaded = store.load_bots().await.unwrap();
        assert_eq!(loaded.get_mut("cats").unwrap().max_page_index, Some(3));
    }

    #[test]
    fn reports_update_matching_entries() {
        let mut entries = BotEntries::default();
        entries.push(String::from("cats"), PartialBotConfig::template());
        entries.push(String::from("dogs"), PartialBotConfig::template());

        let report = BotReport {
            name: String::from("dogs"),
            state: BotState {
                max_page_index: 7,
                posted_image_urls: BTreeSet::from([String::from("https://img/d.png")]),
            },
            result: Err(BotError::InvalidConfig { field: "tags" }),
        };
        entries.record(&[report]);

        let cats = entries.get_mut("cats").unwrap().clone();
        assert_eq!(cats, PartialBotConfig::template());

        let dogs = entries.get_mut("dogs").unwrap();
        assert_eq!(dogs.max_page_index, Some(7));
        assert_eq!(dogs.posted_image_urls.as_ref().map(BTreeSet::len), Some(1));
    }

    #[test]
    fn next_free_name_skips_taken_names() {
        let mut entries = BotEntries::default();
        entries.push(String::from("bot_1"), PartialBotConfig::default());

        assert_eq!(entries.next_free_name(), "bot_2");
    }
}
