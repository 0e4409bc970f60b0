use std::{io, path::PathBuf};

use brp_common::serde_json;
use thiserror::Error;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to access file: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", file.display())]
    ConfigParseFail {
        file: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize configuration: {source}")]
    ConfigSerializeFail { source: serde_json::Error },

    #[error("A bot named \"{name}\" already exists")]
    BotAlreadyExists { name: String },

    #[error("Failed to set up logging: {message}")]
    LoggerInitFail { message: String },
}
