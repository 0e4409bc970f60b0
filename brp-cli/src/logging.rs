//! Log sink setup
//!
//! Logs go to stderr by default. With `--log-file` they are appended to the given file
//! instead, with timestamps, so consecutive runs of the batch end up in the same file.
use std::{fs::OpenOptions, path::Path};

use env_logger::{Builder, Env, Target};

use crate::error::CliError;

/// Initializes `env_logger`. `RUST_LOG` still takes precedence over the default `info` level.
pub fn init_logger(log_file: Option<&Path>) -> Result<(), CliError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(Target::Pipe(Box::new(file)));
            builder.format_timestamp_secs();
        }
        None => {
            builder.format_timestamp(None);
        }
    }

    builder.try_init().map_err(|e| CliError::LoggerInitFail {
        message: e.to_string(),
    })
}
