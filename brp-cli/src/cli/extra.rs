use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use brp_common::log::debug;

use crate::error::CliError;

/// Uses `explicit` when given, falling back to [`brp_common::config_dir`].
pub fn resolve_config_dir(explicit: Option<&Path>) -> Result<PathBuf, CliError> {
    let dir = match explicit {
        Some(path) => {
            if !path.exists() {
                create_dir_all(path)?;
            }
            path.to_path_buf()
        }
        None => brp_common::config_dir()?,
    };

    debug!("Using config directory {}", dir.display());
    Ok(dir)
}
