use std::{
    env,
    fs::create_dir_all,
    io,
    path::{Path, PathBuf},
};

// Public Exports
pub use directories;
pub use log;
pub use rand;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tokio;

use directories::ProjectDirs;

use log::debug;

pub mod bot;
pub mod macros;
pub mod post;

/// Name used for the `User-Agent` header on every outgoing request.
///
/// It will always follow the version declared inside ```Cargo.toml```
#[inline]
pub fn user_agent() -> String {
    let ua = format!("Rust Booru Poster/{}", env!("CARGO_PKG_VERSION"));
    debug!("Using user-agent: {}", ua);
    ua
}

/// Returns a `PathBuf` pointing to the directory holding `config.json` and `defaults.json`.
///
/// This is XDG-compliant and resolves to
/// `$XDG_CONFIG_HOME/booru-poster` on Linux or
/// `%APPDATA%/booru-poster/booru-poster` on Windows
///
/// Or you can set the env var `BRP_CONFIG_DIR` to point it to a custom location.
///
/// The directory is created if it doesn't exist yet.
pub fn config_dir() -> Result<PathBuf, io::Error> {
    let cfg_path = match env::var("BRP_CONFIG_DIR") {
        Ok(path) => PathBuf::from(path),
        Err(_) => ProjectDirs::from("", "", "booru-poster")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "no home directory for this user")
            })?,
    };

    let cfold = Path::new(&cfg_path);

    if !cfold.exists() {
        create_dir_all(cfold)?;
    }

    Ok(cfold.to_path_buf())
}
