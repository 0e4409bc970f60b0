//! Publishing pipeline for booru_poster.
//!
//! [`Publisher`](publisher::Publisher) takes an image picked by the sampler and makes sure it
//! ends up attached to a new note on the target instance. [`Runner`](runner::Runner) drives
//! the sampler and the publisher for every configured bot.

pub mod error;
pub mod media;
pub mod publisher;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_utils;
