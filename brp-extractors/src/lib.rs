//! Everything related to finding a random image on a Gelbooru-style imageboard.
//!
//! The [`Sampler`](sampler::Sampler) drives any [`SearchApi`](imageboards::SearchApi)
//! implementation; [`GelbooruApi`](imageboards::gelbooru::GelbooruApi) is the one used in
//! production.

extern crate brp_common;

pub mod error;
pub mod imageboards;
pub mod prelude;
pub mod sampler;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
