//! General enum for rating posts found by the sampler
//! # Post Rating
//! Gelbooru classifies posts considering how explicit they are.
//!
//! Posts are classified into 4 special tags:
//! * `General`: Posts that don't involve anything suggestive. Usually normal fanart.
//! * `Sensitive`: Posts with mild suggestive elements, swimsuits and the like.
//! * `Questionable`: Posts that involve nude/seminude characters or other suggestive art.
//! * `Explicit`: Posts that are explicitly pornographic or have other sensitive content such as gore, etc.
//!
//! Anything that isn't `General` is uploaded with the sensitive flag set.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum Rating {
    /// Represents posts that are don't involve anything suggestive or sensitive.
    General,
    /// Represents posts with mild suggestive elements.
    Sensitive,
    /// Represents posts that have some degree of nudity or sexually suggestive elements.
    Questionable,
    /// Represents posts that have explicit elements of pornography, gore, death, etc.
    Explicit,
    /// Represents a failure to parse the `rating` tag into one of the above.
    #[default]
    Unknown,
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "General"),
            Self::Sensitive => write!(f, "Sensitive"),
            Self::Questionable => write!(f, "Questionable"),
            Self::Explicit => write!(f, "Explicit"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Rating {
    /// Guess the variant according to the rating tag present in the post
    pub fn from_rating_str(s: &str) -> Self {
        match s {
            "g" | "general" | "s" | "safe" => Self::General,
            "sensitive" => Self::Sensitive,
            "q" | "questionable" => Self::Questionable,
            "e" | "explicit" => Self::Explicit,
            _ => Self::Unknown,
        }
    }

    /// Whether media with this rating must be flagged as sensitive when uploaded.
    #[inline]
    pub const fn is_sensitive(self) -> bool {
        !matches!(self, Self::General)
    }
}
