use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One post as read from the live timeline.
///
/// Equality compares all four fields. Traversal relies on that to detect a
/// timeline that stopped loading new content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub time: NaiveDateTime,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl PostRecord {
    #[must_use]
    pub fn triple(&self) -> ReactionTriple {
        ReactionTriple {
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
        }
    }
}

/// Reaction counts for one post, identical in shape whether they came from
/// markup or from recognized text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactionTriple {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl ReactionTriple {
    pub const ZERO: Self = Self {
        likes: 0,
        comments: 0,
        shares: 0,
    };

    #[must_use]
    pub fn new(likes: u64, comments: u64, shares: u64) -> Self {
        Self {
            likes,
            comments,
            shares,
        }
    }
}

/// Per-account totals. Field names double as the summary CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "URL_HASH")]
    pub identity_hash: String,
    #[serde(rename = "ToplamBegeni")]
    pub total_likes: u64,
    #[serde(rename = "ToplamYorum")]
    pub total_comments: u64,
    #[serde(rename = "ToplamPaylasim")]
    pub total_shares: u64,
}
