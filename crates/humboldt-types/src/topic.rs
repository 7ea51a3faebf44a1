//! Topic buckets used to route questions to a knowledge base.
//!
//! The set is fixed. Each bucket maps to an opaque knowledge-base id supplied
//! through configuration; the display names match the categories offered in
//! the chat UI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named routing category selecting which knowledge base answers a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TopicBucket {
    /// Research documents, funding opportunities, compliance. The fallback bucket.
    #[default]
    #[serde(rename = "Research")]
    Research,
    /// Committee and council meeting minutes.
    #[serde(rename = "Meeting Minutes")]
    MeetingMinutes,
    /// Student records / PeopleSoft questions.
    #[serde(rename = "PeopleSoft Questions")]
    PeopleSoft,
}

impl TopicBucket {
    /// Every bucket, in classification priority order.
    pub const ALL: [TopicBucket; 3] = [
        TopicBucket::Research,
        TopicBucket::MeetingMinutes,
        TopicBucket::PeopleSoft,
    ];

    /// Human-readable name shown in the UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            TopicBucket::Research => "Research",
            TopicBucket::MeetingMinutes => "Meeting Minutes",
            TopicBucket::PeopleSoft => "PeopleSoft Questions",
        }
    }

    /// Short identifier for CLI flags and URLs.
    pub fn slug(&self) -> &'static str {
        match self {
            TopicBucket::Research => "research",
            TopicBucket::MeetingMinutes => "meeting-minutes",
            TopicBucket::PeopleSoft => "peoplesoft",
        }
    }
}

impl fmt::Display for TopicBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TopicBucket {
    type Err = String;

    /// Accepts either the display name or the slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TopicBucket::ALL
            .into_iter()
            .find(|t| t.slug() == wanted || t.display_name().to_lowercase() == wanted)
            .ok_or_else(|| format!("invalid topic: '{}'", s.trim()))
    }
}
