//! Keyword-based topic classification.
//!
//! Maps a raw question to the [`TopicBucket`] whose knowledge base should
//! answer it. Matching is a case-insensitive substring test against fixed
//! keyword sets, checked in priority order; the first set with a hit wins.
//! Questions that match nothing go to the default bucket, so classification
//! never fails.

use humboldt_types::topic::TopicBucket;

/// Research administration: funding, proposals, compliance.
const RESEARCH_KEYWORDS: &[&str] = &[
    "grant",
    "funding",
    "fund ",
    "proposal",
    "sponsored",
    "award",
    "research",
    "irb",
    "iacuc",
    "human subjects",
    "compliance",
    "budget",
    "principal investigator",
    "fellowship",
    "publication",
];

/// Governance: committees, councils, their minutes and agendas.
const MEETING_KEYWORDS: &[&str] = &[
    "meeting",
    "minutes",
    "agenda",
    "committee",
    "council",
    "senate",
    "board",
    "motion",
    "quorum",
];

/// Student and employee records handled through PeopleSoft.
const PEOPLESOFT_KEYWORDS: &[&str] = &[
    "peoplesoft",
    "enroll",
    "registration",
    "register for",
    "transcript",
    "student record",
    "class schedule",
    "course schedule",
    "financial aid",
    "tuition",
    "payroll",
    "timesheet",
];

/// Keyword set for a bucket, as used by [`classify`].
pub fn keywords_for(bucket: TopicBucket) -> &'static [&'static str] {
    match bucket {
        TopicBucket::Research => RESEARCH_KEYWORDS,
        TopicBucket::MeetingMinutes => MEETING_KEYWORDS,
        TopicBucket::PeopleSoft => PEOPLESOFT_KEYWORDS,
    }
}

/// Classify a question into a topic bucket.
///
/// Buckets are tested in [`TopicBucket::ALL`] order (Research, Meeting
/// Minutes, PeopleSoft). Returns [`TopicBucket::default()`] when no keyword
/// matches.
pub fn classify(question: &str) -> TopicBucket {
    let lowered = question.to_lowercase();
    TopicBucket::ALL
        .into_iter()
        .find(|bucket| {
            keywords_for(*bucket)
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_keyword_routes_to_research() {
        assert_eq!(classify("Where do I find grant templates?"), TopicBucket::Research);
        assert_eq!(classify("NSF GRANT deadlines"), TopicBucket::Research);
        assert_eq!(classify("How do I submit an IRB application"), TopicBucket::Research);
    }

    #[test]
    fn test_meeting_keywords() {
        assert_eq!(
            classify("What was decided at the last council meeting?"),
            TopicBucket::MeetingMinutes
        );
        assert_eq!(classify("Show me the agenda for Tuesday"), TopicBucket::MeetingMinutes);
    }

    #[test]
    fn test_peoplesoft_keywords() {
        assert_eq!(
            classify("How do I enroll in classes through PeopleSoft?"),
            TopicBucket::PeopleSoft
        );
        assert_eq!(classify("request an official transcript"), TopicBucket::PeopleSoft);
    }

    #[test]
    fn test_no_keyword_falls_back_to_default() {
        assert_eq!(classify("Where is the library?"), TopicBucket::Research);
        assert_eq!(classify(""), TopicBucket::Research);
    }

    #[test]
    fn test_priority_order_research_first() {
        // Mentions both funding and a meeting; research is checked first.
        assert_eq!(
            classify("minutes from the grant committee meeting"),
            TopicBucket::Research
        );
        // Meeting beats PeopleSoft.
        assert_eq!(
            classify("board meeting about tuition"),
            TopicBucket::MeetingMinutes
        );
    }

    #[test]
    fn test_every_bucket_has_keywords() {
        for bucket in TopicBucket::ALL {
            assert!(!keywords_for(bucket).is_empty(), "{bucket} has no keywords");
            for keyword in keywords_for(bucket) {
                assert_eq!(*keyword, keyword.to_lowercase(), "keywords must be lower-case");
            }
        }
    }
}
