//! Canned replies for greetings, farewells and thanks.
//!
//! Checked before any knowledge-base call so that "hi" or "thanks" never
//! costs a retrieval round-trip. Matching is exact after trimming and
//! lower-casing: "hello" matches, "hello there" does not.

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "hiya",
    "howdy",
    "good morning",
    "good afternoon",
    "good evening",
];

const FAREWELLS: &[&str] = &[
    "bye",
    "goodbye",
    "good bye",
    "see you",
    "see you later",
    "see ya",
    "farewell",
    "good night",
];

const GRATITUDE: &[&str] = &[
    "thanks",
    "thank you",
    "thank you so much",
    "thanks a lot",
    "thanks so much",
    "thx",
    "ty",
    "much appreciated",
    "appreciate it",
];

pub const GREETING_REPLY: &str = "Hello! I'm Humboldt Helper. Ask me about research documents, \
     funding opportunities, meeting minutes, or PeopleSoft questions.";

pub const FAREWELL_REPLY: &str =
    "Goodbye! Come back any time you need help finding research resources.";

pub const GRATITUDE_REPLY: &str = "You're welcome! Let me know if there's anything else I can help you find.";

/// The phrase sets in match order, each with its reply.
const SMALL_TALK: &[(&[&str], &str)] = &[
    (GREETINGS, GREETING_REPLY),
    (FAREWELLS, FAREWELL_REPLY),
    (GRATITUDE, GRATITUDE_REPLY),
];

/// Return a canned reply if `prompt` is exactly a known small-talk phrase.
///
/// `None` means the caller should fall through to the knowledge base.
pub fn detect_small_talk(prompt: &str) -> Option<&'static str> {
    let normalized = prompt.trim().to_lowercase();
    SMALL_TALK
        .iter()
        .find(|(phrases, _)| phrases.contains(&normalized.as_str()))
        .map(|(_, reply)| *reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_trimmed_and_case_insensitive() {
        assert_eq!(detect_small_talk("  Hello  "), Some(GREETING_REPLY));
        assert_eq!(detect_small_talk("GOOD MORNING"), Some(GREETING_REPLY));
    }

    #[test]
    fn test_exact_match_only() {
        assert_eq!(detect_small_talk("hello there"), None);
        assert_eq!(detect_small_talk("thanks for the grant info"), None);
    }

    #[test]
    fn test_farewell_and_gratitude() {
        assert_eq!(detect_small_talk("bye"), Some(FAREWELL_REPLY));
        assert_eq!(detect_small_talk("See you later"), Some(FAREWELL_REPLY));
        assert_eq!(detect_small_talk("thanks"), Some(GRATITUDE_REPLY));
        assert_eq!(detect_small_talk("Thank You"), Some(GRATITUDE_REPLY));
    }

    #[test]
    fn test_empty_prompt_is_not_small_talk() {
        assert_eq!(detect_small_talk(""), None);
        assert_eq!(detect_small_talk("   "), None);
    }

    #[test]
    fn test_phrase_sets_do_not_overlap() {
        for (i, (a, _)) in SMALL_TALK.iter().enumerate() {
            for (b, _) in &SMALL_TALK[i + 1..] {
                assert!(a.iter().all(|p| !b.contains(p)));
            }
        }
    }
}
