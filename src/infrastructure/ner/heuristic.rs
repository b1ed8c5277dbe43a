//! Rule-based person-name recognizer.
//!
//! Names are only taken where the surrounding text signals a person: an
//! honorific, a self-introduction, a greeting at the start of a line, or a
//! closing/thanks. Capitalized words elsewhere are left alone so that product
//! names, course codes and sentence starts survive scrubbing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::{EntityRecognizer, EntitySpan};

static HONORIFIC_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:Mrs|Mr|Ms|Miss|Dr|Prof)\.?[ \t]+").unwrap());

static INTRODUCTION_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:my name is|this is)[ \t]+").unwrap());

static GREETING_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:hi|hello|hey|dear|good (?:morning|afternoon|evening))[ \t]*,?[ \t]+")
        .unwrap()
});

static THANKS_CUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bthank(?:s| you)[ \t]*[,!.]?[ \t]*(?:\r?\n)?[ \t]*").unwrap());

// Closings need punctuation or a line break before the name ("Best, Ana"),
// otherwise "the best Course" would qualify.
static CLOSING_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:best|kind|warm) regards|regards|sincerely|cheers|best)[ \t]*(?:[,!.-][ \t]*(?:\r?\n)?|\r?\n)[ \t]*",
    )
    .unwrap()
});

static NAME_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\p{Lu}(?:'\p{Lu})?\p{Ll}+(?:\p{Lu}\p{Ll}+)?(?:-\p{Lu}?\p{Ll}+)*").unwrap()
});

static NAME_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]+").unwrap());

const DEFAULT_STOPWORDS: &[&str] = &[
    "Advance", "Again", "Admissions", "All", "Department", "Desk", "Dr", "Everyone", "Folks",
    "For", "Help", "Madam", "Miss", "Mr", "Mrs", "Ms", "Much", "Office", "Please", "Prof",
    "Registrar", "Registration", "Service", "Services", "Sir", "So", "Staff", "Student",
    "Students", "Support", "Team", "The", "There", "You",
];

/// Person-name recognizer driven by contextual cues
pub struct HeuristicRecognizer {
    stopwords: HashSet<String>,
}

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self {
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Add words that end a name run (matched case-insensitively)
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.stopwords.insert(capitalize(word.as_ref()));
        }
        self
    }

    fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(&capitalize(token))
    }

    /// Take the whole run of capitalized tokens starting at `from`
    fn name_run(&self, text: &str, from: usize) -> Option<EntitySpan> {
        let mut cursor = from;
        let mut end = None;

        loop {
            let mut token_start = cursor;
            if end.is_some() {
                match NAME_SEPARATOR.find(&text[cursor..]) {
                    Some(sep) => token_start += sep.end(),
                    None => break,
                }
            }

            let Some(token) = NAME_TOKEN.find(&text[token_start..]) else {
                break;
            };
            let token_end = token_start + token.end();

            // Reject partial words such as "Abc" in "Abc123"
            let next = text[token_end..].chars().next();
            if next.is_some_and(|c| c.is_alphanumeric() || c == '_') {
                break;
            }

            if self.is_stopword(token.as_str()) {
                break;
            }

            end = Some(token_end);
            cursor = token_end;
        }

        end.map(|end| EntitySpan::person(from, end))
    }
}

impl Default for HeuristicRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let cues: [&Regex; 5] = [
            &HONORIFIC_CUE,
            &INTRODUCTION_CUE,
            &GREETING_CUE,
            &THANKS_CUE,
            &CLOSING_CUE,
        ];

        let mut spans: Vec<EntitySpan> = cues
            .into_iter()
            .flat_map(|cue| cue.find_iter(text))
            .filter_map(|cue_match| self.name_run(text, cue_match.end()))
            .collect();

        spans.sort_by_key(|s| (s.start, s.end));
        spans.dedup();
        spans
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<&str> {
        HeuristicRecognizer::new()
            .recognize(text)
            .into_iter()
            .map(|s| &text[s.start..s.end])
            .collect()
    }

    #[test]
    fn test_honorific_keeps_title() {
        assert_eq!(names("Spoke with Dr. Priya Raman today"), vec!["Priya Raman"]);
        assert_eq!(names("Mrs Smith-Jones called"), vec!["Smith-Jones"]);
    }

    #[test]
    fn test_greeting_and_closing() {
        let text = "Hi Maria,\nMy login fails.\nThanks,\nDaniel O'Neil";
        assert_eq!(names(text), vec!["Maria", "Daniel O'Neil"]);
    }

    #[test]
    fn test_introduction() {
        assert_eq!(
            names("Hello, my name is Kwame Mensah and I need help"),
            vec!["Kwame Mensah"]
        );
        assert_eq!(
            names("Hello, this is Maria Lopez from residence"),
            vec!["Maria Lopez"]
        );
        assert!(names("this is the portal again").is_empty());
    }

    #[test]
    fn test_stopwords_end_names() {
        assert!(names("Hi Support Team, the system is down").is_empty());
        assert!(names("Hello There, thank you for your help").is_empty());
        assert!(names("Thank You").is_empty());
    }

    #[test]
    fn test_custom_stopwords() {
        let recognizer = HeuristicRecognizer::new().with_stopwords(["moodle"]);
        assert!(recognizer.recognize("Thanks Moodle admins").is_empty());
    }

    #[test]
    fn test_capitalized_words_without_cue_are_kept() {
        assert!(names("Visa renewal for Canada is pending").is_empty());
        assert!(names("This is the best Course I have taken").is_empty());
    }

    #[test]
    fn test_name_run_takes_every_token() {
        assert_eq!(
            names("Regards,\nAnna Maria Lopez Garcia"),
            vec!["Anna Maria Lopez Garcia"]
        );
        assert_eq!(names("Thanks, Ana Lopez for nothing"), vec!["Ana Lopez"]);
    }

    #[test]
    fn test_greeting_before_honorific() {
        assert_eq!(names("Dear Dr. Okafor,"), vec!["Okafor"]);
    }

    #[test]
    fn test_accented_names() {
        assert_eq!(names("Dear José,"), vec!["José"]);
    }
}
