// ============================================================
// PII SCRUBBER
// ============================================================
// Chain of removal passes over a single free-text value.
// Pass order matters: targeted row values go before the generic
// email/phone patterns, and entity recognition runs last on what is left.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::{Match, Regex, RegexBuilder};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::domain::scrub::{RedactionPass, RowContext, ScrubConfig};
use crate::domain::table::Cell;
use crate::infrastructure::ner::{merge_spans, EntityRecognizer, HeuristicRecognizer};

/// `04` followed by seven digits, e.g. 041165988
static PREFIXED_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b04\d{7}\b").unwrap());

static DIGIT_RUN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").unwrap());

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").unwrap());

static WHITESPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Formats a birthdate cell may be stored in
const BIRTHDATE_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Renderings of a birthdate searched for in free text
const BIRTHDATE_TEXT_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%-m/%-d/%Y",
    "%-d/%-m/%Y",
    "%B %-d, %Y",
    "%b %-d, %Y",
    "%-d %B %Y",
];

/// Text after scrubbing plus the number of removals per pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrubbedText {
    pub text: String,
    pub removals: BTreeMap<RedactionPass, usize>,
}

impl ScrubbedText {
    fn record(&mut self, pass: RedactionPass, count: usize) {
        if count > 0 {
            *self.removals.entry(pass).or_insert(0) += count;
        }
    }
}

/// Removes PII from free-text ticket fields
pub struct PiiScrubber {
    name_list_pattern: Option<Regex>,
    recognizer: Option<Box<dyn EntityRecognizer>>,
}

impl PiiScrubber {
    /// Create a scrubber for the given configuration
    pub fn new(config: &ScrubConfig) -> Self {
        let recognizer: Option<Box<dyn EntityRecognizer>> = if config.ner_enabled {
            Some(Box::new(
                HeuristicRecognizer::new().with_stopwords(&config.ner_stopwords),
            ))
        } else {
            None
        };

        Self {
            name_list_pattern: build_word_pattern(&config.name_list, "name list"),
            recognizer,
        }
    }

    /// Replace the entity recognizer (or disable the pass with `None`)
    pub fn with_recognizer(mut self, recognizer: Option<Box<dyn EntityRecognizer>>) -> Self {
        self.recognizer = recognizer;
        self
    }

    /// Scrub a cell. Missing and empty values are returned unchanged.
    pub fn clean_text(&self, text: Option<&str>, ctx: &RowContext) -> Cell {
        match text {
            None => None,
            Some("") => Some(String::new()),
            Some(value) => Some(self.scrub(value, ctx).text),
        }
    }

    /// Run every removal pass over `text`
    pub fn scrub(&self, text: &str, ctx: &RowContext) -> ScrubbedText {
        let mut result = ScrubbedText::default();

        let (text, count) = clean_student_numbers(text);
        result.record(RedactionPass::StudentNumber, count);

        let (text, count) = match ctx.normalized_student_number() {
            Some(number) => remove_digit_bounded(&text, &[number]),
            None => (text, 0),
        };
        result.record(RedactionPass::RowStudentNumber, count);

        let (text, count) = match ctx.birthdate.as_deref() {
            Some(birthdate) => remove_digit_bounded(&text, &birthdate_renderings(birthdate)),
            None => (text, 0),
        };
        result.record(RedactionPass::Birthdate, count);

        // Known names only count when capitalized ("Will" the person, not "will")
        let (text, count) = match &self.name_list_pattern {
            Some(pattern) => remove_matches(pattern, &text, |m| {
                m.as_str().chars().next().is_some_and(|c| c.is_lowercase())
            }),
            None => (text, 0),
        };
        result.record(RedactionPass::NameList, count);

        let (text, count) = match ctx.contact_name.as_deref() {
            Some(contact) => {
                let parts = contact_name_parts(contact);
                match build_word_pattern(&parts, "contact name") {
                    Some(pattern) => remove_matches(&pattern, &text, |_| false),
                    None => (text, 0),
                }
            }
            None => (text, 0),
        };
        result.record(RedactionPass::ContactName, count);

        let (text, count) = remove_matches(&EMAIL_PATTERN, &text, |_| false);
        result.record(RedactionPass::Email, count);

        let (text, count) = remove_matches(&PHONE_PATTERN, &text, |_| false);
        result.record(RedactionPass::Phone, count);

        let (text, count) = match &self.recognizer {
            Some(recognizer) => remove_entities(recognizer.as_ref(), &text),
            None => (text, 0),
        };
        result.record(RedactionPass::NamedEntity, count);

        result.text = WHITESPACE_PATTERN.replace_all(&text, " ").trim().to_string();

        if !result.removals.is_empty() {
            debug!("Scrubbed text with removals {:?}", result.removals);
        }
        result
    }
}

/// Remove school-style identifiers: `04` + 7 digits, and any standalone
/// run of 7 or 8 digits
pub fn clean_student_numbers(text: &str) -> (String, usize) {
    let (text, prefixed) = remove_matches(&PREFIXED_ID_PATTERN, text, |_| false);
    let (text, runs) = remove_matches(&DIGIT_RUN_PATTERN, &text, |m| {
        !(7..=8).contains(&m.as_str().chars().count())
    });
    (text, prefixed + runs)
}

/// Remove every match of `pattern` for which `keep` returns false
fn remove_matches<F>(pattern: &Regex, text: &str, mut keep: F) -> (String, usize)
where
    F: FnMut(&Match) -> bool,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut removed = 0;

    for m in pattern.find_iter(text) {
        if keep(&m) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        last = m.end();
        removed += 1;
    }

    if removed == 0 {
        return (text.to_string(), 0);
    }

    out.push_str(&text[last..]);
    (out, removed)
}

/// Remove case-insensitive literal occurrences not adjacent to another digit
fn remove_digit_bounded(text: &str, literals: &[String]) -> (String, usize) {
    let mut literals: Vec<&String> = literals.iter().filter(|l| !l.is_empty()).collect();
    if literals.is_empty() {
        return (text.to_string(), 0);
    }

    // Longest first so "04/09/2001" wins over "4/9/2001"
    literals.sort_by_key(|l| std::cmp::Reverse(l.len()));
    let alternation = literals
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");

    let pattern = match RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            warn!("Skipping literal removal, pattern failed to build: {}", e);
            return (text.to_string(), 0);
        }
    };

    remove_matches(&pattern, text, |m| {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
    })
}

/// Whole-word, case-insensitive alternation of the given words
fn build_word_pattern<S: AsRef<str>>(words: &[S], what: &str) -> Option<Regex> {
    let mut words: Vec<&str> = words
        .iter()
        .map(|w| w.as_ref().trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().count() >= 2)
        .collect();
    if words.is_empty() {
        return None;
    }

    words.sort_by_key(|w| std::cmp::Reverse(w.len()));
    words.dedup();

    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            warn!("Skipping {} pass, pattern failed to build: {}", what, e);
            None
        }
    }
}

/// Split a contact name into removable parts ("Smith, John A." -> Smith, John)
fn contact_name_parts(contact: &str) -> Vec<String> {
    contact
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|part| part.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|part| part.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// The raw birthdate plus its common renderings when it parses as a date
fn birthdate_renderings(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    let mut renderings = vec![raw.to_string()];

    let date = BIRTHDATE_INPUT_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(raw, format)
            .map(|dt| dt.date())
            .or_else(|_| chrono::NaiveDate::parse_from_str(raw, format))
            .ok()
    });

    if let Some(date) = date {
        for format in BIRTHDATE_TEXT_FORMATS {
            let rendered = date.format(format).to_string();
            if !renderings.contains(&rendered) {
                renderings.push(rendered);
            }
        }
    }

    renderings
}

/// Remove recognized person spans, right to left so offsets stay valid
fn remove_entities(recognizer: &dyn EntityRecognizer, text: &str) -> (String, usize) {
    let spans = merge_spans(recognizer.recognize(text));
    if spans.is_empty() {
        return (text.to_string(), 0);
    }

    let mut out = text.to_string();
    for span in spans.iter().rev() {
        out.replace_range(span.start..span.end, "");
    }
    (out, spans.len())
}
