// ============================================================
// NAMED-ENTITY RECOGNITION
// ============================================================
// Detects person names in free text for the scrubbing pipeline

mod heuristic;

pub use heuristic::HeuristicRecognizer;

use serde::{Deserialize, Serialize};

/// Kind of entity a recognizer reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
}

/// A recognized entity as a byte range into the analyzed text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

impl EntitySpan {
    pub fn person(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            label: EntityLabel::Person,
        }
    }
}

pub trait EntityRecognizer: Send + Sync {
    /// Entities found in `text`, ordered by start offset. Spans may overlap.
    fn recognize(&self, text: &str) -> Vec<EntitySpan>;
}

/// Sort spans and merge overlapping or touching ranges of the same label
pub fn merge_spans(mut spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    spans.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<EntitySpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end && span.label == last.label => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlapping_spans() {
        let merged = merge_spans(vec![
            EntitySpan::person(10, 15),
            EntitySpan::person(0, 4),
            EntitySpan::person(12, 20),
            EntitySpan::person(20, 24),
        ]);

        assert_eq!(
            merged,
            vec![EntitySpan::person(0, 4), EntitySpan::person(10, 24)]
        );
    }
}
