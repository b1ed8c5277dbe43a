// ============================================================
// FREQUENCY ANALYZER
// ============================================================
// Most common words and adjacent-word pairs across ticket texts

use std::collections::HashMap;

use crate::domain::analysis::TermCount;

/// Top words and bigrams
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frequencies {
    pub top_bigrams: Vec<TermCount>,
    pub top_words: Vec<TermCount>,
}

/// Occurrence counter that remembers first-seen order for tie breaking
#[derive(Debug, Default)]
struct TermCounter {
    counts: HashMap<String, (usize, usize)>,
}

impl TermCounter {
    fn add(&mut self, term: String) {
        let next = self.counts.len();
        self.counts.entry(term).or_insert((0, next)).0 += 1;
    }

    fn most_common(self, n: usize) -> Vec<TermCount> {
        let mut entries: Vec<(String, (usize, usize))> = self.counts.into_iter().collect();
        entries.sort_by(|(_, (a_count, a_seen)), (_, (b_count, b_seen))| {
            b_count.cmp(a_count).then(a_seen.cmp(b_seen))
        });
        entries
            .into_iter()
            .take(n)
            .map(|(term, (count, _))| TermCount::new(term, count))
            .collect()
    }
}

pub struct FrequencyAnalyzer {
    top_bigrams: usize,
    top_words: usize,
    within_text: bool,
}

impl FrequencyAnalyzer {
    pub fn new(top_bigrams: usize, top_words: usize) -> Self {
        Self {
            top_bigrams,
            top_words,
            within_text: false,
        }
    }

    /// Form bigrams inside each text only, never across two texts
    pub fn with_bigrams_within_text(mut self, within_text: bool) -> Self {
        self.within_text = within_text;
        self
    }

    /// Count lowercase whitespace-separated words and adjacent-word bigrams.
    /// Texts are read as one stream unless bigrams are kept within each text.
    pub fn analyze<'a, I>(&self, texts: I) -> Frequencies
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut words = TermCounter::default();
        let mut bigrams = TermCounter::default();
        let mut previous: Option<String> = None;

        for text in texts {
            if self.within_text {
                previous = None;
            }

            for token in text.to_lowercase().split_whitespace() {
                if let Some(prev) = previous.as_deref() {
                    bigrams.add(format!("{} {}", prev, token));
                }
                words.add(token.to_string());
                previous = Some(token.to_string());
            }
        }

        Frequencies {
            top_bigrams: bigrams.most_common(self.top_bigrams),
            top_words: words.most_common(self.top_words),
        }
    }
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self::new(20, 30)
    }
}
