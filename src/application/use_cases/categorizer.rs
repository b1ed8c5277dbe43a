use crate::domain::analysis::{CategoryRule, OTHER_CATEGORY};

/// Keyword-based ticket categorizer. The first matching rule wins.
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| CategoryRule {
                keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                name: rule.name,
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Category for a ticket text. Missing text is `Other`.
    pub fn categorize(&self, text: Option<&str>) -> &str {
        let Some(text) = text else {
            return OTHER_CATEGORY;
        };

        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.name.as_str())
            .unwrap_or(OTHER_CATEGORY)
    }

    /// Sort position of a category: rule order, then `Other`, then unknown names
    pub fn rank(&self, category: &str) -> usize {
        self.rules
            .iter()
            .position(|rule| rule.name == category)
            .unwrap_or(if category == OTHER_CATEGORY {
                self.rules.len()
            } else {
                self.rules.len() + 1
            })
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(crate::domain::analysis::default_category_rules())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_categories() {
        let categorizer = Categorizer::default();

        assert_eq!(categorizer.categorize(Some("Question about FASA funding")), "FASA");
        assert_eq!(categorizer.categorize(Some("Forgot my PASSWORD")), "Login");
        assert_eq!(categorizer.categorize(Some("study permit renewal")), "International");
        assert_eq!(categorizer.categorize(Some("Portal shows an Error")), "Technical");
        assert_eq!(categorizer.categorize(Some("How do I register?")), "Registration");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Matches both Login ("password") and Technical ("error")
        let categorizer = Categorizer::default();
        assert_eq!(
            categorizer.categorize(Some("error when resetting password")),
            "Login"
        );
    }

    #[test]
    fn test_unmatched_and_missing_are_other() {
        let categorizer = Categorizer::default();
        assert_eq!(categorizer.categorize(Some("Parking lot question")), "Other");
        assert_eq!(categorizer.categorize(Some("")), "Other");
        assert_eq!(categorizer.categorize(None), "Other");
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let categorizer = Categorizer::new(vec![CategoryRule {
            name: "Parking".to_string(),
            keywords: vec!["Parking Permit".to_string()],
        }]);
        assert_eq!(categorizer.categorize(Some("my parking permit")), "Parking");
    }

    #[test]
    fn test_rank_orders_other_last() {
        let categorizer = Categorizer::default();
        assert_eq!(categorizer.rank("FASA"), 0);
        assert_eq!(categorizer.rank("Other"), 5);
        assert_eq!(categorizer.rank("Unknown"), 6);
    }
}
