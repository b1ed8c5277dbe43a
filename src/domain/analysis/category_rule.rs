// ============================================================
// CATEGORY RULES
// ============================================================
// Ordered keyword lists. The first rule with a matching keyword wins.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category assigned when no rule matches
pub const OTHER_CATEGORY: &str = "Other";

/// A named topic and the lowercase keywords that identify it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryRule {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Whether any keyword is a substring of the already-lowercased text
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.to_lowercase().as_str()))
    }
}

/// Built-in ticket topics
pub fn default_category_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new("FASA", &["fasa", "financial aid", "part-time"]),
        CategoryRule::new("Login", &["login", "password", "authentication"]),
        CategoryRule::new("International", &["international", "visa", "study permit"]),
        CategoryRule::new("Technical", &["system", "error", "bug", "technical"]),
        CategoryRule::new("Registration", &["register", "course", "enrollment"]),
    ]
}
