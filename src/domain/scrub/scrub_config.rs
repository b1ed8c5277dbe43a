// ============================================================
// SCRUB CONFIGURATION
// ============================================================
// Which columns are cleaned, which are dropped, and which feed row context

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration for PII scrubbing of a ticket table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ScrubConfig {
    /// Free-text columns to scrub in place
    #[validate(length(min = 1))]
    pub columns_to_clean: Vec<String>,

    /// Columns deleted entirely after scrubbing
    pub columns_to_remove: Vec<String>,

    /// Column holding the row's student number
    #[validate(length(min = 1))]
    pub student_number_column: String,

    /// Column holding the row's birthdate
    #[validate(length(min = 1))]
    pub birthdate_column: String,

    /// Column holding the row's contact name
    #[validate(length(min = 1))]
    pub contact_name_column: String,

    /// Known personal names removed wherever they appear capitalized
    pub name_list: Vec<String>,

    /// Run the named-entity pass
    pub ner_enabled: bool,

    /// Extra words the entity recognizer never treats as part of a name
    pub ner_stopwords: Vec<String>,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            columns_to_clean: vec![
                "Description".to_string(),
                "Subject".to_string(),
                "Resolution Comments".to_string(),
            ],
            columns_to_remove: vec![
                "Student Number".to_string(),
                "Birthdate".to_string(),
                "Contact Name".to_string(),
            ],
            student_number_column: "Student Number".to_string(),
            birthdate_column: "Birthdate".to_string(),
            contact_name_column: "Contact Name".to_string(),
            name_list: Vec::new(),
            ner_enabled: true,
            ner_stopwords: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScrubConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_clean_columns_rejected() {
        let config = ScrubConfig {
            columns_to_clean: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
