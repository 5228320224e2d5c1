//! Sensation classification
//!
//! Each region owns a catalog mapping symptom tags to a category and a severity
//! tier. The mode engine only needs the highest severity across the reported
//! tags.
//!
//! Unknown tags classify as `Severity::None` and are logged at warn level.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::models::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensationCategory {
    /// "Feeling good" / "nothing to report"
    Positive,
    Stiffness,
    Pain,
    Swelling,
    Instability,
    Neural,
    Mechanical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensationEntry {
    pub label: String,
    pub category: SensationCategory,
    pub severity: Severity,
}

/// Result of classifying a single tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: SensationCategory,
    pub severity: Severity,
}

impl Classification {
    const UNKNOWN: Classification = Classification {
        category: SensationCategory::Mechanical,
        severity: Severity::None,
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensationCatalog {
    entries: BTreeMap<String, SensationEntry>,
}

impl SensationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion used by the built-in region tables
    pub fn with(
        mut self,
        tag: &str,
        label: &str,
        category: SensationCategory,
        severity: Severity,
    ) -> Self {
        self.entries.insert(
            tag.to_string(),
            SensationEntry {
                label: label.to_string(),
                category,
                severity,
            },
        );
        self
    }

    pub fn get(&self, tag: &str) -> Option<&SensationEntry> {
        self.entries.get(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn classify(&self, tag: &str) -> Classification {
        match self.entries.get(tag) {
            Some(entry) => Classification {
                category: entry.category,
                severity: entry.severity,
            },
            None => {
                warn!(tag, "Unknown sensation tag, treating as neutral");
                Classification::UNKNOWN
            }
        }
    }

    /// Highest severity across the tags, `None` for an empty set
    pub fn max_severity<'a, I>(&self, tags: I) -> Severity
    where
        I: IntoIterator<Item = &'a String>,
    {
        tags.into_iter()
            .map(|tag| self.classify(tag).severity)
            .max()
            .unwrap_or(Severity::None)
    }

    pub fn has_danger<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        tags.into_iter()
            .any(|tag| self.classify(tag).severity == Severity::Danger)
    }

    pub fn has_warning<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        tags.into_iter()
            .any(|tag| self.classify(tag).severity == Severity::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SensationCatalog {
        SensationCatalog::new()
            .with("good", "Feels good", SensationCategory::Positive, Severity::None)
            .with("stiffness", "Stiff", SensationCategory::Stiffness, Severity::None)
            .with("swelling", "Swollen", SensationCategory::Swelling, Severity::Warning)
            .with("locking", "Locking", SensationCategory::Mechanical, Severity::Danger)
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_known_tag() {
        let c = catalog().classify("swelling");
        assert_eq!(c.category, SensationCategory::Swelling);
        assert_eq!(c.severity, Severity::Warning);
    }

    #[test]
    fn test_unknown_tag_is_neutral() {
        let c = catalog().classify("tingling-elbow");
        assert_eq!(c.severity, Severity::None);
        assert!(!catalog().has_warning(&tags(&["tingling-elbow"])));
        assert!(!catalog().has_danger(&tags(&["tingling-elbow"])));
    }

    #[test]
    fn test_has_warning_and_danger_are_exact() {
        let catalog = catalog();
        let danger_only = tags(&["locking"]);
        assert!(catalog.has_danger(&danger_only));
        assert!(!catalog.has_warning(&danger_only));

        let mixed = tags(&["stiffness", "swelling"]);
        assert!(catalog.has_warning(&mixed));
        assert!(!catalog.has_danger(&mixed));
    }

    #[test]
    fn test_max_severity() {
        let catalog = catalog();
        assert_eq!(catalog.max_severity(&Vec::<String>::new()), Severity::None);
        assert_eq!(catalog.max_severity(&tags(&["good", "locking", "swelling"])), Severity::Danger);
    }
}
