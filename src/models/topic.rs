// src/models/topic.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Topics offered when no catalog is configured.
pub const DEFAULT_TOPICS: [&str; 8] = [
    "Data Structures",
    "Algorithms",
    "Database Management",
    "Operating Systems",
    "Computer Networks",
    "Machine Learning",
    "Web Development",
    "Software Engineering",
];

/// Mastery classification of a student's average score in one topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Average,
    Strong,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("topic names cannot be blank")]
    BlankTopic,

    #[error("topic '{0}' is listed more than once")]
    DuplicateTopic(String),
}

/// Ordered, duplicate-free list of topic names known at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TopicCatalog {
    topics: Vec<String>,
}

impl TopicCatalog {
    /// Builds a catalog, trimming names and rejecting blanks and duplicates.
    pub fn new<I, S>(topics: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();

        for topic in topics {
            let topic = topic.as_ref().trim();
            if topic.is_empty() {
                return Err(CatalogError::BlankTopic);
            }
            if !seen.insert(topic.to_string()) {
                return Err(CatalogError::DuplicateTopic(topic.to_string()));
            }
            ordered.push(topic.to_string());
        }

        Ok(Self { topics: ordered })
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self {
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_keeps_order() {
        let catalog = TopicCatalog::default();
        let topics: Vec<&str> = catalog.iter().collect();
        assert_eq!(topics, DEFAULT_TOPICS.to_vec());
    }

    #[test]
    fn rejects_duplicates_and_blanks() {
        assert_eq!(
            TopicCatalog::new(["Algorithms", " Algorithms "]),
            Err(CatalogError::DuplicateTopic("Algorithms".to_string()))
        );
        assert_eq!(
            TopicCatalog::new(["Algorithms", "  "]),
            Err(CatalogError::BlankTopic)
        );
    }

    #[test]
    fn empty_catalog_is_allowed() {
        let catalog = TopicCatalog::new(Vec::<String>::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(!catalog.contains("Algorithms"));
    }
}
