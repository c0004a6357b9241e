// src/models/student.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::topic::Strength;

/// Languages the chatbot can answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Te,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Te => "తెలుగు",
        }
    }
}

/// A student's running record for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicScore {
    pub topic: String,
    pub total_attempts: u32,
    /// Rounded cumulative mean of every attempt score, 0-100.
    pub average_score: u32,
    /// Always derived from `average_score`.
    pub strength: Strength,
    pub last_attempt: DateTime<Utc>,
}

/// Stored student document. Never serialized to clients directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub email: String,
    pub name: String,
    pub preferred_language: Language,
    pub created_at: DateTime<Utc>,

    /// Argon2 hash of the login password.
    pub password_hash: String,

    /// Insertion ordered, at most one entry per topic.
    #[serde(default)]
    pub topic_scores: Vec<TopicScore>,
}

impl Student {
    pub fn new(email: &str, name: &str, password_hash: String) -> Self {
        Self {
            id: format!("student-{}", uuid::Uuid::new_v4()),
            email: email.to_string(),
            name: name.to_string(),
            preferred_language: Language::En,
            created_at: Utc::now(),
            password_hash,
            topic_scores: Vec::new(),
        }
    }

    pub fn topic_score(&self, topic: &str) -> Option<&TopicScore> {
        self.topic_scores.iter().find(|t| t.topic == topic)
    }

    pub fn has_attempted(&self, topic: &str) -> bool {
        self.topic_score(topic).is_some()
    }

    pub fn scores_with(&self, strength: Strength) -> impl Iterator<Item = &TopicScore> {
        self.topic_scores
            .iter()
            .filter(move |t| t.strength == strength)
    }
}

/// Student data safe to return over the API.
#[derive(Debug, Serialize)]
pub struct StudentProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: &'static str,
    pub preferred_language: Language,
    pub created_at: DateTime<Utc>,
}

impl From<&Student> for StudentProfile {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.clone(),
            email: student.email.clone(),
            name: student.name.clone(),
            role: "student",
            preferred_language: student.preferred_language,
            created_at: student.created_at,
        }
    }
}

/// DTO for changing the preferred language.
#[derive(Debug, Deserialize)]
pub struct UpdateLanguageRequest {
    pub language: Language,
}

/// Query parameters for the admin student list.
#[derive(Debug, Deserialize)]
pub struct StudentListParams {
    pub q: Option<String>,
}
