// src/engine/analytics.rs

use std::collections::HashMap;

use serde::Serialize;

use super::aggregator::classify;
use crate::models::{
    question::{Difficulty, Question},
    student::{Student, TopicScore},
    topic::{Strength, TopicCatalog},
};

/// Overall standing of a student across topics.
/// `New` means the student has not attempted any topic yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStrength {
    New,
    Weak,
    Average,
    Strong,
}

impl From<Strength> for OverallStrength {
    fn from(strength: Strength) -> Self {
        match strength {
            Strength::Weak => OverallStrength::Weak,
            Strength::Average => OverallStrength::Average,
            Strength::Strong => OverallStrength::Strong,
        }
    }
}

/// Plain mean of the student's topic averages, or `None` without scores.
fn mean_topic_average(scores: &[TopicScore]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: u32 = scores.iter().map(|t| t.average_score).sum();
    Some(f64::from(sum) / scores.len() as f64)
}

fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor() as u32
}

pub fn overall_strength(student: &Student) -> OverallStrength {
    match mean_topic_average(&student.topic_scores) {
        None => OverallStrength::New,
        Some(mean) => classify(round_half_up(mean)).into(),
    }
}

/// Headline numbers for the student dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub strong_topics: usize,
    pub weak_topics: usize,
    pub topics_attempted: usize,
    /// Sum of attempts across every topic.
    pub total_quizzes: u32,
    pub weak_topic_names: Vec<String>,
}

impl DashboardSummary {
    pub fn for_student(student: &Student) -> Self {
        Self {
            strong_topics: student.scores_with(Strength::Strong).count(),
            weak_topics: student.scores_with(Strength::Weak).count(),
            topics_attempted: student.topic_scores.len(),
            total_quizzes: student.topic_scores.iter().map(|t| t.total_attempts).sum(),
            weak_topic_names: student
                .scores_with(Strength::Weak)
                .map(|t| t.topic.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopicBar {
    pub topic: String,
    pub score: u32,
    pub attempts: u32,
    pub strength: Strength,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct StrengthCounts {
    pub weak: usize,
    pub average: usize,
    pub strong: usize,
}

/// Chart data for the student's progress view.
#[derive(Debug, Serialize)]
pub struct ProgressReport {
    pub bars: Vec<TopicBar>,
    pub strength_counts: StrengthCounts,
}

impl ProgressReport {
    pub fn for_student(student: &Student) -> Self {
        let mut counts = StrengthCounts::default();
        let bars = student
            .topic_scores
            .iter()
            .map(|t| {
                match t.strength {
                    Strength::Weak => counts.weak += 1,
                    Strength::Average => counts.average += 1,
                    Strength::Strong => counts.strong += 1,
                }
                TopicBar {
                    topic: t.topic.clone(),
                    score: t.average_score,
                    attempts: t.total_attempts,
                    strength: t.strength,
                }
            })
            .collect();

        Self {
            bars,
            strength_counts: counts,
        }
    }
}

/// One row of the admin student list.
#[derive(Debug, Serialize)]
pub struct StudentOverview {
    pub id: String,
    pub name: String,
    pub email: String,
    pub average_score: u32,
    pub overall_strength: OverallStrength,
    pub topics_attempted: usize,
    pub strong_topics: usize,
    pub weak_topics: usize,
}

impl StudentOverview {
    pub fn for_student(student: &Student) -> Self {
        Self {
            id: student.id.clone(),
            name: student.name.clone(),
            email: student.email.clone(),
            average_score: mean_topic_average(&student.topic_scores)
                .map(round_half_up)
                .unwrap_or(0),
            overall_strength: overall_strength(student),
            topics_attempted: student.topic_scores.len(),
            strong_topics: student.scores_with(Strength::Strong).count(),
            weak_topics: student.scores_with(Strength::Weak).count(),
        }
    }

    /// Case-insensitive substring match on name or email. An empty term matches everyone.
    pub fn matches(student: &Student, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || student.name.to_lowercase().contains(&term)
            || student.email.to_lowercase().contains(&term)
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TopicAverage {
    pub topic: String,
    pub average_score: u32,
    pub student_count: usize,
}

/// Students bucketed by the mean of their topic averages.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct PerformanceDistribution {
    /// 80 and above.
    pub excellent: usize,
    /// 60 to below 80.
    pub good: usize,
    /// 40 to below 60.
    pub average: usize,
    /// Below 40.
    pub needs_work: usize,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct WeakTopicCount {
    pub topic: String,
    pub count: usize,
}

/// Class-wide figures for the admin analytics view.
#[derive(Debug, Serialize)]
pub struct ClassAnalytics {
    pub total_students: usize,
    pub active_quizzes: usize,
    pub total_questions: usize,
    pub topics_needing_attention: usize,
    pub topic_averages: Vec<TopicAverage>,
    pub performance_distribution: PerformanceDistribution,
    pub difficulty_counts: DifficultyCounts,
    pub weak_topics: Vec<WeakTopicCount>,
}

impl ClassAnalytics {
    pub fn compute(
        students: &[Student],
        questions: &[Question],
        quiz_count: usize,
        catalog: &TopicCatalog,
    ) -> Self {
        let weak_topics = weak_topic_counts(students);

        Self {
            total_students: students.len(),
            active_quizzes: quiz_count,
            total_questions: questions.len(),
            topics_needing_attention: weak_topics.len(),
            topic_averages: topic_averages(students, catalog),
            performance_distribution: performance_distribution(students),
            difficulty_counts: difficulty_counts(questions),
            weak_topics,
        }
    }
}

/// Class average per catalog topic, skipping topics nobody has attempted.
pub fn topic_averages(students: &[Student], catalog: &TopicCatalog) -> Vec<TopicAverage> {
    catalog
        .iter()
        .filter_map(|topic| {
            let scores: Vec<u32> = students
                .iter()
                .filter_map(|s| s.topic_score(topic).map(|t| t.average_score))
                .collect();
            if scores.is_empty() {
                return None;
            }
            let sum: u32 = scores.iter().sum();
            Some(TopicAverage {
                topic: topic.to_string(),
                average_score: round_half_up(f64::from(sum) / scores.len() as f64),
                student_count: scores.len(),
            })
        })
        .collect()
}

pub fn performance_distribution(students: &[Student]) -> PerformanceDistribution {
    let mut dist = PerformanceDistribution::default();
    for mean in students
        .iter()
        .filter_map(|s| mean_topic_average(&s.topic_scores))
    {
        if mean >= 80.0 {
            dist.excellent += 1;
        } else if mean >= 60.0 {
            dist.good += 1;
        } else if mean >= 40.0 {
            dist.average += 1;
        } else {
            dist.needs_work += 1;
        }
    }
    dist
}

pub fn difficulty_counts(questions: &[Question]) -> DifficultyCounts {
    let mut counts = DifficultyCounts::default();
    for q in questions {
        match q.difficulty {
            Difficulty::Easy => counts.easy += 1,
            Difficulty::Medium => counts.medium += 1,
            Difficulty::Hard => counts.hard += 1,
        }
    }
    counts
}

/// How many students are weak in each topic, most common first.
/// Ties keep the order in which the topic was first seen.
pub fn weak_topic_counts(students: &[Student]) -> Vec<WeakTopicCount> {
    let mut first_seen: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for score in students
        .iter()
        .flat_map(|s| s.scores_with(Strength::Weak))
    {
        let entry = counts.entry(score.topic.clone()).or_insert_with(|| {
            first_seen.push(score.topic.clone());
            0
        });
        *entry += 1;
    }

    let mut result: Vec<WeakTopicCount> = first_seen
        .into_iter()
        .map(|topic| WeakTopicCount {
            count: counts[&topic],
            topic,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
}
