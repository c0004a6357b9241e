// src/store/seed.rs

use chrono::{DateTime, TimeZone, Utc};

use super::Store;
use crate::{
    engine::classify,
    error::AppError,
    models::{
        question::{Difficulty, Question},
        student::{Language, Student, TopicScore},
        user::Admin,
    },
    utils::hash::hash_password,
};

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn score(topic: &str, total_attempts: u32, average_score: u32, last: DateTime<Utc>) -> TopicScore {
    TopicScore {
        topic: topic.to_string(),
        total_attempts,
        average_score,
        strength: classify(average_score),
        last_attempt: last,
    }
}

fn student(
    id: &str,
    email: &str,
    name: &str,
    language: Language,
    created_at: DateTime<Utc>,
    password_hash: &str,
    topic_scores: Vec<TopicScore>,
) -> Student {
    Student {
        id: id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        preferred_language: language,
        created_at,
        password_hash: password_hash.to_string(),
        topic_scores,
    }
}

fn question(
    id: &str,
    text: &str,
    options: &[&str],
    correct_answer: usize,
    topic: &str,
    difficulty: Difficulty,
    created_at: DateTime<Utc>,
) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        topic: topic.to_string(),
        difficulty,
        created_by: "admin-1".to_string(),
        created_at,
    }
}

/// Loads the demo admin, students and question bank into an empty store.
/// Does nothing when an admin already exists.
pub async fn seed_demo_data(
    store: &dyn Store,
    admin_password: &str,
    student_password: &str,
) -> Result<(), AppError> {
    if store.count_admins().await? > 0 {
        tracing::debug!("Store already seeded, skipping demo data");
        return Ok(());
    }

    tracing::info!("Seeding demo data...");

    let admin_hash = hash_password(admin_password)?;
    let student_hash = hash_password(student_password)?;

    store
        .save_admin(&Admin {
            id: "admin-1".to_string(),
            email: "admin@edupath.com".to_string(),
            name: "Dr. Rajesh Kumar".to_string(),
            created_at: day(2024, 1, 1),
            password_hash: admin_hash,
        })
        .await?;

    let students = [
        student(
            "student-1",
            "rahul@student.com",
            "Rahul Sharma",
            Language::En,
            day(2024, 1, 15),
            &student_hash,
            vec![
                score("Data Structures", 5, 45, day(2024, 3, 10)),
                score("Algorithms", 3, 72, day(2024, 3, 8)),
                score("Database Management", 4, 58, day(2024, 3, 5)),
                score("Computer Networks", 2, 40, day(2024, 3, 1)),
            ],
        ),
        student(
            "student-2",
            "priya@student.com",
            "Priya Patel",
            Language::Hi,
            day(2024, 2, 1),
            &student_hash,
            vec![
                score("Data Structures", 8, 85, day(2024, 3, 12)),
                score("Machine Learning", 2, 35, day(2024, 3, 10)),
                score("Web Development", 6, 78, day(2024, 3, 8)),
            ],
        ),
        student(
            "student-3",
            "amit@student.com",
            "Amit Reddy",
            Language::Te,
            day(2024, 2, 15),
            &student_hash,
            vec![
                score("Operating Systems", 4, 62, day(2024, 3, 11)),
                score("Software Engineering", 3, 55, day(2024, 3, 9)),
            ],
        ),
    ];
    for s in &students {
        store.save_student(s).await?;
    }

    let questions = [
        question(
            "q1",
            "What is the time complexity of binary search?",
            &["O(n)", "O(log n)", "O(n²)", "O(1)"],
            1,
            "Algorithms",
            Difficulty::Easy,
            day(2024, 1, 20),
        ),
        question(
            "q2",
            "Which data structure uses LIFO principle?",
            &["Queue", "Stack", "Array", "Linked List"],
            1,
            "Data Structures",
            Difficulty::Easy,
            day(2024, 1, 21),
        ),
        question(
            "q3",
            "What does ACID stand for in database transactions?",
            &[
                "Atomicity, Consistency, Isolation, Durability",
                "Addition, Consistency, Isolation, Data",
                "Atomicity, Completeness, Integrity, Durability",
                "Access, Control, Integrity, Database",
            ],
            0,
            "Database Management",
            Difficulty::Medium,
            day(2024, 1, 22),
        ),
    ];
    for q in &questions {
        store.save_question(q).await?;
    }

    tracing::info!(
        students = students.len(),
        questions = questions.len(),
        "Demo data seeded successfully."
    );
    Ok(())
}
