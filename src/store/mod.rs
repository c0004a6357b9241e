// src/store/mod.rs

//! Persistence behind a repository trait.
//!
//! The scoring core never touches storage; handlers load documents through
//! [`Store`], hand them to the engine, and write the results back.

pub mod memory;
pub mod seed;
pub mod sqlite;

use async_trait::async_trait;

use crate::models::{
    attempt::QuizAttempt, question::Question, student::Student, user::Admin,
};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("corrupt document: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn get_student(&self, id: &str) -> StoreResult<Option<Student>>;

    /// Emails are compared case-insensitively.
    async fn find_student_by_email(&self, email: &str) -> StoreResult<Option<Student>>;

    /// Inserts or replaces the student with the same id.
    async fn save_student(&self, student: &Student) -> StoreResult<()>;

    /// Inserts `student` unless another student already uses the same email.
    ///
    /// Returns the stored record, which is the existing one when the email
    /// was taken. The check and the insert are atomic.
    async fn register_student(&self, student: &Student) -> StoreResult<Student>;

    /// Every student, in registration order.
    async fn list_students(&self) -> StoreResult<Vec<Student>>;

    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<Admin>>;

    async fn save_admin(&self, admin: &Admin) -> StoreResult<()>;

    async fn count_admins(&self) -> StoreResult<usize>;

    /// The question bank in insertion order.
    async fn list_questions(&self) -> StoreResult<Vec<Question>>;

    async fn get_question(&self, id: &str) -> StoreResult<Option<Question>>;

    /// Inserts a new question at the end of the bank or replaces one in place.
    async fn save_question(&self, question: &Question) -> StoreResult<()>;

    /// Returns false when no question had that id.
    async fn delete_question(&self, id: &str) -> StoreResult<bool>;

    /// Saves the scored student and appends the attempt as one write.
    async fn save_submission(&self, student: &Student, attempt: &QuizAttempt) -> StoreResult<()>;

    /// A student's attempts, oldest first.
    async fn list_attempts(&self, student_id: &str) -> StoreResult<Vec<QuizAttempt>>;
}
