// src/store/sqlite.rs

use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use sqlx::{
    Row, Sqlite, SqlitePool,
    query::Query,
    sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions},
};
use tokio::sync::Mutex;

use super::{Store, StoreResult};
use crate::models::{
    attempt::QuizAttempt, question::Question, student::Student, user::Admin,
};

const QUESTIONS_KEY: &str = "edupath_questions";
const STUDENT_PREFIX: &str = "student:";
const ADMIN_PREFIX: &str = "admin:";
const ATTEMPT_PREFIX: &str = "attempt:";

fn student_key(id: &str) -> String {
    format!("{}{}", STUDENT_PREFIX, id)
}

/// Attempts are keyed by student so one student's log is a prefix scan.
fn attempt_key(attempt: &QuizAttempt) -> String {
    format!("{}{}:{}", ATTEMPT_PREFIX, attempt.student_id, attempt.id)
}

fn upsert(key: &str, raw: String) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    sqlx::query(
        r#"
        INSERT INTO kv_store (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(raw)
}

/// JSON documents in a single key-value table.
///
/// Students, admins and attempts each live under their own key; the
/// question bank is one array document. Read-modify-write of a shared
/// document happens under `write_lock`.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url` and applies migrations.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // In-memory databases are per connection, so they get exactly one.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        };
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        tracing::info!("Running migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Migrations applied successfully.");
        Ok(())
    }

    async fn get_doc<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let raw: String = row.try_get("value")?;
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    async fn put_doc<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        upsert(key, raw).execute(&self.pool).await?;
        Ok(())
    }

    /// Documents whose key starts with `prefix`, in first-insert order.
    async fn scan<T: DeserializeOwned>(&self, prefix: &str) -> StoreResult<Vec<T>> {
        // Exact, case-sensitive prefix match; LIKE would treat `_` as a wildcard.
        let rows = sqlx::query(
            "SELECT value FROM kv_store WHERE substr(key, 1, length(?)) = ? ORDER BY rowid",
        )
        .bind(prefix)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> StoreResult<T> {
                let raw: String = row.try_get("value")?;
                Ok(serde_json::from_str(&raw)?)
            })
            .collect()
    }

    async fn questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.get_doc(QUESTIONS_KEY).await?.unwrap_or_default())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_student(&self, id: &str) -> StoreResult<Option<Student>> {
        self.get_doc(&student_key(id)).await
    }

    async fn find_student_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        let students: Vec<Student> = self.scan(STUDENT_PREFIX).await?;
        Ok(students
            .into_iter()
            .find(|s| s.email.eq_ignore_ascii_case(email)))
    }

    async fn save_student(&self, student: &Student) -> StoreResult<()> {
        self.put_doc(&student_key(&student.id), student).await
    }

    async fn register_student(&self, student: &Student) -> StoreResult<Student> {
        let _guard = self.write_lock.lock().await;

        if let Some(existing) = self.find_student_by_email(&student.email).await? {
            return Ok(existing);
        }
        self.put_doc(&student_key(&student.id), student).await?;
        Ok(student.clone())
    }

    async fn list_students(&self) -> StoreResult<Vec<Student>> {
        self.scan(STUDENT_PREFIX).await
    }

    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<Admin>> {
        let admins: Vec<Admin> = self.scan(ADMIN_PREFIX).await?;
        Ok(admins
            .into_iter()
            .find(|a| a.email.eq_ignore_ascii_case(email)))
    }

    async fn save_admin(&self, admin: &Admin) -> StoreResult<()> {
        self.put_doc(&format!("{}{}", ADMIN_PREFIX, admin.id), admin)
            .await
    }

    async fn count_admins(&self) -> StoreResult<usize> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM kv_store WHERE substr(key, 1, length(?)) = ?",
        )
        .bind(ADMIN_PREFIX)
        .bind(ADMIN_PREFIX)
        .fetch_one(&self.pool)
        .await?;
        let n: i64 = row.try_get("n")?;
        Ok(n as usize)
    }

    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        self.questions().await
    }

    async fn get_question(&self, id: &str) -> StoreResult<Option<Question>> {
        Ok(self.questions().await?.into_iter().find(|q| q.id == id))
    }

    async fn save_question(&self, question: &Question) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut bank = self.questions().await?;
        match bank.iter_mut().find(|q| q.id == question.id) {
            Some(existing) => *existing = question.clone(),
            None => bank.push(question.clone()),
        }
        self.put_doc(QUESTIONS_KEY, &bank).await
    }

    async fn delete_question(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;

        let mut bank = self.questions().await?;
        let before = bank.len();
        bank.retain(|q| q.id != id);
        if bank.len() == before {
            return Ok(false);
        }
        self.put_doc(QUESTIONS_KEY, &bank).await?;
        Ok(true)
    }

    async fn save_submission(&self, student: &Student, attempt: &QuizAttempt) -> StoreResult<()> {
        let student_doc = serde_json::to_string(student)?;
        let attempt_doc = serde_json::to_string(attempt)?;
        let s_key = student_key(&student.id);
        let a_key = attempt_key(attempt);

        // Scores and log land together or not at all
        let mut tx = self.pool.begin().await?;
        upsert(&s_key, student_doc).execute(&mut *tx).await?;
        upsert(&a_key, attempt_doc).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn list_attempts(&self, student_id: &str) -> StoreResult<Vec<QuizAttempt>> {
        self.scan(&format!("{}{}:", ATTEMPT_PREFIX, student_id))
            .await
    }
}
