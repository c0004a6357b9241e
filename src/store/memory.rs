// src/store/memory.rs

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Store, StoreResult};
use crate::models::{
    attempt::QuizAttempt, question::Question, student::Student, user::Admin,
};

#[derive(Default)]
struct Collections {
    students: Vec<Student>,
    admins: Vec<Admin>,
    questions: Vec<Question>,
    attempts: Vec<QuizAttempt>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn upsert<T>(items: &mut Vec<T>, item: &T, same: impl Fn(&T) -> bool)
where
    T: Clone,
{
    match items.iter_mut().find(|existing| same(existing)) {
        Some(existing) => *existing = item.clone(),
        None => items.push(item.clone()),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_student(&self, id: &str) -> StoreResult<Option<Student>> {
        let inner = self.inner.read().await;
        Ok(inner.students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_student_by_email(&self, email: &str) -> StoreResult<Option<Student>> {
        let inner = self.inner.read().await;
        Ok(inner
            .students
            .iter()
            .find(|s| s.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn save_student(&self, student: &Student) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        upsert(&mut inner.students, student, |s| s.id == student.id);
        Ok(())
    }

    async fn register_student(&self, student: &Student) -> StoreResult<Student> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner
            .students
            .iter()
            .find(|s| s.email.eq_ignore_ascii_case(&student.email))
        {
            return Ok(existing.clone());
        }
        inner.students.push(student.clone());
        Ok(student.clone())
    }

    async fn list_students(&self) -> StoreResult<Vec<Student>> {
        Ok(self.inner.read().await.students.clone())
    }

    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<Admin>> {
        let inner = self.inner.read().await;
        Ok(inner
            .admins
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn save_admin(&self, admin: &Admin) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        upsert(&mut inner.admins, admin, |a| a.id == admin.id);
        Ok(())
    }

    async fn count_admins(&self) -> StoreResult<usize> {
        Ok(self.inner.read().await.admins.len())
    }

    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.inner.read().await.questions.clone())
    }

    async fn get_question(&self, id: &str) -> StoreResult<Option<Question>> {
        let inner = self.inner.read().await;
        Ok(inner.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn save_question(&self, question: &Question) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        upsert(&mut inner.questions, question, |q| q.id == question.id);
        Ok(())
    }

    async fn delete_question(&self, id: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.questions.len();
        inner.questions.retain(|q| q.id != id);
        Ok(inner.questions.len() != before)
    }

    async fn save_submission(&self, student: &Student, attempt: &QuizAttempt) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        upsert(&mut inner.students, student, |s| s.id == student.id);
        inner.attempts.push(attempt.clone());
        Ok(())
    }

    async fn list_attempts(&self, student_id: &str) -> StoreResult<Vec<QuizAttempt>> {
        let inner = self.inner.read().await;
        Ok(inner
            .attempts
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_student_replaces_in_place() {
        let store = MemoryStore::new();
        let first = Student::new("rahul@student.com", "Rahul Sharma", String::new());
        let second = Student::new("priya@student.com", "Priya Patel", String::new());
        store.save_student(&first).await.unwrap();
        store.save_student(&second).await.unwrap();

        let mut renamed = first.clone();
        renamed.name = "Rahul S.".to_string();
        store.save_student(&renamed).await.unwrap();

        let students = store.list_students().await.unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].name, "Rahul S.");
        assert_eq!(
            store
                .find_student_by_email("PRIYA@student.com")
                .await
                .unwrap()
                .map(|s| s.id),
            Some(second.id)
        );
    }

    #[tokio::test]
    async fn register_student_keeps_first_account_per_email() {
        let store = MemoryStore::new();
        let first = Student::new("neha@student.com", "neha", String::new());
        let late = Student::new("NEHA@student.com", "neha", String::new());

        assert_eq!(store.register_student(&first).await.unwrap().id, first.id);
        assert_eq!(store.register_student(&late).await.unwrap().id, first.id);
        assert_eq!(store.list_students().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_reports_missing_question() {
        let store = MemoryStore::new();
        assert!(!store.delete_question("q-missing").await.unwrap());
    }
}
