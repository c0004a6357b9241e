// tests/api_tests.rs

mod common;

use common::{
    ADMIN_EMAIL, STUDENT_PASSWORD, admin_token, login, spawn_app, student_token, unique_email,
};
use serde_json::{Value, json};

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn topics_are_public_and_ordered() {
    let address = spawn_app().await;
    let topics: Vec<String> = reqwest::get(format!("{}/api/topics", address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(topics.len(), 8);
    assert_eq!(topics[0], "Data Structures");
    assert_eq!(topics[7], "Software Engineering");
}

#[tokio::test]
async fn admin_login_checks_password() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let ok = login(&client, &address, ADMIN_EMAIL, "admin123", "admin").await;
    assert_eq!(ok.status().as_u16(), 200);
    let body: Value = ok.json().await.unwrap();
    assert_eq!(body["role"], "admin");
    assert_eq!(body["user"]["name"], "Dr. Rajesh Kumar");
    assert!(body["user"].get("password_hash").is_none());

    let bad = login(&client, &address, ADMIN_EMAIL, "student123", "admin").await;
    assert_eq!(bad.status().as_u16(), 401);
}

#[tokio::test]
async fn student_login_auto_registers_unknown_email() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();

    // Wrong password never registers anyone
    let rejected = login(&client, &address, &email, "letmein", "student").await;
    assert_eq!(rejected.status().as_u16(), 401);

    let response = login(&client, &address, &email, STUDENT_PASSWORD, "student").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["name"], email.split('@').next().unwrap());
    assert_eq!(body["user"]["preferred_language"], "en");

    // Second login finds the same account
    let again: Value = login(&client, &address, &email, STUDENT_PASSWORD, "student")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(again["user"]["id"], body["user"]["id"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_first_logins_share_one_account() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            let address = address.clone();
            let email = email.clone();
            tokio::spawn(async move {
                let body: Value = login(&client, &address, &email, STUDENT_PASSWORD, "student")
                    .await
                    .json()
                    .await
                    .unwrap();
                body["user"]["id"].as_str().unwrap().to_string()
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    assert!(ids.iter().all(|id| id == &ids[0]), "ids: {:?}", ids);

    let token = admin_token(&client, &address).await;
    let found: Vec<Value> = client
        .get(format!("{}/api/admin/students?q={}", address, email))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], ids[0].as_str());
}

#[tokio::test]
async fn login_fails_validation() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = login(&client, &address, "not-an-email", STUDENT_PASSWORD, "student").await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn routes_enforce_roles() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let anonymous = client
        .get(format!("{}/api/student/me", address))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status().as_u16(), 401);

    let admin = admin_token(&client, &address).await;
    let admin_on_student = client
        .get(format!("{}/api/student/me", address))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(admin_on_student.status().as_u16(), 403);

    let student = student_token(&client, &address, "rahul@student.com").await;
    let student_on_admin = client
        .get(format!("{}/api/admin/analytics", address))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(student_on_admin.status().as_u16(), 403);

    let garbage = client
        .get(format!("{}/api/student/me", address))
        .bearer_auth("not.a.token")
        .send()
        .await
        .unwrap();
    assert_eq!(garbage.status().as_u16(), 401);
}

#[tokio::test]
async fn quizzes_hide_answer_keys() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = student_token(&client, &address, &unique_email()).await;

    let quizzes: Vec<Value> = client
        .get(format!("{}/api/quizzes", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(quizzes.len(), 3);
    assert_eq!(quizzes[0]["id"], "quiz-Algorithms");
    assert_eq!(quizzes[0]["title"], "Algorithms Quiz");
    assert_eq!(quizzes[2]["difficulty"], "medium");
    for quiz in &quizzes {
        for question in quiz["questions"].as_array().unwrap() {
            assert!(question.get("correct_answer").is_none());
        }
    }

    let missing = client
        .get(format!("{}/api/quizzes/quiz-Astrology", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn quiz_submission_updates_scores_and_learning_path() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = student_token(&client, &address, &unique_email()).await;

    // Act 1: perfect attempt on Algorithms (answer key is option 1)
    let first: Value = client
        .post(format!("{}/api/quizzes/quiz-Algorithms/submit", address))
        .bearer_auth(&token)
        .json(&json!({ "answers": [1] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first["score"], 100);
    assert_eq!(first["correct_count"], 1);
    assert_eq!(first["strength"], "strong");
    assert_eq!(first["topic_score"]["total_attempts"], 1);
    assert_eq!(first["topic_score"]["average_score"], 100);
    assert_eq!(first["review"][0]["correct_option"], "O(log n)");

    // Act 2: wrong answer pulls the running average down
    let second: Value = client
        .post(format!("{}/api/quizzes/quiz-Algorithms/submit", address))
        .bearer_auth(&token)
        .json(&json!({ "answers": [0] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(second["score"], 0);
    assert_eq!(second["strength"], "weak");
    assert_eq!(second["topic_score"]["total_attempts"], 2);
    assert_eq!(second["topic_score"]["average_score"], 50);
    assert_eq!(second["topic_score"]["strength"], "average");

    // Assert: the learning path reflects the new record
    let path: Value = client
        .get(format!("{}/api/student/learning-path", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let steps = path["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0]["topic"], "Algorithms");
    assert_eq!(steps[0]["priority"], "medium");
    assert_eq!(steps[0]["reason"], "current score: 50%");
    let untried: Vec<&str> = steps[1..]
        .iter()
        .map(|s| s["topic"].as_str().unwrap())
        .collect();
    assert_eq!(
        untried,
        vec!["Data Structures", "Database Management", "Operating Systems"]
    );
    assert_eq!(path["untried_count"], 7);
    assert_eq!(path["on_track"], false);

    // The attempt log is newest first
    let attempts: Vec<Value> = client
        .get(format!("{}/api/student/attempts", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0]["score"], 0);
    assert_eq!(attempts[1]["score"], 100);
    assert_eq!(attempts[1]["answers"], json!([1]));
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_submissions_all_count() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = student_token(&client, &address, &unique_email()).await;
    let submissions = 10;

    let handles: Vec<_> = (0..submissions)
        .map(|i| {
            let client = client.clone();
            let address = address.clone();
            let token = token.clone();
            tokio::spawn(async move {
                client
                    .post(format!("{}/api/quizzes/quiz-Algorithms/submit", address))
                    .bearer_auth(&token)
                    .json(&json!({ "answers": [i % 2] }))
                    .send()
                    .await
                    .unwrap()
                    .status()
                    .as_u16()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), 200);
    }

    let scores: Vec<Value> = client
        .get(format!("{}/api/student/topic-scores", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0]["topic"], "Algorithms");
    assert_eq!(scores[0]["total_attempts"], submissions);

    let attempts: Vec<Value> = client
        .get(format!("{}/api/student/attempts", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(attempts.len(), submissions);
}

#[tokio::test]
async fn incomplete_submission_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = student_token(&client, &address, &unique_email()).await;

    let too_few = client
        .post(format!("{}/api/quizzes/quiz-Algorithms/submit", address))
        .bearer_auth(&token)
        .json(&json!({ "answers": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(too_few.status().as_u16(), 400);

    let bad_option = client
        .post(format!("{}/api/quizzes/quiz-Algorithms/submit", address))
        .bearer_auth(&token)
        .json(&json!({ "answers": [9] }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_option.status().as_u16(), 400);

    // Nothing was recorded
    let scores: Vec<Value> = client
        .get(format!("{}/api/student/topic-scores", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(scores.is_empty());
}

#[tokio::test]
async fn seeded_student_dashboard_and_path() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = student_token(&client, &address, "rahul@student.com").await;

    let me: Value = client
        .get(format!("{}/api/student/me", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["profile"]["name"], "Rahul Sharma");
    assert_eq!(me["summary"]["strong_topics"], 1);
    assert_eq!(me["summary"]["weak_topics"], 2);
    assert_eq!(me["summary"]["total_quizzes"], 14);
    assert_eq!(
        me["summary"]["weak_topic_names"],
        json!(["Data Structures", "Computer Networks"])
    );

    let path: Value = client
        .get(format!("{}/api/student/learning-path", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let summary: Vec<(String, String)> = path["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["topic"].as_str().unwrap().to_string(),
                s["priority"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    let expected = [
        ("Data Structures", "high"),
        ("Computer Networks", "high"),
        ("Database Management", "medium"),
        ("Operating Systems", "low"),
        ("Machine Learning", "low"),
        ("Web Development", "low"),
    ];
    assert_eq!(summary.len(), expected.len());
    for ((topic, priority), (want_topic, want_priority)) in summary.iter().zip(expected) {
        assert_eq!(topic, want_topic);
        assert_eq!(priority, want_priority);
    }

    let progress: Value = client
        .get(format!("{}/api/student/progress", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        progress["strength_counts"],
        json!({ "weak": 2, "average": 1, "strong": 1 })
    );
}

#[tokio::test]
async fn chat_answers_in_preferred_language() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    // Priya prefers Hindi
    let token = student_token(&client, &address, "priya@student.com").await;

    let reply: Value = client
        .post(format!("{}/api/chat", address))
        .bearer_auth(&token)
        .json(&json!({ "message": "What is a Stack?" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reply["language"], "hi");
    assert_eq!(reply["matched"], true);
    assert_eq!(reply["reply"], "स्टैक LIFO सिद्धांत पर काम करता है।");

    let english: Value = client
        .post(format!("{}/api/chat", address))
        .bearer_auth(&token)
        .json(&json!({ "message": "tell me a joke", "language": "en" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(english["matched"], false);
    assert_eq!(
        english["reply"],
        "Sorry, I can answer only Data Structures and Algorithms questions."
    );

    let empty = client
        .post(format!("{}/api/chat", address))
        .bearer_auth(&token)
        .json(&json!({ "message": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status().as_u16(), 400);
}

#[tokio::test]
async fn language_preference_persists() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = student_token(&client, &address, &unique_email()).await;

    let updated = client
        .put(format!("{}/api/student/language", address))
        .bearer_auth(&token)
        .json(&json!({ "language": "te" }))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status().as_u16(), 200);

    let me: Value = client
        .get(format!("{}/api/student/me", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["profile"]["preferred_language"], "te");

    let unsupported = client
        .put(format!("{}/api/student/language", address))
        .bearer_auth(&token)
        .json(&json!({ "language": "fr" }))
        .send()
        .await
        .unwrap();
    assert_eq!(unsupported.status().as_u16(), 422);
}
