// tests/api_tests.rs

use medcrack::{config::Config, routes, state::AppState};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Spawns the app on a random port backed by a fresh in-memory database.
/// Returns the base URL (e.g., "http://127.0.0.1:12345") and the pool for seeding.
async fn spawn_app() -> (String, SqlitePool) {
    // A single, never-recycled connection keeps the in-memory database alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        port: 0,
        cors_origins: Vec::new(),
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

fn unique_name() -> String {
    format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8])
}

async fn seed_topic(pool: &SqlitePool, subject: &str, topic: &str, importance: i64) {
    sqlx::query("INSERT INTO topics (subject, topic, description, importance) VALUES (?, ?, ?, ?)")
        .bind(subject)
        .bind(topic)
        .bind(format!("About {}", topic))
        .bind(importance)
        .execute(pool)
        .await
        .unwrap();
}

async fn seed_question(pool: &SqlitePool, subject: &str, topic: &str, toughness: &str) -> i64 {
    sqlx::query(
        r#"
        INSERT INTO questions
            (subject, topic, question, option_1, option_2, option_3, option_4, toughness, correct_option)
        VALUES (?, ?, ?, 'A', 'B', 'C', 'D', ?, 2)
        "#,
    )
    .bind(subject)
    .bind(topic)
    .bind(format!("A {} question", topic))
    .bind(toughness)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

#[tokio::test]
async fn health_check_works() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/health", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_path_is_404() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn signup_and_login_flow() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let username = unique_name();
    let credentials = serde_json::json!({"username": username, "password": "password123"});

    // Signup
    let response = client
        .post(&format!("{}/signup", address))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["user_id"].as_i64().unwrap() > 0);

    // Duplicate signup
    let response = client
        .post(&format!("{}/signup", address))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);

    // Login
    let response = client
        .post(&format!("{}/login", address))
        .json(&credentials)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().is_some());

    // Wrong password
    let response = client
        .post(&format!("{}/login", address))
        .json(&serde_json::json!({"username": username, "password": "wrong-pass"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn signup_fails_validation() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    // Username too short
    let response = client
        .post(&format!("{}/signup", address))
        .json(&serde_json::json!({"username": "yo", "password": "password123"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/user/profile", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = client
        .get(&format!("{}/questions/Thermodynamics", address))
        .header("Authorization", "Bearer not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn topics_and_stats() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();

    seed_topic(&pool, "Physics", "Thermodynamics", 5).await;
    seed_topic(&pool, "Biology", "Genetics", 1).await;
    for _ in 0..3 {
        seed_question(&pool, "Physics", "Thermodynamics", "easy").await;
    }
    seed_question(&pool, "Biology", "Genetics", "hard").await;

    let topics: Vec<serde_json::Value> = client
        .get(&format!("{}/topic", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(topics.len(), 2);
    let thermo = topics.iter().find(|t| t["name"] == "Thermodynamics").unwrap();
    assert_eq!(thermo["questionCount"], 3);
    assert_eq!(thermo["difficulty"], "Medium");
    let genetics = topics.iter().find(|t| t["name"] == "Genetics").unwrap();
    assert_eq!(genetics["difficulty"], "Easy");

    let important: Vec<serde_json::Value> = client
        .get(&format!("{}/important", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(important.len(), 1);
    assert_eq!(important[0]["name"], "Thermodynamics");
    assert_eq!(important[0]["priority"], 5);

    let stats: serde_json::Value = client
        .get(&format!("{}/api/stats", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["totalQuestions"], 4);
    assert_eq!(stats["activeUsers"], 0);
    assert_eq!(stats["subjectStats"].as_array().unwrap().len(), 2);
}
