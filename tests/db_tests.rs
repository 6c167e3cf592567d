//! Database-backed tests
//!
//! Run with a migrated PostgreSQL:
//! `DATABASE_URL=postgres://... cargo test -- --ignored`

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use logistics_backoffice::config::{DatabaseConfig, EnvironmentConfig};
use logistics_backoffice::models::{JobDetails, JobDraft, JobStatus, JobType};
use logistics_backoffice::repositories::JobRepository;
use logistics_backoffice::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn setup() -> (Router, PgPool) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for ignored tests");
    let pool = DatabaseConfig::new(&url).create_pool().await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    let app = build_router(AppState::new(pool.clone(), EnvironmentConfig::for_tests(&url)));
    (app, pool)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    call_as(app, None, method, uri, body).await
}

async fn call_as(
    app: &Router,
    token: Option<&str>,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn create_client(app: &Router) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/clients",
        Some(json!({ "name": format!("Client {}", Uuid::new_v4()), "tin": "100-200-300" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["client"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore]
async fn test_user_with_jobs_cannot_be_deleted() {
    let (app, pool) = setup().await;
    let client_id = create_client(&app).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({
            "name": "Operations",
            "email": format!("ops-{}@example.com", Uuid::new_v4()),
            "password": "correct horse battery"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["user"]["id"].as_str().unwrap().to_string();
    assert!(body["user"].get("passwordHash").is_none());

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/jobs",
        Some(json!({
            "title": "Transformers to Dodoma",
            "clientId": client_id,
            "jobType": "ROAD_EXPORT",
            "createdById": user_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, Method::DELETE, &format!("/api/users/{}", user_id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let still_there: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(Uuid::parse_str(&user_id).unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(still_there.0, 1);
}

#[tokio::test]
#[ignore]
async fn test_job_numbers_increase_per_type() {
    let (app, _pool) = setup().await;
    let client_id = create_client(&app).await;

    let mut numbers = Vec::new();
    for _ in 0..2 {
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/jobs",
            Some(json!({ "title": "Spare parts", "clientId": client_id, "jobType": "SEA_IMPORT" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["job"]["details"]["mode"], "SEA");
        numbers.push(body["job"]["jobNumber"].as_str().unwrap().to_string());
    }

    let sequence = |n: &str| n.rsplit('-').next().unwrap().parse::<u32>().unwrap();
    assert!(numbers[0].starts_with("AAL-SI-"));
    assert_eq!(sequence(&numbers[1]), sequence(&numbers[0]) + 1);
}

#[tokio::test]
#[ignore]
async fn test_invoice_without_total_persists_nothing() {
    let (app, pool) = setup().await;
    let client_id = create_client(&app).await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/invoices",
        Some(json!({
            "clientId": client_id,
            "currency": "USD",
            "subTotal": 100,
            "lineItems": [{ "description": "Handling", "rate": 100 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoices WHERE client_id = $1")
        .bind(Uuid::parse_str(&client_id).unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[tokio::test]
#[ignore]
async fn test_invoice_round_trip_fills_amount_in_words() {
    let (app, _pool) = setup().await;
    let client_id = create_client(&app).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/invoices",
        Some(json!({
            "clientId": client_id,
            "currency": "USD",
            "subTotal": 2500.50,
            "total": 2500.50,
            "lineItems": [{ "description": "Clearing", "rate": 2500.50 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let invoice = &body["invoice"];
    assert!(invoice["number"].as_str().unwrap().starts_with("AAL-INV-"));
    assert_eq!(
        invoice["amountInWords"],
        "Two Thousand Five Hundred Dollars And Fifty Cents"
    );
    assert_eq!(invoice["lineItems"].as_array().unwrap().len(), 1);

    let id = invoice["id"].as_str().unwrap();
    let (status, body) = call(&app, Method::GET, &format!("/api/invoices?id={}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "DRAFT");

    let (status, body) = call(&app, Method::DELETE, &format!("/api/invoices/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_job_numbers_are_unique_and_consecutive() {
    let (app, pool) = setup().await;
    let client_id: Uuid = create_client(&app).await.parse().unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let repository = JobRepository::new(pool.clone());
            let draft = JobDraft {
                title: format!("Courier batch {}", i),
                client_id,
                job_type: JobType::AirExport,
                status: JobStatus::Pending,
                origin: Some("DAR".to_string()),
                destination: Some("DXB".to_string()),
                cargo_description: None,
                weight_kg: None,
                packages: None,
                details: JobDetails::empty(JobType::AirExport.mode()),
                created_by_id: None,
            };
            tokio::spawn(async move { repository.create(&draft).await })
        })
        .collect();

    let mut sequences = Vec::new();
    for handle in handles {
        let job = handle.await.unwrap().unwrap();
        assert!(job.job_number.starts_with("AAL-AE-"));
        sequences.push(job.job_number.rsplit('-').next().unwrap().parse::<u32>().unwrap());
    }

    sequences.sort_unstable();
    let first = sequences[0];
    assert_eq!(sequences, (first..first + 10).collect::<Vec<_>>());
}

#[tokio::test]
#[ignore]
async fn test_avatar_is_served_and_replaced() {
    let (app, _pool) = setup().await;
    let email = format!("avatar-{}@example.com", Uuid::new_v4());

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "name": "Avatar Owner", "email": email, "password": "correct-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/auth",
        Some(json!({ "email": email, "password": "correct-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    let avatar = format!("data:image/png;base64,{}", STANDARD.encode(png));
    let upload = |app: Router, token: String, avatar: String| async move {
        let (status, body) = call_as(
            &app,
            Some(&token),
            Method::POST,
            "/api/profile",
            Some(json!({ "avatar": avatar })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["user"]["avatarUrl"].as_str().unwrap().to_string()
    };

    let first_url = upload(app.clone(), token.clone(), avatar.clone()).await;
    assert!(first_url.starts_with("/uploads/avatars/"));

    let request = Request::builder().uri(&first_url).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), &png[..]);

    let second_url = upload(app.clone(), token, avatar).await;
    assert_ne!(second_url, first_url);

    let request = Request::builder().uri(&first_url).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_changing_job_type_keeps_job_number() {
    let (app, _pool) = setup().await;
    let client_id = create_client(&app).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/jobs",
        Some(json!({ "title": "Machinery", "clientId": client_id, "jobType": "AIR_IMPORT" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["job"]["id"].as_str().unwrap().to_string();
    let number = body["job"]["jobNumber"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/api/jobs/{}", id),
        Some(json!({ "jobType": "SEA_IMPORT" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job"]["jobNumber"], number.as_str());
    assert_eq!(body["job"]["details"]["mode"], "SEA");
}
