use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{rt, test, web, App, HttpServer};
use dotenv::dotenv;
use serde_json::json;
use sqlx::PgPool;
use std::net::TcpListener;
use taskpad::auth::{TokenKeys, TokenResponse};
use taskpad::config::Config;
use taskpad::models::Task;
use taskpad::routes;
use taskpad::routes::health;

async fn setup() -> (PgPool, web::Data<TokenKeys>) {
    dotenv().ok();
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database.url())
        .await
        .expect("Failed to connect to test DB");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    (pool, web::Data::new(TokenKeys::from_config(&config)))
}

// Registers the user (tolerating a leftover account from a previous run) and
// logs in, returning the bearer token.
async fn register_and_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> Result<String, String> {
    let req_register = test::TestRequest::post()
        .uri("/register")
        .set_json(&json!({
            "username": username,
            "password": password
        }))
        .to_request();
    let resp_register = test::call_service(app, req_register).await;
    let register_status = resp_register.status();
    if !register_status.is_success() && register_status != actix_web::http::StatusCode::CONFLICT {
        return Err(format!(
            "Failed to register user. Status: {}",
            register_status
        ));
    }

    let req_login = test::TestRequest::post()
        .uri("/token")
        .set_json(&json!({
            "username": username,
            "password": password
        }))
        .to_request();
    let resp_login = test::call_service(app, req_login).await;
    let login_status = resp_login.status();
    let body_bytes = test::read_body(resp_login).await;
    if !login_status.is_success() {
        return Err(format!(
            "Failed to log in. Status: {}. Body: {}",
            login_status,
            String::from_utf8_lossy(&body_bytes)
        ));
    }

    let token_response: TokenResponse = serde_json::from_slice(&body_bytes)
        .map_err(|e| format!("Failed to parse login response: {}", e))?;
    Ok(token_response.access_token)
}

async fn cleanup_user(pool: &PgPool, username: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await;
}

#[test_log::test(actix_rt::test)]
async fn test_create_and_list_tasks() {
    let (pool, token_keys) = setup().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(token_keys.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(health::health)
            .configure(routes::config),
    )
    .await;

    let token = register_and_login(&app, "task_test_user", "Password123!")
        .await
        .expect("Setup: register and login failed");

    // Create a task; `completed` is omitted and must default to false
    let req_create = test::TestRequest::post()
        .uri("/tasks")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .set_json(&json!({
            "title": "Buy milk",
            "description": "Two liters"
        }))
        .to_request();
    let resp_create = test::call_service(&app, req_create).await;
    let status_create = resp_create.status();
    let body_create = test::read_body(resp_create).await;
    assert_eq!(
        status_create,
        actix_web::http::StatusCode::CREATED,
        "Create task failed. Body: {:?}",
        String::from_utf8_lossy(&body_create)
    );

    let created: Task =
        serde_json::from_slice(&body_create).expect("Failed to parse create task response");
    assert!(created.id > 0, "Task id should be assigned");
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description.as_deref(), Some("Two liters"));
    assert!(!created.completed, "completed should default to false");

    // The listing must contain that exact record
    let req_list = test::TestRequest::get()
        .uri("/tasks")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp_list = test::call_service(&app, req_list).await;
    assert_eq!(resp_list.status(), actix_web::http::StatusCode::OK);
    let body_list = test::read_body(resp_list).await;
    let tasks: Vec<Task> =
        serde_json::from_slice(&body_list).expect("Failed to parse list tasks response");

    let listed = tasks
        .iter()
        .find(|t| t.id == created.id)
        .expect("Created task should appear in the listing");
    assert_eq!(listed, &created);

    // Listing comes back ordered by ascending id
    let ids: Vec<i32> = tasks.iter().map(|t| t.id).collect();
    let mut sorted_ids = ids.clone();
    sorted_ids.sort_unstable();
    assert_eq!(ids, sorted_ids, "Tasks should be ordered by id");

    // Clean up the created task and user
    let _ = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(created.id)
        .execute(&pool)
        .await;
    cleanup_user(&pool, "task_test_user").await;
}

#[actix_rt::test]
async fn test_create_task_invalid_payload() {
    let (pool, token_keys) = setup().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(token_keys.clone())
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .configure(routes::config),
    )
    .await;

    let token = register_and_login(&app, "task_invalid_user", "Password123!")
        .await
        .expect("Setup: register and login failed");

    // Empty title deserializes but fails validation
    let req_empty_title = test::TestRequest::post()
        .uri("/tasks")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .set_json(&json!({ "title": "" }))
        .to_request();
    let resp = test::call_service(&app, req_empty_title).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::UNPROCESSABLE_ENTITY
    );

    // Missing title is rejected at deserialization
    let req_missing_title = test::TestRequest::post()
        .uri("/tasks")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .set_json(&json!({ "description": "no title" }))
        .to_request();
    let resp = test::call_service(&app, req_missing_title).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    cleanup_user(&pool, "task_invalid_user").await;
}

#[actix_rt::test]
async fn test_task_routes_require_token() {
    let (pool, token_keys) = setup().await;

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener); // Drop the listener so the server can bind to it

    let server_pool = pool.clone();
    let server_keys = token_keys.clone();
    let _server_handle = rt::spawn(async move {
        HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(server_pool.clone()))
                .app_data(server_keys.clone())
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .wrap(NormalizePath::trim())
                .service(health::health)
                .configure(routes::config)
        })
        .bind(("127.0.0.1", port))
        .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
        .run()
        .await
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let client = reqwest::Client::new();
    let base_url = format!("http://127.0.0.1:{}", port);

    // Create without a token
    let resp = client
        .post(format!("{}/tasks", base_url))
        .json(&json!({ "title": "Unauthorized Task" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(
        resp.status(),
        reqwest::StatusCode::UNAUTHORIZED,
        "Expected 401 Unauthorized, got {}. Body: {:?}",
        resp.status(),
        resp.text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string())
    );

    // List with a garbage token
    let resp = client
        .get(format!("{}/tasks", base_url))
        .header("Authorization", "Bearer not.a.jwt")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    // The health endpoint stays public
    let resp = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
}
