use crate::{
    auth::{hash_password, verify_password, LoginRequest, RegisterRequest, TokenKeys, TokenResponse},
    error::AppError,
    store,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account. No token is issued; the client logs in
/// separately.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Hash password and insert; a duplicate username surfaces as 409
    let password_hash = hash_password(&register_data.password)?;
    store::users::create(&pool, &register_data.username, &password_hash).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User created"
    })))
}

/// Login user
///
/// Authenticates a user and returns a bearer access token.
#[post("/token")]
pub async fn login(
    pool: web::Data<PgPool>,
    keys: web::Data<TokenKeys>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let user = store::users::find_by_username(&pool, &login_data.username).await?;

    // An unknown username and a wrong password take the same path: one
    // generic 401, so the response never reveals which check failed.
    match user {
        Some(user) if verify_password(&login_data.password, &user.password_hash) => {
            let token = keys.issue(&user.username)?;
            Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
        }
        _ => Err(AppError::Unauthorized("invalid credentials".into())),
    }
}
