use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest, User, USER_TYPES};
use crate::state::AppState;

pub async fn register(
    data: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let auth_req = data.into_inner();
    let pool = &state.pool;

    let mut missing = Vec::new();
    if blank(&auth_req.full_name) {
        missing.push("fullName");
    }
    if blank(&auth_req.email) {
        missing.push("email");
    }
    if blank(&auth_req.password) {
        missing.push("password");
    }
    if blank(&auth_req.user_type) {
        missing.push("userType");
    }
    if !missing.is_empty() {
        return Err(ApiError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let user_type = auth_req.user_type.unwrap_or_default();
    if !USER_TYPES.contains(&user_type.as_str()) {
        return Err(ApiError::validation(format!(
            "userType must be one of: {}",
            USER_TYPES.join(", ")
        )));
    }

    let email = auth_req.email.unwrap_or_default().trim().to_lowercase();

    // check existing user
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM users WHERE email = ?")
        .bind(&email)
        .fetch_one(pool)
        .await
        .map_err(|err| {
            log::error!("Error checking for existing user: {err}");
            ApiError::Internal("Server Error registering user".to_string())
        })?;
    if existing > 0 {
        return Err(ApiError::Conflict(
            "User with this email already exists.".to_string(),
        ));
    }

    let hashed_password = bcrypt::hash(auth_req.password.unwrap_or_default(), bcrypt::DEFAULT_COST)
        .map_err(|err| {
            log::error!("Password hashing failed: {err}");
            ApiError::Internal("Server Error registering user".to_string())
        })?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        full_name: auth_req.full_name.unwrap_or_default(),
        email,
        password: hashed_password,
        user_type,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO users (id, full_name, email, password, user_type, created_at) VALUES (?, ?, ?, ?, ?, ?)"
    )
    .bind(&user.id)
    .bind(&user.full_name)
    .bind(&user.email)
    .bind(&user.password)
    .bind(&user.user_type)
    .bind(&user.created_at)
    .execute(pool)
    .await
    .map_err(|err| {
        log::error!("Failed to create user: {err}");
        ApiError::Internal("Server Error registering user".to_string())
    })?;

    let token = issue_session(pool, &user.id).await;

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully",
        "token": token,
        "_id": user.id,
        "fullName": user.full_name,
        "email": user.email,
        "userType": user.user_type
    })))
}

pub async fn login(
    data: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let auth_req = data.into_inner();
    let pool = &state.pool;
    let email = auth_req.email.trim().to_lowercase();

    let row = sqlx::query(
        "SELECT id, full_name, email, password, user_type, created_at FROM users WHERE email = ? LIMIT 1"
    )
    .bind(&email)
    .fetch_optional(pool)
    .await
    .map_err(|err| {
        log::error!("Error fetching user for login: {err}");
        ApiError::Internal("Server Error logging in".to_string())
    })?;

    let row = match row {
        Some(r) => r,
        None => return Err(ApiError::Unauthorized("Invalid credentials".to_string())),
    };

    let user = User {
        id: row.get::<String, _>("id"),
        full_name: row.get::<String, _>("full_name"),
        email: row.get::<String, _>("email"),
        password: row.get::<String, _>("password"),
        user_type: row.get::<String, _>("user_type"),
        created_at: row.get::<String, _>("created_at"),
    };

    let is_valid = bcrypt::verify(&auth_req.password, &user.password).unwrap_or(false);
    if !is_valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_session(pool, &user.id).await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful",
        "token": token,
        "_id": user.id,
        "fullName": user.full_name,
        "email": user.email,
        "userType": user.user_type
    })))
}

// Nothing reads sessions back yet; tokens are opaque and failures to
// record one are not surfaced to the caller.
async fn issue_session(pool: &SqlitePool, user_id: &str) -> String {
    let token = Uuid::new_v4().to_string();
    let created_at = chrono::Utc::now().to_rfc3339();
    let expires_at = (chrono::Utc::now() + chrono::Duration::days(30)).to_rfc3339();

    let _ = sqlx::query(
        "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&token)
    .bind(user_id)
    .bind(&created_at)
    .bind(&expires_at)
    .execute(pool)
    .await;

    token
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}
