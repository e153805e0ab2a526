//! Auth API handlers: registration and login.
//!
//! # Endpoints
//!
//! - `POST /register` – create a customer account, returns a token
//! - `POST /login`    – exchange credentials for a token

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use kanau::processor::Processor;

use ceats_core::entities::UserRole;
use ceats_core::entities::users::{GetUserByEmail, InsertUser, User, hash_password, verify_password};
use ceats_core::framework::DatabaseProcessor;
use ceats_sdk::objects::auth::{AuthResponse, LoginRequest, RegisterRequest};

use crate::api::{error_response, is_unique_violation};
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

async fn token_for(state: &AppState, user: &User) -> Result<String, AuthApiError> {
    let tokens = state.config.tokens.read().await;
    tokens
        .issue(user.id, &user.name, user.role.into(), user.canteen_id)
        .map_err(|e| AuthApiError::Token(e.to_string()))
}

fn auth_response(user: &User, token: String) -> AuthResponse {
    AuthResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.into(),
        canteen_id: user.canteen_id,
        token,
    }
}

/// `POST /register` — create a customer account.
///
/// Self-registration always yields the customer role; manager accounts
/// come from the admin API.
async fn register(
    state: State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    if body.name.trim().is_empty() || body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AuthApiError::MissingFields);
    }

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let password_hash = hash_password(&body.password).map_err(|e| AuthApiError::Hash(e.to_string()))?;

    let user = processor
        .process(InsertUser {
            name: body.name,
            email: body.email,
            password_hash,
            role: UserRole::Customer,
            canteen_id: None,
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthApiError::EmailTaken
            } else {
                AuthApiError::Database(e)
            }
        })?;

    let token = token_for(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(auth_response(&user, token))))
}

/// `POST /login` — exchange credentials for a token.
async fn login(
    state: State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let user = processor
        .process(GetUserByEmail { email: body.email })
        .await
        .map_err(AuthApiError::Database)?
        .ok_or(AuthApiError::InvalidCredentials)?;

    if !verify_password(&body.password, &user.password_hash) {
        return Err(AuthApiError::InvalidCredentials);
    }

    let token = token_for(&state, &user).await?;
    Ok(Json(auth_response(&user, token)))
}

/// Errors that can occur in auth handlers.
#[derive(Debug)]
enum AuthApiError {
    MissingFields,
    EmailTaken,
    InvalidCredentials,
    Hash(String),
    Token(String),
    Database(sqlx::Error),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AuthApiError::MissingFields => {
                error_response(StatusCode::BAD_REQUEST, "name, email and password are required")
            }
            AuthApiError::EmailTaken => error_response(
                StatusCode::CONFLICT,
                "user with this email already exists",
            ),
            AuthApiError::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "invalid email or password")
            }
            AuthApiError::Hash(e) => {
                tracing::error!(error = %e, "password hashing failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            AuthApiError::Token(e) => {
                tracing::error!(error = %e, "token generation failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            AuthApiError::Database(e) => {
                tracing::error!(error = %e, "auth API database error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}
