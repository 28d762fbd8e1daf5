use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use crate::{
    auth::{
        auth::AuthUser,
        blacklist,
        jwt::{generate_access_token, generate_refresh_token, verify_token},
        password::{hash_password, verify_password},
    },
    config::Config,
    error::ApiError,
    model::role::Role,
    models::{
        LoginRequest, LogoutRequest, RefreshRequest, SignupRequest, TokenType,
        UpdateProfileRequest, UserResponse, is_valid_email,
    },
    store,
};

fn token_pair(account_id: &str, email: &str, role: Role, config: &Config) -> (String, String) {
    let access = generate_access_token(
        account_id,
        email,
        role,
        &config.jwt_secret,
        config.access_token_ttl,
    );
    let (refresh, _) = generate_refresh_token(
        account_id,
        email,
        role,
        &config.jwt_secret,
        config.refresh_token_ttl,
    );
    (access, refresh)
}

/// Register a new account. Role is fixed to HR Manager; a session is
/// issued immediately.
pub async fn signup(
    body: web::Json<SignupRequest>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let email = body.email.trim().to_lowercase();

    if !is_valid_email(&email) {
        return Err(ApiError::field("email", "Enter a valid email address"));
    }
    if body.name.trim().is_empty() {
        return Err(ApiError::field("name", "Name is required"));
    }
    if body.password.len() < 6 {
        return Err(ApiError::field(
            "password",
            "Password must be at least 6 characters",
        ));
    }

    let hashed = hash_password(&body.password);
    let account = store::users::insert(
        pool.get_ref(),
        store::users::NewAccount {
            email: &email,
            password_hash: &hashed,
            name: body.name.trim(),
            role: Role::HrManager.as_str(),
            phone: body.phone.as_deref(),
            department: body.department.as_deref(),
        },
    )
    .await?;

    info!(account_id = %account.id, "Account registered");

    let (access, refresh) = token_pair(&account.id, &account.email, Role::HrManager, &config);

    Ok(HttpResponse::Created().json(json!({
        "user": UserResponse::from(account),
        "access": access,
        "refresh": refresh,
    })))
}

#[instrument(name = "auth_login", skip(body, pool, config), fields(email = %body.email))]
pub async fn login(
    body: web::Json<LoginRequest>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::validation("Must include email and password"));
    }

    let email = body.email.trim().to_lowercase();

    debug!("Fetching account");
    let account = store::users::find_by_email(pool.get_ref(), &email)
        .await?
        .ok_or_else(|| ApiError::validation("Invalid email or password"))?;

    if verify_password(&body.password, &account.password_hash).is_err() {
        info!("Invalid credentials: password mismatch");
        return Err(ApiError::validation("Invalid email or password"));
    }

    if !account.is_active {
        info!("Login rejected: account disabled");
        return Err(ApiError::validation("User account is disabled"));
    }

    let role = Role::from_name(&account.role).unwrap_or(Role::HrManager);
    let (access, refresh) = token_pair(&account.id, &account.email, role, &config);

    info!("Login successful");

    Ok(HttpResponse::Ok().json(json!({
        "user": UserResponse::from(account),
        "access": access,
        "refresh": refresh,
    })))
}

/// Exchange a live refresh token for a new access token. Blacklisted or
/// expired tokens are rejected outright.
pub async fn refresh_token(
    body: web::Json<RefreshRequest>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let claims = verify_token(&body.refresh, &config.jwt_secret)
        .map_err(|_| ApiError::Authentication("Invalid or expired refresh token".into()))?;

    if claims.token_type != TokenType::Refresh {
        return Err(ApiError::Authentication("Refresh token required".into()));
    }

    if blacklist::is_revoked(pool.get_ref(), &claims.jti).await? {
        info!(jti = %claims.jti, "Refresh rejected: token blacklisted");
        return Err(ApiError::Authentication("Token is blacklisted".into()));
    }

    let access = generate_access_token(
        &claims.user_id,
        &claims.sub,
        claims.role,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    Ok(HttpResponse::Ok().json(json!({ "access": access })))
}

/// Blacklist the refresh token's jti. Idempotent: logging out an already
/// blacklisted token still succeeds, the attempt is just logged.
pub async fn logout(
    body: web::Json<LogoutRequest>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    if let Some(token) = &body.refresh {
        let claims = verify_token(token, &config.jwt_secret)
            .map_err(|e| ApiError::validation(format!("Invalid refresh token: {e}")))?;

        if claims.token_type != TokenType::Refresh {
            return Err(ApiError::validation("Refresh token required"));
        }

        let newly_revoked = store::tokens::revoke(pool.get_ref(), &claims.jti).await?;
        blacklist::mark_revoked(&claims.jti).await;

        if newly_revoked {
            info!(jti = %claims.jti, "Refresh token blacklisted");
        } else {
            info!(jti = %claims.jti, "Logout for already blacklisted token");
        }
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Successfully logged out" })))
}

pub async fn get_profile(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, ApiError> {
    let account = store::users::find_by_id(pool.get_ref(), &auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Authentication("Account no longer exists".into()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(account)))
}

/// Partial profile update. Changing the role is an administrator
/// capability; everything else any account may edit on itself.
pub async fn update_profile(
    auth: AuthUser,
    body: web::Json<UpdateProfileRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, ApiError> {
    if let Some(email) = &body.email {
        if !is_valid_email(&email.to_lowercase()) {
            return Err(ApiError::field("email", "Enter a valid email address"));
        }
    }

    if let Some(role) = &body.role {
        if !auth.role.can_assign_roles() {
            return Err(ApiError::Forbidden(
                "Only administrators can change roles".into(),
            ));
        }
        if Role::from_name(role).is_none() {
            return Err(ApiError::field("role", "Unknown role"));
        }
    }

    let account = store::users::update_profile(pool.get_ref(), &auth.user_id, &body).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(account)))
}
