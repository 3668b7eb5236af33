use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_decoy, verify_password},
        repo_types::{NewUser, User},
    },
    error::{AppError, AppResult},
    store::Store,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_registration(req: &RegisterRequest) -> AppResult<()> {
    if req.name.trim().chars().count() < 3 {
        return Err(AppError::validation("Name must have at least 3 characters"));
    }
    if !is_valid_email(&req.email) {
        return Err(AppError::validation("Invalid email"));
    }
    if req.password.chars().count() < 6 {
        return Err(AppError::validation("Password must have at least 6 characters"));
    }
    Ok(())
}

/// Stores a new user with a hashed password; the role defaults to STUDENT.
pub async fn register(store: &dyn Store, mut req: RegisterRequest) -> AppResult<User> {
    req.email = normalize_email(&req.email);
    validate_registration(&req)?;

    if store.find_user_by_email(&req.email).await?.is_some() {
        warn!(email = %req.email, "email already registered");
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = hash_password(&req.password)?;
    let user = store
        .insert_user(NewUser {
            name: req.name.trim().to_string(),
            email: req.email,
            password_hash,
            role: req.role.unwrap_or_default(),
        })
        .await?;

    info!(user_id = %user.id, role = ?user.role, "user registered");
    Ok(user)
}

/// Verifies credentials and issues a signed token. Unknown email and wrong
/// password are indistinguishable to the caller.
pub async fn login(
    store: &dyn Store,
    keys: &JwtKeys,
    mut req: LoginRequest,
) -> AppResult<(String, User)> {
    req.email = normalize_email(&req.email);
    if !is_valid_email(&req.email) {
        return Err(AppError::validation("Invalid email"));
    }

    let Some(user) = store.find_user_by_email(&req.email).await? else {
        warn!(email = %req.email, "login unknown email");
        verify_decoy(&req.password);
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = keys.sign(user.id, user.role)?;
    info!(user_id = %user.id, "user logged in");
    Ok((token, user))
}

pub async fn current_user(store: &dyn Store, user_id: Uuid) -> AppResult<User> {
    store
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))
}
