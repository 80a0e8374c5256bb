//! Member login and bearer-token protection.
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::db::models::Member;
use crate::services::{ServiceError, ServiceResult};
use crate::store::HospitalStore;

pub mod middleware;
pub mod token;

pub use token::TokenIssuer;

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub member: Member,
    pub access_token: String,
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"))
        .is_match(email)
}

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// Checks a password against a stored bcrypt hash. A malformed hash counts
/// as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or_else(|e| {
        log::warn!("Stored password hash could not be checked: {}", e);
        false
    })
}

/// Authenticates `{email, password}` and issues a bearer token.
pub async fn login(
    store: &dyn HospitalStore,
    tokens: &TokenIssuer,
    input: &Value,
) -> ServiceResult<LoginResponse> {
    let email = input.get("email").and_then(Value::as_str).unwrap_or("");
    let password = input.get("password").and_then(Value::as_str).unwrap_or("");

    if !is_valid_email(email) {
        return Err(ServiceError::Validation("Invalid email format".to_string()));
    }

    let member = store.find_member_by_email(email).await?.ok_or_else(|| {
        ServiceError::NotFound(format!("User with email {} does not exist", email))
    })?;

    if !verify_password(password, &member.password) {
        log::warn!("Failed login for user: {}", member.email);
        return Err(ServiceError::InvalidCredentials(
            "Invalid password".to_string(),
        ));
    }

    let access_token = tokens.issue(member.id).map_err(|e| {
        log::error!("Failed to issue token for member {}: {}", member.id, e);
        ServiceError::Internal("Could not issue access token".to_string())
    })?;

    log::info!("Successful login for user: {}", member.email);
    Ok(LoginResponse {
        message: format!("Welcome {}", member.name),
        member,
        access_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{NewMember, PASSWORD_MASK};
    use crate::store::memory::MemoryStore;
    use chrono::Duration;
    use serde_json::json;

    async fn store_with_member() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .create_member(NewMember {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password_hash: bcrypt::hash("s3cret", 4).unwrap(),
            })
            .await
            .unwrap();
        store
    }

    fn tokens() -> TokenIssuer {
        TokenIssuer::new("test-secret", Duration::minutes(60))
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ada@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada.example.com"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn correct_credentials_issue_token() {
        let store = store_with_member().await;
        let tokens = tokens();
        let response = login(
            &store,
            &tokens,
            &json!({"email": "ada@example.com", "password": "s3cret"}),
        )
        .await
        .unwrap();
        assert_eq!(response.message, "Welcome Ada");
        assert_eq!(tokens.verify(&response.access_token).unwrap(), response.member.id);

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["member"]["password"], PASSWORD_MASK);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let store = store_with_member().await;
        let err = login(
            &store,
            &tokens(),
            &json!({"email": "ada@example.com", "password": "nope"}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let store = store_with_member().await;
        let err = login(
            &store,
            &tokens(),
            &json!({"email": "bob@example.com", "password": "s3cret"}),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_email_is_validation_error() {
        let store = store_with_member().await;
        let err = login(&store, &tokens(), &json!({"password": "s3cret"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
