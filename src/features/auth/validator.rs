use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::model::{Claims, CurrentUser};
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use crate::features::users::services::UserService;

/// Validates HS256 bearer tokens and resolves them to a [`CurrentUser`].
///
/// The token names a user by id; the user row is the authority for the
/// identity attributes (name, level, admin flag). A syntactically valid
/// token for a user this store does not know is rejected the same way a
/// malformed one is.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    leeway: u64,
    user_service: Arc<UserService>,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig, user_service: Arc<UserService>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_key.as_bytes()),
            leeway: config.jwt_leeway.as_secs(),
            user_service,
        }
    }

    /// Decode and validate the raw token, without touching the user store.
    fn decode_claims(token: &str, key: &DecodingKey, leeway: u64) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway;

        decode::<Claims>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Auth("Could not validate credentials".to_string()))
    }

    pub async fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let claims = Self::decode_claims(token, &self.decoding_key, self.leeway)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Auth("Could not validate credentials".to_string()))?;

        let user = self
            .user_service
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Auth("Could not validate credentials".to_string()))?;

        Ok(CurrentUser {
            id: user.id,
            name: user.name,
            level: user.level,
            is_admin: user.is_admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn sign(claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> u64 {
        (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as u64
    }

    #[test]
    fn decodes_valid_token() {
        let user_id = Uuid::new_v4();
        let token = sign(&Claims {
            sub: user_id.to_string(),
            is_admin: true,
            email: Some(SafeEmail().fake()),
            exp: future_exp(),
        });

        let key = DecodingKey::from_secret(SECRET.as_bytes());
        let claims = JwtValidator::decode_claims(&token, &key, 60).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert!(claims.is_admin);
    }

    #[test]
    fn rejects_expired_token() {
        let token = sign(&Claims {
            sub: Uuid::new_v4().to_string(),
            is_admin: false,
            email: None,
            exp: 1_000, // long past
        });

        let key = DecodingKey::from_secret(SECRET.as_bytes());
        let result = JwtValidator::decode_claims(&token, &key, 0);

        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn rejects_token_signed_with_other_key() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                sub: Uuid::new_v4().to_string(),
                is_admin: true,
                email: None,
                exp: future_exp(),
            },
            &EncodingKey::from_secret(b"other-secret"),
        )
        .unwrap();

        let key = DecodingKey::from_secret(SECRET.as_bytes());
        let result = JwtValidator::decode_claims(&token, &key, 60);

        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn rejects_token_without_admin_claim() {
        // A token missing `is_admin` must not deserialize into Claims.
        let token = {
            #[derive(serde::Serialize)]
            struct Partial {
                sub: String,
                exp: u64,
            }
            encode(
                &Header::new(Algorithm::HS256),
                &Partial {
                    sub: Uuid::new_v4().to_string(),
                    exp: future_exp(),
                },
                &EncodingKey::from_secret(SECRET.as_bytes()),
            )
            .unwrap()
        };

        let key = DecodingKey::from_secret(SECRET.as_bytes());
        let result = JwtValidator::decode_claims(&token, &key, 60);

        assert!(matches!(result, Err(AppError::Auth(_))));
    }
}
