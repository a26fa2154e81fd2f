//! HS256 access tokens.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's database id.
    pub sub: i64,
    pub email: String,
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Generate an HS256 access token for the given user.
pub fn generate_token(
    user_id: i64,
    email: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role: role.to_string(),
        exp: now + config.expiry_hours * 3600,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate signature and expiry, returning the embedded [`Claims`].
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(expiry_hours: i64) -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            expiry_hours,
        }
    }

    #[test]
    fn token_round_trip() {
        let token = generate_token(42, "admin@shelter.org", "admin", &config(24)).unwrap();
        let claims = validate_token(&token, &config(24)).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "admin@shelter.org");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token(1, "a@b.org", "user", &config(1)).unwrap();
        let other = JwtConfig {
            secret: "other".into(),
            expiry_hours: 1,
        };
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Well past the default 60s leeway
        let token = generate_token(1, "a@b.org", "user", &config(-1)).unwrap();
        assert!(validate_token(&token, &config(-1)).is_err());
    }
}
