use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
}

/// Stateless token signer/verifier. Holds the process-wide secret so that
/// handlers and middleware never reach into the environment themselves.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
}

impl TokenService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issue a token for an email identity. The email is accepted as-is;
    /// expiry is fixed at 1 day from issuance.
    pub fn issue(&self, email: &str) -> Result<String, String> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = (now + Duration::days(1)).timestamp() as usize;

        let claims = Claims {
            email: email.to_string(),
            iat,
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| format!("Failed to generate token: {}", e))
    }

    /// Verify a presented token and yield its claims. Fails on malformed,
    /// mis-signed or expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, String> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| format!("Invalid token: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_verify_round_trip() {
        let service = TokenService::new("test-secret");

        let token = service.issue("a@x.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expiry_is_one_day() {
        let service = TokenService::new("test-secret");

        let token = service.issue("a@x.com").unwrap();
        let claims = service.verify(&token).unwrap();

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, 24 * 60 * 60);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issuer = TokenService::new("secret-a");
        let verifier = TokenService::new("secret-b");

        let token = issuer.issue("a@x.com").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = TokenService::new("test-secret");
        assert!(service.verify("not-a-jwt").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new("test-secret");

        // Hand-craft claims expired well past the default 60s leeway
        let iat = (Utc::now() - Duration::hours(2)).timestamp() as usize;
        let exp = (Utc::now() - Duration::hours(1)).timestamp() as usize;
        let claims = Claims {
            email: "a@x.com".to_string(),
            iat,
            exp,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_ref()),
        )
        .unwrap();

        assert!(service.verify(&token).is_err());
    }
}
