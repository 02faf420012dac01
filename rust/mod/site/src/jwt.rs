//! Admin session tokens.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin username.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// HMAC-signed session tokens with a fixed lifetime.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: jsonwebtoken::EncodingKey,
    decoding_key: jsonwebtoken::DecodingKey,
    validation: jsonwebtoken::Validation,
    expire_secs: i64,
}

/// Sessions last one day.
pub const SESSION_SECS: i64 = 24 * 60 * 60;

impl JwtService {
    pub fn new(secret: &str, expire_secs: i64) -> Self {
        let mut validation = jsonwebtoken::Validation::default();
        validation.leeway = 0;
        Self {
            encoding_key: jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expire_secs,
        }
    }

    pub fn expire_secs(&self) -> i64 {
        self.expire_secs
    }

    /// Sign a token issued at `now`.
    pub fn issue_at(&self, username: &str, now: i64) -> Result<(String, Claims), String> {
        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.expire_secs,
        };
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &self.encoding_key)
            .map(|token| (token, claims))
            .map_err(|e| format!("jwt encode: {}", e))
    }

    pub fn issue(&self, username: &str) -> Result<(String, Claims), String> {
        self.issue_at(username, chrono::Utc::now().timestamp())
    }

    /// Err if the token is malformed, expired or signed with another secret.
    pub fn verify(&self, token: &str) -> Result<Claims, String> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| format!("jwt verify: {}", e))
    }
}
