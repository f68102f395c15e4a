//! Stateless HS256 session tokens.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{AuthError, AuthUser};
use crate::config::{AuthConfig, MAX_TOKEN_TTL_HOURS};

/// JWT claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User ID as a decimal string.
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates session tokens signed with the process-wide secret.
///
/// Nothing is stored server side: a token is valid while its signature checks
/// out and the current time is before `exp`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"[hidden]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Build from validated config; the TTL is capped at
    /// [`MAX_TOKEN_TTL_HOURS`].
    pub fn from_config(config: &AuthConfig) -> Self {
        let hours = config.token_ttl_hours.min(MAX_TOKEN_TTL_HOURS) as i64;
        Self::new(&config.jwt_secret, Duration::hours(hours))
    }

    /// Issue a token for `user_id` that expires one TTL from now.
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, AuthError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Validate a token against the current time.
    pub fn validate(&self, token: &str) -> Result<AuthUser, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    ///
    /// Every failure is reported as [`AuthError::InvalidToken`]; the actual
    /// cause only reaches the debug log.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<AuthUser, AuthError> {
        // Expiry is checked below against `now` without leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            tracing::debug!("Token rejected: expired at {}", claims.exp);
            return Err(AuthError::InvalidToken);
        }

        let user_id = claims.sub.parse::<i64>().map_err(|_| {
            tracing::debug!("Token rejected: non-numeric subject");
            AuthError::InvalidToken
        })?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
        })
    }

    /// Authenticate a request by validating its Bearer token.
    ///
    /// The scheme name is matched case-insensitively.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
        let auth_header = headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidFormat)?;

        let (scheme, token) = auth_header
            .trim_start()
            .split_once(' ')
            .ok_or(AuthError::InvalidFormat)?;
        let token = token.trim();

        if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
            return Err(AuthError::InvalidFormat);
        }

        self.validate(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-12345", Duration::hours(24))
    }

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service();
        let token = service.issue(42, "a@b.com").unwrap();

        let user = service.validate(&token).unwrap();
        assert_eq!(user, AuthUser { user_id: 42, email: "a@b.com".to_string() });
    }

    #[test]
    fn test_token_valid_until_expiry() {
        let service = service();
        let issued_at = Utc::now() - Duration::hours(30);
        let token = service.issue_at(7, "a@b.com", issued_at).unwrap();

        let just_before = issued_at + Duration::hours(24) - Duration::seconds(1);
        assert!(service.validate_at(&token, just_before).is_ok());
    }

    #[test]
    fn test_token_expired_after_ttl() {
        let service = service();
        let issued_at = Utc::now();
        let token = service.issue_at(7, "a@b.com", issued_at).unwrap();

        let at_expiry = issued_at + Duration::hours(24);
        assert!(matches!(
            service.validate_at(&token, at_expiry),
            Err(AuthError::InvalidToken)
        ));

        let after = issued_at + Duration::hours(24) + Duration::seconds(1);
        assert!(matches!(
            service.validate_at(&token, after),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected_by_validate() {
        let service = service();
        let token = service
            .issue_at(7, "a@b.com", Utc::now() - Duration::hours(25))
            .unwrap();
        assert!(matches!(service.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret() {
        let token = TokenService::new("secret-1", Duration::hours(24))
            .issue(1, "a@b.com")
            .unwrap();

        let result = TokenService::new("secret-2", Duration::hours(24)).validate(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_tampering_any_byte_fails() {
        let service = service();
        let token = service.issue(42, "a@b.com").unwrap();

        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert!(
                matches!(service.validate(&tampered), Err(AuthError::InvalidToken)),
                "tampered byte {} was accepted",
                i
            );
        }
    }

    #[test]
    fn test_malformed_tokens() {
        let service = service();
        for token in ["", "garbage", "a.b.c", "a.b", "...."] {
            assert!(matches!(service.validate(token), Err(AuthError::InvalidToken)));
        }
    }

    #[test]
    fn test_failures_share_one_message() {
        let service = service();
        let expired = service
            .issue_at(1, "a@b.com", Utc::now() - Duration::hours(48))
            .unwrap();
        let forged = TokenService::new("other", Duration::hours(24))
            .issue(1, "a@b.com")
            .unwrap();

        let messages: Vec<String> = [expired.as_str(), forged.as_str(), "not-a-token"]
            .iter()
            .map(|t| service.validate(t).unwrap_err().to_string())
            .collect();

        assert!(messages.iter().all(|m| m == &messages[0]));
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let claims = Claims {
            sub: "auth0|123".to_string(),
            email: "a@b.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        assert!(matches!(service().validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_from_config_uses_ttl() {
        let config = AuthConfig {
            jwt_secret: "cfg-secret".to_string(),
            token_ttl_hours: 1,
            ..AuthConfig::default()
        };
        let service = TokenService::from_config(&config);
        let issued_at = Utc::now();
        let token = service.issue_at(3, "c@d.com", issued_at).unwrap();

        assert!(service.validate_at(&token, issued_at + Duration::minutes(59)).is_ok());
        assert!(service.validate_at(&token, issued_at + Duration::hours(1)).is_err());
    }

    #[test]
    fn test_authenticate_bearer_header() {
        let service = service();
        let token = service.issue(5, "e@f.com").unwrap();

        let user = service
            .authenticate(&headers_with_auth(&format!("Bearer {}", token)))
            .unwrap();
        assert_eq!(user.user_id, 5);
    }

    #[test]
    fn test_authenticate_scheme_is_case_insensitive() {
        let service = service();
        let token = service.issue(5, "e@f.com").unwrap();

        for scheme in ["bearer", "BEARER", "BeArEr"] {
            let user = service
                .authenticate(&headers_with_auth(&format!("{} {}", scheme, token)))
                .unwrap();
            assert_eq!(user.user_id, 5);
        }
    }

    #[test]
    fn test_from_config_caps_ttl() {
        let config = AuthConfig {
            jwt_secret: "cfg-secret".to_string(),
            token_ttl_hours: u64::MAX,
            ..AuthConfig::default()
        };
        let service = TokenService::from_config(&config);
        let issued_at = Utc::now();
        let token = service.issue_at(3, "c@d.com", issued_at).unwrap();

        let cap = Duration::hours(MAX_TOKEN_TTL_HOURS as i64);
        assert!(service.validate_at(&token, issued_at + cap - Duration::seconds(1)).is_ok());
        assert!(service.validate_at(&token, issued_at + cap).is_err());
    }

    #[test]
    fn test_authenticate_missing_header() {
        assert!(matches!(
            service().authenticate(&HeaderMap::new()),
            Err(AuthError::MissingHeader)
        ));
    }

    #[test]
    fn test_authenticate_basic_auth_rejected() {
        assert!(matches!(
            service().authenticate(&headers_with_auth("Basic dXNlcjpwYXNz")),
            Err(AuthError::InvalidFormat)
        ));
        assert!(matches!(
            service().authenticate(&headers_with_auth("Bearer ")),
            Err(AuthError::InvalidFormat)
        ));
        assert!(matches!(
            service().authenticate(&headers_with_auth("Bearertoken")),
            Err(AuthError::InvalidFormat)
        ));
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", service());
        assert!(debug.contains("[hidden]"));
        assert!(!debug.contains("test-secret-key"));
    }
}
