use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::TokenError;

/// Signs and verifies compact, self-contained bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256) over a single process-wide secret. The
/// secret is configured once at startup and never rotated at runtime; the
/// codec holds no other state.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec with the shared signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign a claim set into a bearer token.
    ///
    /// Stamps `iat` with the current time and `exp` with `now + ttl`,
    /// overwriting whatever placeholders the claims carried.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn sign(&self, claims: Claims, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            ..claims
        };

        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a bearer token.
    ///
    /// Checks, in order: structural decode, signature against the shared
    /// secret, expiry (`now < exp`), and kind against `expected_kind`.
    ///
    /// # Errors
    /// * `Malformed` - Token structure could not be decoded
    /// * `SignatureInvalid` - Token was not signed with the shared secret
    /// * `Expired` - Token `exp` has passed
    /// * `WrongKind` - Token kind does not match `expected_kind`
    pub fn verify(&self, token: &str, expected_kind: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // jsonwebtoken defaults to 60s of clock leeway; expiry here is strict
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;

        if claims.kind != expected_kind {
            return Err(TokenError::WrongKind {
                expected: expected_kind,
                actual: claims.kind,
            });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_sign_and_verify() {
        let codec = TokenCodec::new(SECRET);

        let claims = Claims::access("user123", "alice@example.com", "alice");
        let token = codec
            .sign(claims, Duration::minutes(30))
            .expect("Failed to sign token");
        assert!(!token.is_empty());

        let decoded = codec
            .verify(&token, TokenKind::Access)
            .expect("Failed to verify token");
        assert_eq!(decoded.sub, "user123");
        assert_eq!(decoded.email.as_deref(), Some("alice@example.com"));
        assert_eq!(decoded.username.as_deref(), Some("alice"));
        assert_eq!(decoded.exp - decoded.iat, 30 * 60);
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let codec = TokenCodec::new(SECRET);

        let result = codec.verify("not.a.token", TokenKind::Access);
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = codec1
            .sign(Claims::refresh("user123"), Duration::days(7))
            .expect("Failed to sign token");

        let result = codec2.verify(&token, TokenKind::Refresh);
        assert_eq!(result, Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_verify_expired_token() {
        let codec = TokenCodec::new(SECRET);

        // Expiry is strict (no leeway): even a token just seconds past its
        // `exp` must be rejected.
        let token = codec
            .sign(Claims::refresh("user123"), Duration::seconds(-2))
            .expect("Failed to sign token");

        let result = codec.verify(&token, TokenKind::Refresh);
        assert_eq!(result, Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_unexpired_token_within_ttl() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .sign(Claims::refresh("user123"), Duration::days(7))
            .expect("Failed to sign token");

        assert!(codec.verify(&token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn test_verify_wrong_kind_both_directions() {
        let codec = TokenCodec::new(SECRET);

        let refresh = codec
            .sign(Claims::refresh("user123"), Duration::days(7))
            .unwrap();
        let access = codec
            .sign(
                Claims::access("user123", "alice@example.com", "alice"),
                Duration::minutes(30),
            )
            .unwrap();

        assert_eq!(
            codec.verify(&refresh, TokenKind::Access),
            Err(TokenError::WrongKind {
                expected: TokenKind::Access,
                actual: TokenKind::Refresh,
            })
        );
        assert_eq!(
            codec.verify(&access, TokenKind::Refresh),
            Err(TokenError::WrongKind {
                expected: TokenKind::Refresh,
                actual: TokenKind::Access,
            })
        );
    }
}
