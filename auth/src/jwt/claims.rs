use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Discriminator between the two token families.
///
/// Access tokens prove identity for a single request window; refresh tokens
/// are used solely to mint new access tokens and are also persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claim set embedded in a signed bearer token.
///
/// `exp` and `iat` are stamped by [`crate::TokenCodec::sign`] at issue time;
/// the values carried by a freshly constructed instance are placeholders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier, string-encoded)
    pub sub: String,

    /// Denormalized email, access tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Denormalized username, access tokens only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Token kind discriminator
    #[serde(rename = "type")]
    pub kind: TokenKind,

    /// Token identifier, refresh tokens only. Keeps two refresh tokens
    /// minted for the same subject in the same second from colliding on
    /// the persisted token string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Claims for an access token carrying the denormalized identity fields.
    pub fn access(
        subject: impl ToString,
        email: impl ToString,
        username: impl ToString,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            email: Some(email.to_string()),
            username: Some(username.to_string()),
            kind: TokenKind::Access,
            jti: None,
            exp: 0,
            iat: 0,
        }
    }

    /// Claims for a refresh token. Carries the subject and a fresh `jti`.
    pub fn refresh(subject: impl ToString) -> Self {
        Self {
            sub: subject.to_string(),
            email: None,
            username: None,
            kind: TokenKind::Refresh,
            jti: Some(Uuid::new_v4().to_string()),
            exp: 0,
            iat: 0,
        }
    }
}
