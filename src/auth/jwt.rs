use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwks::JwksCache;

/// Claims issued by the external identity provider.
///
/// Token issuance is out of this service's hands; we only validate. The
/// `sub` field is the user's UUID in the identity provider, which doubles as
/// our `users.id`. `user_metadata` carries profile info from the upstream
/// OAuth provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The identity-provider user UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// Issuer URL.
    pub iss: Option<String>,
    /// User's email.
    pub email: Option<String>,
    /// Provider-side role claim (e.g. "authenticated"). Not our account role.
    pub role: Option<String>,
    /// Metadata from the OAuth provider.
    pub user_metadata: Option<UserMetadata>,
}

/// Metadata populated by the upstream OAuth provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub picture: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
}

impl Claims {
    /// Extract the user UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }

    /// Best-effort display name from metadata.
    pub fn display_name(&self) -> Option<String> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.full_name.clone().or_else(|| m.name.clone()))
    }

    /// Best-effort avatar URL from metadata.
    pub fn avatar_url(&self) -> Option<String> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.avatar_url.clone().or_else(|| m.picture.clone()))
    }

    /// Best-effort email: prefer top-level, fall back to metadata.
    pub fn user_email(&self) -> Option<String> {
        self.email
            .clone()
            .or_else(|| self.user_metadata.as_ref().and_then(|m| m.email.clone()))
    }
}

/// Validate an HS256 JWT against a shared secret and return the claims.
pub fn validate_with_secret(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|td| td.claims)
    .map_err(|e| format!("Token validation failed: {e}"))
}

/// How this deployment validates tokens, chosen once at startup.
///
/// Production deployments point at the identity provider's JWKS endpoint;
/// development deployments may use a shared HS256 secret instead.
pub enum TokenVerifier {
    Jwks(JwksCache),
    Secret(String),
}

impl TokenVerifier {
    /// Build a verifier from the environment: `JWKS_URL` (with optional
    /// `JWKS_API_KEY`) wins over `JWT_SECRET`.
    pub fn from_env() -> Result<Self, String> {
        if let Ok(url) = std::env::var("JWKS_URL") {
            let api_key = std::env::var("JWKS_API_KEY").ok();
            return Ok(TokenVerifier::Jwks(JwksCache::new(&url, api_key)));
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            return Ok(TokenVerifier::Secret(secret));
        }
        Err("Neither JWKS_URL nor JWT_SECRET is set".to_string())
    }

    /// Validate a token and return its decoded claims.
    pub async fn validate(&self, token: &str) -> Result<Claims, String> {
        match self {
            TokenVerifier::Jwks(cache) => cache.validate_token(token).await.map(|td| td.claims),
            TokenVerifier::Secret(secret) => validate_with_secret(token, secret),
        }
    }
}
