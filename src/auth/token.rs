//! Session token encoding
//!
//! Tokens are standard base64 over a compact JSON object, e.g.
//! `{"userId":1,"email":"admin@elegantsteelhw.com"}`. Anyone can decode them:
//! there is no signature, expiry or revocation. A real deployment needs a
//! signed, expiring token in place of this one.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::auth::models::Profile;
use crate::error::{Error, Result};

/// Identity asserted by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: u32,
    pub email: String,
}

impl TokenClaims {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            user_id: profile.id,
            email: profile.email.clone(),
        }
    }
}

/// Encode a token for the given profile
pub fn issue(profile: &Profile) -> String {
    encode_claims(&TokenClaims::from_profile(profile))
}

/// Encode arbitrary claims
pub fn encode_claims(claims: &TokenClaims) -> String {
    let json = serde_json::to_vec(claims).expect("a u32 and a String always serialize to JSON");
    general_purpose::STANDARD.encode(json)
}

/// Decode a token back into its claims
pub fn decode(token: &str) -> Result<TokenClaims> {
    let bytes = general_purpose::STANDARD
        .decode(token.trim())
        .map_err(|e| Error::MalformedToken(format!("not base64: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| Error::MalformedToken(format!("bad payload: {}", e)))
}
