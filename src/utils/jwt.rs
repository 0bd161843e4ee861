use anyhow::{Context, Result, bail};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::config::{AuthConfig, JwtKey};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (owner identity)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Checks bearer tokens issued by the identity provider.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// HS256 tokens signed with a shared secret.
    pub fn from_secret(secret: &str) -> Self {
        Self::new(
            DecodingKey::from_secret(secret.as_bytes()),
            Algorithm::HS256,
        )
    }

    /// RS256 tokens, verified with the provider's PEM-encoded public key.
    pub fn from_rsa_pem(pem: &str) -> Result<Self> {
        let key = DecodingKey::from_rsa_pem(pem.as_bytes()).context("Invalid JWT public key")?;
        Ok(Self::new(key, Algorithm::RS256))
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let verifier = match &config.key {
            JwtKey::Secret(secret) => Self::from_secret(secret),
            JwtKey::RsaPem(pem) => Self::from_rsa_pem(pem)?,
        };

        Ok(match &config.issuer {
            Some(issuer) => verifier.with_issuer(issuer),
            None => verifier,
        })
    }

    fn new(key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;
        Self { key, validation }
    }

    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data =
            decode::<Claims>(token, &self.key, &self.validation).context("Failed to decode JWT")?;

        if token_data.claims.sub.is_empty() {
            bail!("JWT has an empty subject");
        }

        Ok(token_data.claims)
    }
}
