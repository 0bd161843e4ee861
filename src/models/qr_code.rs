use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A QR code record as stored in the `qrcodes` collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub owner_id: String, // Identity asserted by the auth gate, never taken from the body
    pub short_id: String, // Public scan key, unique across the collection
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    pub encoded_image: String, // Rendered image payload, stored as-is
    #[serde(rename = "type")]
    pub variant: Variant,
    #[serde(default)]
    pub scans: i64,
    pub created_at: i64, // Unix epoch milliseconds
}

/// One titled entry on a dynamic landing page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct Link {
    #[validate(length(min = 1, message = "Link title is required"))]
    pub title: String,
    #[validate(url(message = "Invalid link URL"))]
    pub url: String,
}

/// Short ids travel as a URL path segment, so only the nanoid alphabet
/// (`A-Z a-z 0-9 _ -`) is accepted.
pub fn is_url_safe_short_id(short_id: &str) -> bool {
    !short_id.is_empty()
        && short_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

pub fn validate_short_id(short_id: &str) -> Result<(), ValidationError> {
    if is_url_safe_short_id(short_id) {
        Ok(())
    } else {
        Err(ValidationError::new("short_id_charset")
            .with_message("shortId may only contain letters, digits, '_' and '-'".into()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Resolves to `target_url`.
    Static,
    /// Resolves to the `links` landing page.
    Dynamic,
}

impl QrCode {
    pub fn new(
        owner_id: String,
        short_id: String,
        name: String,
        variant: Variant,
        encoded_image: String,
    ) -> Self {
        Self {
            id: None,
            owner_id,
            short_id,
            name,
            target_url: None,
            original_url: None,
            links: Vec::new(),
            encoded_image,
            variant,
            scans: 0,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Mutable fields of a record. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QrCodePatch {
    pub name: Option<String>,
    pub target_url: Option<String>,
    pub original_url: Option<String>,
    pub links: Option<Vec<Link>>,
    pub encoded_image: Option<String>,
}

impl QrCodePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target_url.is_none()
            && self.original_url.is_none()
            && self.links.is_none()
            && self.encoded_image.is_none()
    }

    pub fn apply(&self, record: &mut QrCode) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(target_url) = &self.target_url {
            record.target_url = Some(target_url.clone());
        }
        if let Some(original_url) = &self.original_url {
            record.original_url = Some(original_url.clone());
        }
        if let Some(links) = &self.links {
            record.links = links.clone();
        }
        if let Some(encoded_image) = &self.encoded_image {
            record.encoded_image = encoded_image.clone();
        }
    }
}
