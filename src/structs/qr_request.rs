use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::qr_code::{Link, QrCode, QrCodePatch, Variant, validate_short_id};
use crate::utils::qr_render::QrImageFormat;

/// Body of `POST /api/qrcodes`. Unknown keys such as `ownerId` are ignored.
#[derive(Deserialize, Validate, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrRequest {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "shortId is required"),
        length(min = 1, max = 64, message = "shortId must be 1 to 64 characters"),
        custom(function = "validate_short_id")
    )]
    pub short_id: Option<String>,
    #[serde(alias = "url")]
    #[validate(url(message = "Invalid target URL"))]
    pub target_url: Option<String>,
    #[validate(url(message = "Invalid original URL"))]
    pub original_url: Option<String>,
    #[validate(nested)]
    pub links: Option<Vec<Link>>,
    #[serde(alias = "qrCode")]
    #[validate(
        required(message = "encodedImage is required"),
        length(min = 1, message = "encodedImage is required")
    )]
    pub encoded_image: Option<String>,
    #[serde(rename = "type", alias = "variant")]
    #[validate(required(message = "type is required"))]
    pub variant: Option<Variant>,
}

/// Body of `PUT /api/qrcodes/{id}`. Only mutable fields are read.
#[derive(Deserialize, Validate, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQrRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(alias = "url")]
    #[validate(url(message = "Invalid target URL"))]
    pub target_url: Option<String>,
    #[validate(url(message = "Invalid original URL"))]
    pub original_url: Option<String>,
    #[validate(nested)]
    pub links: Option<Vec<Link>>,
    #[serde(alias = "qrCode")]
    #[validate(length(min = 1, message = "encodedImage cannot be empty"))]
    pub encoded_image: Option<String>,
}

impl From<UpdateQrRequest> for QrCodePatch {
    fn from(req: UpdateQrRequest) -> Self {
        Self {
            name: req.name,
            target_url: req.target_url,
            original_url: req.original_url,
            links: req.links,
            encoded_image: req.encoded_image,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponse {
    pub id: String,
    pub owner_id: String,
    pub short_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    pub links: Vec<Link>,
    pub encoded_image: String,
    #[serde(rename = "type")]
    pub variant: Variant,
    pub scans: i64,
    pub created_at: i64,
}

impl From<QrCode> for QrCodeResponse {
    fn from(qr: QrCode) -> Self {
        Self {
            id: qr.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            owner_id: qr.owner_id,
            short_id: qr.short_id,
            name: qr.name,
            target_url: qr.target_url,
            original_url: qr.original_url,
            links: qr.links,
            encoded_image: qr.encoded_image,
            variant: qr.variant,
            scans: qr.scans,
            created_at: qr.created_at,
        }
    }
}

/// What a public scan exposes about a record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LandingPayload {
    pub name: String,
    pub links: Vec<Link>,
    /// Forward target, only present for static codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<QrCode> for LandingPayload {
    fn from(qr: QrCode) -> Self {
        let url = match qr.variant {
            Variant::Static => qr.target_url,
            Variant::Dynamic => None,
        };
        Self {
            name: qr.name,
            links: qr.links,
            url,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct MintParams {
    pub format: Option<QrImageFormat>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MintedQr {
    pub short_id: String,
    pub scan_url: String,
    pub encoded_image: String,
}
