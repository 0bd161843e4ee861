use std::io::Cursor;

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use qrcode::render::svg;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QrImageFormat {
    #[default]
    Png,
    Svg,
}

/// Render `content` as a QR code and return it as a base64 data URL, ready to
/// be stored as a record's `encodedImage`.
pub fn render_data_url(content: &str, format: QrImageFormat) -> Result<String> {
    let code = QrCode::new(content.as_bytes()).context("QR code generation error")?;

    match format {
        QrImageFormat::Png => {
            let image = code
                .render::<Luma<u8>>()
                .min_dimensions(256, 256)
                .quiet_zone(true)
                .build();

            let mut bytes = Vec::new();
            DynamicImage::ImageLuma8(image)
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .context("PNG encoding error")?;

            Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
        }
        QrImageFormat::Svg => {
            let svg = code
                .render::<svg::Color>()
                .min_dimensions(200, 200)
                .quiet_zone(true)
                .build();

            Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg)))
        }
    }
}
