use common::{InventoryError, Result};
use qrcode::render::svg;
use qrcode::QrCode;

/// Public lookup URL encoded in a device's QR code.
pub fn device_url(base_url: &str, qr_hash: &str) -> String {
    format!("{}/device/{}", base_url.trim_end_matches('/'), qr_hash)
}

pub trait QrRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn render(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct SvgQrRenderer {
    pub min_size: u32,
    pub dark_color: String,
    pub light_color: String,
}

impl Default for SvgQrRenderer {
    fn default() -> Self {
        Self {
            min_size: 256,
            dark_color: "#000000".to_string(),
            light_color: "#FFFFFF".to_string(),
        }
    }
}

impl QrRenderer for SvgQrRenderer {
    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn render(&self, url: &str) -> Result<Vec<u8>> {
        let svg_string = QrCode::new(url.as_bytes())
            .map_err(|e| InventoryError::Render(e.to_string()))?
            .render::<svg::Color>()
            .min_dimensions(self.min_size, self.min_size)
            .dark_color(svg::Color(&self.dark_color))
            .light_color(svg::Color(&self.light_color))
            .build();

        Ok(svg_string.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_hash_with_single_slash() {
        assert_eq!(device_url("http://localhost:8080", "MDA6MUI6NDQ6"), "http://localhost:8080/device/MDA6MUI6NDQ6");
        assert_eq!(device_url("https://inv.example/", "MDA6MUI6NDQ6"), "https://inv.example/device/MDA6MUI6NDQ6");
    }

    #[test]
    fn renders_svg() {
        let renderer = SvgQrRenderer::default();
        let bytes = renderer.render("http://localhost:8080/device/MDA6MUI6NDQ6").unwrap();
        let svg = String::from_utf8(bytes).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
    }
}
