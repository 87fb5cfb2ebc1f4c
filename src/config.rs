use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::layout::{Axis, DEFAULT_MARGIN_PX, DEFAULT_VIEWPORT_PX};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub preview: PreviewConfig,
    pub lookup: LookupConfig,
}

/// Preview rendering parameters.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PreviewConfig {
    /// Side of the square preview (px)
    pub viewport_px: f64,
    /// Inset between the viewport edge and the parcel outline (px)
    pub margin_px: f64,
    /// Axis for parcels that don't choose one
    pub default_axis: Axis,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            viewport_px: DEFAULT_VIEWPORT_PX,
            margin_px: DEFAULT_MARGIN_PX,
            default_axis: Axis::Horizontal,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LookupProvider {
    /// Offline, deterministic stand-ins
    #[default]
    Mock,
    /// Real HTTP endpoints
    Http,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    pub provider: LookupProvider,
    /// Nominatim-compatible reverse geocoding endpoint
    pub geocode_url: String,
    /// Business suggestion endpoint, queried with `?address=`
    pub business_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            provider: LookupProvider::Mock,
            geocode_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            business_url: "http://localhost:5000/api/businesses".to_string(),
            timeout_secs: 10,
            user_agent: concat!("parcelsplit-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        let p = &self.preview;
        if !(p.viewport_px.is_finite() && p.viewport_px > 0.0) {
            anyhow::bail!("preview.viewport_px must be positive, got {}", p.viewport_px);
        }
        if !(p.margin_px.is_finite() && p.margin_px >= 0.0 && 2.0 * p.margin_px < p.viewport_px) {
            anyhow::bail!(
                "preview.margin_px must be in [0, viewport_px / 2), got {}",
                p.margin_px
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.preview.viewport_px, 200.0);
        assert_eq!(config.preview.margin_px, 10.0);
        assert_eq!(config.preview.default_axis, Axis::Horizontal);
        assert_eq!(config.lookup.provider, LookupProvider::Mock);
        assert_eq!(config.lookup.timeout_secs, 10);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[preview]
default_axis = "vertical"

[lookup]
provider = "http"
business_url = "https://example.test/biz"
"#,
        )
        .unwrap();
        assert_eq!(config.preview.default_axis, Axis::Vertical);
        assert_eq!(config.preview.viewport_px, 200.0);
        assert_eq!(config.lookup.provider, LookupProvider::Http);
        assert_eq!(config.lookup.business_url, "https://example.test/biz");
        assert!(config.lookup.geocode_url.contains("nominatim"));
    }

    #[test]
    fn rejects_margin_that_eats_the_viewport() {
        let err = AppConfig::from_toml_str("[preview]\nviewport_px = 100.0\nmargin_px = 60.0\n");
        assert!(err.is_err());
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(AppConfig::from_toml_str("[lookup]\nprovider = \"carrier-pigeon\"\n").is_err());
    }
}
