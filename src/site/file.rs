use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::Site;
use crate::geo::GeoPoint;
use crate::layout::Axis;

/// On-disk description of a site: parcels drawn elsewhere, with tenants.
///
/// ```toml
/// [[parcel]]
/// name = "Corner Lot"
/// axis = "vertical"
/// ring = [[36.7370, -119.7880], [36.7370, -119.7860], [36.7380, -119.7860]]
///
/// [[parcel.tenant]]
/// name = "Cafe"
/// size = "1200"
/// ```
#[derive(Debug, Deserialize, Default)]
pub struct SiteFile {
    #[serde(default, rename = "parcel")]
    pub parcels: Vec<ParcelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ParcelEntry {
    #[serde(default)]
    pub name: String,
    pub address: Option<String>,
    pub axis: Option<Axis>,
    /// Vertices as `[lat, lng]`.
    pub ring: Vec<[f64; 2]>,
    #[serde(default, rename = "tenant")]
    pub tenants: Vec<TenantEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TenantEntry {
    pub name: String,
    /// Free text, parsed leniently. Numbers in the file are accepted too.
    #[serde(default, deserialize_with = "size_text")]
    pub size: String,
}

fn size_text<'de, D>(de: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }
    Ok(match Raw::deserialize(de)? {
        Raw::Text(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

impl SiteFile {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse site TOML")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read site file: {:?}", path))?;
        Self::from_toml_str(&content).with_context(|| format!("In site file {:?}", path))
    }

    /// Build a live site, assigning fresh ids in file order.
    pub fn into_site(self, default_axis: Axis) -> Site {
        let mut site = Site::new();
        for entry in self.parcels {
            let ring: Vec<GeoPoint> = entry.ring.into_iter().map(GeoPoint::from).collect();
            let Some(id) = site.add_parcel(&entry.name, ring) else {
                tracing::warn!("Parcel ids exhausted; skipping '{}' and the rest", entry.name);
                break;
            };
            if let Some(parcel) = site.parcel_mut(id) {
                parcel.address = entry.address.filter(|a| !a.trim().is_empty());
                parcel.axis = entry.axis.unwrap_or(default_axis);
            }
            for tenant in entry.tenants {
                site.add_tenant(id, &tenant.name, &tenant.size);
            }
        }
        tracing::info!("Loaded site with {} parcels", site.len());
        site
    }
}

impl Site {
    pub fn from_file(path: &Path, default_axis: Axis) -> Result<Site> {
        Ok(SiteFile::load_from_file(path)?.into_site(default_axis))
    }

    pub fn from_toml_str(content: &str, default_axis: Axis) -> Result<Site> {
        Ok(SiteFile::from_toml_str(content)?.into_site(default_axis))
    }
}
