use anyhow::Result;

use super::{BusinessLookup, Geocoder};
use crate::geo::GeoPoint;

const CATALOGUE: &[&str] = &[
    "Coffee Shop",
    "Bakery",
    "Pharmacy",
    "Hardware Store",
    "Dental Office",
    "Fitness Studio",
    "Bookstore",
    "Laundromat",
    "Taqueria",
    "Pet Supply",
    "Urgent Care",
    "Florist",
];

const SUGGESTIONS: usize = 3;

/// Describes the point instead of asking anyone.
pub struct MockGeocoder;

impl Geocoder for MockGeocoder {
    fn reverse(&self, at: GeoPoint) -> Result<String> {
        Ok(format!("Parcel near {:.5}, {:.5}", at.lat, at.lng))
    }
}

/// Picks a stable handful of businesses from a fixed catalogue.
pub struct MockBusinessLookup;

impl BusinessLookup for MockBusinessLookup {
    fn suggest(&self, address: &str) -> Result<Vec<String>> {
        let address = address.trim();
        if address.is_empty() {
            return Ok(Vec::new());
        }
        let start = (fnv1a(address) as usize) % CATALOGUE.len();
        Ok((0..SUGGESTIONS)
            .map(|i| format!("{} on {}", CATALOGUE[(start + i * 5) % CATALOGUE.len()], address))
            .collect())
    }
}

fn fnv1a(s: &str) -> u32 {
    let mut h: u32 = 2166136261;
    for &b in s.as_bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(16777619);
    }
    h
}
