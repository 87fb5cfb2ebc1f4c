use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;

use super::{BusinessLookup, Geocoder};
use crate::config::LookupConfig;
use crate::geo::GeoPoint;

pub fn build_client(config: &LookupConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .context("HTTP client init failed")
}

/// Reverse geocoding against a Nominatim-compatible `/reverse` endpoint.
pub struct HttpGeocoder {
    client: Client,
    url: String,
}

impl HttpGeocoder {
    pub fn new(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

impl Geocoder for HttpGeocoder {
    fn reverse(&self, at: GeoPoint) -> Result<String> {
        let lat = at.lat.to_string();
        let lon = at.lng.to_string();
        let body: Value = self
            .client
            .get(&self.url)
            .query(&[("format", "json"), ("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .with_context(|| format!("reverse geocode request to {} failed", self.url))?
            .error_for_status()
            .context("reverse geocode returned an error status")?
            .json()
            .context("reverse geocode response was not JSON")?;
        parse_reverse(&body)
    }
}

/// Pull the address out of a reverse geocoding response.
pub fn parse_reverse(body: &Value) -> Result<String> {
    if let Some(err) = body.get("error").and_then(Value::as_str) {
        anyhow::bail!("geocoder error: {err}");
    }
    body.get("display_name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .context("reverse geocode response has no display_name")
}

/// Business suggestions from an endpoint taking `?address=`.
pub struct HttpBusinessLookup {
    client: Client,
    url: String,
}

impl HttpBusinessLookup {
    pub fn new(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

impl BusinessLookup for HttpBusinessLookup {
    fn suggest(&self, address: &str) -> Result<Vec<String>> {
        if address.trim().is_empty() {
            return Ok(Vec::new());
        }
        let response = self
            .client
            .get(&self.url)
            .query(&[("address", address)])
            .send()
            .with_context(|| format!("business lookup request to {} failed", self.url))?;
        if !response.status().is_success() {
            tracing::warn!(
                "Business lookup for '{}' returned {}, no suggestions",
                address,
                response.status()
            );
            return Ok(Vec::new());
        }
        let body: Value = response
            .json()
            .context("business lookup response was not JSON")?;
        Ok(parse_businesses(&body))
    }
}

/// Accepts `["a", "b"]`, `{"businesses": [...]}` and lists of `{"name": ...}` objects.
pub fn parse_businesses(body: &Value) -> Vec<String> {
    let list: &[Value] = match body {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("businesses") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };
    list.iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .filter(|s| !s.trim().is_empty())
        .collect()
}
