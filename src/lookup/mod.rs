pub mod http;
pub mod mock;

use anyhow::Result;

use crate::config::{LookupConfig, LookupProvider};
use crate::geo::GeoPoint;

/// Turns a point into a postal address.
pub trait Geocoder {
    fn reverse(&self, at: GeoPoint) -> Result<String>;
}

/// Suggests businesses that would suit an address.
pub trait BusinessLookup {
    fn suggest(&self, address: &str) -> Result<Vec<String>>;
}

/// The pair of collaborators chosen by configuration.
pub struct Lookups {
    pub geocoder: Box<dyn Geocoder>,
    pub businesses: Box<dyn BusinessLookup>,
}

impl Lookups {
    pub fn mock() -> Self {
        Self {
            geocoder: Box::new(mock::MockGeocoder),
            businesses: Box::new(mock::MockBusinessLookup),
        }
    }
}

/// Build the lookups named by `config.provider`.
pub fn from_config(config: &LookupConfig) -> Result<Lookups> {
    match config.provider {
        LookupProvider::Mock => {
            tracing::info!("Using mock geocoder and business lookup");
            Ok(Lookups::mock())
        }
        LookupProvider::Http => {
            tracing::info!(
                "Using HTTP lookups (geocode: {}, businesses: {})",
                config.geocode_url,
                config.business_url
            );
            let client = http::build_client(config)?;
            Ok(Lookups {
                geocoder: Box::new(http::HttpGeocoder::new(client.clone(), &config.geocode_url)),
                businesses: Box::new(http::HttpBusinessLookup::new(client, &config.business_url)),
            })
        }
    }
}
