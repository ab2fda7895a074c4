//! Postal code (CEP) to coordinates

use crate::client::get_json;
use crate::config::LocationConfig;
use crate::error::{LocationError, LocationResult};
use crate::models::Coordinates;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

#[async_trait]
pub trait PostalCodeGeocoder: Send + Sync {
    async fn coordinates_for(&self, postal_code: &str) -> LocationResult<Coordinates>;
}

/// ViaCEP address lookup
#[derive(Debug, Deserialize)]
struct ViaCepAddress {
    localidade: Option<String>,
    uf: Option<String>,
}

/// Nominatim search hit; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Resolves a CEP to its city with ViaCEP, then the city to coordinates with Nominatim.
#[derive(Clone)]
pub struct ViaCepGeocoder {
    client: reqwest::Client,
    viacep_base_url: String,
    nominatim_base_url: String,
}

impl ViaCepGeocoder {
    pub fn new(
        client: reqwest::Client,
        viacep_base_url: impl Into<String>,
        nominatim_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            viacep_base_url: viacep_base_url.into().trim_end_matches('/').to_string(),
            nominatim_base_url: nominatim_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &LocationConfig) -> LocationResult<Self> {
        Ok(Self::new(
            config.http_client()?,
            config.viacep_base_url.clone(),
            config.nominatim_base_url.clone(),
        ))
    }

    async fn city_for(&self, digits: &str) -> LocationResult<(String, String)> {
        let url = format!("{}/{}/json/", self.viacep_base_url, digits);
        let address: ViaCepAddress = get_json(&self.client, &url).await?;

        match (address.localidade, address.uf) {
            (Some(city), Some(uf)) if !city.is_empty() && !uf.is_empty() => Ok((city, uf)),
            _ => Err(LocationError::PostalCodeNotFound(digits.to_string())),
        }
    }

    async fn place_for(&self, city: &str, uf: &str) -> LocationResult<Coordinates> {
        let query = format!("{},{}", city, uf);
        let url = reqwest::Url::parse_with_params(
            &format!("{}/search", self.nominatim_base_url),
            &[("q", query.as_str()), ("format", "json"), ("limit", "1")],
        )
        .map_err(|e| LocationError::Lookup(format!("Invalid geocoder URL: {}", e)))?;

        let places: Vec<NominatimPlace> = get_json(&self.client, url.as_str()).await?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| LocationError::CoordinatesNotFound(query.clone()))?;

        let lat = place.lat.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        let lon = place.lon.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => Err(LocationError::CoordinatesNotFound(query)),
        }
    }
}

#[async_trait]
impl PostalCodeGeocoder for ViaCepGeocoder {
    #[instrument(skip(self))]
    async fn coordinates_for(&self, postal_code: &str) -> LocationResult<Coordinates> {
        let digits: String = postal_code.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(LocationError::Validation(format!(
                "Postal code {} has no digits",
                postal_code
            )));
        }

        let (city, uf) = self.city_for(&digits).await?;
        let coordinates = self.place_for(&city, &uf).await?;
        debug!(%city, %uf, lat = coordinates.lat, lon = coordinates.lon, "Postal code geocoded");
        Ok(coordinates)
    }
}
