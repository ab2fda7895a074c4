//! Location domain
//!
//! Resolves "City" / "City State" labels against the IBGE localities
//! directory, and geocodes Brazilian postal codes (CEP) through ViaCEP and
//! Nominatim for proximity search.

mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod geocoder;
pub mod handlers;
pub mod label;
pub mod models;
pub mod service;

pub use config::LocationConfig;
pub use directory::{IbgeDirectory, LocationDirectory};
pub use error::{LocationError, LocationResult};
pub use geocoder::{PostalCodeGeocoder, ViaCepGeocoder};
pub use handlers::{ApiDoc, router};
pub use label::parse_label;
pub use models::{City, Coordinates, LabelParts, LocationQuery, LocationRequest, State};
pub use service::LocationService;

