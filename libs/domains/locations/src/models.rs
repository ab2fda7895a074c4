use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Brazilian state as listed by the IBGE localities API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct State {
    pub id: i64,
    #[serde(default)]
    pub sigla: String,
    pub nome: String,
}

/// Municipality record returned to the client as IBGE sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct City {
    pub id: i64,
    pub nome: String,

    /// Region hierarchy and anything else IBGE attaches
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl City {
    pub fn new(id: i64, nome: impl Into<String>) -> Self {
        Self {
            id,
            nome: nome.into(),
            extra: HashMap::new(),
        }
    }
}

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// `?label=` on `POST /location`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocationQuery {
    /// "City" or "City State", separated by a comma or whitespace
    pub label: Option<String>,
}

/// JSON body accepted by `POST /location` when the query has no label
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct LocationRequest {
    #[validate(length(min = 1, max = 200))]
    pub label: Option<String>,
}

/// Label split into the city fragment and an optional state fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelParts {
    pub city: String,
    pub state: Option<String>,
}
