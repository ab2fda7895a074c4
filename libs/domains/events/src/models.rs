//! Event domain models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// Catalogued event as stored in the events document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Unique identifier
    pub id: i64,

    /// Display name
    #[serde(rename = "nome", alias = "name", default)]
    pub name: String,

    /// Free-text description
    #[serde(rename = "descricao", alias = "description", default)]
    pub description: String,

    /// Attendance mode, e.g. "presencial" or "online"
    #[serde(rename = "tipo", alias = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    /// Calendar date, conventionally `YYYY-MM-DD`
    #[serde(rename = "dia", alias = "date", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Time of day, conventionally `HH:MM`
    #[serde(rename = "hora", alias = "time", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,

    /// Editorially flagged as recent; ranked first by `relevance`
    #[serde(rename = "recente", alias = "recent", skip_serializing_if = "Option::is_none")]
    pub recent: Option<bool>,

    /// Fields the catalogue carries that the engine does not interpret
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Event {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            event_type: None,
            date: None,
            time: None,
            lat: None,
            lon: None,
            recent: None,
            extra: HashMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn on(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self.time = Some(time.into());
        self
    }

    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }

    pub fn flagged_recent(mut self, recent: bool) -> Self {
        self.recent = Some(recent);
        self
    }
}

/// Label attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: i64,

    #[serde(rename = "eventId")]
    pub event_id: i64,

    #[serde(rename = "nome", alias = "name")]
    pub name: String,
}

impl Tag {
    pub fn new(id: i64, event_id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            event_id,
            name: name.into(),
        }
    }
}

/// Event detail with every tag that references it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventWithTags {
    #[serde(flatten)]
    pub event: Event,
    pub tags: Vec<Tag>,
}

/// Ordering applied after filtering
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortStrategy {
    /// Ascending distance from the query point
    Distance,
    /// Events flagged recent first
    Relevance,
    /// Newest date first
    Recent,
}

/// Validated query against the catalogue. Absent fields do not constrain.
///
/// `sort_by` stays raw so an unknown strategy is reported by the engine
/// rather than silently dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub event_type: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub search: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub max_distance: Option<f64>,
    pub sort_by: Option<String>,
}

impl FilterCriteria {
    /// Query point, when both coordinates are known
    pub fn origin(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

/// Query string of `GET /events`.
///
/// Every value arrives as text. Empty values are ignored and numeric values
/// that do not parse are treated as absent.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventQuery {
    /// Exact event type
    pub tipo: Option<String>,

    /// Exact date
    pub dia: Option<String>,

    /// Exact time
    pub hora: Option<String>,

    /// Case-insensitive text matched against name, description and tags
    pub search: Option<String>,

    /// Query point latitude
    pub lat: Option<String>,

    /// Query point longitude
    pub lon: Option<String>,

    /// Maximum distance in kilometres from the query point
    #[serde(rename = "maxDistance")]
    pub max_distance: Option<String>,

    /// Postal code used as the query point when `lat`/`lon` are missing
    pub cep: Option<String>,

    /// `distance`, `relevance` or `recent`
    pub classificacao: Option<String>,
}

impl EventQuery {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            event_type: non_empty(&self.tipo),
            date: non_empty(&self.dia),
            time: non_empty(&self.hora),
            search: non_empty(&self.search),
            lat: number(&self.lat),
            lon: number(&self.lon),
            max_distance: number(&self.max_distance),
            sort_by: non_empty(&self.classificacao),
        }
    }

    pub fn postal_code(&self) -> Option<String> {
        non_empty(&self.cep)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn number(value: &Option<String>) -> Option<f64> {
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
