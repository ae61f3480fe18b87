use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Location, LocationDraft};

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub address: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<LocationRequest> for LocationDraft {
    fn from(req: LocationRequest) -> Self {
        Self {
            kind: req.kind,
            address: req.address,
            title: req.title,
            description: req.description,
            lat: req.lat,
            lon: req.lon,
        }
    }
}

/// 区域查询的群组范围，省略时不按群组过滤
#[derive(Debug, Deserialize)]
pub struct AreaScopeQuery {
    pub group_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    pub title: String,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            user_id: location.user_id,
            kind: location.kind,
            address: location.address,
            title: location.title,
            description: location.description,
            lat: location.lat,
            lon: location.lon,
            created_at: location.created_at,
            updated_at: location.updated_at,
        }
    }
}
