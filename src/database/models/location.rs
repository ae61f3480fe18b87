// 地点实体

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{Location, RowState};

/// 地点实体，对应数据库中的 locations 表
#[derive(Debug, Clone, FromRow)]
pub struct LocationEntity {
    pub id: Uuid,
    /// 创建者ID
    pub user_id: Uuid,
    /// 地点类型
    #[sqlx(rename = "type")]
    pub kind: String,
    pub address: String,
    pub title: String,
    pub description: String,
    /// 纬度
    pub lat: f64,
    /// 经度
    pub lon: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<LocationEntity> for Location {
    fn from(row: LocationEntity) -> Self {
        Location {
            id: row.id,
            user_id: row.user_id,
            kind: row.kind,
            address: row.address,
            title: row.title,
            description: row.description,
            lat: row.lat,
            lon: row.lon,
            created_at: row.created_at,
            updated_at: row.updated_at,
            state: RowState::from_tombstone(row.deleted_at),
        }
    }
}
