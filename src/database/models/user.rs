// 用户实体

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{RowState, User};

/// 用户实体，对应数据库中的 users 表
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    /// 昵称
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// 当前位置纬度，未上报时为空
    pub lat: Option<f64>,
    /// 当前位置经度，未上报时为空
    pub lon: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<UserEntity> for User {
    fn from(row: UserEntity) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            lat: row.lat,
            lon: row.lon,
            created_at: row.created_at,
            updated_at: row.updated_at,
            state: RowState::from_tombstone(row.deleted_at),
        }
    }
}
