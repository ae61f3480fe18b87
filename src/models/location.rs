use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Owned, RowState};

/// 用户保存的地点，只有创建者可以修改
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub address: String,
    pub title: String,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: RowState,
}

impl Owned for Location {
    fn owner_user_id(&self) -> Uuid {
        self.user_id
    }
}

/// 创建或更新地点时可写的字段
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDraft {
    pub kind: String,
    pub address: String,
    pub title: String,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
}
