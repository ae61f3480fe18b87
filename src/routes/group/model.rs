use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, models::Group};

#[derive(Debug, Deserialize)]
pub struct GroupRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl GroupRequest {
    pub fn title(&self) -> Result<&str, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }
        Ok(title)
    }
}

/// 群组信息，访问码只返回给群主
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub owner_user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroupResponse {
    pub fn for_owner(group: Group) -> Self {
        let access_code = Some(group.access_code.clone());
        Self {
            access_code,
            ..Self::from(group)
        }
    }
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            title: group.title,
            description: group.description,
            owner_user_id: group.owner_user_id,
            access_code: None,
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccessCodeResponse {
    pub access_code: String,
}
