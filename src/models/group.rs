use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Owned, RowState};

/// 群组
///
/// 群主由 `owner_user_id` 隐式表示，从不持有成员记录。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub owner_user_id: Uuid,
    /// 创建时生成，之后不可变
    pub access_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: RowState,
}

impl Owned for Group {
    fn owner_user_id(&self) -> Uuid {
        self.owner_user_id
    }
}

/// 待插入的群组
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub title: String,
    pub description: String,
    pub owner_user_id: Uuid,
    pub access_code: String,
}
