// 领域模型
// 与存储无关的核心类型：角色、分页、区域以及各实体

pub mod area;
pub mod group;
pub mod location;
pub mod member;
pub mod pagination;
pub mod role;
pub mod user;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub use area::AreaBounds;
pub use group::{Group, NewGroup};
pub use location::{Location, LocationDraft};
pub use member::GroupMember;
pub use pagination::{Page, Pagination};
pub use role::Role;
pub use user::{NewUser, User};

/// 行的生命周期状态，软删除用墓碑时间戳表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "at", rename_all = "lowercase")]
pub enum RowState {
    Active,
    Deleted(DateTime<Utc>),
}

impl RowState {
    pub fn from_tombstone(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => RowState::Deleted(at),
            None => RowState::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RowState::Active)
    }

    pub fn tombstone(&self) -> Option<DateTime<Utc>> {
        match self {
            RowState::Active => None,
            RowState::Deleted(at) => Some(*at),
        }
    }
}

/// 拥有者可识别的资源，供所有权策略使用
pub trait Owned {
    fn owner_user_id(&self) -> Uuid;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tombstone_maps_to_state() {
        assert_eq!(RowState::from_tombstone(None), RowState::Active);

        let at = Utc::now();
        let state = RowState::from_tombstone(Some(at));
        assert!(!state.is_active());
        assert_eq!(state.tombstone(), Some(at));
    }
}
