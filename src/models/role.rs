use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 群组成员角色，权限从低到高：casual < moderator < admin
///
/// 群主不持有成员记录，因此不在此枚举中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 加入群组时的默认角色
    #[default]
    Casual,
    Moderator,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} is not an access level")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Casual, Role::Moderator, Role::Admin];

    /// 权限等级表
    pub fn rank(self) -> u8 {
        match self {
            Role::Casual => 0,
            Role::Moderator => 1,
            Role::Admin => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Casual => "casual",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    pub fn is_valid(value: &str) -> bool {
        value.parse::<Role>().is_ok()
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}
