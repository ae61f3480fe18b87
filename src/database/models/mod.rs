// 数据库实体定义
// 与表结构一一对应，通过 TryFrom 转换为领域模型

pub mod group;
pub mod location;
pub mod member;
pub mod user;

pub use group::GroupEntity;
pub use location::LocationEntity;
pub use member::GroupMemberEntity;
pub use user::UserEntity;
