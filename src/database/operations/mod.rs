// 数据库操作实现
// 每个 Operation 实现对应的存储 trait

pub mod group;
pub mod location;
pub mod member;
pub mod user;

pub use group::GroupOperation;
pub use location::LocationOperation;
pub use member::MemberOperation;
pub use user::UserOperation;

/// 分页参数转换为 LIMIT / OFFSET 绑定值
pub(crate) fn limit_offset(pagination: &crate::models::Pagination) -> (i64, i64) {
    (pagination.limit() as i64, pagination.offset() as i64)
}
