// 群组模块
// 访问码生成、成员管理、授权判定以及群组本身的增删改查

mod access_code;
mod authority;
mod gate;
mod service;

pub use access_code::{ACCESS_CODE_LEN, AccessCodeGenerator, RandomAccessCode};
pub use authority::GroupAuthority;
pub use gate::{AuthorizationGate, require_owner};
pub use service::GroupService;
