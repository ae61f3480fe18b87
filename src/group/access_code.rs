use rand::{Rng, distr::Alphanumeric};

/// 访问码长度
pub const ACCESS_CODE_LEN: usize = 6;

/// 生成群组访问码
///
/// 生成器本身不保证唯一，唯一性由调用方结合存储层的唯一索引保证。
pub trait AccessCodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 从 [A-Za-z0-9] 中均匀抽取字符，每次调用使用新的随机源
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAccessCode;

impl AccessCodeGenerator for RandomAccessCode {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(ACCESS_CODE_LEN)
            .map(char::from)
            .collect()
    }
}
