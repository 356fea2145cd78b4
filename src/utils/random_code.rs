use rand::{Rng, distr::Alphanumeric};

/// 生成指定长度的随机字母数字串
pub fn generate_random_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// 生成 CSRF 令牌
pub fn generate_csrf_token() -> String {
    generate_random_code(32)
}
