use crate::config::AppConfig;
use crate::utils::random_code::generate_csrf_token;
use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const BEARER_PREFIX: &str = "Bearer ";

// 会话 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,  // 用户 ID
    pub role: String, // 用户角色
    pub ver: i32,     // 签发时的令牌版本，注销后旧令牌失效
    pub csrf: String, // 与本会话绑定的 CSRF 令牌
    pub exp: usize,   // 过期时间 (时间戳)
    pub iat: usize,   // 签发时间
}

impl SessionClaims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

// 新签发的会话
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub csrf_token: String,
    pub expires_in: i64, // 秒
}

// 令牌来源决定是否需要 CSRF 校验
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Bearer,
    Cookie,
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// 会话有效期；“记住我”使用更长的期限
    pub fn session_duration(remember_me: bool) -> chrono::Duration {
        let config = AppConfig::get();
        if remember_me {
            chrono::Duration::days(config.jwt.remember_me_expiry)
        } else {
            chrono::Duration::minutes(config.jwt.session_expiry)
        }
    }

    /// 签发会话令牌
    pub fn generate_session_token(
        user_id: i64,
        role: &str,
        token_version: i32,
        expiry_duration: chrono::Duration,
    ) -> Result<IssuedSession, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;
        let csrf_token = generate_csrf_token();

        let claims = SessionClaims {
            sub: user_id.to_string(),
            role: role.to_string(),
            ver: token_version,
            csrf: csrf_token.clone(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        let token = encode(&Header::default(), &claims, &encoding_key)?;

        Ok(IssuedSession {
            token,
            csrf_token,
            expires_in: expiry_duration.num_seconds(),
        })
    }

    /// 验证会话令牌
    pub fn verify_session_token(token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<SessionClaims>(token, &decoding_key, &validation).map(|data| data.claims)
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(token: &str, max_age: chrono::Duration) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.jwt.cookie_name.clone(), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                max_age.num_seconds(),
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.jwt.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取会话令牌，Authorization 头优先于 Cookie
    pub fn extract_session_token(req: &HttpRequest) -> Option<(String, TokenSource)> {
        let bearer = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .filter(|s| !s.is_empty());

        if let Some(token) = bearer {
            return Some((token.to_string(), TokenSource::Bearer));
        }

        req.cookie(&AppConfig::get().jwt.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .map(|value| (value, TokenSource::Cookie))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_session_token_round_trip() {
        let issued =
            JwtUtils::generate_session_token(42, "student", 3, chrono::Duration::minutes(5))
                .unwrap();
        assert_eq!(issued.expires_in, 300);

        let claims = JwtUtils::verify_session_token(&issued.token).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "student");
        assert_eq!(claims.ver, 3);
        assert_eq!(claims.csrf, issued.csrf_token);
    }

    #[test]
    fn test_expired_or_tampered_token_is_rejected() {
        let expired =
            JwtUtils::generate_session_token(1, "teacher", 0, chrono::Duration::minutes(-10))
                .unwrap();
        assert!(JwtUtils::verify_session_token(&expired.token).is_err());

        let valid =
            JwtUtils::generate_session_token(1, "teacher", 0, chrono::Duration::minutes(5))
                .unwrap();
        let tampered = format!("{}x", valid.token);
        assert!(JwtUtils::verify_session_token(&tampered).is_err());
    }

    #[test]
    fn test_extract_prefers_bearer_over_cookie() {
        let cookie_name = AppConfig::get().jwt.cookie_name.clone();

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer header-token"))
            .cookie(Cookie::new(cookie_name.clone(), "cookie-token"))
            .to_http_request();
        assert_eq!(
            JwtUtils::extract_session_token(&req),
            Some(("header-token".to_string(), TokenSource::Bearer))
        );

        let req = TestRequest::default()
            .cookie(Cookie::new(cookie_name, "cookie-token"))
            .to_http_request();
        assert_eq!(
            JwtUtils::extract_session_token(&req),
            Some(("cookie-token".to_string(), TokenSource::Cookie))
        );

        let req = TestRequest::default().to_http_request();
        assert_eq!(JwtUtils::extract_session_token(&req), None);
    }

    #[test]
    fn test_empty_cookie_expires_immediately() {
        let cookie = JwtUtils::create_empty_session_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(
            cookie.max_age(),
            Some(actix_web::cookie::time::Duration::seconds(0))
        );
        assert_eq!(cookie.http_only(), Some(true));
    }
}
