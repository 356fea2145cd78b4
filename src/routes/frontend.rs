//! 前端静态资源路由
//!
//! 使用 rust-embed 嵌入前端构建产物：
//! - SPA fallback（未找到的路由返回 index.html）
//! - 自定义前端目录覆盖（开发用）
//! - %APP_NAME% 占位符替换

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode, web};
use rust_embed::Embed;
use std::path::Path;

use crate::config::AppConfig;
use crate::middlewares::create_error_response;
use crate::models::ErrorCode;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

/// 获取文件的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "webp" => "image/webp",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 带 hash 的静态资源可以长期缓存
fn should_cache(path: &str) -> bool {
    path.starts_with("assets/")
        && matches!(
            Path::new(path).extension().and_then(|s| s.to_str()),
            Some("js" | "css" | "woff" | "woff2" | "png" | "jpg" | "jpeg" | "svg" | "webp")
        )
}

fn process_html(content: &[u8], config: &AppConfig) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%APP_NAME%", &config.app.system_name)
        .into_bytes()
}

/// 开发时可用 ./frontend-custom/ 覆盖嵌入的文件
fn try_custom_file(path: &str) -> Option<Vec<u8>> {
    if path.split('/').any(|segment| segment == "..") {
        return None;
    }
    std::fs::read(format!("./frontend-custom/{path}")).ok()
}

fn get_file(path: &str) -> Option<Vec<u8>> {
    try_custom_file(path).or_else(|| FrontendAssets::get(path).map(|f| f.data.to_vec()))
}

fn missing_frontend_page(config: &AppConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fi">
<head>
    <meta charset="utf-8">
    <title>{}</title>
</head>
<body>
    <h1>Käyttöliittymää ei löytynyt</h1>
    <p>Rakenna käyttöliittymä ensin:</p>
    <pre>cd frontend && npm run build</pre>
</body>
</html>"#,
        config.app.system_name
    )
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    // 未匹配的 API 路径不回退到前端
    if path == "api" || path.starts_with("api/") {
        return Ok(create_error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::NotFound,
            "Sivua ei löytynyt.",
        ));
    }

    let config = AppConfig::get();

    let (content, file_path) = match get_file(path).filter(|_| !path.is_empty()) {
        Some(content) => (Some(content), path),
        None => (get_file("index.html"), "index.html"),
    };

    let Some(mut data) = content else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(missing_frontend_page(config)));
    };

    let mime = get_mime_type(file_path);
    if mime.starts_with("text/html") {
        data = process_html(&data, config);
    }

    let mut response = HttpResponse::Ok();
    response.content_type(mime);
    if should_cache(file_path) {
        response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
    } else {
        response.insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"));
    }

    Ok(response.body(data))
}

/// 所有非 API 的 GET 请求都交给前端处理，必须最后注册
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            get_mime_type("assets/app.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_mime_type("favicon.ico"), "image/x-icon");
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_should_cache_only_hashed_assets() {
        assert!(should_cache("assets/app.js"));
        assert!(should_cache("assets/index.css"));
        assert!(!should_cache("index.html"));
        assert!(!should_cache("favicon.ico"));
        assert!(!should_cache("logo.png"));
    }

    #[test]
    fn test_custom_file_rejects_parent_segments() {
        assert!(try_custom_file("../Cargo.toml").is_none());
        assert!(try_custom_file("assets/../../Cargo.toml").is_none());
    }
}
