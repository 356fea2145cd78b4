use crate::cache::{ObjectCache, object_cache::MokaCacheWrapper};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 会话缓存，TTL 与容量来自 `cache.*`
fn create_cache() -> Arc<dyn ObjectCache> {
    let config = AppConfig::get();
    debug!(
        "Creating session cache (capacity {}, ttl {}s)",
        config.cache.max_capacity, config.cache.default_ttl
    );
    Arc::new(MokaCacheWrapper::default())
}

/// 准备服务器启动的上下文：TLS 提供者、存储（含迁移）与缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // 其他组件可能已安装过，忽略重复安装
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let cache = create_cache();
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
