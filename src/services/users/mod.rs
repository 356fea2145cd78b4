pub mod userinfo;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::SaveUserInfoRequest;
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取当前用户资料
    pub async fn get_userinfo(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        userinfo::get_userinfo(self, request).await
    }

    // 保存当前用户资料
    pub async fn save_userinfo(
        &self,
        request: &HttpRequest,
        userinfo: SaveUserInfoRequest,
    ) -> ActixResult<HttpResponse> {
        userinfo::save_userinfo(self, request, userinfo).await
    }
}
