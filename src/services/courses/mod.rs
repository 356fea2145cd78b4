pub mod create;
pub mod delete;
pub mod enroll;
pub mod list;
pub mod page;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{CourseFormRequest, CourseQueryParams};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 全部课程列表
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    // 用户主页：教师的课程或学生已选的课程
    pub async fn homepage(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::homepage(self, request).await
    }

    // 选课确认信息
    pub async fn enroll_form(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_form(self, request, course_id).await
    }

    // 学生选课
    pub async fn enroll(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        enroll::enroll(self, request, course_id).await
    }

    // 课程主页
    pub async fn course_page(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        page::course_page(self, request, course_id).await
    }

    // 新增课程前的资料检查
    pub async fn add_course_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        create::add_course_form(self, request).await
    }

    pub async fn add_course(
        &self,
        request: &HttpRequest,
        form: CourseFormRequest,
    ) -> ActixResult<HttpResponse> {
        create::add_course(self, request, form).await
    }

    // 课程修改表单
    pub async fn update_course_form(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        update::update_course_form(self, request, course_id).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        form: CourseFormRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, form).await
    }

    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }
}
