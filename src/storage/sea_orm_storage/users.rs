use super::SeaOrmStorage;
use crate::entity::prelude::{UserActiveModel, Users};
use crate::entity::users::Column;
use crate::errors::{CourseSystemError, Result};
use crate::models::users::{
    entities::{User, UserProfile},
    requests::CreateUserRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = UserActiveModel {
            username: Set(req.username),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            first_name: Set(None),
            last_name: Set(None),
            student_number: Set(None),
            token_version: Set(0),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 保存用户资料
    pub async fn save_user_info_impl(
        &self,
        id: i64,
        profile: UserProfile,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = UserActiveModel {
            id: Set(id),
            first_name: Set(profile.first_name),
            last_name: Set(profile.last_name),
            student_number: Set(profile.student_number),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("保存用户资料失败: {e}")))?;

        Ok(Some(result.into_user()))
    }

    /// 令牌版本加一，使该用户已签发的会话全部失效
    pub async fn bump_token_version_impl(&self, id: i64) -> Result<bool> {
        let Some(user) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询用户失败: {e}")))?
        else {
            return Ok(false);
        };

        let model = UserActiveModel {
            id: Set(id),
            token_version: Set(user.token_version.wrapping_add(1)),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("更新令牌版本失败: {e}")))?;

        Ok(true)
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 删除用户（级联删除其课程、选课记录与答案）
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{memory_storage, student, teacher};
    use crate::models::users::entities::{UserProfile, UserRole};

    #[actix_web::test]
    async fn test_create_and_find_user() {
        let storage = memory_storage().await;
        let user = teacher(&storage, "opettaja").await;

        assert_eq!(user.role, UserRole::Teacher);
        assert_eq!(user.token_version, 0);
        assert!(!user.has_userinfo());

        let by_id = storage.get_user_by_id_impl(user.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.username), Some("opettaja".to_string()));

        let by_name = storage.get_user_by_username_impl("opettaja").await.unwrap();
        assert_eq!(by_name.map(|u| u.id), Some(user.id));

        assert!(
            storage
                .get_user_by_username_impl("tuntematon")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn test_duplicate_username_is_rejected() {
        let storage = memory_storage().await;
        student(&storage, "oppilas").await;

        let result = storage
            .create_user_impl(crate::models::users::requests::CreateUserRequest {
                username: "oppilas".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Student,
            })
            .await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn test_save_user_info() {
        let storage = memory_storage().await;
        let user = student(&storage, "oppilas").await;

        let saved = storage
            .save_user_info_impl(
                user.id,
                UserProfile {
                    first_name: Some("Maija".to_string()),
                    last_name: Some("Meikäläinen".to_string()),
                    student_number: Some("123456".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(saved.has_userinfo());
        assert_eq!(saved.full_name(), "Maija Meikäläinen");

        let missing = storage
            .save_user_info_impl(9999, UserProfile::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[actix_web::test]
    async fn test_bump_token_version_and_delete() {
        let storage = memory_storage().await;
        let user = student(&storage, "oppilas").await;

        assert!(storage.bump_token_version_impl(user.id).await.unwrap());
        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.token_version, 1);

        assert!(storage.update_last_login_impl(user.id).await.unwrap());
        assert!(storage.delete_user_impl(user.id).await.unwrap());
        assert!(!storage.delete_user_impl(user.id).await.unwrap());
        assert!(!storage.bump_token_version_impl(user.id).await.unwrap());
    }
}
