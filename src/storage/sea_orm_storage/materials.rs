use super::SeaOrmStorage;
use crate::entity::materials::Column;
use crate::entity::prelude::{MaterialActiveModel, Materials};
use crate::errors::{CourseSystemError, Result};
use crate::models::materials::{entities::Material, requests::CreateMaterialRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课程材料
    pub async fn create_material_impl(
        &self,
        course_id: i64,
        req: CreateMaterialRequest,
    ) -> Result<Material> {
        let model = MaterialActiveModel {
            course_id: Set(course_id),
            title: Set(req.title),
            content: Set(req.content),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("创建课程材料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 通过 ID 获取课程材料
    pub async fn get_material_impl(&self, material_id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(material_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询课程材料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 列出课程材料（按创建顺序）
    pub async fn list_course_materials_impl(&self, course_id: i64) -> Result<Vec<Material>> {
        let materials = Materials::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询课程材料列表失败: {e}"))
            })?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }

    /// 删除课程材料
    pub async fn delete_material_impl(&self, material_id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(material_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("删除课程材料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
