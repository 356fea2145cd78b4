//! 练习题答案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exercise_id: i64,
    pub student_id: i64,
    pub answer: String,
    pub is_correct: bool,
    pub answered_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exercises::Entity",
        from = "Column::ExerciseId",
        to = "super::exercises::Column::Id"
    )]
    Exercise,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::exercises::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exercise.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_answer(self) -> crate::models::exercises::entities::Answer {
        use crate::models::exercises::entities::Answer;
        use chrono::{DateTime, Utc};

        Answer {
            id: self.id,
            exercise_id: self.exercise_id,
            student_id: self.student_id,
            answer: self.answer,
            is_correct: self.is_correct,
            answered_at: DateTime::<Utc>::from_timestamp(self.answered_at, 0).unwrap_or_default(),
        }
    }
}
