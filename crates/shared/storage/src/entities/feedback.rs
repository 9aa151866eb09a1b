//! Feedback database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Feedback;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub course_id: String,
    pub rating: f64,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub submitted_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Feedback {
    fn from(model: Model) -> Self {
        Feedback {
            username: model.username,
            course_id: model.course_id,
            rating: model.rating,
            comment: model.comment,
            submitted_at: model.submitted_at,
        }
    }
}
