//! Enrollment database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Enrollment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    /// Insertion order
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub course_id: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Enrollment {
    fn from(model: Model) -> Self {
        Enrollment::new(model.username, model.course_id)
    }
}
