//! Migration: Create feedback table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::Username).string().not_null())
                    .col(ColumnDef::new(Feedback::CourseId).string().not_null())
                    .col(ColumnDef::new(Feedback::Rating).double().not_null())
                    .col(ColumnDef::new(Feedback::Comment).text().not_null())
                    .col(
                        ColumnDef::new(Feedback::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_course_id")
                    .table(Feedback::Table)
                    .col(Feedback::CourseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Feedback {
    Table,
    Id,
    Username,
    CourseId,
    Rating,
    Comment,
    SubmittedAt,
}
