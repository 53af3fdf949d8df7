use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 resumes 表
        manager
            .create_table(
                Table::create()
                    .table(Resumes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Resumes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Resumes::UniqueId)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Resumes::Name)
                            .string_len(255)
                            .not_null()
                            .default("Untitled Resume"),
                    )
                    .col(ColumnDef::new(Resumes::ResumeData).json().not_null())
                    .col(ColumnDef::new(Resumes::UserId).string_len(255).null())
                    .col(
                        ColumnDef::new(Resumes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Resumes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 按用户列出简历
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_resumes_user_created")
                    .table(Resumes::Table)
                    .col(Resumes::UserId)
                    .col(Resumes::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_resumes_user_created")
                    .table(Resumes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Resumes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Resumes {
    #[sea_orm(iden = "resumes")]
    Table,
    Id,
    UniqueId,
    Name,
    ResumeData,
    UserId,
    CreatedAt,
    UpdatedAt,
}
