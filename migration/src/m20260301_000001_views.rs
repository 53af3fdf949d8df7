//! 浏览日志表迁移
//!
//! 创建 views 表，每次简历页面访问写入一行：
//! - resume_id / unique_id
//! - 访客 IP 与 User-Agent 解析结果
//! - 去重标记 is_unique_view
//! - 时间戳

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Views::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Views::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Views::ResumeId).string_len(255).not_null())
                    .col(ColumnDef::new(Views::UniqueId).string_len(255).not_null())
                    .col(ColumnDef::new(Views::IpAddress).string_len(255).not_null())
                    .col(ColumnDef::new(Views::UserAgent).text().not_null())
                    .col(
                        ColumnDef::new(Views::BrowserName)
                            .string_len(64)
                            .not_null()
                            .default("Unknown"),
                    )
                    .col(
                        ColumnDef::new(Views::BrowserVersion)
                            .string_len(32)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Views::DeviceType)
                            .string_len(16)
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(Views::OperatingSystem)
                            .string_len(64)
                            .not_null()
                            .default("Unknown"),
                    )
                    .col(ColumnDef::new(Views::ReferrerUrl).text().null())
                    .col(
                        ColumnDef::new(Views::ViewDuration)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Views::IsUniqueView)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Views::SessionId).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Views::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 单列索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_views_resume_id")
                    .table(Views::Table)
                    .col(Views::ResumeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_views_unique_id")
                    .table(Views::Table)
                    .col(Views::UniqueId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_views_timestamp")
                    .table(Views::Table)
                    .col(Views::Timestamp)
                    .to_owned(),
            )
            .await?;

        // 复合索引（时间序列 + 去重查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_views_resume_time")
                    .table(Views::Table)
                    .col(Views::ResumeId)
                    .col(Views::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_views_unique_time")
                    .table(Views::Table)
                    .col(Views::UniqueId)
                    .col(Views::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_views_unique_time",
            "idx_views_resume_time",
            "idx_views_timestamp",
            "idx_views_unique_id",
            "idx_views_resume_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Views::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Views::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Views {
    #[sea_orm(iden = "views")]
    Table,
    Id,
    ResumeId,
    UniqueId,
    IpAddress,
    UserAgent,
    BrowserName,
    BrowserVersion,
    DeviceType,
    OperatingSystem,
    ReferrerUrl,
    ViewDuration,
    IsUniqueView,
    SessionId,
    Timestamp,
}
