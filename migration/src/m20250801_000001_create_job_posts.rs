// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 招聘公告表迁移
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobPosts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JobPosts::Category).string().not_null())
                    .col(ColumnDef::new(JobPosts::Title).string().not_null())
                    .col(ColumnDef::new(JobPosts::CompanyName).string().not_null())
                    .col(ColumnDef::new(JobPosts::CompanyType).string().not_null())
                    .col(ColumnDef::new(JobPosts::Description).string().not_null())
                    .col(ColumnDef::new(JobPosts::CareerLevel).string().not_null())
                    .col(ColumnDef::new(JobPosts::Education).string().not_null())
                    .col(ColumnDef::new(JobPosts::Deadline).string().not_null())
                    .col(ColumnDef::new(JobPosts::Link).string().not_null())
                    .col(
                        ColumnDef::new(JobPosts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(JobPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Dedup key: one row per (company, title)
        manager
            .create_index(
                Index::create()
                    .name("uq_job_posts_company_title")
                    .table(JobPosts::Table)
                    .col(JobPosts::CompanyName)
                    .col(JobPosts::Title)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobPosts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum JobPosts {
    Table,
    Id,
    Category,
    Title,
    CompanyName,
    CompanyType,
    Description,
    CareerLevel,
    Education,
    Deadline,
    Link,
    IsActive,
    CreatedAt,
}
