// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 店铺目录表迁移
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stores::Table)
                    .if_not_exists()
                    // Ids come from the upstream directory, never generated here
                    .col(
                        ColumnDef::new(Stores::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stores::Name).string().not_null())
                    .col(ColumnDef::new(Stores::Address).string())
                    .col(ColumnDef::new(Stores::AddressDetail).string())
                    .col(ColumnDef::new(Stores::Phone).string())
                    .col(ColumnDef::new(Stores::OpenTime).string())
                    .col(ColumnDef::new(Stores::Category).string())
                    .col(ColumnDef::new(Stores::BestMenu).string())
                    .col(ColumnDef::new(Stores::Menu).json().not_null())
                    .col(ColumnDef::new(Stores::MenuDetail).json().not_null())
                    .col(ColumnDef::new(Stores::Price).json().not_null())
                    .col(ColumnDef::new(Stores::Url).string())
                    .col(ColumnDef::new(Stores::ImagePath).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stores::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Stores {
    Table,
    Id,
    Name,
    Address,
    AddressDetail,
    Phone,
    OpenTime,
    Category,
    BestMenu,
    Menu,
    MenuDetail,
    Price,
    Url,
    ImagePath,
}
