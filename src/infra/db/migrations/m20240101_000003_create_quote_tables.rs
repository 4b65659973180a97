//! Migration: quotes and their requested items.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_organization_tables::{Departments, Users};
use super::m20240101_000002_create_catalog_tables::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quotes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Quotes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Quotes::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Quotes::RequesterId).uuid().not_null())
                    .col(ColumnDef::new(Quotes::DepartmentId).uuid().null())
                    .col(
                        ColumnDef::new(Quotes::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(Quotes::DueDate).date().null())
                    .col(ColumnDef::new(Quotes::Notes).text().null())
                    .col(ColumnDef::new(Quotes::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Quotes::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quotes_requester_id")
                            .from(Quotes::Table, Quotes::RequesterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quotes_department_id")
                            .from(Quotes::Table, Quotes::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuoteItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(QuoteItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(QuoteItems::QuoteId).uuid().not_null())
                    .col(ColumnDef::new(QuoteItems::ProductId).uuid().not_null())
                    .col(ColumnDef::new(QuoteItems::Quantity).decimal_len(18, 4).not_null())
                    .col(ColumnDef::new(QuoteItems::Notes).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quote_items_quote_id")
                            .from(QuoteItems::Table, QuoteItems::QuoteId)
                            .to(Quotes::Table, Quotes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quote_items_product_id")
                            .from(QuoteItems::Table, QuoteItems::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quote_items_quote_id")
                    .table(QuoteItems::Table)
                    .col(QuoteItems::QuoteId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuoteItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quotes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Quotes {
    Table,
    Id,
    Title,
    RequesterId,
    DepartmentId,
    Status,
    DueDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum QuoteItems {
    Table,
    Id,
    QuoteId,
    ProductId,
    Quantity,
    Notes,
}
