//! Migration: purchase orders and followups.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_organization_tables::Users;
use super::m20240101_000002_create_catalog_tables::Suppliers;
use super::m20240101_000003_create_quote_tables::Quotes;
use super::m20240101_000004_create_offer_tables::Offers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PurchaseOrders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PurchaseOrders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(PurchaseOrders::Number).string_len(64).not_null().unique_key())
                    .col(ColumnDef::new(PurchaseOrders::SupplierId).uuid().not_null())
                    .col(ColumnDef::new(PurchaseOrders::QuoteId).uuid().null())
                    .col(ColumnDef::new(PurchaseOrders::OfferId).uuid().null())
                    .col(
                        ColumnDef::new(PurchaseOrders::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(PurchaseOrders::Currency).char_len(3).not_null())
                    .col(ColumnDef::new(PurchaseOrders::TotalAmount).decimal_len(18, 4).not_null())
                    .col(ColumnDef::new(PurchaseOrders::ExpectedDelivery).date().null())
                    .col(ColumnDef::new(PurchaseOrders::Notes).text().null())
                    .col(ColumnDef::new(PurchaseOrders::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(PurchaseOrders::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_orders_supplier_id")
                            .from(PurchaseOrders::Table, PurchaseOrders::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_orders_quote_id")
                            .from(PurchaseOrders::Table, PurchaseOrders::QuoteId)
                            .to(Quotes::Table, Quotes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_orders_offer_id")
                            .from(PurchaseOrders::Table, PurchaseOrders::OfferId)
                            .to(Offers::Table, Offers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Followups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Followups::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Followups::PurchaseOrderId).uuid().not_null())
                    .col(ColumnDef::new(Followups::AuthorId).uuid().null())
                    .col(ColumnDef::new(Followups::Note).text().not_null())
                    .col(ColumnDef::new(Followups::DueDate).date().null())
                    .col(
                        ColumnDef::new(Followups::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Followups::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Followups::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_followups_purchase_order_id")
                            .from(Followups::Table, Followups::PurchaseOrderId)
                            .to(PurchaseOrders::Table, PurchaseOrders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_followups_author_id")
                            .from(Followups::Table, Followups::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_followups_purchase_order_id")
                    .table(Followups::Table)
                    .col(Followups::PurchaseOrderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Followups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PurchaseOrders {
    Table,
    Id,
    Number,
    SupplierId,
    QuoteId,
    OfferId,
    Status,
    Currency,
    TotalAmount,
    ExpectedDelivery,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Followups {
    Table,
    Id,
    PurchaseOrderId,
    AuthorId,
    Note,
    DueDate,
    Completed,
    CreatedAt,
    UpdatedAt,
}
