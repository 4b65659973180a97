//! Migration: supplier offers and their lines.
//!
//! The unique index on `offer_lines (offer_id, pr_item_id)` is what the
//! skip-duplicates bulk insert targets with `ON CONFLICT DO NOTHING`.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_catalog_tables::Suppliers;
use super::m20240101_000003_create_quote_tables::{QuoteItems, Quotes};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Offers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Offers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Offers::QuoteId).uuid().not_null())
                    .col(ColumnDef::new(Offers::SupplierId).uuid().not_null())
                    .col(ColumnDef::new(Offers::Currency).char_len(3).not_null())
                    .col(ColumnDef::new(Offers::ValidUntil).date().null())
                    .col(ColumnDef::new(Offers::Notes).text().null())
                    .col(ColumnDef::new(Offers::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Offers::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offers_quote_id")
                            .from(Offers::Table, Offers::QuoteId)
                            .to(Quotes::Table, Quotes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offers_supplier_id")
                            .from(Offers::Table, Offers::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_offers_quote_supplier")
                    .table(Offers::Table)
                    .col(Offers::QuoteId)
                    .col(Offers::SupplierId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OfferLines::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OfferLines::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(OfferLines::OfferId).uuid().not_null())
                    .col(ColumnDef::new(OfferLines::PrItemId).uuid().not_null())
                    .col(ColumnDef::new(OfferLines::UnitPrice).decimal_len(18, 4).not_null())
                    .col(ColumnDef::new(OfferLines::DeliveryDays).integer().null())
                    .col(ColumnDef::new(OfferLines::Notes).text().null())
                    .col(ColumnDef::new(OfferLines::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(OfferLines::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offer_lines_offer_id")
                            .from(OfferLines::Table, OfferLines::OfferId)
                            .to(Offers::Table, Offers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_offer_lines_pr_item_id")
                            .from(OfferLines::Table, OfferLines::PrItemId)
                            .to(QuoteItems::Table, QuoteItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_offer_lines_offer_item")
                    .table(OfferLines::Table)
                    .col(OfferLines::OfferId)
                    .col(OfferLines::PrItemId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OfferLines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Offers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Offers {
    Table,
    Id,
    QuoteId,
    SupplierId,
    Currency,
    ValidUntil,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OfferLines {
    Table,
    Id,
    OfferId,
    PrItemId,
    UnitPrice,
    DeliveryDays,
    Notes,
    CreatedAt,
    UpdatedAt,
}
