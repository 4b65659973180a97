//! Supplier offers on a quote and their priced lines.
//!
//! An offer belongs to one quote and one supplier; each line prices one
//! requested quote item. A line is identified by `(offer, quote item)`:
//! at most one line per requested item may exist on an offer.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::{non_negative, CURRENCY_CODE};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub supplier_id: Uuid,
    #[schema(example = "EUR")]
    pub currency: String,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferLine {
    pub id: Uuid,
    pub offer_id: Uuid,
    /// Requested quote item this line prices
    pub pr_item_id: Uuid,
    #[schema(value_type = String, example = "4.20")]
    pub unit_price: Decimal,
    pub delivery_days: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Offer together with its lines
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetail {
    #[serde(flatten)]
    pub offer: Offer,
    pub lines: Vec<OfferLine>,
}

impl OfferDetail {
    /// Attach lines to their offers, keeping the order of `offers`.
    /// Lines whose offer is not in `offers` are dropped.
    pub fn group(offers: Vec<Offer>, lines: Vec<OfferLine>) -> Vec<OfferDetail> {
        let mut by_offer: HashMap<Uuid, Vec<OfferLine>> = HashMap::new();
        for line in lines {
            by_offer.entry(line.offer_id).or_default().push(line);
        }

        offers
            .into_iter()
            .map(|offer| {
                let lines = by_offer.remove(&offer.id).unwrap_or_default();
                OfferDetail { offer, lines }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOffer {
    pub quote_id: Uuid,
    pub supplier_id: Uuid,
    #[validate(regex(path = *CURRENCY_CODE, message = "must be a three-letter upper-case currency code"))]
    #[schema(example = "EUR")]
    pub currency: String,
    pub valid_until: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOffer {
    #[validate(regex(path = *CURRENCY_CODE, message = "must be a three-letter upper-case currency code"))]
    pub currency: Option<String>,
    pub valid_until: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferLine {
    pub pr_item_id: Uuid,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = String, example = "4.20")]
    pub unit_price: Decimal,
    #[validate(range(min = 0))]
    pub delivery_days: Option<i32>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Batch of lines for `POST /offers/:offerId/lines`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOfferLines {
    #[validate(
        length(min = 1, max = 500, message = "must contain between 1 and 500 lines"),
        nested
    )]
    pub lines: Vec<CreateOfferLine>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferLine {
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = Option<String>, example = "3.95")]
    pub unit_price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub delivery_days: Option<i32>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Outcome of a skip-duplicates bulk insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinesAdded {
    /// Lines actually stored
    pub count: u64,
    /// Lines ignored because their quote item already had a line
    pub skipped: u64,
}

impl LinesAdded {
    pub fn new(requested: usize, inserted: u64) -> Self {
        Self {
            count: inserted,
            skipped: (requested as u64).saturating_sub(inserted),
        }
    }
}

/// Keep the first line for each quote item, preserving input order.
pub fn dedup_lines_by_item(lines: Vec<CreateOfferLine>) -> Vec<CreateOfferLine> {
    let mut seen = HashSet::with_capacity(lines.len());
    lines
        .into_iter()
        .filter(|line| seen.insert(line.pr_item_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn line(pr_item_id: Uuid, price: &str) -> CreateOfferLine {
        CreateOfferLine {
            pr_item_id,
            unit_price: Decimal::from_str(price).unwrap(),
            delivery_days: None,
            notes: None,
        }
    }

    #[test]
    fn test_dedup_keeps_first_line_per_item() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let kept = dedup_lines_by_item(vec![line(a, "1.00"), line(b, "2.00"), line(a, "3.00")]);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].pr_item_id, a);
        assert_eq!(kept[0].unit_price, Decimal::from_str("1.00").unwrap());
        assert_eq!(kept[1].pr_item_id, b);
    }

    #[test]
    fn test_oversized_batch_reports_rejected_lines() {
        let input = AddOfferLines {
            lines: (0..501).map(|_| line(Uuid::new_v4(), "1.00")).collect(),
        };

        let errors = serde_json::to_value(input.validate().unwrap_err()).unwrap();

        assert_eq!(errors["lines"][0]["code"], "length");
        assert_eq!(errors["lines"][0]["params"]["value"].as_array().map(Vec::len), Some(501));
        assert!(errors["lines"][0]["params"]["value"][0]["prItemId"].is_string());
    }

    #[test]
    fn test_lines_added_counts_skipped() {
        assert_eq!(LinesAdded::new(3, 1), LinesAdded { count: 1, skipped: 2 });
        assert_eq!(LinesAdded::new(2, 2), LinesAdded { count: 2, skipped: 0 });
    }

    #[test]
    fn test_currency_must_be_iso_shaped() {
        let offer = CreateOffer {
            quote_id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            currency: "euro".to_string(),
            valid_until: None,
            notes: None,
        };
        assert!(offer.validate().is_err());

        let offer = CreateOffer {
            currency: "EUR".to_string(),
            ..offer
        };
        assert!(offer.validate().is_ok());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let batch = AddOfferLines {
            lines: vec![line(Uuid::new_v4(), "-1")],
        };
        assert!(batch.validate().is_err());
    }

    #[test]
    fn test_group_attaches_lines_to_offers() {
        let now = Utc::now();
        let offer = |id| Offer {
            id,
            quote_id: Uuid::nil(),
            supplier_id: Uuid::new_v4(),
            currency: "EUR".to_string(),
            valid_until: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let stored_line = |offer_id| OfferLine {
            id: Uuid::new_v4(),
            offer_id,
            pr_item_id: Uuid::new_v4(),
            unit_price: Decimal::ONE,
            delivery_days: Some(5),
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        let details = OfferDetail::group(
            vec![offer(first), offer(second)],
            vec![stored_line(second), stored_line(first), stored_line(second)],
        );

        assert_eq!(details[0].offer.id, first);
        assert_eq!(details[0].lines.len(), 1);
        assert_eq!(details[1].lines.len(), 2);
    }
}
