//! Validated JSON extractor - deserialization followed by `validator` checks.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::errors::{to_camel_case, AppError};

/// JSON body that has passed its `Validate` rules.
///
/// Malformed bodies keep the framework's own status and message; rule
/// violations become a 400 listing every offending field.
///
/// ```rust,ignore
/// async fn create_offer(ValidatedJson(input): ValidatedJson<CreateOffer>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten nested validation errors into `path: message` pairs, e.g.
/// `lines[1].unitPrice: must not be negative`.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect(errors, "", &mut messages);
    messages.sort();
    messages.join(", ")
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            to_camel_case(field)
        } else {
            format!("{}.{}", prefix, to_camel_case(field))
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| match &e.message {
                    Some(message) => format!("{}: {}", path, message),
                    None => format!("{}: is invalid ({})", path, e.code),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddOfferLines, CreateOfferLine};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn test_nested_errors_carry_their_path() {
        let input = AddOfferLines {
            lines: vec![
                CreateOfferLine {
                    pr_item_id: Uuid::new_v4(),
                    unit_price: Decimal::ONE,
                    delivery_days: None,
                    notes: None,
                },
                CreateOfferLine {
                    pr_item_id: Uuid::new_v4(),
                    unit_price: Decimal::NEGATIVE_ONE,
                    delivery_days: None,
                    notes: None,
                },
            ],
        };

        let message = format_validation_errors(&input.validate().unwrap_err());
        assert!(message.starts_with("lines[1].unitPrice: "), "{}", message);
    }

    #[test]
    fn test_empty_collection_is_reported_on_field() {
        let message =
            format_validation_errors(&AddOfferLines { lines: vec![] }.validate().unwrap_err());
        assert_eq!(message, "lines: must contain between 1 and 500 lines");
    }
}
