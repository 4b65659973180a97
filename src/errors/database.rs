//! Database failure classification.
//!
//! Sorts a `sea_orm::DbErr` into the categories reported to clients:
//! constraint violations raised by PostgreSQL (identified by SQLSTATE),
//! data-layer validation failures raised by the ORM, and everything else.

use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::sqlx;
use sea_orm::{DbErr, RuntimeErr};

use crate::config::{
    CLIENT_SQLSTATE_CLASSES, SQLSTATE_FOREIGN_KEY_VIOLATION, SQLSTATE_UNIQUE_VIOLATION,
};

/// Matches the column list of a PostgreSQL key detail, e.g.
/// `Key (offer_id, pr_item_id)=(...) already exists.`
static KEY_DETAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Key \((?P<columns>[^)]*)\)=").expect("valid key detail pattern"));

/// Error reported by the database server, with its SQLSTATE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    pub code: String,
    pub message: String,
    pub constraint: Option<String>,
    pub detail: Option<String>,
}

impl ServerError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            constraint: None,
            detail: None,
        }
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Extract the server error carried by a query/exec/connection failure.
    pub fn from_db_err(err: &DbErr) -> Option<Self> {
        let runtime = match err {
            DbErr::Query(e) | DbErr::Exec(e) | DbErr::Conn(e) => e,
            _ => return None,
        };

        let RuntimeErr::SqlxError(sqlx::Error::Database(db_err)) = runtime else {
            return None;
        };

        let code = db_err.code()?.into_owned();
        let detail = db_err
            .try_downcast_ref::<sqlx::postgres::PgDatabaseError>()
            .and_then(|pg| pg.detail())
            .map(str::to_string);

        Some(Self {
            code,
            message: db_err.message().to_string(),
            constraint: db_err.constraint().map(str::to_string),
            detail,
        })
    }
}

/// Category of a database failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbFailure {
    /// Unique constraint violated; `fields` are the offending API field names
    UniqueViolation { fields: Vec<String> },
    /// Foreign key violated
    ForeignKeyViolation { constraint: Option<String> },
    /// Any other data or integrity error the server rejected the request with
    Rejected { code: String },
    /// The ORM refused the data before or after it reached the server
    Validation(String),
    /// Connection failures, server faults and anything not listed above
    Unclassified,
}

impl DbFailure {
    /// Classify a sea-orm error.
    pub fn classify(err: &DbErr) -> Self {
        if let Some(server) = ServerError::from_db_err(err) {
            return Self::from_server_error(&server);
        }

        match err {
            DbErr::Type(msg) | DbErr::Json(msg) => Self::Validation(msg.clone()),
            DbErr::AttrNotSet(attr) => Self::Validation(format!("Missing value for {}", attr)),
            DbErr::TryIntoErr { .. } | DbErr::ConvertFromU64(_) => {
                Self::Validation("Value has an unexpected type".to_string())
            }
            DbErr::RecordNotFound(msg) => Self::Validation(msg.clone()),
            DbErr::RecordNotInserted => Self::Validation("No record was inserted".to_string()),
            DbErr::RecordNotUpdated => Self::Validation("No record was updated".to_string()),
            _ => Self::Unclassified,
        }
    }

    /// Classify a server-reported error by its SQLSTATE.
    pub fn from_server_error(server: &ServerError) -> Self {
        match server.code.as_str() {
            SQLSTATE_UNIQUE_VIOLATION => Self::UniqueViolation {
                fields: offending_fields(server),
            },
            SQLSTATE_FOREIGN_KEY_VIOLATION => Self::ForeignKeyViolation {
                constraint: server.constraint.clone(),
            },
            code if CLIENT_SQLSTATE_CLASSES
                .iter()
                .any(|class| code.starts_with(class)) =>
            {
                Self::Rejected {
                    code: code.to_string(),
                }
            }
            _ => Self::Unclassified,
        }
    }
}

/// Field names involved in a unique violation.
///
/// Prefers the column list of the key detail, converted to the camelCase
/// names used by the JSON API; falls back to the constraint name.
fn offending_fields(server: &ServerError) -> Vec<String> {
    let from_detail = server
        .detail
        .as_deref()
        .and_then(|detail| KEY_DETAIL.captures(detail))
        .map(|caps| {
            caps["columns"]
                .split(',')
                .map(|column| to_camel_case(column.trim()))
                .filter(|column| !column.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|fields| !fields.is_empty());

    match from_detail {
        Some(fields) => fields,
        None => server.constraint.iter().cloned().collect(),
    }
}

pub(crate) fn to_camel_case(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut upper_next = false;
    for ch in column.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_fields_from_detail() {
        let server = ServerError::new("23505", "duplicate key value violates unique constraint")
            .with_constraint("uq_offer_lines_offer_item")
            .with_detail("Key (offer_id, pr_item_id)=(a, b) already exists.");

        assert_eq!(
            DbFailure::from_server_error(&server),
            DbFailure::UniqueViolation {
                fields: vec!["offerId".to_string(), "prItemId".to_string()]
            }
        );
    }

    #[test]
    fn test_unique_violation_falls_back_to_constraint() {
        let server = ServerError::new("23505", "duplicate key").with_constraint("uq_suppliers_tax_id");

        assert_eq!(
            DbFailure::from_server_error(&server),
            DbFailure::UniqueViolation {
                fields: vec!["uq_suppliers_tax_id".to_string()]
            }
        );
    }

    #[test]
    fn test_foreign_key_violation() {
        let server = ServerError::new("23503", "insert or update violates foreign key constraint")
            .with_constraint("fk_offers_quote");

        assert_eq!(
            DbFailure::from_server_error(&server),
            DbFailure::ForeignKeyViolation {
                constraint: Some("fk_offers_quote".to_string())
            }
        );
    }

    #[test]
    fn test_other_client_codes_are_rejected() {
        for code in ["23502", "23514", "22001", "22P02"] {
            assert_eq!(
                DbFailure::from_server_error(&ServerError::new(code, "rejected")),
                DbFailure::Rejected {
                    code: code.to_string()
                }
            );
        }
    }

    #[test]
    fn test_server_faults_are_unclassified() {
        for code in ["08006", "53300", "57P01", "42P01"] {
            assert_eq!(
                DbFailure::from_server_error(&ServerError::new(code, "fault")),
                DbFailure::Unclassified
            );
        }
    }

    #[test]
    fn test_orm_errors() {
        assert!(matches!(
            DbFailure::classify(&DbErr::Type("bad uuid".to_string())),
            DbFailure::Validation(_)
        ));
        assert!(matches!(
            DbFailure::classify(&DbErr::RecordNotFound("offer".to_string())),
            DbFailure::Validation(_)
        ));
        assert_eq!(
            DbFailure::classify(&DbErr::Custom("boom".to_string())),
            DbFailure::Unclassified
        );
        assert_eq!(
            DbFailure::classify(&DbErr::Query(RuntimeErr::Internal("closed".to_string()))),
            DbFailure::Unclassified
        );
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("pr_item_id"), "prItemId");
        assert_eq!(to_camel_case("email"), "email");
        assert_eq!(to_camel_case("_leading"), "leading");
    }
}
