//! Shapes and helpers shared by the author and customer models

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// ISO calendar date, used for storage and for birth dates on the wire
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Locale form used to render publish dates (MM/DD/YY). Output only: the two-digit
/// year cannot be read back without guessing the century.
pub const PUBLISH_DATE_FORMAT: &str = "%m/%d/%y";

/// Structured person name. Only the middle name is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct PersonName {
    #[validate(length(max = 100, message = "first_name is longer than 100 characters"))]
    pub first_name: String,
    #[validate(length(max = 100, message = "middle_name is longer than 100 characters"))]
    pub middle_name: String,
    #[validate(length(max = 100, message = "last_name is longer than 100 characters"))]
    pub last_name: String,
}

/// Postal address; every part is optional and renders as an empty string when unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Address {
    #[validate(length(max = 50, message = "unit is longer than 50 characters"))]
    pub unit: String,
    #[validate(length(max = 255, message = "street_name is longer than 255 characters"))]
    pub street_name: String,
    #[validate(length(max = 100, message = "city is longer than 100 characters"))]
    pub city: String,
    #[validate(length(max = 100, message = "state is longer than 100 characters"))]
    pub state: String,
    #[validate(length(max = 100, message = "country is longer than 100 characters"))]
    pub country: String,
    #[validate(length(max = 20, message = "zipcode is longer than 20 characters"))]
    pub zipcode: String,
    #[validate(length(max = 255, message = "landmark is longer than 255 characters"))]
    pub landmark: String,
}

pub fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::RequiredField(field.to_string()));
    }
    Ok(())
}

pub fn require_list(field: &str, values: &[String]) -> AppResult<()> {
    if values.is_empty() {
        return Err(AppError::RequiredField(field.to_string()));
    }
    Ok(())
}

pub fn parse_iso_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|e| AppError::Constraint {
        field: field.to_string(),
        message: format!("expected YYYY-MM-DD, got '{}' ({})", value, e),
    })
}

pub fn format_publish_date(date: NaiveDate) -> String {
    date.format(PUBLISH_DATE_FORMAT).to_string()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Empty string means "not set"
pub fn parse_optional_timestamp(field: &str, value: &str) -> AppResult<Option<DateTime<Utc>>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|ts| Some(ts.with_timezone(&Utc)))
        .map_err(|e| AppError::Constraint {
            field: field.to_string(),
            message: format!("expected an RFC 3339 timestamp, got '{}' ({})", value, e),
        })
}

pub fn format_optional_timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_date_forms() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        assert_eq!(parse_iso_date("date_of_publish", "2020-01-02").unwrap(), date);
        assert_eq!(format_publish_date(date), "01/02/20");

        // The rendered form is not accepted back
        let err = parse_iso_date("date_of_publish", "01/02/20").unwrap_err();
        assert_eq!(err.field().as_deref(), Some("date_of_publish"));

        let err = parse_iso_date("date_of_publish", "yesterday").unwrap_err();
        assert_eq!(err.field().as_deref(), Some("date_of_publish"));
    }

    #[test]
    fn test_iso_date_rejects_locale_form() {
        assert!(parse_iso_date("dob", "1990-12-31").is_ok());
        assert!(parse_iso_date("dob", "12/31/90").is_err());
    }

    #[test]
    fn test_optional_timestamp() {
        assert_eq!(parse_optional_timestamp("last_login", "").unwrap(), None);

        let parsed = parse_optional_timestamp("last_login", "2024-05-01T10:20:30Z")
            .unwrap()
            .unwrap();
        assert_eq!(format_optional_timestamp(Some(parsed)), "2024-05-01T10:20:30Z");

        assert!(parse_optional_timestamp("last_login", "last tuesday").is_err());
    }

    #[test]
    fn test_name_and_address_limits() {
        let name = PersonName {
            first_name: "x".repeat(100),
            last_name: "Lovelace".to_string(),
            ..PersonName::default()
        };
        assert!(name.validate().is_ok());

        let name = PersonName {
            first_name: "x".repeat(101),
            ..name
        };
        let err = AppError::from(name.validate().unwrap_err());
        assert_eq!(err.field().as_deref(), Some("first_name"));

        let address = Address {
            zipcode: "1".repeat(21),
            ..Address::default()
        };
        let err = AppError::from(address.validate().unwrap_err());
        assert_eq!(err.field().as_deref(), Some("zipcode"));
    }

    #[test]
    fn test_required_helpers() {
        assert!(require_text("name", "Go").is_ok());
        assert!(matches!(
            require_text("name", "   "),
            Err(AppError::RequiredField(field)) if field == "name"
        ));
        assert!(require_list("languages", &[]).is_err());
    }
}
