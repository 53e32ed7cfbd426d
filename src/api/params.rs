//! Typed parsing of path and query parameters

use std::{fmt::Display, num::ParseIntError, ops::RangeInclusive, str::FromStr};

use crate::{
    error::{AppError, AppResult},
    models::{
        pagination::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
        Page, PageQuery,
    },
};

/// Integer kinds accepted by [`parse_numeric_parameter`]
pub trait NumericParam: FromStr<Err = ParseIntError> + PartialOrd + Copy + Display {}

macro_rules! numeric_param {
    ($($ty:ty),*) => {
        $(impl NumericParam for $ty {})*
    };
}

numeric_param!(i32, i64, u32, u64, usize);

/// Parse an optional numeric parameter, falling back to `default` when it is absent or blank.
/// Out-of-range values are rejected with the parameter name.
pub fn parse_numeric_parameter<T: NumericParam>(
    name: &str,
    raw: Option<&str>,
    default: T,
    range: RangeInclusive<T>,
) -> AppResult<T> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(default),
    };

    let value: T = raw.parse().map_err(|e: ParseIntError| AppError::Parsing {
        param: Some(name.to_string()),
        message: format!("'{}' is not a valid integer ({})", raw, e),
    })?;

    if !range.contains(&value) {
        return Err(AppError::Parsing {
            param: Some(name.to_string()),
            message: format!(
                "{} is out of range {}..={}",
                value,
                range.start(),
                range.end()
            ),
        });
    }
    Ok(value)
}

impl PageQuery {
    pub fn to_page(&self) -> AppResult<Page> {
        Ok(Page {
            number: parse_numeric_parameter(
                "pageNumber",
                self.page_number.as_deref(),
                DEFAULT_PAGE_NUMBER,
                1..=u32::MAX,
            )?,
            size: parse_numeric_parameter(
                "pageSize",
                self.page_size.as_deref(),
                DEFAULT_PAGE_SIZE,
                1..=MAX_PAGE_SIZE,
            )?,
        })
    }
}

/// Path identifiers must be present and non-blank. They are kept verbatim so they
/// compare equal to the key stored from the body.
pub fn required_path_param(name: &str, value: &str) -> AppResult<String> {
    if value.trim().is_empty() {
        return Err(AppError::RequiredField(name.to_string()));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(parse_numeric_parameter("pageSize", None, 25u32, 1..=100).unwrap(), 25);
        assert_eq!(parse_numeric_parameter("pageSize", Some(" "), 25u32, 1..=100).unwrap(), 25);
        assert_eq!(PageQuery::default().to_page().unwrap(), Page::default());
    }

    #[test]
    fn test_parses_signed_and_unsigned() {
        assert_eq!(parse_numeric_parameter("offset", Some("-3"), 0i64, -10..=10).unwrap(), -3);
        assert_eq!(parse_numeric_parameter("limit", Some("42"), 1usize, 1..=50).unwrap(), 42);
    }

    #[test]
    fn test_rejects_garbage_and_out_of_range() {
        let err = parse_numeric_parameter("pageSize", Some("ten"), 25u32, 1..=100).unwrap_err();
        assert_eq!(err.field().as_deref(), Some("pageSize"));

        let err = parse_numeric_parameter("pageSize", Some("101"), 25u32, 1..=100).unwrap_err();
        assert!(matches!(err, AppError::Parsing { .. }));

        let query = PageQuery {
            page_number: Some("0".to_string()),
            page_size: None,
        };
        let err = query.to_page().unwrap_err();
        assert_eq!(err.field().as_deref(), Some("pageNumber"));
    }

    #[test]
    fn test_required_path_param() {
        assert_eq!(required_path_param("isbn", "123").unwrap(), "123");
        assert_eq!(required_path_param("isbn", " 123 ").unwrap(), " 123 ");
        assert!(matches!(
            required_path_param("isbn", "  "),
            Err(AppError::RequiredField(field)) if field == "isbn"
        ));
    }
}
