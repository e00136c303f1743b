//! Form-level input types and coercion.
//!
//! The presentation layer delivers raw strings straight from input fields.
//! The core cannot assume those are already typed, so every operation takes
//! one of the draft structs below and coerces it itself: trimming, number
//! parsing, and date parsing all happen here, before any mutation.
//!
//! A `None` field means the caller did not supply the field at all. For
//! updates that distinguishes "leave the stored value alone" from an explicit
//! override — including an explicit `"0"` usage rate, which is an override,
//! not an unset.

use crate::{InventoryError, InventoryResult};
use chrono::{DateTime, NaiveDate, Utc};
use medtrack_types::NonEmptyText;

/// Draft of an inventory item as posted by an item form.
#[derive(Debug, Clone, Default)]
pub struct ItemInput {
    /// Blank or absent for a new item; the existing id for an update.
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub threshold: Option<String>,
    pub supplier: Option<String>,
    /// A blank string clears the stored expiry date.
    pub expiry_date: Option<String>,
    pub location: Option<String>,
    pub usage_rate: Option<String>,
}

/// Draft of a usage event as posted by the usage form.
#[derive(Debug, Clone, Default)]
pub struct UsageInput {
    pub item_id: Option<String>,
    pub quantity: Option<String>,
    pub date: Option<String>,
    pub patient_id: Option<String>,
    pub prescriber: Option<String>,
    pub notes: Option<String>,
}

/// Parses a required free-text field into validated non-empty text.
pub(crate) fn parse_required_text(
    field: &str,
    value: Option<&str>,
) -> InventoryResult<NonEmptyText> {
    let raw = value.unwrap_or("");
    NonEmptyText::new(raw)
        .map_err(|_| InventoryError::Validation(format!("{} cannot be empty", field)))
}

/// Parses a required unsigned integer field.
pub(crate) fn parse_required_u32(field: &str, value: Option<&str>) -> InventoryResult<u32> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| InventoryError::Validation(format!("{} is required", field)))?
        .parse::<u32>()
        .map_err(|_| {
            InventoryError::Validation(format!("{} must be a non-negative integer", field))
        })
}

/// Parses a required strictly-positive integer field.
pub(crate) fn parse_positive_u32(field: &str, value: Option<&str>) -> InventoryResult<u32> {
    let parsed = parse_required_u32(field, value)?;
    if parsed == 0 {
        return Err(InventoryError::Validation(format!(
            "{} must be positive",
            field
        )));
    }
    Ok(parsed)
}

/// Parses an optional item id field.
///
/// Item forms post an empty id for new items, so blank input means "absent"
/// rather than an error. A non-blank id must parse as a positive integer.
pub(crate) fn parse_item_id(value: Option<&str>) -> InventoryResult<Option<u32>> {
    let raw = match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw,
        None => return Ok(None),
    };

    match raw.parse::<u32>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(InventoryError::Validation(format!(
            "id must be a positive integer, got {:?}",
            raw
        ))),
    }
}

/// Parses an expiry date field. Blank input clears the date.
pub(crate) fn parse_expiry(value: &str) -> InventoryResult<Option<NaiveDate>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<NaiveDate>()
        .map(Some)
        .map_err(|_| {
            InventoryError::Validation(format!(
                "expiryDate must be a calendar date (YYYY-MM-DD), got {:?}",
                trimmed
            ))
        })
}

/// Parses a usage rate field into a non-negative number.
pub(crate) fn parse_usage_rate(value: &str) -> InventoryResult<f64> {
    let rate = value.trim().parse::<f64>().map_err(|_| {
        InventoryError::Validation(format!("usageRate must be a number, got {:?}", value.trim()))
    })?;

    if !rate.is_finite() || rate < 0.0 {
        return Err(InventoryError::Validation(
            "usageRate must be a non-negative number".into(),
        ));
    }

    Ok(rate)
}

/// Parses a usage timestamp.
///
/// Accepts RFC 3339 timestamps and bare calendar dates; a bare date is read
/// as midnight UTC, which is what date-only form fields deliver.
pub(crate) fn parse_timestamp(field: &str, value: Option<&str>) -> InventoryResult<DateTime<Utc>> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| InventoryError::Validation(format!("{} is required", field)))?;

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    if let Ok(date) = raw.parse::<NaiveDate>() {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(InventoryError::Validation(format!(
        "{} must be a valid date, got {:?}",
        field, raw
    )))
}

/// Normalises an optional free-text field: trimmed, with blanks dropped.
pub(crate) fn normalise_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_id_is_absent() {
        assert_eq!(parse_item_id(None).expect("absent id ok"), None);
        assert_eq!(parse_item_id(Some("")).expect("blank id ok"), None);
        assert_eq!(parse_item_id(Some("  ")).expect("whitespace id ok"), None);
        assert_eq!(parse_item_id(Some("7")).expect("numeric id ok"), Some(7));
    }

    #[test]
    fn test_malformed_id_is_rejected() {
        for raw in ["abc", "-3", "0", "1.5"] {
            let err = parse_item_id(Some(raw)).expect_err("bad id should fail");
            assert!(matches!(err, InventoryError::Validation(_)), "id {:?}", raw);
        }
    }

    #[test]
    fn test_quantity_must_parse_as_number() {
        assert_eq!(
            parse_required_u32("quantity", Some(" 45 ")).expect("should parse"),
            45
        );
        for raw in [None, Some(""), Some("lots"), Some("-1")] {
            let err = parse_required_u32("quantity", raw).expect_err("should fail");
            assert!(matches!(err, InventoryError::Validation(_)));
        }
    }

    #[test]
    fn test_usage_quantity_must_be_positive() {
        let err = parse_positive_u32("quantity", Some("0")).expect_err("zero should fail");
        assert!(matches!(err, InventoryError::Validation(_)));
        assert_eq!(
            parse_positive_u32("quantity", Some("5")).expect("should parse"),
            5
        );
    }

    #[test]
    fn test_blank_expiry_clears_the_date() {
        assert_eq!(parse_expiry("").expect("blank clears"), None);
        assert_eq!(
            parse_expiry("2025-09-15").expect("should parse"),
            NaiveDate::from_ymd_opt(2025, 9, 15)
        );
        assert!(parse_expiry("next tuesday").is_err());
    }

    #[test]
    fn test_usage_rate_rejects_negative_and_non_numeric() {
        assert_eq!(parse_usage_rate("0").expect("explicit zero ok"), 0.0);
        assert_eq!(parse_usage_rate("2.5").expect("fractional ok"), 2.5);
        assert!(parse_usage_rate("-1").is_err());
        assert!(parse_usage_rate("NaN").is_err());
        assert!(parse_usage_rate("daily").is_err());
    }

    #[test]
    fn test_timestamp_accepts_rfc3339_and_bare_dates() {
        let from_form = parse_timestamp("date", Some("2025-06-01")).expect("bare date ok");
        assert_eq!(from_form.to_rfc3339(), "2025-06-01T00:00:00+00:00");

        let precise =
            parse_timestamp("date", Some("2025-06-01T09:30:00Z")).expect("rfc3339 ok");
        assert_eq!(precise.to_rfc3339(), "2025-06-01T09:30:00+00:00");

        assert!(parse_timestamp("date", Some("not a date")).is_err());
        assert!(parse_timestamp("date", None).is_err());
    }

    #[test]
    fn test_optional_text_normalisation() {
        assert_eq!(normalise_optional_text(None), None);
        assert_eq!(normalise_optional_text(Some("  ".to_owned())), None);
        assert_eq!(
            normalise_optional_text(Some(" Dr. Smith ".to_owned())),
            Some("Dr. Smith".to_owned())
        );
    }
}
