use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::shared::constants::SLUG_MAX_LENGTH;

lazy_static! {
    /// URL slug: ASCII letters, digits, hyphens and underscores
    /// - Valid: "rust-basics", "ui_ux", "Course2024"
    /// - Invalid: "rust basics", "курс", "a/b", ""
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap();
}

/// Digits allowed before the decimal point of NUMERIC(10, 2)
const MONEY_INTEGER_DIGITS: u32 = 8;
const MONEY_DECIMAL_PLACES: u32 = 2;

/// Validates that a monetary amount fits NUMERIC(10, 2).
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    if value.normalize().scale() > MONEY_DECIMAL_PLACES {
        return Err(ValidationError::new("money_scale")
            .with_message("must have at most 2 decimal places".into()));
    }

    if value.trunc().abs() >= Decimal::from(10_i64.pow(MONEY_INTEGER_DIGITS)) {
        return Err(ValidationError::new("money_precision")
            .with_message("must have at most 8 digits before the decimal point".into()));
    }

    Ok(())
}

/// Derive a slug from a display name.
///
/// Lowercases ASCII alphanumerics, turns every other run of characters into a
/// single hyphen and caps the result at the slug column width. Returns `None`
/// when nothing slug-worthy remains (e.g. a title written entirely in Cyrillic).
pub fn slugify(input: &str) -> Option<String> {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(SLUG_MAX_LENGTH);
    let slug = slug.trim_end_matches('-').to_string();

    (!slug.is_empty()).then_some(slug)
}
