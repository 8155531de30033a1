//! Sequential product number rule.
//!
//! Product numbers are base-10 numeric strings, zero-padded ("001", "002",
//! ...). The next number is derived purely from the latest persisted one;
//! reading that latest number from storage is the caller's concern.

use cafekiosk_core::{DomainError, DomainResult};

/// Number assigned when the catalog is empty.
pub const INITIAL_PRODUCT_NUMBER: &str = "001";

/// Derive the next product number from the latest persisted one.
///
/// Parses `latest` as a base-10 integer, adds one, and re-formats zero-padded
/// to the same width. The width grows naturally once the value no longer fits
/// ("999" → "1000").
pub fn next_product_number(latest: &str) -> DomainResult<String> {
    let value: u64 = latest
        .parse()
        .map_err(|_| DomainError::invalid_id(format!("product number: {latest}")))?;
    let next = value
        .checked_add(1)
        .ok_or_else(|| DomainError::invalid_id(format!("product number overflow: {latest}")))?;

    Ok(format!("{next:0width$}", width = latest.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_and_keeps_padding() {
        assert_eq!(next_product_number("001").unwrap(), "002");
        assert_eq!(next_product_number("009").unwrap(), "010");
        assert_eq!(next_product_number("099").unwrap(), "100");
    }

    #[test]
    fn width_grows_when_exhausted() {
        assert_eq!(next_product_number("999").unwrap(), "1000");
    }

    #[test]
    fn rejects_non_numeric_numbers() {
        let err = next_product_number("A01").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));

        assert!(next_product_number("").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the next number is always the parsed latest plus one.
            #[test]
            fn next_is_latest_plus_one(value in 0u64..1_000_000, width in 1usize..8) {
                let latest = format!("{value:0width$}");
                let next = next_product_number(&latest).unwrap();
                prop_assert_eq!(next.parse::<u64>().unwrap(), value + 1);
            }

            /// Property: padding width is preserved while the value fits.
            #[test]
            fn width_is_preserved(value in 0u64..99_998) {
                let latest = format!("{value:05}");
                let next = next_product_number(&latest).unwrap();
                prop_assert_eq!(next.len(), latest.len());
            }
        }
    }
}
