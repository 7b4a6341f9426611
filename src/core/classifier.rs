//! Tags spending as gas from its free-text description or explicit category.

pub const GAS_CATEGORY: &str = "Gas";

/// Category assigned to spending that is not gas. Empty, so untagged records
/// carry no category rather than a catch-all label.
pub const UNCATEGORIZED: &str = "";

/// Returns `"Gas"` when the explicit category is gas (any case) or the
/// description mentions "gas"; otherwise [`UNCATEGORIZED`].
pub fn classify_gas(description: Option<&str>, existing_category: Option<&str>) -> &'static str {
    let explicit = existing_category
        .map(|category| category.trim().eq_ignore_ascii_case(GAS_CATEGORY))
        .unwrap_or(false);
    let mentioned = description
        .map(|text| text.to_lowercase().contains("gas"))
        .unwrap_or(false);
    if explicit || mentioned {
        GAS_CATEGORY
    } else {
        UNCATEGORIZED
    }
}

pub fn is_gas(category: Option<&str>) -> bool {
    category == Some(GAS_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_mentioning_gas_is_gas() {
        assert_eq!(classify_gas(Some("Shell gas station"), None), "Gas");
        assert_eq!(classify_gas(Some("GASOLINE"), Some("")), "Gas");
    }

    #[test]
    fn explicit_category_wins_regardless_of_case() {
        assert_eq!(classify_gas(None, Some("gas")), "Gas");
        assert_eq!(classify_gas(Some("Costco"), Some("GAS")), "Gas");
    }

    #[test]
    fn other_spending_is_uncategorized() {
        assert_eq!(classify_gas(Some("Groceries"), Some("Food")), "");
        assert_eq!(classify_gas(None, None), "");
        assert!(!is_gas(Some("")));
        assert!(is_gas(Some("Gas")));
    }
}
