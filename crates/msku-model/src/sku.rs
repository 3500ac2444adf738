//! SKU normalization shared by mapping keys, combo members and input values.

use crate::options::SkuCase;

/// Normalizes a SKU for comparison.
///
/// Surrounding whitespace is trimmed. Case is kept unless `case` is
/// [`SkuCase::Insensitive`].
pub fn normalize_sku(raw: &str, case: SkuCase) -> String {
    let trimmed = raw.trim();
    match case {
        SkuCase::Sensitive => trimmed.to_string(),
        SkuCase::Insensitive => trimmed.to_uppercase(),
    }
}

/// Splits a raw SKU cell on `delimiter` and normalizes each member.
///
/// Members that are empty after trimming are dropped, so `"A,,B"` yields two
/// SKUs and `" , "` yields none.
pub fn split_sku_group(raw: &str, delimiter: char, case: SkuCase) -> Vec<String> {
    raw.split(delimiter)
        .map(|token| normalize_sku(token, case))
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_keeps_case() {
        assert_eq!(normalize_sku("  sku-A \t", SkuCase::Sensitive), "sku-A");
    }

    #[test]
    fn test_normalize_insensitive_uppercases() {
        assert_eq!(normalize_sku(" sku-a ", SkuCase::Insensitive), "SKU-A");
    }

    #[test]
    fn test_split_drops_empty_members() {
        assert_eq!(
            split_sku_group("A, ,B,", ',', SkuCase::Sensitive),
            vec!["A", "B"]
        );
        assert!(split_sku_group(" , ", ',', SkuCase::Sensitive).is_empty());
    }

    #[test]
    fn test_split_custom_delimiter() {
        assert_eq!(
            split_sku_group("A;B", ';', SkuCase::Sensitive),
            vec!["A", "B"]
        );
        assert_eq!(
            split_sku_group("A,B", ';', SkuCase::Sensitive),
            vec!["A,B"]
        );
    }
}
