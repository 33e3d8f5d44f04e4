//! ASIN-like identifiers derived from the generation index.

use super::templates::{IDENTIFIER_BODY_LEN, IDENTIFIER_PREFIX, IDENTIFIER_SEED, IDENTIFIER_STRIDE};

const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Encode a number in upper-case base 36.
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.iter().rev().map(|&d| d as char).collect()
}

/// Build the identifier for row `index`.
///
/// The body is left-padded with `0` and cut to exactly
/// [`IDENTIFIER_BODY_LEN`] characters, so every identifier has the same
/// width. The seed saturates at `u64::MAX` for indices past the encodable
/// range.
pub fn identifier_for(index: usize) -> String {
    let index = u64::try_from(index).unwrap_or(u64::MAX);
    let seed = IDENTIFIER_SEED.saturating_add(index.saturating_mul(IDENTIFIER_STRIDE));
    let encoded = to_base36(seed);
    let padded = format!("{encoded:0>width$}", width = IDENTIFIER_BODY_LEN);
    let body: String = padded.chars().take(IDENTIFIER_BODY_LEN).collect();
    format!("{IDENTIFIER_PREFIX}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(10_000_000), "5YC1S");
    }

    #[test]
    fn identifiers_are_prefixed_and_fixed_width() {
        assert_eq!(identifier_for(0), "B00005YC1S");
        assert_eq!(identifier_for(1), "B00005YI5R");
        for i in 0..200 {
            let id = identifier_for(i);
            assert!(id.starts_with("B0"));
            assert_eq!(id.len(), 10);
        }
    }

    #[test]
    fn huge_index_saturates_instead_of_overflowing() {
        assert_eq!(to_base36(u64::MAX), "3W5E11264SGSF");
        assert_eq!(identifier_for(usize::MAX), "B03W5E1126");
    }

    #[test]
    fn identifiers_are_unique_per_index() {
        let ids: std::collections::HashSet<String> = (0..500).map(identifier_for).collect();
        assert_eq!(ids.len(), 500);
    }
}
