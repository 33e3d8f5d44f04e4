//! Number formatting and rounding shared by the generators and renderers.
//!
//! Rounding is half-up (`floor(x + 0.5)`), not Rust's half-away-from-zero
//! `f64::round`, so negative half-cent values land where the demo data
//! expects them.

/// Round to the nearest whole number, halves rounding up.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round a currency amount to 2 decimal places, halves rounding up.
pub fn round2(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}

/// Format a number with comma separators for readability.
pub fn format_number(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// Format a currency amount as `$1,234.56` (negative as `-$9.92`).
pub fn format_money(amount: f64) -> String {
    let cents = round_half_up(amount.abs() * 100.0) as u64;
    let whole = group_thousands(&(cents / 100).to_string());
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${whole}.{:02}", cents % 100)
}

/// Format a ratio (`0.132`) as a percentage with one decimal (`13.2%`).
pub fn format_pct(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_halves_up() {
        assert_eq!(round2(0.025), 0.03);
        assert_eq!(round2(14.4), 14.4);
        assert_eq!(round2(45.0 * 0.18), 8.1);
    }

    #[test]
    fn round_half_up_differs_from_std_on_negative_halves() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!((-2.5f64).round(), -3.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1621.01), "$1,621.01");
        assert_eq!(format_money(-9.92), "-$9.92");
        assert_eq!(format_money(119.4), "$119.40");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(0.132), "13.2%");
        assert_eq!(format_pct(0.0), "0.0%");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("ab", 2), "ab");
    }
}
