/// Permissive integer parse for the free-text currency inputs.
///
/// Surrounding whitespace is ignored, an optional sign is honoured, a `0x`/`0X`
/// prefix reads hexadecimal, and parsing stops at the first character that is not a
/// digit (`"12abc"` is 12, `"3.9"` is 3). Text with no leading digits is 0.
/// Out-of-range values saturate at `±i64::MAX`.
pub fn parse_int(text: &str) -> i64 {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut value: i64 = 0;
    let mut saw_digit = false;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        saw_digit = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }

    match (saw_digit, negative) {
        (false, _) => 0,
        (true, true) => -value,
        (true, false) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_int;

    #[test]
    fn non_numeric_text_is_zero() {
        for raw in ["", "   ", "abc", "-", "+", "0x", ".5", "gold 100"] {
            assert_eq!(parse_int(raw), 0, "input {raw:?}");
        }
    }

    #[test]
    fn reads_leading_digits_only() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("  42  "), 42);
        assert_eq!(parse_int("12abc"), 12);
        assert_eq!(parse_int("3.9"), 3);
        assert_eq!(parse_int("1e3"), 1);
        assert_eq!(parse_int("1,000"), 1);
        assert_eq!(parse_int("007"), 7);
    }

    #[test]
    fn honours_sign_and_hex_prefix() {
        assert_eq!(parse_int("-250"), -250);
        assert_eq!(parse_int("+250"), 250);
        assert_eq!(parse_int("-0"), 0);
        assert_eq!(parse_int("0x1F"), 31);
        assert_eq!(parse_int("-0X10"), -16);
        assert_eq!(parse_int("0x1g"), 1);
    }

    #[test]
    fn saturates_out_of_range_values() {
        assert_eq!(parse_int("99999999999999999999999"), i64::MAX);
        assert_eq!(parse_int("-99999999999999999999999"), -i64::MAX);
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        assert_eq!(parse_int("é12"), 0);
        assert_eq!(parse_int("0é"), 0);
        assert_eq!(parse_int("5€"), 5);
    }
}
