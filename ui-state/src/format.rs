//! Display formatting.

/// Group separator used by French number formatting (narrow no-break space).
const GROUP_SEPARATOR: char = '\u{202f}';

/// Space between amount and currency symbol (no-break space).
const SYMBOL_SEPARATOR: char = '\u{a0}';

/// Formats an amount as euros the French way, e.g. `1 234,50 €`.
///
/// A missing or NaN amount renders as zero. Rounding to the cent is done on
/// the shortest decimal form of the amount, half away from zero, so `1.005`
/// renders as `1,01 €`.
pub fn format_currency(amount: Option<f64>) -> String {
    let amount = amount.filter(|a| !a.is_nan()).unwrap_or(0.0);
    let sign = if amount < 0.0 { "-" } else { "" };

    if amount.is_infinite() {
        return format!("{sign}∞{SYMBOL_SEPARATOR}€");
    }

    let (units, cents) = round_to_cents(amount.abs());
    format!("{sign}{},{cents}{SYMBOL_SEPARATOR}€", group_thousands(&units))
}

/// Splits a finite, non-negative amount into whole units and two cent
/// digits.
fn round_to_cents(value: f64) -> (String, String) {
    // f64 Display never uses exponent notation
    let repr = value.to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(2).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - 2;
    let text = |d: &[u8]| d.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    (text(&digits[..split]), text(&digits[split..]))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amount() {
        assert_eq!(format_currency(Some(19.99)), "19,99\u{a0}€");
    }

    #[test]
    fn test_thousands_are_grouped() {
        assert_eq!(format_currency(Some(1234.5)), "1\u{202f}234,50\u{a0}€");
        assert_eq!(format_currency(Some(1_000_000.0)), "1\u{202f}000\u{202f}000,00\u{a0}€");
    }

    #[test]
    fn test_missing_amount_is_zero() {
        assert_eq!(format_currency(None), "0,00\u{a0}€");
        assert_eq!(format_currency(Some(f64::NAN)), "0,00\u{a0}€");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_currency(Some(-89.99)), "-89,99\u{a0}€");
    }

    #[test]
    fn test_half_cent_rounds_away_from_zero() {
        assert_eq!(format_currency(Some(1.005)), "1,01\u{a0}€");
        assert_eq!(format_currency(Some(0.145)), "0,15\u{a0}€");
        assert_eq!(format_currency(Some(1.025)), "1,03\u{a0}€");
        assert_eq!(format_currency(Some(-1.005)), "-1,01\u{a0}€");
        assert_eq!(format_currency(Some(2.004)), "2,00\u{a0}€");
    }

    #[test]
    fn test_rounding_carries_into_units() {
        assert_eq!(format_currency(Some(9.995)), "10,00\u{a0}€");
        assert_eq!(format_currency(Some(999.999)), "1\u{202f}000,00\u{a0}€");
    }

    #[test]
    fn test_huge_amount_is_not_truncated() {
        assert_eq!(
            format_currency(Some(2e20)),
            "200\u{202f}000\u{202f}000\u{202f}000\u{202f}000\u{202f}000\u{202f}000,00\u{a0}€"
        );
    }
}
