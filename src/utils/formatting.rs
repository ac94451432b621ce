//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `8.25` → `"8.25 h"`.
pub fn fmt_hours(hours: f64) -> String {
    format!("{:.2} h", hours)
}

/// Two decimals with thousands separators: `12345.6` → `"12,345.60"`.
pub fn fmt_money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, dec_part)
}

pub fn fmt_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_grouped_by_thousands() {
        assert_eq!(fmt_money(0.0), "0.00");
        assert_eq!(fmt_money(885.96), "885.96");
        assert_eq!(fmt_money(12345.6), "12,345.60");
        assert_eq!(fmt_money(-1234567.891), "-1,234,567.89");
    }

    #[test]
    fn hours_use_two_decimals() {
        assert_eq!(fmt_hours(8.25), "8.25 h");
        assert_eq!(fmt_hours(32.0), "32.00 h");
    }
}
