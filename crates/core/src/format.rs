//! Display formatting for amounts, counts and dates.
//!
//! Used by the CLI's table output; mirrors what the clinic staff see in
//! the views (dollar amounts with two decimals, thousands separators,
//! long-form Spanish dates).

use chrono::{Datelike, NaiveDate};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Format a dollar amount: `$1,234.56`. Non-finite values render as the
/// zero amount rather than leaking `NaN` into the UI.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0.00".to_owned();
    }
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let sign = if negative { "-" } else { "" };
    format!("{sign}${}.{frac:02}", group_thousands(whole))
}

/// Format an optional amount, absent values rendering as `$0.00`.
pub fn format_currency_opt(value: Option<f64>) -> String {
    format_currency(value.unwrap_or(0.0))
}

/// Format an integer count with thousands separators.
pub fn format_number(value: i64) -> String {
    if value < 0 {
        format!("-{}", group_thousands(value.unsigned_abs()))
    } else {
        group_thousands(value as u64)
    }
}

/// Format an ISO date string (`YYYY-MM-DD`) as a long-form Spanish date,
/// e.g. `20 de marzo de 1992`. Empty input yields the empty string;
/// anything unparseable passes through unchanged so bad server data stays
/// visible instead of vanishing.
pub fn format_date(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => format!(
            "{} de {} de {}",
            date.day(),
            MONTHS_ES[date.month0() as usize],
            date.year()
        ),
        Err(_) => value.to_owned(),
    }
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_and_pads_cents() {
        assert_eq!(format_currency(1234567.5), "$1,234,567.50");
        assert_eq!(format_currency(35.0), "$35.00");
        assert_eq!(format_currency(0.555), "$0.56");
        assert_eq!(format_currency(-80.4), "-$80.40");
    }

    #[test]
    fn currency_absorbs_non_finite_and_absent() {
        assert_eq!(format_currency(f64::NAN), "$0.00");
        assert_eq!(format_currency_opt(None), "$0.00");
    }

    #[test]
    fn numbers_group_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(-25000), "-25,000");
    }

    #[test]
    fn dates_render_in_spanish_long_form() {
        assert_eq!(format_date("1992-03-20"), "20 de marzo de 1992");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }
}
