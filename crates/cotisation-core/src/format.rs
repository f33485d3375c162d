//! Display formatting helpers

use chrono::{DateTime, Utc};

/// Format an amount in CFA francs with thousands grouping ("12 345 FCFA")
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.insert(0, ' ');
        }
        grouped.insert(0, c);
    }
    if rounded < 0 {
        grouped.insert(0, '-');
    }
    format!("{} FCFA", grouped)
}

/// Format a resolved date as dd/mm/yyyy, "-" when unresolved
pub fn format_date(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(t) => t.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}

/// Format percentage
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.prec$}%", value, prec = decimals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0 FCFA");
        assert_eq!(format_amount(500.0), "500 FCFA");
        assert_eq!(format_amount(5000.0), "5 000 FCFA");
        assert_eq!(format_amount(1_234_567.0), "1 234 567 FCFA");
        assert_eq!(format_amount(-2500.0), "-2 500 FCFA");
        assert_eq!(format_amount(999.6), "1 000 FCFA");
    }

    #[test]
    fn test_format_date() {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date(Some(t)), "15/01/2024");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(60.0, 1), "60.0%");
        assert_eq!(format_percent(12.345, 2), "12.35%");
    }
}
