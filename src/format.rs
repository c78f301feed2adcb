use rust_decimal::Decimal;

const PLACEHOLDER: &str = "--";

/// Compact uptime: "45s", "12m 05s", "3h 07m", "2d 04h".
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return PLACEHOLDER.into();
    }

    let total = secs.floor() as u64;
    let (days, hours, mins, s) = (total / 86_400, total / 3_600 % 24, total / 60 % 60, total % 60);

    if days > 0 {
        format!("{days}d {hours:02}h")
    } else if hours > 0 {
        format!("{hours}h {mins:02}m")
    } else if mins > 0 {
        format!("{mins}m {s:02}s")
    } else {
        format!("{s}s")
    }
}

/// Round-trip latency: "350ms" below a second, "1.25s" above.
pub fn format_latency(ms: f64) -> String {
    if !ms.is_finite() || ms < 0.0 {
        return PLACEHOLDER.into();
    }

    if ms < 1000.0 {
        format!("{}ms", ms.round() as u64)
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}

/// Dollar amount with thousands separators: "$1,234.50", "-$12.00".
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}${grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45.9), "45s");
        assert_eq!(format_duration(725.0), "12m 05s");
        assert_eq!(format_duration(3.0 * 3600.0 + 7.0 * 60.0), "3h 07m");
        assert_eq!(format_duration(2.0 * 86_400.0 + 4.0 * 3600.0 + 59.0), "2d 04h");
        assert_eq!(format_duration(-1.0), "--");
        assert_eq!(format_duration(f64::NAN), "--");
    }

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(349.6), "350ms");
        assert_eq!(format_latency(1250.0), "1.25s");
        assert_eq!(format_latency(f64::INFINITY), "--");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(Decimal::new(12345, 1)), "$1,234.50");
        assert_eq!(format_usd(Decimal::from(-12)), "-$12.00");
        assert_eq!(format_usd(Decimal::new(999, 0)), "$999.00");
        assert_eq!(format_usd(Decimal::from(1_000_000)), "$1,000,000.00");
        assert_eq!(format_usd(Decimal::new(-1, 3)), "$0.00");
    }
}
