pub const DEFAULT_OPERATING_DAYS: f64 = 22.0;

/// Renders a payback period given in months, e.g. "1 year 2 months" or "11 days".
pub fn format_payback_period(months: f64, operating_days: f64) -> String {
    if months == 0.0 {
        return "Immediate".to_string();
    }
    if !months.is_finite() || months < 0.0 {
        return "Never".to_string();
    }

    let operating_days = if operating_days.is_finite() && operating_days != 0.0 {
        operating_days
    } else {
        DEFAULT_OPERATING_DAYS
    };

    let years = (months / 12.0).floor();
    let whole_months = (months % 12.0).floor();
    let days = (months.fract() * operating_days).round();

    if years == 0.0 && whole_months == 0.0 {
        return if days > 0.0 {
            plural(days, "day")
        } else {
            "Less than 1 day".to_string()
        };
    }

    let mut parts = Vec::new();
    if years > 0.0 {
        parts.push(plural(years, "year"));
    }
    if whole_months > 0.0 {
        parts.push(plural(whole_months, "month"));
    }
    parts.join(" ")
}

fn plural(count: f64, unit: &str) -> String {
    if count == 1.0 {
        format!("{count:.0} {unit}")
    } else {
        format!("{count:.0} {unit}s")
    }
}
