pub const NOT_AVAILABLE: &str = "N/A";

pub fn currency(value: f64) -> String {
    money(value, 2)
}

pub fn currency_whole(value: f64) -> String {
    money(value, 0)
}

pub fn count(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    grouped(value, 0)
}

pub fn percent(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{}%", grouped(value, 0))
}

pub fn roi(value: f64) -> String {
    if value == f64::INFINITY {
        "∞%".to_string()
    } else {
        percent(value)
    }
}

fn money(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let body = grouped(value.abs(), decimals);
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

fn grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }

    let is_zero = out.chars().all(|c| !c.is_ascii_digit() || c == '0');
    if value < 0.0 && !is_zero {
        format!("-{out}")
    } else {
        out
    }
}
