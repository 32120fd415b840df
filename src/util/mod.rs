pub(crate) mod browser;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDate};

pub(crate) const CURRENCY_SYMBOL: &str = "¥";

/// Formats a price as whole yen with grouped thousands: `1234.5` -> `¥1,235`.
///
/// Rounds half away from zero, matching the browser's JPY currency formatter.
pub(crate) fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "-".to_string();
    }

    let rounded = price.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{CURRENCY_SYMBOL}{grouped}")
    } else {
        format!("{CURRENCY_SYMBOL}{grouped}")
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// `2024-01-05T00:00:00Z` -> `2024/1/5`. Unparseable input is shown as-is.
pub(crate) fn format_purchase_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(d) => d.format("%Y/%-m/%-d").to_string(),
        None => raw.to_string(),
    }
}

/// Value for an `<input type="date">`: the date part of a stored timestamp.
pub(crate) fn date_input_value(raw: &str) -> String {
    match parse_date(raw) {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => raw.split('T').next().unwrap_or_default().to_string(),
    }
}

/// Uploaded images come back as paths on the API host, not the page origin.
pub(crate) fn resolve_image_url(api_host: &str, image_url: &str) -> String {
    let url = image_url.trim();
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:") {
        return url.to_string();
    }
    if url.starts_with('/') {
        format!("{api_host}{url}")
    } else {
        format!("{api_host}/{url}")
    }
}

pub(crate) fn data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() {
        "application/octet-stream"
    } else {
        mime
    };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Case-insensitive substring test; an empty needle matches everything.
pub(crate) fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}
