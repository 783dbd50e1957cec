pub mod about;
pub mod admin;
pub mod bulletin;
pub mod contact;
pub mod home;
pub mod login;
pub mod products;
pub mod register;

/// Price with thousands separators, or "Price on request" when unset.
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price else {
        return "Price on request".to_string();
    };
    let fixed = format!("{:.2}", price.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    if cents == "00" {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{cents}")
    }
}

/// Trimmed form input, `None` when left blank.
pub fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
