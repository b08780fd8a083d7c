//! Turns the free-text numeric columns of the source sheet into numbers.
//!
//! Listings quote ranges ("300-450 hp", "$30,000-$45,000"); every parser keeps
//! the upper bound. Anything that does not parse becomes `None`.

/// `"450 hp"` → 450, `"300-450 hp"` → 450.
pub fn parse_horsepower(raw: &str) -> Option<i64> {
    let token = if raw.contains('-') {
        raw.split('-').nth(1)?.split_whitespace().next()?
    } else {
        raw.split_whitespace().next()?
    };
    token.parse().ok()
}

/// `"$52,000"` → 52000, `"$30,000-$45,000"` → 45000.
pub fn parse_price(raw: &str) -> Option<i64> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let amount = if cleaned.contains('-') {
        cleaned.split('-').nth(1)?
    } else {
        cleaned.as_str()
    };
    amount.trim().parse().ok()
}

/// `"3.5 sec"` → 3.5. A literal NaN counts as missing.
pub fn parse_acceleration(raw: &str) -> Option<f64> {
    raw.replace("sec", "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
}
