// Utility helpers for parsing and basic statistics.
//
// Parsers here are strict: they return `None` for anything that is not a
// clean value and leave it to the caller to decide which error to raise.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Literal that separates the label from the minute count in
/// `Time_taken(min)` cells, e.g. `"(min) 24"`.
pub const MINUTES_DELIMITER: &str = "(min) ";

/// Format of `Order_Date` cells and of the `--date-limit` flag.
pub const ORDER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a non-negative integer, tolerating surrounding whitespace only.
pub fn parse_u32_strict(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

pub fn parse_i32_strict(s: &str) -> Option<i32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i32>().ok()
}

/// Parse a finite float. `"NaN"` and `"inf"` are rejected even though
/// `str::parse` would accept them; see [`parse_optional_f64`] for columns
/// where a missing value is allowed.
pub fn parse_f64_strict(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a float cell that may be missing. Blank text or a (trimmed) `NaN`
/// gives `Ok(None)`; anything else must be a finite number.
pub fn parse_optional_f64(s: &str) -> Result<Option<f64>, ()> {
    let t = s.trim();
    if t.is_empty() || t == "NaN" {
        return Ok(None);
    }
    parse_f64_strict(t).map(Some).ok_or(())
}

/// Parse a `DD-MM-YYYY` date. No trimming and no alternate formats.
pub fn parse_order_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, ORDER_DATE_FORMAT).ok()
}

/// Take everything after the first `"(min) "` and parse it as minutes.
pub fn extract_minutes(s: &str) -> Option<u32> {
    let (_, rest) = s.split_once(MINUTES_DELIMITER)?;
    parse_u32_strict(rest)
}

/// Week of the year with Sunday as the first day of the week, `"00"`..`"53"`.
pub fn week_of_year(date: NaiveDate) -> String {
    date.format("%U").to_string()
}

/// Arithmetic mean, `None` for an empty group.
pub fn mean(v: &[f64]) -> Option<f64> {
    if v.is_empty() {
        return None;
    }
    Some(v.iter().sum::<f64>() / v.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Undefined below two
/// observations.
pub fn sample_std_dev(v: &[f64]) -> Option<f64> {
    if v.len() < 2 {
        return None;
    }
    let m = mean(v)?;
    let sq: f64 = v.iter().map(|x| (x - m).powi(2)).sum();
    Some((sq / (v.len() - 1) as f64).sqrt())
}

/// Median of a group; sorts the slice in place.
pub fn median(v: &mut [f64]) -> Option<f64> {
    if v.is_empty() {
        return None;
    }
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    Some(match v.len() % 2 {
        1 => v[mid],
        _ => (v[mid - 1] + v[mid]) / 2.0,
    })
}

/// Fixed decimals plus thousands separators, e.g. `1,234,567.89`. The sign
/// follows the rounded text, so `-0.001` at two decimals is `0.00`.
pub fn format_number(n: f64, decimals: usize) -> String {
    let rounded = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rounded.as_str(), None),
    };
    let int_val: u64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    let nonzero = rounded.bytes().any(|b| matches!(b, b'1'..=b'9'));
    if n < 0.0 && nonzero {
        res.insert(0, '-');
    }
    res
}

/// Like [`format_number`] but renders an undefined statistic as `"-"`.
pub fn format_opt(n: Option<f64>, decimals: usize) -> String {
    match n {
        Some(v) => format_number(v, decimals),
        None => "-".to_string(),
    }
}

/// Row and group counts for console messages, e.g. `9,855`.
pub fn format_count(n: usize) -> String {
    n.to_formatted_string(&Locale::en)
}
