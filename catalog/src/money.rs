//! Price helpers. Prices are held as integer cents everywhere; strings only
//! appear at the edges (display, and legacy catalog files).

use crate::{CatalogError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PRICE_RE: Regex = Regex::new(r"^\$?(\d{1,12})(?:\.(\d{1,2}))?$").expect("valid regex");
}

/// Render cents as a dollar amount, e.g. `13900` -> `$139.00`.
pub fn format_price(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Parse a decimal price string (`$139.00`, `139`, `139.5`) into cents.
pub fn parse_price(raw: &str) -> Result<u64> {
    let invalid = || CatalogError::InvalidPrice(raw.to_string());
    let caps = PRICE_RE.captures(raw.trim()).ok_or_else(invalid)?;
    let whole: u64 = caps.get(1).ok_or_else(invalid)?.as_str().parse().map_err(|_| invalid())?;
    let frac = match caps.get(2).map(|m| m.as_str()) {
        None => 0,
        Some(d) if d.len() == 1 => d.parse::<u64>().map_err(|_| invalid())? * 10,
        Some(d) => d.parse::<u64>().map_err(|_| invalid())?,
    };
    Ok(whole * 100 + frac)
}
