//! Mandi prices and a synthetic price history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Latest price for a crop at a mandi, in rupees per quintal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub crop: String,
    pub mandi: String,
    pub price: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: u32,
}

/// Base price used for crops with no listed mandi price.
const UNLISTED_BASE_PRICE: u32 = 1000;

pub fn seed_market_prices() -> Vec<MarketPrice> {
    vec![
        MarketPrice {
            crop: "Rice".to_string(),
            mandi: "Thrissur".to_string(),
            price: 2100,
        },
        MarketPrice {
            crop: "Banana".to_string(),
            mandi: "Kozhikode".to_string(),
            price: 1200,
        },
    ]
}

/// Three monthly points around the listed price of `crop` (exact, case-sensitive name match).
///
/// The series is `p`, `p + 50`, `p - 100`; an unlisted crop uses a base of 1000.
pub fn price_history(prices: &[MarketPrice], crop: &str) -> Vec<PricePoint> {
    let base = prices
        .iter()
        .find(|m| m.crop == crop)
        .map(|m| m.price)
        .unwrap_or(UNLISTED_BASE_PRICE);
    [
        ((2025, 6, 1), base),
        ((2025, 7, 1), base.saturating_add(50)),
        ((2025, 8, 1), base.saturating_sub(100)),
    ]
    .into_iter()
    .map(|((y, m, d), price)| PricePoint {
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        price,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_follows_listed_price() {
        let h = price_history(&seed_market_prices(), "Rice");
        let prices: Vec<u32> = h.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![2100, 2150, 2000]);
        assert_eq!(h[0].date.to_string(), "2025-06-01");
        assert_eq!(h[2].date.to_string(), "2025-08-01");
    }

    #[test]
    fn unlisted_crop_uses_base_price() {
        let h = price_history(&seed_market_prices(), "Pepper");
        let prices: Vec<u32> = h.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1000, 1050, 900]);
    }

    #[test]
    fn crop_match_is_exact() {
        let h = price_history(&seed_market_prices(), "rice");
        assert_eq!(h[0].price, 1000);
    }
}
