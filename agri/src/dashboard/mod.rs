//! Dashboard data: pest alerts, crop calendar, subsidies, market prices and image diagnosis.
//!
//! All sources are local mock data; the seed values mirror what the dashboard shows
//! before any backend is wired in.

mod calendar;
mod diagnosis;
mod market;
mod pest;
mod subsidy;

pub use calendar::{crop_calendar, CropPlan};
pub use diagnosis::{
    Diagnosis, DiagnosisError, MockDiagnoser, PestDiagnoser, ANALYZING_STATUS,
    DEFAULT_DIAGNOSIS_DELAY, LEAF_BLAST_FINDING,
};
pub use market::{price_history, seed_market_prices, MarketPrice, PricePoint};
pub use pest::{seed_pest_alerts, PestAlert, Severity};
pub use subsidy::{seed_subsidies, Subsidy};
