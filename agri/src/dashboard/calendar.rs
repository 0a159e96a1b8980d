//! Crop calendar: one operations plan per crop in the profile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropPlan {
    pub crop: String,
    pub sow: NaiveDate,
    pub irrigate: String,
    pub fertilize: String,
    pub harvest: NaiveDate,
}

impl CropPlan {
    /// Season plan used for every crop until per-crop agronomy data exists.
    fn standard(crop: &str) -> Self {
        Self {
            crop: crop.to_string(),
            sow: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default(),
            irrigate: "Every 3 days".to_string(),
            fertilize: "At 30 and 60 days".to_string(),
            harvest: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap_or_default(),
        }
    }
}

/// Builds the calendar for `crops`, preserving their order.
pub fn crop_calendar<S: AsRef<str>>(crops: &[S]) -> Vec<CropPlan> {
    crops.iter().map(|c| CropPlan::standard(c.as_ref())).collect()
}
