use serde::{Deserialize, Serialize};

/// A government scheme the farmer may apply to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsidy {
    pub id: String,
    pub title: String,
    pub eligibility: String,
}

pub fn seed_subsidies() -> Vec<Subsidy> {
    vec![
        Subsidy {
            id: "pmkisan".to_string(),
            title: "PM-KISAN - Income support for farmers".to_string(),
            eligibility: "All small & marginal farmers".to_string(),
        },
        Subsidy {
            id: "soilhealth".to_string(),
            title: "Soil Health Card Scheme - Free testing".to_string(),
            eligibility: "All farmers".to_string(),
        },
    ]
}
