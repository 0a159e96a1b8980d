//! User queries and their interpretation.

mod interpreter;

pub use interpreter::{
    classify, interpret, Action, Intent, QueryContext, Reply, ALERT_SEPARATOR, FALLBACK_REPLY,
    PEST_REPLY_PREFIX, SUBSIDY_REPLY, WEATHER_REPLY,
};

use serde::{Deserialize, Serialize};

/// Where the query text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOrigin {
    Typed,
    Spoken,
}

/// Raw query text with its origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub origin: QueryOrigin,
}

impl Query {
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: QueryOrigin::Typed,
        }
    }

    pub fn spoken(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: QueryOrigin::Spoken,
        }
    }
}
