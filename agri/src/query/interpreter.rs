//! Rule-based query interpreter: keyword containment over a fixed, ordered rule table.
//!
//! Matching is done on the lower-cased text. The first rule with a matching keyword
//! wins; rules are checked Weather → PestAlert → Subsidy, and anything else falls
//! through to [`Intent::Unknown`]. [`interpret`] is total: it never fails.

use serde::{Deserialize, Serialize};

use crate::dashboard::PestAlert;

/// Reply for the weather intent; the actual report is produced by the fetch action.
pub const WEATHER_REPLY: &str = "Fetching the latest weather for your location...";

/// Prefix of the pest-alert reply; alert titles follow, joined by [`ALERT_SEPARATOR`].
pub const PEST_REPLY_PREFIX: &str = "Nearby pest alerts: ";

/// Separator between alert titles in the pest-alert reply.
pub const ALERT_SEPARATOR: &str = "; ";

pub const SUBSIDY_REPLY: &str =
    "You may be eligible for PM-Kisan and state subsidies. Open the subsidies panel.";

/// Bilingual greeting/help returned when no keyword matches.
pub const FALLBACK_REPLY: &str =
    "നമസ്കാരം! നിങ്ങൾക്ക് എന്ത് സഹായം വേണം? (Try: 'weather', 'pest', 'subsidy')";

/// Classified purpose of a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Weather,
    PestAlert,
    Subsidy,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Weather => "weather",
            Intent::PestAlert => "pest_alert",
            Intent::Subsidy => "subsidy",
            Intent::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effect the caller should run after showing the reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    FetchWeather,
}

/// Interpreter output: reply text plus at most one action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

/// Data the interpreter may read while composing a reply.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryContext<'a> {
    pub alerts: &'a [PestAlert],
}

impl<'a> QueryContext<'a> {
    pub fn new(alerts: &'a [PestAlert]) -> Self {
        Self { alerts }
    }
}

/// One row of the rule table: an intent and the tokens (English, Malayalam) that select it.
struct Rule {
    intent: Intent,
    keywords: &'static [&'static str],
}

/// Checked in order; first match wins.
const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Weather,
        keywords: &["weather", "വേന"],
    },
    Rule {
        intent: Intent::PestAlert,
        keywords: &["pest", "കീടം"],
    },
    Rule {
        intent: Intent::Subsidy,
        keywords: &["subsidy", "സബ്സിഡി"],
    },
];

/// Returns the intent of `text` without composing a reply.
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Unknown)
}

/// Classifies `text` and composes the reply for it.
pub fn interpret(text: &str, ctx: &QueryContext<'_>) -> Reply {
    let intent = classify(text);
    tracing::debug!(intent = %intent, "query classified");
    match intent {
        Intent::Weather => Reply {
            intent,
            text: WEATHER_REPLY.to_string(),
            action: Some(Action::FetchWeather),
        },
        Intent::PestAlert => Reply {
            intent,
            text: pest_reply(ctx.alerts),
            action: None,
        },
        Intent::Subsidy => Reply {
            intent,
            text: SUBSIDY_REPLY.to_string(),
            action: None,
        },
        Intent::Unknown => Reply {
            intent,
            text: FALLBACK_REPLY.to_string(),
            action: None,
        },
    }
}

fn pest_reply(alerts: &[PestAlert]) -> String {
    let titles: Vec<&str> = alerts.iter().map(|a| a.title.as_str()).collect();
    format!("{}{}", PEST_REPLY_PREFIX, titles.join(ALERT_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{seed_pest_alerts, Severity};

    fn alert(id: u32, title: &str) -> PestAlert {
        PestAlert {
            id,
            title: title.to_string(),
            severity: Severity::Low,
            date: chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        }
    }

    #[test]
    fn weather_in_any_casing_triggers_fetch() {
        for text in ["weather", "WEATHER today", "How is the WeAtHeR?", "weather today"] {
            let reply = interpret(text, &QueryContext::default());
            assert_eq!(reply.intent, Intent::Weather, "{}", text);
            assert_eq!(reply.action, Some(Action::FetchWeather));
            assert_eq!(reply.text, WEATHER_REPLY);
        }
    }

    #[test]
    fn casing_does_not_change_classification() {
        let ctx = QueryContext::default();
        assert_eq!(interpret("WEATHER today", &ctx), interpret("weather today", &ctx));
        assert_eq!(classify("PEST"), classify("pest"));
        assert_eq!(classify("SubSidy"), Intent::Subsidy);
    }

    #[test]
    fn malayalam_tokens_match() {
        assert_eq!(classify("ഇന്ന് വേനൽ എങ്ങനെ"), Intent::Weather);
        assert_eq!(classify("കീടം ഉണ്ടോ"), Intent::PestAlert);
        assert_eq!(classify("സബ്സിഡി വിവരം"), Intent::Subsidy);
    }

    #[test]
    fn pest_reply_lists_every_title_once_in_order() {
        let alerts = seed_pest_alerts();
        let reply = interpret("any pest nearby?", &QueryContext::new(&alerts));
        assert_eq!(reply.intent, Intent::PestAlert);
        assert_eq!(reply.action, None);
        assert_eq!(
            reply.text,
            "Nearby pest alerts: Brown Plant Hopper - Nearby; Stem borer reports increasing"
        );
        for a in &alerts {
            assert_eq!(reply.text.matches(a.title.as_str()).count(), 1);
        }
    }

    #[test]
    fn pest_reply_with_single_and_no_alerts() {
        let one = [alert(7, "Leaf folder")];
        let reply = interpret("pest", &QueryContext::new(&one));
        assert_eq!(reply.text, "Nearby pest alerts: Leaf folder");

        let reply = interpret("pest", &QueryContext::new(&[]));
        assert_eq!(reply.text, PEST_REPLY_PREFIX);
    }

    #[test]
    fn subsidy_reply_is_fixed() {
        let alerts = seed_pest_alerts();
        let ctx = QueryContext::new(&alerts);
        let a = interpret("subsidy", &ctx);
        let b = interpret("tell me about subsidy schemes for banana and rice", &ctx);
        assert_eq!(a.intent, Intent::Subsidy);
        assert_eq!(a.text, SUBSIDY_REPLY);
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_and_empty_fall_back() {
        for text in ["", "   ", "hello", "market price of rice"] {
            let reply = interpret(text, &QueryContext::default());
            assert_eq!(reply.intent, Intent::Unknown, "{:?}", text);
            assert_eq!(reply.text, FALLBACK_REPLY);
            assert_eq!(reply.action, None);
        }
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(classify("weather and pest"), Intent::Weather);
        assert_eq!(classify("pest before weather"), Intent::Weather);
        assert_eq!(classify("pest subsidy"), Intent::PestAlert);
        assert_eq!(classify("subsidy for pest control"), Intent::PestAlert);
    }

    #[test]
    fn reply_serializes_without_empty_action() {
        let reply = interpret("hi", &QueryContext::default());
        let v = serde_json::to_value(&reply).unwrap();
        assert_eq!(v["intent"], "unknown");
        assert!(v.get("action").is_none());

        let reply = interpret("weather", &QueryContext::default());
        let v = serde_json::to_value(&reply).unwrap();
        assert_eq!(v["action"], "fetch_weather");
    }
}
