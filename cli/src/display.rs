//! Plain-text rendering for stdout. JSON output bypasses this and serializes the values.

use agri::{
    CropPlan, Diagnosis, FarmProfile, MarketPrice, Notice, PestAlert, PricePoint, ProfileField,
    Subsidy, Turn, WeatherReport,
};

/// Reply first, then the fetched weather; notices are rendered separately for stderr.
pub fn render_turn(turn: &Turn) -> String {
    let mut out = turn.reply.text.clone();
    if let Some(w) = &turn.weather {
        out.push('\n');
        out.push_str(&render_weather(w));
    }
    out
}

pub fn render_weather(report: &WeatherReport) -> String {
    report.to_string()
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::WeatherUnavailable { reason } => format!("{} ({})", notice.message(), reason),
        _ => notice.message(),
    }
}

pub fn render_profile(profile: &FarmProfile) -> String {
    ProfileField::ALL
        .iter()
        .map(|f| {
            let value = profile.field(*f);
            format!("{}: {}", f, if value.is_empty() { "—" } else { value.as_str() })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_pests(alerts: &[PestAlert]) -> String {
    if alerts.is_empty() {
        return "No pest alerts.".to_string();
    }
    alerts
        .iter()
        .map(|a| format!("{}\n  Detected: {} · Severity: {}", a.title, a.date, a.severity))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_calendar(plans: &[CropPlan]) -> String {
    if plans.is_empty() {
        return "No crops in profile.".to_string();
    }
    plans
        .iter()
        .map(|p| {
            format!(
                "{}\n  Sow: {}\n  Irrigation: {}\n  Fertilizer: {}\n  Harvest: {}",
                p.crop, p.sow, p.irrigate, p.fertilize, p.harvest
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_subsidies(subsidies: &[Subsidy]) -> String {
    subsidies
        .iter()
        .map(|s| format!("{}\n  Eligibility: {}", s.title, s.eligibility))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_prices(prices: &[MarketPrice]) -> String {
    prices
        .iter()
        .map(|m| format!("{}: {} · ₹{}/quintal", m.crop, m.mandi, m.price))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_history(crop: &str, history: &[PricePoint]) -> String {
    let mut lines = vec![format!("{} price history:", crop)];
    lines.extend(history.iter().map(|p| format!("  {}: ₹{}", p.date, p.price)));
    lines.join("\n")
}

pub fn render_diagnosis(diagnosis: &Diagnosis) -> String {
    format!("{}\n  {}", diagnosis.image.display(), diagnosis.finding)
}
