use serde::{Deserialize, Serialize};

/// User-facing notice raised by an assistant operation. Notices end the triggering
/// action; nothing is retried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    VoiceUnsupported,
    ListeningFailed { reason: String },
    LocationMissing,
    WeatherUnavailable { reason: String },
    ProfileSaved,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::VoiceUnsupported => "Voice not supported on this device".to_string(),
            Notice::ListeningFailed { reason } => format!("Voice input failed: {}", reason),
            Notice::LocationMissing => "Please set your location in profile first.".to_string(),
            Notice::WeatherUnavailable { .. } => {
                "Weather fetch failed - check API key or network.".to_string()
            }
            Notice::ProfileSaved => "Profile saved".to_string(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
