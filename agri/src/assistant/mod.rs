//! Assistant session: owns the collaborators, runs queries end to end.
//!
//! A turn is: interpret the text against the current alerts, cancel whatever is still
//! being spoken, speak the new reply, then run the reply's action (only weather fetch
//! exists). The reply spoken is always the one computed in the same turn.

mod notice;

pub use notice::Notice;

use std::sync::Arc;

use serde::Serialize;

use crate::dashboard::{crop_calendar, seed_pest_alerts, CropPlan, PestAlert};
use crate::profile::{FarmProfile, ProfileError, ProfileField, ProfileStore, ProfileStoreError};
use crate::query::{interpret, Action, Query, QueryContext, Reply};
use crate::speech::{
    Locale, MuteSynthesizer, SpeechError, SpeechRecognizer, SpeechSynthesizer, Utterance,
};
use crate::weather::{WeatherError, WeatherFetcher, WeatherReport};

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error(transparent)]
    Store(#[from] ProfileStoreError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Result of one query.
#[derive(Clone, Debug, Serialize)]
pub struct Turn {
    pub query: Query,
    pub reply: Reply,
    /// Report fetched by this turn's action, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

/// Builds an [`Assistant`]; the profile is loaded from the store in [`AssistantBuilder::build`].
pub struct AssistantBuilder {
    store: Arc<dyn ProfileStore>,
    weather: Arc<dyn WeatherFetcher>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    locale: Locale,
    alerts: Vec<PestAlert>,
}

impl AssistantBuilder {
    pub fn new(store: Arc<dyn ProfileStore>, weather: Arc<dyn WeatherFetcher>) -> Self {
        Self {
            store,
            weather,
            synthesizer: Arc::new(MuteSynthesizer),
            recognizer: None,
            locale: Locale::default(),
            alerts: seed_pest_alerts(),
        }
    }

    pub fn synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Without a recognizer, [`Assistant::listen`] reports [`Notice::VoiceUnsupported`].
    pub fn recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn alerts(mut self, alerts: Vec<PestAlert>) -> Self {
        self.alerts = alerts;
        self
    }

    pub async fn build(self) -> Result<Assistant, ProfileStoreError> {
        let profile = self.store.load().await?;
        tracing::debug!(crops = profile.crops.len(), "profile loaded");
        Ok(Assistant {
            store: self.store,
            weather: self.weather,
            synthesizer: self.synthesizer,
            recognizer: self.recognizer,
            locale: self.locale,
            profile,
            alerts: self.alerts,
            last_weather: None,
            last_reply: None,
        })
    }
}

pub struct Assistant {
    store: Arc<dyn ProfileStore>,
    weather: Arc<dyn WeatherFetcher>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    locale: Locale,
    profile: FarmProfile,
    alerts: Vec<PestAlert>,
    last_weather: Option<WeatherReport>,
    last_reply: Option<Reply>,
}

impl Assistant {
    pub fn builder(
        store: Arc<dyn ProfileStore>,
        weather: Arc<dyn WeatherFetcher>,
    ) -> AssistantBuilder {
        AssistantBuilder::new(store, weather)
    }

    pub fn profile(&self) -> &FarmProfile {
        &self.profile
    }

    pub fn alerts(&self) -> &[PestAlert] {
        &self.alerts
    }

    pub fn set_alerts(&mut self, alerts: Vec<PestAlert>) {
        self.alerts = alerts;
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Most recently displayed weather; kept when a later fetch fails.
    pub fn last_weather(&self) -> Option<&WeatherReport> {
        self.last_weather.as_ref()
    }

    pub fn last_reply(&self) -> Option<&Reply> {
        self.last_reply.as_ref()
    }

    pub fn crop_calendar(&self) -> Vec<CropPlan> {
        crop_calendar(&self.profile.crops)
    }

    /// Interprets, speaks and acts on one query. Never fails; problems become notices.
    pub async fn handle_query(&mut self, query: Query) -> Turn {
        let reply = interpret(&query.text, &QueryContext::new(&self.alerts));
        tracing::info!(origin = ?query.origin, intent = %reply.intent, "query handled");

        self.synthesizer.cancel();
        self.synthesizer.speak(Utterance {
            text: reply.text.clone(),
            locale: self.locale,
        });
        self.last_reply = Some(reply.clone());

        let mut turn = Turn {
            query,
            reply,
            weather: None,
            notices: Vec::new(),
        };
        if let Some(Action::FetchWeather) = turn.reply.action {
            match self.fetch_weather().await {
                Ok(report) => turn.weather = Some(report),
                Err(notice) => turn.notices.push(notice),
            }
        }
        turn
    }

    /// Runs one listening session and handles the transcript as a spoken query.
    ///
    /// `Ok(None)` when the session ended without a transcript.
    pub async fn listen(&mut self) -> Result<Option<Turn>, Notice> {
        let Some(recognizer) = self.recognizer.clone() else {
            return Err(Notice::VoiceUnsupported);
        };
        let transcript = match recognizer.listen(self.locale).await {
            Ok(t) => t,
            Err(SpeechError::Unsupported) => return Err(Notice::VoiceUnsupported),
            Err(e) => {
                tracing::warn!(error = %e, "listening failed");
                return Err(Notice::ListeningFailed {
                    reason: e.to_string(),
                });
            }
        };
        match transcript {
            Some(text) => Ok(Some(self.handle_query(Query::spoken(text)).await)),
            None => Ok(None),
        }
    }

    /// Fetches weather for the profile location. Aborts when no location is set.
    pub async fn fetch_weather(&mut self) -> Result<WeatherReport, Notice> {
        if !self.profile.has_location() {
            return Err(Notice::LocationMissing);
        }
        let location = self.profile.location.trim().to_string();
        match self.weather.fetch(&location).await {
            Ok(report) => {
                tracing::info!(location = %location, "weather fetched");
                self.last_weather = Some(report.clone());
                Ok(report)
            }
            Err(WeatherError::NoLocation) => Err(Notice::LocationMissing),
            Err(e) => {
                tracing::warn!(location = %location, error = %e, "weather fetch failed");
                Err(Notice::WeatherUnavailable {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Sets one profile field and persists the whole profile. On error nothing changes.
    pub async fn update_profile(
        &mut self,
        field: ProfileField,
        value: &str,
    ) -> Result<&FarmProfile, AssistantError> {
        let mut next = self.profile.clone();
        next.set_field(field, value)?;
        self.store.save(&next).await?;
        self.profile = next;
        Ok(&self.profile)
    }

    /// Explicitly writes the current profile.
    pub async fn save_profile(&self) -> Result<Notice, AssistantError> {
        self.store.save(&self.profile).await?;
        Ok(Notice::ProfileSaved)
    }

    /// Clears the stored profile and returns to the default one.
    pub async fn reset_profile(&mut self) -> Result<&FarmProfile, AssistantError> {
        self.store.reset().await?;
        self.profile = FarmProfile::default();
        Ok(&self.profile)
    }
}
