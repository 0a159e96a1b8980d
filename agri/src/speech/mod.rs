//! Speech collaborators: a recognizer that yields one transcript per listening session and
//! a fire-and-forget synthesizer.

use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Language tag for recognition and synthesis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "ml-IN")]
    Malayalam,
    #[serde(rename = "en-IN")]
    English,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Malayalam => "ml-IN",
            Locale::English => "en-IN",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = SpeechError;

    /// Accepts the full tag (`ml-IN`, `en_IN`) or the bare language (`ml`, `en`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s.trim().split(['-', '_']).next().unwrap_or_default();
        match lang.to_ascii_lowercase().as_str() {
            "ml" => Ok(Locale::Malayalam),
            "en" => Ok(Locale::English),
            _ => Err(SpeechError::UnsupportedLocale(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("speech recognition is not supported")]
    Unsupported,
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),
    #[error("recognition failed: {0}")]
    Recognition(String),
}

/// Delivers one finalized transcript per listening session.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listens once. `Ok(None)` means the session ended without speech.
    async fn listen(&self, locale: Locale) -> Result<Option<String>, SpeechError>;
}

/// Text to speak in a given locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub locale: Locale,
}

/// Fire-and-forget speech output.
pub trait SpeechSynthesizer: Send + Sync {
    /// Stops any utterance still playing.
    fn cancel(&self);

    /// Queues `utterance`; returns immediately.
    fn speak(&self, utterance: Utterance);
}

/// Replays a fixed list of transcripts, one per `listen`. `None` entries end a session silently.
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    script: Mutex<VecDeque<Option<String>>>,
}

impl ScriptedRecognizer {
    pub fn new<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(transcripts.into_iter().map(|t| t.map(Into::into)).collect()),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn listen(&self, _locale: Locale) -> Result<Option<String>, SpeechError> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| SpeechError::Recognition("lock".into()))?;
        Ok(script.pop_front().flatten())
    }
}

/// Synthesizer call, as seen by [`RecordingSynthesizer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SynthesisEvent {
    Cancel,
    Speak(Utterance),
}

/// Records every call instead of producing audio.
#[derive(Debug, Default)]
pub struct RecordingSynthesizer {
    events: Mutex<Vec<SynthesisEvent>>,
}

impl RecordingSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SynthesisEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Texts passed to `speak`, in order.
    pub fn spoken(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SynthesisEvent::Speak(u) => Some(u.text),
                SynthesisEvent::Cancel => None,
            })
            .collect()
    }

    fn push(&self, event: SynthesisEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn cancel(&self) {
        self.push(SynthesisEvent::Cancel);
    }

    fn speak(&self, utterance: Utterance) {
        self.push(SynthesisEvent::Speak(utterance));
    }
}

/// Discards all speech.
#[derive(Debug, Default, Clone, Copy)]
pub struct MuteSynthesizer;

impl SpeechSynthesizer for MuteSynthesizer {
    fn cancel(&self) {}

    fn speak(&self, _utterance: Utterance) {}
}
