//! Builds an [`Assistant`] wired to the terminal from settings and flags.

use std::path::PathBuf;
use std::sync::Arc;

use agri::{
    Assistant, Locale, MockWeatherFetcher, MuteSynthesizer, ProfileStoreError, SpeechError,
    SpeechSynthesizer, SqliteProfileStore,
};
use config::Settings;

use crate::{ConsoleSynthesizer, StdinRecognizer};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("profile store: {0}")]
    Store(#[from] ProfileStoreError),
    #[error(transparent)]
    Locale(#[from] SpeechError),
}

/// Command-line overrides on top of [`Settings`].
#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    pub profile_db: Option<PathBuf>,
    pub locale: Option<String>,
    /// Echo spoken replies on stderr.
    pub speak: bool,
}

/// Opens the SQLite profile store and builds the assistant with the mock weather service,
/// stdin recognition and (optionally) console speech.
pub async fn open_assistant(
    settings: &Settings,
    opts: &SessionOptions,
) -> Result<Assistant, SessionError> {
    let locale: Locale = opts.locale.as_deref().unwrap_or(settings.locale.as_str()).parse()?;
    let db = opts.profile_db.as_ref().unwrap_or(&settings.profile_db);
    tracing::debug!(db = %db.display(), %locale, "opening assistant");

    let synthesizer: Arc<dyn SpeechSynthesizer> = if opts.speak {
        Arc::new(ConsoleSynthesizer)
    } else {
        Arc::new(MuteSynthesizer)
    };
    let assistant = Assistant::builder(
        Arc::new(SqliteProfileStore::new(db)?),
        Arc::new(MockWeatherFetcher::new()),
    )
    .synthesizer(synthesizer)
    .recognizer(Arc::new(StdinRecognizer))
    .locale(locale)
    .build()
    .await?;
    Ok(assistant)
}
