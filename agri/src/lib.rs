//! # Agri
//!
//! Farmer assistant core: a rule-based query interpreter plus the collaborators it drives.
//!
//! ## Main modules
//!
//! - [`query`]: [`Query`], [`interpret`]: keyword classification into an [`Intent`] and a
//!   canned [`Reply`] with an optional [`Action`].
//! - [`assistant`]: [`Assistant`], the session that speaks replies, runs actions and edits the profile.
//! - [`profile`]: [`FarmProfile`], [`ProfileStore`] ([`InMemoryProfileStore`], [`SqliteProfileStore`]).
//! - [`weather`]: [`WeatherFetcher`], [`MockWeatherFetcher`].
//! - [`speech`]: [`SpeechRecognizer`], [`SpeechSynthesizer`], [`Locale`].
//! - [`dashboard`]: pest alerts, crop calendar, subsidies, market prices, image diagnosis.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agri::{Assistant, InMemoryProfileStore, MockWeatherFetcher, Query};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut assistant = Assistant::builder(
//!     Arc::new(InMemoryProfileStore::new()),
//!     Arc::new(MockWeatherFetcher::new()),
//! )
//! .build()
//! .await
//! .unwrap();
//!
//! let turn = assistant.handle_query(Query::typed("any pest nearby?")).await;
//! println!("{}", turn.reply.text);
//! # }
//! ```

pub mod assistant;
pub mod dashboard;
pub mod profile;
pub mod query;
pub mod speech;
pub mod weather;

pub use assistant::{Assistant, AssistantBuilder, AssistantError, Notice, Turn};
pub use dashboard::{
    crop_calendar, price_history, seed_market_prices, seed_pest_alerts, seed_subsidies, CropPlan,
    Diagnosis, DiagnosisError, MarketPrice, MockDiagnoser, PestAlert, PestDiagnoser, PricePoint,
    Severity, Subsidy,
};
pub use profile::{
    FarmProfile, InMemoryProfileStore, Irrigation, ProfileError, ProfileField, ProfileStore,
    ProfileStoreError, SoilType, SqliteProfileStore,
};
pub use query::{classify, interpret, Action, Intent, Query, QueryContext, QueryOrigin, Reply};
pub use speech::{
    Locale, MuteSynthesizer, RecordingSynthesizer, ScriptedRecognizer, SpeechError,
    SpeechRecognizer, SpeechSynthesizer, SynthesisEvent, Utterance,
};
pub use weather::{MockWeatherFetcher, WeatherError, WeatherFetcher, WeatherReport};
