//! Farmer profile and its store.
//!
//! The profile is persisted as one JSON blob under [`PROFILE_KEY`]. Stores never fail a
//! load because of bad data: a missing or unparseable blob loads as [`FarmProfile::default`].

mod sqlite_store;

pub use sqlite_store::SqliteProfileStore;

use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Key of the profile blob in a store.
pub const PROFILE_KEY: &str = "agri_profile";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilType {
    #[default]
    Loam,
    Sandy,
    Clay,
    Laterite,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [
        SoilType::Loam,
        SoilType::Sandy,
        SoilType::Clay,
        SoilType::Laterite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Loam => "Loam",
            SoilType::Sandy => "Sandy",
            SoilType::Clay => "Clay",
            SoilType::Laterite => "Laterite",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Irrigation {
    #[default]
    Drip,
    Flood,
    Sprinkler,
    Manual,
}

impl Irrigation {
    pub const ALL: [Irrigation; 4] = [
        Irrigation::Drip,
        Irrigation::Flood,
        Irrigation::Sprinkler,
        Irrigation::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Irrigation::Drip => "Drip",
            Irrigation::Flood => "Flood",
            Irrigation::Sprinkler => "Sprinkler",
            Irrigation::Manual => "Manual",
        }
    }
}

fn parse_choice<T: Copy>(all: &[T], name: fn(&T) -> &'static str, s: &str) -> Option<T> {
    let s = s.trim();
    all.iter().copied().find(|v| name(v).eq_ignore_ascii_case(s))
}

impl FromStr for SoilType {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(&Self::ALL, Self::as_str, s).ok_or_else(|| ProfileError::InvalidValue {
            field: ProfileField::SoilType,
            value: s.to_string(),
        })
    }
}

impl FromStr for Irrigation {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(&Self::ALL, Self::as_str, s).ok_or_else(|| ProfileError::InvalidValue {
            field: ProfileField::Irrigation,
            value: s.to_string(),
        })
    }
}

/// Farmer and farm context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmProfile {
    pub name: String,
    /// Town or district; weather needs it.
    pub location: String,
    /// Free text, e.g. "50 cents" or "2 acre".
    pub land_size: String,
    pub soil_type: SoilType,
    pub irrigation: Irrigation,
    pub crops: Vec<String>,
}

impl Default for FarmProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            land_size: String::new(),
            soil_type: SoilType::default(),
            irrigation: Irrigation::default(),
            crops: vec!["Rice".to_string()],
        }
    }
}

impl FarmProfile {
    /// Whether a location has been entered (whitespace does not count).
    pub fn has_location(&self) -> bool {
        !self.location.trim().is_empty()
    }

    /// Sets one field from its text form. Crops are given comma separated.
    pub fn set_field(&mut self, field: ProfileField, value: &str) -> Result<(), ProfileError> {
        match field {
            ProfileField::Name => self.name = value.to_string(),
            ProfileField::Location => self.location = value.to_string(),
            ProfileField::LandSize => self.land_size = value.to_string(),
            ProfileField::SoilType => self.soil_type = value.parse()?,
            ProfileField::Irrigation => self.irrigation = value.parse()?,
            ProfileField::Crops => self.crops = parse_crops(value),
        }
        Ok(())
    }

    /// Text form of one field; crops are joined with ", ".
    pub fn field(&self, field: ProfileField) -> String {
        match field {
            ProfileField::Name => self.name.clone(),
            ProfileField::Location => self.location.clone(),
            ProfileField::LandSize => self.land_size.clone(),
            ProfileField::SoilType => self.soil_type.as_str().to_string(),
            ProfileField::Irrigation => self.irrigation.as_str().to_string(),
            ProfileField::Crops => self.crops.join(", "),
        }
    }
}

/// Splits a comma-separated crop list, trimming entries and dropping empty ones.
pub fn parse_crops(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Editable profile fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Location,
    LandSize,
    SoilType,
    Irrigation,
    Crops,
}

impl ProfileField {
    pub const ALL: [ProfileField; 6] = [
        ProfileField::Name,
        ProfileField::Location,
        ProfileField::LandSize,
        ProfileField::SoilType,
        ProfileField::Irrigation,
        ProfileField::Crops,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Location => "location",
            ProfileField::LandSize => "land_size",
            ProfileField::SoilType => "soil_type",
            ProfileField::Irrigation => "irrigation",
            ProfileField::Crops => "crops",
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = ProfileError;

    /// Accepts snake_case, kebab-case and camelCase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "name" => Ok(ProfileField::Name),
            "location" => Ok(ProfileField::Location),
            "landsize" => Ok(ProfileField::LandSize),
            "soiltype" | "soil" => Ok(ProfileField::SoilType),
            "irrigation" => Ok(ProfileField::Irrigation),
            "crops" => Ok(ProfileField::Crops),
            _ => Err(ProfileError::UnknownField(s.to_string())),
        }
    }
}

/// Error editing a profile field.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("unknown profile field: {0}")]
    UnknownField(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: ProfileField, value: String },
}

/// Error from [`ProfileStore`] operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProfileStoreError {
    #[error("storage: {0}")]
    Storage(String),
    #[error("serialize profile: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Single-blob profile storage.
///
/// - `load`: the stored profile, or the default when nothing (valid) is stored.
/// - `save`: replaces the stored blob.
/// - `reset`: removes the blob; the next `load` returns the default.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self) -> Result<FarmProfile, ProfileStoreError>;

    async fn save(&self, profile: &FarmProfile) -> Result<(), ProfileStoreError>;

    async fn reset(&self) -> Result<(), ProfileStoreError>;
}

/// Decodes a stored blob; bad JSON is logged and replaced by the default profile.
pub(crate) fn decode_blob(blob: Option<&str>) -> FarmProfile {
    match blob {
        None => FarmProfile::default(),
        Some(raw) => serde_json::from_str::<Option<FarmProfile>>(raw)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored profile is not valid JSON; using default");
                None
            })
            .unwrap_or_default(),
    }
}

/// Keeps the blob in memory. Used in tests and when no database path is configured.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    blob: Mutex<Option<String>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a raw blob already stored.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, ProfileStoreError> {
        self.blob
            .lock()
            .map_err(|_| ProfileStoreError::Storage("lock".into()))
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load(&self) -> Result<FarmProfile, ProfileStoreError> {
        let guard = self.lock()?;
        Ok(decode_blob(guard.as_deref()))
    }

    async fn save(&self, profile: &FarmProfile) -> Result<(), ProfileStoreError> {
        let blob = serde_json::to_string(profile)?;
        *self.lock()? = Some(blob);
        Ok(())
    }

    async fn reset(&self) -> Result<(), ProfileStoreError> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_grows_rice_on_loam_with_drip() {
        let p = FarmProfile::default();
        assert_eq!(p.crops, vec!["Rice"]);
        assert_eq!(p.soil_type, SoilType::Loam);
        assert_eq!(p.irrigation, Irrigation::Drip);
        assert!(!p.has_location());
    }

    #[test]
    fn blob_uses_camel_case_keys() {
        let v = serde_json::to_value(FarmProfile::default()).unwrap();
        assert_eq!(v["landSize"], "");
        assert_eq!(v["soilType"], "Loam");
        assert_eq!(v["irrigation"], "Drip");
        assert_eq!(v["crops"][0], "Rice");
    }

    #[test]
    fn partial_blob_fills_defaults() {
        let p = decode_blob(Some(r#"{"name":"Amitha","location":"Thrissur"}"#));
        assert_eq!(p.name, "Amitha");
        assert_eq!(p.location, "Thrissur");
        assert_eq!(p.crops, vec!["Rice"]);
    }

    #[test]
    fn corrupt_or_null_blob_is_default() {
        assert_eq!(decode_blob(Some("{not json")), FarmProfile::default());
        assert_eq!(decode_blob(Some("null")), FarmProfile::default());
        assert_eq!(decode_blob(None), FarmProfile::default());
    }

    #[test]
    fn crops_are_trimmed_and_empty_entries_dropped() {
        assert_eq!(parse_crops("Rice, Banana ,  Pepper"), vec!["Rice", "Banana", "Pepper"]);
        assert_eq!(parse_crops("Rice,,  ,Coconut,"), vec!["Rice", "Coconut"]);
        assert!(parse_crops("").is_empty());
    }

    #[test]
    fn set_field_parses_choices_case_insensitively() {
        let mut p = FarmProfile::default();
        p.set_field(ProfileField::SoilType, "laterite").unwrap();
        p.set_field(ProfileField::Irrigation, " Sprinkler ").unwrap();
        p.set_field(ProfileField::Crops, "Banana, Ginger").unwrap();
        assert_eq!(p.soil_type, SoilType::Laterite);
        assert_eq!(p.irrigation, Irrigation::Sprinkler);
        assert_eq!(p.field(ProfileField::Crops), "Banana, Ginger");
    }

    #[test]
    fn set_field_rejects_unknown_choice_and_keeps_value() {
        let mut p = FarmProfile::default();
        let err = p.set_field(ProfileField::SoilType, "Peat").unwrap_err();
        assert_eq!(
            err,
            ProfileError::InvalidValue {
                field: ProfileField::SoilType,
                value: "Peat".to_string()
            }
        );
        assert_eq!(p.soil_type, SoilType::Loam);
    }

    #[test]
    fn field_names_parse_in_several_spellings() {
        assert_eq!("land_size".parse::<ProfileField>(), Ok(ProfileField::LandSize));
        assert_eq!("landSize".parse::<ProfileField>(), Ok(ProfileField::LandSize));
        assert_eq!("soil-type".parse::<ProfileField>(), Ok(ProfileField::SoilType));
        assert!(matches!(
            "acreage".parse::<ProfileField>(),
            Err(ProfileError::UnknownField(_))
        ));
    }

    #[tokio::test]
    async fn in_memory_save_load_reset() {
        let store = InMemoryProfileStore::new();
        assert_eq!(store.load().await.unwrap(), FarmProfile::default());

        let mut p = FarmProfile::default();
        p.name = "Amitha".into();
        store.save(&p).await.unwrap();
        assert_eq!(store.load().await.unwrap().name, "Amitha");

        store.reset().await.unwrap();
        assert_eq!(store.load().await.unwrap(), FarmProfile::default());
    }

    #[tokio::test]
    async fn in_memory_corrupt_blob_loads_default() {
        let store = InMemoryProfileStore::with_blob("][");
        assert_eq!(store.load().await.unwrap(), FarmProfile::default());
    }
}
