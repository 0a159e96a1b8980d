//! Image-based pest diagnosis. Only a mock diagnoser exists; a model endpoint would
//! implement [`PestDiagnoser`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Status shown while an image is being analyzed.
pub const ANALYZING_STATUS: &str = "Analyzing image... (send to ML pest model)";

pub const LEAF_BLAST_FINDING: &str =
    "Possible leaf blast detected. Recommended: remove affected leaves, apply Tricyclazole as per dosage.";

pub const DEFAULT_DIAGNOSIS_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DiagnosisError {
    #[error("image not found: {0}")]
    ImageNotFound(PathBuf),
    #[error("read image: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub image: PathBuf,
    pub finding: String,
}

#[async_trait]
pub trait PestDiagnoser: Send + Sync {
    async fn diagnose(&self, image: &Path) -> Result<Diagnosis, DiagnosisError>;
}

/// Checks the image exists, waits `delay`, then reports leaf blast.
#[derive(Clone, Debug)]
pub struct MockDiagnoser {
    delay: Duration,
}

impl MockDiagnoser {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockDiagnoser {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGNOSIS_DELAY)
    }
}

#[async_trait]
impl PestDiagnoser for MockDiagnoser {
    async fn diagnose(&self, image: &Path) -> Result<Diagnosis, DiagnosisError> {
        let meta = match tokio::fs::metadata(image).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DiagnosisError::ImageNotFound(image.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        if !meta.is_file() {
            return Err(DiagnosisError::ImageNotFound(image.to_path_buf()));
        }
        tracing::debug!(image = %image.display(), delay_ms = self.delay.as_millis() as u64, "diagnosing image");
        tokio::time::sleep(self.delay).await;
        Ok(Diagnosis {
            image: image.to_path_buf(),
            finding: LEAF_BLAST_FINDING.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn existing_image_gets_finding() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let d = MockDiagnoser::new(Duration::ZERO)
            .diagnose(file.path())
            .await
            .unwrap();
        assert_eq!(d.finding, LEAF_BLAST_FINDING);
        assert_eq!(d.image, file.path());
    }

    #[tokio::test]
    async fn missing_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.jpg");
        let err = MockDiagnoser::new(Duration::ZERO)
            .diagnose(&path)
            .await
            .unwrap_err();
        assert!(matches!(err, DiagnosisError::ImageNotFound(p) if p == path));
    }

    #[tokio::test]
    async fn directory_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let err = MockDiagnoser::new(Duration::ZERO)
            .diagnose(dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, DiagnosisError::ImageNotFound(_)));
    }
}
