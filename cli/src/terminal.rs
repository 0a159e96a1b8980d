//! Terminal stand-ins for the speech collaborators: typed lines as transcripts, stderr as voice.

use std::io::Write;

use agri::{Locale, SpeechError, SpeechRecognizer, SpeechSynthesizer, Utterance};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads one stdin line per listening session. EOF or a blank line ends the session silently.
#[derive(Debug, Default)]
pub struct StdinRecognizer;

#[async_trait]
impl SpeechRecognizer for StdinRecognizer {
    async fn listen(&self, locale: Locale) -> Result<Option<String>, SpeechError> {
        eprint!("Listening ({})... ", locale);
        let _ = std::io::stderr().flush();
        let mut line = String::new();
        let n = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|e| SpeechError::Recognition(e.to_string()))?;
        let text = line.trim();
        if n == 0 || text.is_empty() {
            return Ok(None);
        }
        Ok(Some(text.to_string()))
    }
}

/// "Speaks" by writing `[locale] text` to stderr; cancel is a no-op since lines are instant.
#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn cancel(&self) {}

    fn speak(&self, utterance: Utterance) {
        eprintln!("[{}] {}", utterance.locale, utterance.text);
    }
}
