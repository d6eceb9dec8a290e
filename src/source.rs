use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::FetchError;

/// File looked up in the working directory when no source is configured
pub const SAMPLE_FILE: &str = "sample_text.txt";

/// Sample used when [`SAMPLE_FILE`] does not exist
pub const DEFAULT_TEXT: &str =
    "The quick brown fox jumps over the lazy dog. This is a sample text for typing practice.";

/// Target text substituted when the configured source fails
pub const PLACEHOLDER_TEXT: &str = "Error loading text. Please try again.";

/// Somewhere the target text can be loaded from
pub trait TextSource {
    fn fetch(&self) -> Result<String, FetchError>;
    /// Short human readable description shown in the UI and logs
    fn label(&self) -> String;
}

/// Default source: a sample file, or [`DEFAULT_TEXT`] when the file is missing
pub struct SampleTextSource {
    path: PathBuf,
}

impl SampleTextSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Default for SampleTextSource {
    fn default() -> Self {
        Self::new(SAMPLE_FILE)
    }
}

impl TextSource for SampleTextSource {
    fn fetch(&self) -> Result<String, FetchError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.trim().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found, using default sample", self.path.display());
                Ok(DEFAULT_TEXT.to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn label(&self) -> String {
        format!("sample ({})", self.path.display())
    }
}

/// Text given directly, e.g. on the command line
pub struct StaticTextSource {
    text: String,
}

impl StaticTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextSource for StaticTextSource {
    fn fetch(&self) -> Result<String, FetchError> {
        Ok(self.text.clone())
    }

    fn label(&self) -> String {
        "custom prompt".to_string()
    }
}

/// Plain UTF-8 text file
pub struct FileTextSource {
    path: PathBuf,
}

impl FileTextSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TextSource for FileTextSource {
    fn fetch(&self) -> Result<String, FetchError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    fn label(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Deserialize)]
struct TextPayload {
    text: String,
}

/// HTTP endpoint answering `{"text": "..."}`
pub struct HttpTextSource {
    url: String,
}

impl HttpTextSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TextSource for HttpTextSource {
    fn fetch(&self) -> Result<String, FetchError> {
        use reqwest::blocking::Client;

        let client = Client::builder()
            .user_agent(concat!("klack/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let response = client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        parse_payload(&body)
    }

    fn label(&self) -> String {
        self.url.clone()
    }
}

/// Extract the target text from a JSON payload
pub fn parse_payload(body: &str) -> Result<String, FetchError> {
    let payload: TextPayload = serde_json::from_str(body)?;
    Ok(payload.text)
}

/// Trim and fold every whitespace run (line breaks included) into one space
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fetch and normalize the target text.
pub fn fetch_target_text(source: &dyn TextSource) -> Result<String, FetchError> {
    let text = normalize_text(&source.fetch()?);
    if text.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(text)
}

/// Fetch the target text, degrading to [`PLACEHOLDER_TEXT`] on failure
pub fn load_target_text(source: &dyn TextSource) -> String {
    match fetch_target_text(source) {
        Ok(text) => {
            log::info!(
                "loaded {} chars from {}",
                text.chars().count(),
                source.label()
            );
            text
        }
        Err(e) => {
            log::error!("error loading text from {}: {}", source.label(), e);
            PLACEHOLDER_TEXT.to_string()
        }
    }
}
