use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::source::{
    FileTextSource, HttpTextSource, SampleTextSource, StaticTextSource, TextSource,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Plain text file to practice on
    pub text_file: Option<PathBuf>,
    /// Endpoint answering `{"text": "..."}`
    pub text_url: Option<String>,
    pub debug: bool,
}

impl Config {
    /// Overlay values given on the command line
    pub fn merged(
        mut self,
        text_file: Option<PathBuf>,
        text_url: Option<String>,
        debug: bool,
    ) -> Self {
        if text_file.is_some() || text_url.is_some() {
            self.text_file = text_file;
            self.text_url = text_url;
        }
        self.debug |= debug;
        self
    }

    /// Pick the text source: an explicit prompt wins, then a URL, then a file,
    /// then `sample_text.txt` in the working directory.
    pub fn text_source(&self, prompt: Option<String>) -> Box<dyn TextSource> {
        match (prompt, &self.text_url, &self.text_file) {
            (Some(p), _, _) => Box::new(StaticTextSource::new(p)),
            (None, Some(url), _) => Box::new(HttpTextSource::new(url.clone())),
            (None, None, Some(path)) => Box::new(FileTextSource::new(path)),
            (None, None, None) => Box::new(SampleTextSource::default()),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("ignoring unreadable config {}: {}", self.path.display(), e),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
