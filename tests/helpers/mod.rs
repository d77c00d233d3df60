#![allow(dead_code)]

use async_trait::async_trait;
use scopus_translate::{TranslateError, Translator};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Helper to write a CSV fixture into a fresh temp directory
pub fn write_csv(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write CSV fixture");
    (temp_dir, path)
}

/// Translator backed by a lookup table; unknown texts are echoed back
/// with a marker. Records every batch it receives.
#[derive(Default, Clone)]
pub struct DictionaryTranslator {
    entries: HashMap<String, String>,
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl DictionaryTranslator {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Translator for DictionaryTranslator {
    async fn translate(&self, texts: &[String]) -> Result<Vec<String>, TranslateError> {
        self.calls.lock().unwrap().push(texts.to_vec());
        Ok(texts
            .iter()
            .map(|text| {
                self.entries
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| format!("[ja] {}", text))
            })
            .collect())
    }
}

/// Which failure a `FailingTranslator` produces
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Connectivity,
    Authorization,
    Server,
}

pub struct FailingTranslator(pub Failure);

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, _texts: &[String]) -> Result<Vec<String>, TranslateError> {
        Err(match self.0 {
            Failure::Connectivity => TranslateError::Connectivity("connection refused".to_string()),
            Failure::Authorization => TranslateError::Authorization,
            Failure::Server => TranslateError::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            },
        })
    }
}
