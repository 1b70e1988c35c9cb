use log::debug;
use std::sync::Arc;

use super::WorkingRecord;
use crate::errors::TranslationError;
use crate::language_utils;
use crate::providers::Translator;
use crate::record_parser::RawRecord;

/// Brings a record's text into the canonical language.
///
/// A record already declared in the canonical language passes through
/// untouched. Anything else goes to the translator exactly once; there is no
/// retry here - if the service wants backoff it does that itself.
#[derive(Debug)]
pub struct LanguageNormalizer {
    /// Translation service handle
    translator: Arc<dyn Translator>,
    /// The canonical language every record is normalized to
    canonical_lang: String,
}

impl LanguageNormalizer {
    /// Create a new normalizer targeting the given canonical language
    pub fn new(translator: Arc<dyn Translator>, canonical_lang: impl Into<String>) -> Self {
        Self {
            translator,
            canonical_lang: canonical_lang.into(),
        }
    }

    /// The canonical language this normalizer targets
    pub fn canonical_lang(&self) -> &str {
        &self.canonical_lang
    }

    /// Normalize one record, translating when the declared language differs.
    ///
    /// Declared codes are matched tolerantly ("en", "EN" and "eng" are the
    /// same language), so an already-canonical record never hits the
    /// translator regardless of code form.
    pub async fn normalize(&self, record: &RawRecord) -> Result<WorkingRecord, TranslationError> {
        if language_utils::codes_match(&record.lang, &self.canonical_lang) {
            return Ok(WorkingRecord {
                id: record.id.clone(),
                text: record.text.clone(),
                original_text: None,
                lang: self.canonical_lang.clone(),
            });
        }

        let translated = self
            .translator
            .translate(&record.lang, &self.canonical_lang, &record.text)
            .await?;

        debug!(
            "Translated record {}: '{}' -> '{}'",
            record.id, record.text, translated
        );

        Ok(WorkingRecord {
            id: record.id.clone(),
            text: translated,
            original_text: Some(record.text.clone()),
            lang: self.canonical_lang.clone(),
        })
    }
}
