//! # Local Default Store
//!
//! Content shipped with the deployment. Used as the fallback whenever the
//! document store has nothing usable, and written verbatim by a force reset.

use crate::{ContentResult, LocalizedContentMap};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

const EMBEDDED_CONTENT: &str = include_str!("../defaults/content.json");

/// Parsed default content plus the exact document it was parsed from
#[derive(Debug, Clone)]
pub struct LocalDefaults {
    content: Arc<LocalizedContentMap>,
    payload: Arc<Value>,
}

impl LocalDefaults {
    /// Content compiled into the binary
    pub fn embedded() -> ContentResult<Self> {
        Self::from_json(EMBEDDED_CONTENT)
    }

    /// Deployment-specific defaults file; held to the same rules as a cloud payload
    pub fn from_path(path: &Path) -> ContentResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn from_json(source: &str) -> ContentResult<Self> {
        let payload: Value = serde_json::from_str(source)?;
        let content = LocalizedContentMap::from_payload(&payload)?;

        Ok(Self {
            content: Arc::new(content),
            payload: Arc::new(payload),
        })
    }

    pub fn content(&self) -> Arc<LocalizedContentMap> {
        self.content.clone()
    }

    /// The verbatim document, as written by a force reset
    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContentError, Language, PayloadError};
    use std::io::Write;

    #[test]
    fn test_embedded_defaults_parse() {
        let defaults = LocalDefaults::embedded().unwrap();
        let content = defaults.content();

        assert_eq!(content.en.experience.items.len(), 3);
        assert_eq!(content.zh.experience.items[0].id, "91app");
        assert_eq!(content.en.skills.len(), 4);
        assert_eq!(content.get(Language::Zh).ui.nav.admin, "登入");
    }

    #[test]
    fn test_payload_matches_parsed_content() {
        let defaults = LocalDefaults::embedded().unwrap();
        let reparsed = LocalizedContentMap::from_payload(defaults.payload()).unwrap();
        assert_eq!(&reparsed, defaults.content().as_ref());
    }

    #[test]
    fn test_override_file_must_carry_both_languages() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut payload = LocalDefaults::embedded().unwrap().payload().clone();
        payload.as_object_mut().unwrap().remove("en");
        write!(file, "{}", payload).unwrap();

        match LocalDefaults::from_path(file.path()) {
            Err(ContentError::Payload(PayloadError::MissingLanguage(Language::En))) => {}
            other => panic!("Expected missing-language error, got {:?}", other),
        }
    }

    #[test]
    fn test_override_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut payload = LocalDefaults::embedded().unwrap().payload().clone();
        payload["en"]["hero"]["cta"] = Value::String("Say hello".to_string());
        write!(file, "{}", payload).unwrap();

        let defaults = LocalDefaults::from_path(file.path()).unwrap();
        assert_eq!(defaults.content().en.hero.cta, "Say hello");
    }
}
