//! Validation of raw document-store payloads.

use crate::{ContentError, ContentTree, Language, LocalizedContentMap, PayloadError};
use serde::Deserialize;
use serde_json::{Map, Value};

impl LocalizedContentMap {
    /// Accept a stored document only if both languages are present and well-shaped.
    ///
    /// A document missing either language is rejected as a whole; there is no
    /// per-language fallback.
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let object = payload.as_object().ok_or(PayloadError::NotAnObject)?;

        Ok(Self {
            en: tree_for(object, Language::En)?,
            zh: tree_for(object, Language::Zh)?,
        })
    }

    /// Serialize for a full-document write
    pub fn to_payload(&self) -> Result<Value, ContentError> {
        Ok(serde_json::to_value(self)?)
    }
}

fn tree_for(object: &Map<String, Value>, language: Language) -> Result<ContentTree, PayloadError> {
    let entry = object
        .get(language.code())
        .filter(|v| v.as_object().is_some_and(|fields| !fields.is_empty()))
        .ok_or(PayloadError::MissingLanguage(language))?;

    ContentTree::deserialize(entry).map_err(|e| PayloadError::Shape {
        language,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalDefaults;
    use serde_json::json;

    fn defaults_payload() -> Value {
        LocalDefaults::embedded().unwrap().payload().clone()
    }

    #[test]
    fn test_accepts_full_document() {
        let map = LocalizedContentMap::from_payload(&defaults_payload()).unwrap();
        assert_eq!(map.en.hero.name, "Robin Hsu");
    }

    #[test]
    fn test_rejects_missing_language() {
        let mut payload = defaults_payload();
        payload.as_object_mut().unwrap().remove("zh");

        assert_eq!(
            LocalizedContentMap::from_payload(&payload),
            Err(PayloadError::MissingLanguage(Language::Zh))
        );
    }

    #[test]
    fn test_rejects_empty_or_null_language() {
        let mut payload = defaults_payload();
        payload["en"] = json!({});
        assert_eq!(
            LocalizedContentMap::from_payload(&payload),
            Err(PayloadError::MissingLanguage(Language::En))
        );

        payload["en"] = Value::Null;
        assert_eq!(
            LocalizedContentMap::from_payload(&payload),
            Err(PayloadError::MissingLanguage(Language::En))
        );
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let mut payload = defaults_payload();
        payload["zh"]["metrics"] = json!("not a list");

        match LocalizedContentMap::from_payload(&payload) {
            Err(PayloadError::Shape { language, .. }) => assert_eq!(language, Language::Zh),
            other => panic!("Expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_object() {
        assert_eq!(
            LocalizedContentMap::from_payload(&json!(["en", "zh"])),
            Err(PayloadError::NotAnObject)
        );
    }

    #[test]
    fn test_unknown_extra_keys_are_tolerated() {
        let mut payload = defaults_payload();
        payload["updatedBy"] = json!("someone@example.com");
        assert!(LocalizedContentMap::from_payload(&payload).is_ok());
    }
}
