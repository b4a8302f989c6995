//! # Content Model
//!
//! Every field is plain text, a list of text, or a list of flat records.
//! Wire names are camelCase, matching the stored document exactly.

use crate::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full editable site content for one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTree {
    pub hero: Hero,
    pub about: About,
    pub metrics: Vec<MetricItem>,
    pub skills: Vec<SkillCategory>,
    pub experience: Experience,
    pub education: Vec<EducationItem>,
    pub teaching: Vec<TeachingItem>,
    pub contact: Contact,
    pub ui: UiStrings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub name: String,
    pub name_zh: String,
    pub experience_badge: String,
    pub title: String,
    pub subtitle: String,
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct About {
    pub title: String,
    pub quote: String,
    pub summary: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricItem {
    pub label: String,
    pub value: String,
    pub suffix: String,
    pub desc: String,
    /// Progress bar fill, in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<ExperienceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    /// Stable identifier, unique within one language's list
    pub id: String,
    pub role: String,
    pub company: String,
    pub period: String,
    pub highlights: Vec<String>,
    pub stack: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub school: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachingItem {
    pub role: String,
    pub school: String,
    pub period: String,
    pub location: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub title: String,
    pub subtitle: String,
    pub email_btn: String,
}

/// Labels used by the page chrome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiStrings {
    pub nav: Nav,
    pub headings: Headings,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nav {
    pub about: String,
    pub experience: String,
    pub expertise: String,
    pub contact: String,
    pub admin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headings {
    pub key_achievements: String,
    pub technical_expertise: String,
    pub expertise_subtitle: String,
    pub credentials: String,
    pub education: String,
    pub education_subtitle: String,
    pub teaching: String,
    pub contact: String,
    pub contact_subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    pub rights: String,
}

/// One ContentTree per language; the shape of the whole stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedContentMap {
    pub en: ContentTree,
    pub zh: ContentTree,
}

impl LocalizedContentMap {
    pub fn get(&self, language: Language) -> &ContentTree {
        match language {
            Language::En => &self.en,
            Language::Zh => &self.zh,
        }
    }

    /// Copy of this map with one language's tree replaced
    pub fn with_language(&self, language: Language, tree: ContentTree) -> Self {
        let mut next = self.clone();
        match language {
            Language::En => next.en = tree,
            Language::Zh => next.zh = tree,
        }
        next
    }
}

/// Where the active LocalizedContentMap came from. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Cloud,
    Local,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Cloud => f.write_str("cloud"),
            ContentSource::Local => f.write_str("local"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalDefaults;

    #[test]
    fn test_with_language_leaves_original_untouched() {
        let defaults = LocalDefaults::embedded().unwrap();
        let map = defaults.content();

        let mut tree = map.en.clone();
        tree.hero.title = "Principal Engineer".to_string();
        let next = map.with_language(Language::En, tree);

        assert_eq!(next.en.hero.title, "Principal Engineer");
        assert_ne!(map.en.hero.title, "Principal Engineer");
        assert_eq!(next.zh, map.zh);
    }

    #[test]
    fn test_optional_fields_are_omitted_when_absent() {
        let item = EducationItem {
            school: "Tamkang University".to_string(),
            degree: "MBA".to_string(),
            note: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("note").is_none());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let defaults = LocalDefaults::embedded().unwrap();
        let json = serde_json::to_value(&defaults.content().zh).unwrap();

        assert_eq!(json["hero"]["nameZh"], "徐秉暉");
        assert!(json["ui"]["headings"]["keyAchievements"].is_string());
        assert!(json["contact"]["emailBtn"].is_string());
    }
}
