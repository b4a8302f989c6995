//! # Content Paths
//!
//! Dot-separated addresses into a serialized ContentTree, using the wire
//! (camelCase) names. Numeric segments index into lists:
//!
//! ```text
//! hero.title
//! experience.items.1.highlights
//! skills.0.skills.3
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Path is empty")]
    Empty,

    #[error("Path '{0}' contains an empty segment")]
    EmptySegment(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentPath {
    segments: Vec<Segment>,
}

impl ContentPath {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Path to the containing node plus the final segment
    pub fn split_last(&self) -> Option<(ContentPath, &Segment)> {
        let (last, parent) = self.segments.split_last()?;
        Some((
            ContentPath {
                segments: parent.to_vec(),
            },
            last,
        ))
    }

    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| match (node, segment) {
                (Value::Object(fields), Segment::Key(key)) => fields.get(key),
                (Value::Array(items), Segment::Index(i)) => items.get(*i),
                _ => None,
            })
    }

    pub fn lookup_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        let mut node = root;
        for segment in &self.segments {
            node = match (node, segment) {
                (Value::Object(fields), Segment::Key(key)) => fields.get_mut(key)?,
                (Value::Array(items), Segment::Index(i)) => items.get_mut(*i)?,
                _ => return None,
            };
        }
        Some(node)
    }
}

impl FromStr for ContentPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        let segments = s
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    Err(PathError::EmptySegment(s.to_string()))
                } else if let Ok(index) = part.parse::<usize>() {
                    Ok(Segment::Index(index))
                } else {
                    Ok(Segment::Key(part.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }
}

impl TryFrom<String> for ContentPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContentPath> for String {
    fn from(path: ContentPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Key(key) => f.write_str(key)?,
                Segment::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_mixed_segments() {
        let path: ContentPath = "experience.items.1.highlights".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("experience".to_string()),
                Segment::Key("items".to_string()),
                Segment::Index(1),
                Segment::Key("highlights".to_string()),
            ]
        );
        assert_eq!(path.to_string(), "experience.items.1.highlights");
    }

    #[test]
    fn test_rejects_empty_paths() {
        assert_eq!("".parse::<ContentPath>(), Err(PathError::Empty));
        assert!(matches!(
            "hero..title".parse::<ContentPath>(),
            Err(PathError::EmptySegment(_))
        ));
    }

    #[test]
    fn test_lookup() {
        let doc = json!({ "skills": [{ "name": "Cloud", "skills": ["AWS", "GCP"] }] });

        let path: ContentPath = "skills.0.skills.1".parse().unwrap();
        assert_eq!(path.lookup(&doc), Some(&json!("GCP")));

        let missing: ContentPath = "skills.3.name".parse().unwrap();
        assert_eq!(missing.lookup(&doc), None);
    }

    #[test]
    fn test_serializes_as_string() {
        let path: ContentPath = "hero.title".parse().unwrap();
        assert_eq!(serde_json::to_value(&path).unwrap(), json!("hero.title"));

        let back: ContentPath = serde_json::from_value(json!("hero.title")).unwrap();
        assert_eq!(back, path);
    }
}
