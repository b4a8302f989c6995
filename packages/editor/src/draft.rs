//! # Draft
//!
//! An editable working copy of one language's content tree.
//!
//! ## Lifecycle
//!
//! ```text
//! Open → Edit* → Commit   (new LocalizedContentMap handed to the caller)
//!            ↘ Cancel     (dropped, nothing else changes)
//! ```
//!
//! A Draft owns its tree outright; nothing it does is visible in the map it
//! was opened from.

use crate::{ContentPath, EditorError, Mutation, MutationResult};
use folio_content::{ContentTree, Language, LocalizedContentMap};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Draft {
    language: Language,
    tree: ContentTree,

    /// Increments on each applied mutation
    version: u64,
}

impl Draft {
    /// Structural copy of `map[language]`
    pub fn open(map: &LocalizedContentMap, language: Language) -> Self {
        Self {
            language,
            tree: map.get(language).clone(),
            version: 0,
        }
    }

    /// Apply a mutation; on error the draft is unchanged
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let next = mutation.apply(&self.tree)?;
        self.tree = next;
        self.version += 1;

        debug!(
            language = %self.language,
            op = mutation.name(),
            path = %mutation.path(),
            version = self.version,
            "Applied draft mutation"
        );

        Ok(MutationResult {
            version: self.version,
        })
    }

    /// Apply mutations in order, stopping at the first failure
    pub fn apply_all<I>(&mut self, mutations: I) -> Result<MutationResult, EditorError>
    where
        I: IntoIterator<Item = Mutation>,
    {
        for mutation in mutations {
            self.apply(mutation)?;
        }
        Ok(MutationResult {
            version: self.version,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn tree(&self) -> &ContentTree {
        &self.tree
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.version > 0
    }

    /// Serialized value at `path`, as the editor form would display it
    pub fn value_at(&self, path: &ContentPath) -> Result<Option<Value>, EditorError> {
        let root = serde_json::to_value(&self.tree)?;
        Ok(path.lookup(&root).cloned())
    }

    /// `base` with this draft's language replaced by a copy of the draft
    pub fn commit(&self, base: &LocalizedContentMap) -> LocalizedContentMap {
        base.with_language(self.language, self.tree.clone())
    }

    /// Discard the draft
    pub fn cancel(self) {
        debug!(language = %self.language, version = self.version, "Draft discarded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_content::LocalDefaults;
    use serde_json::json;

    fn map() -> LocalizedContentMap {
        LocalDefaults::embedded().unwrap().content().as_ref().clone()
    }

    #[test]
    fn test_open_copies_requested_language() {
        let map = map();
        let draft = Draft::open(&map, Language::Zh);

        assert_eq!(draft.language(), Language::Zh);
        assert_eq!(draft.tree(), &map.zh);
        assert_eq!(draft.version(), 0);
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_failed_mutation_keeps_version() {
        let map = map();
        let mut draft = Draft::open(&map, Language::En);

        let result = draft.apply(Mutation::RemoveAt {
            path: "metrics".parse().unwrap(),
            index: 99,
        });

        assert!(result.is_err());
        assert_eq!(draft.version(), 0);
        assert_eq!(draft.tree(), &map.en);
    }

    #[test]
    fn test_commit_replaces_only_draft_language() {
        let map = map();
        let mut draft = Draft::open(&map, Language::En);
        draft
            .apply(Mutation::SetField {
                path: "contact.emailBtn".parse().unwrap(),
                value: json!("Book a call"),
            })
            .unwrap();

        let committed = draft.commit(&map);
        assert_eq!(committed.en.contact.email_btn, "Book a call");
        assert_eq!(committed.zh, map.zh);
        assert_eq!(map.en.contact.email_btn, "Cafe Chat");
    }

    #[test]
    fn test_value_at() {
        let map = map();
        let draft = Draft::open(&map, Language::En);

        let value = draft.value_at(&"hero.name".parse().unwrap()).unwrap();
        assert_eq!(value, Some(json!("Robin Hsu")));
    }
}
