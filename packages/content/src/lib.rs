//! # Folio Content
//!
//! Bilingual portfolio content: the data model shared by every other crate,
//! the embedded default content, and validation of payloads read back from
//! the document store.
//!
//! ```text
//! LocalDefaults (embedded) ──┐
//!                            ├──> LocalizedContentMap { en, zh }
//! cloud payload (JSON) ──────┘        └── ContentTree per language
//! ```

mod defaults;
mod error;
mod language;
mod model;
mod payload;

pub use defaults::LocalDefaults;
pub use error::{ContentError, ContentResult, PayloadError};
pub use language::{Language, UnknownLanguage};
pub use model::{
    About, Contact, ContentSource, ContentTree, EducationItem, Experience, ExperienceItem,
    Footer, Headings, Hero, LocalizedContentMap, MetricItem, Nav, SkillCategory, TeachingItem,
    UiStrings,
};
