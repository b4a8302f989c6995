//! # Folio Editor
//!
//! Draft editing for portfolio content.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ content: LocalizedContentMap (authoritative)│
//! └─────────────────────────────────────────────┘
//!                     ↓ open(language)
//! ┌─────────────────────────────────────────────┐
//! │ editor: Draft + mutations                   │
//! │  - Copy one language's tree                 │
//! │  - Apply validated field / list mutations   │
//! │  - Commit into a new full map               │
//! └─────────────────────────────────────────────┘
//!                     ↓ commit
//! ┌─────────────────────────────────────────────┐
//! │ workspace: save (session check, overwrite)  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{Draft, Mutation};
//!
//! let mut draft = Draft::open(&map, Language::En);
//! draft.apply(Mutation::SetField {
//!     path: "hero.title".parse()?,
//!     value: "CTO".into(),
//! })?;
//!
//! let next = draft.commit(&map);
//! ```

mod draft;
mod errors;
mod mutations;
mod path;
pub mod templates;

pub use draft::Draft;
pub use errors::EditorError;
pub use mutations::{Direction, Mutation, MutationError, MutationResult};
pub use path::{ContentPath, PathError, Segment};
