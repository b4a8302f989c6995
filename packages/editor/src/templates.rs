//! Placeholder entries inserted by the editor's "add" actions.

use crate::{ContentPath, EditorError, Mutation};
use folio_content::{ExperienceItem, SkillCategory};

pub const NEW_LIST_ITEM: &str = "New Item";

/// Blank experience entry, keyed by the current time in milliseconds
pub fn new_experience_item() -> ExperienceItem {
    ExperienceItem {
        id: chrono::Utc::now().timestamp_millis().to_string(),
        company: "New Company".to_string(),
        role: "Role".to_string(),
        period: "2024".to_string(),
        highlights: vec!["Achievement 1".to_string()],
        stack: "Tech Stack".to_string(),
    }
}

pub fn new_skill_category() -> SkillCategory {
    SkillCategory {
        name: "New Category".to_string(),
        skills: vec!["Skill 1".to_string()],
        icon: None,
    }
}

/// New experience entries go to the top of the list
pub fn add_experience() -> Result<Mutation, EditorError> {
    Ok(Mutation::Insert {
        path: "experience.items".parse()?,
        index: 0,
        item: serde_json::to_value(new_experience_item())?,
    })
}

pub fn add_skill_category() -> Result<Mutation, EditorError> {
    Ok(Mutation::Append {
        path: "skills".parse()?,
        item: serde_json::to_value(new_skill_category())?,
    })
}

/// Append a placeholder to any list of strings (points, highlights, skills)
pub fn add_list_item(path: ContentPath) -> Mutation {
    Mutation::Append {
        path,
        item: serde_json::Value::String(NEW_LIST_ITEM.to_string()),
    }
}
