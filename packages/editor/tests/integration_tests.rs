//! Integration tests for editor crate

use folio_content::{Language, LocalDefaults};
use folio_editor::{Draft, Mutation};
use serde_json::json;

#[test]
fn test_draft_lifecycle() -> anyhow::Result<()> {
    let defaults = LocalDefaults::embedded()?;
    let map = defaults.content();

    let mut draft = Draft::open(&map, Language::En);
    assert!(!draft.is_dirty());

    let result = draft.apply(Mutation::SetField {
        path: "ui.footer.rights".parse()?,
        value: json!("Some rights reserved."),
    })?;
    assert_eq!(result.version, 1);
    assert!(draft.is_dirty());

    let committed = draft.commit(&map);
    assert_eq!(committed.en.ui.footer.rights, "Some rights reserved.");

    // Everything outside the edited path is untouched
    let mut expected = map.en.clone();
    expected.ui.footer.rights = "Some rights reserved.".to_string();
    assert_eq!(committed.en, expected);
    assert_eq!(committed.zh, map.zh);

    Ok(())
}

#[test]
fn test_cancel_leaves_map_unchanged() -> anyhow::Result<()> {
    let defaults = LocalDefaults::embedded()?;
    let map = defaults.content();
    let before = map.as_ref().clone();

    let mut draft = Draft::open(&map, Language::Zh);
    draft.apply(Mutation::RemoveAt {
        path: "teaching".parse()?,
        index: 0,
    })?;
    draft.cancel();

    assert_eq!(map.as_ref(), &before);
    Ok(())
}

#[test]
fn test_edit_script_from_json() -> anyhow::Result<()> {
    let script = r#"[
        { "op": "setField", "path": "hero.cta", "value": "See projects" },
        { "op": "swapAdjacent", "path": "skills", "index": 0, "direction": "down" },
        { "op": "append", "path": "experience.items.2.highlights", "item": "Mentored new leads" },
        { "op": "setField", "path": "education.1.note", "value": null }
    ]"#;
    let mutations: Vec<Mutation> = serde_json::from_str(script)?;

    let defaults = LocalDefaults::embedded()?;
    let map = defaults.content();
    let mut draft = Draft::open(&map, Language::En);
    let result = draft.apply_all(mutations)?;

    assert_eq!(result.version, 4);
    let tree = draft.tree();
    assert_eq!(tree.hero.cta, "See projects");
    assert_eq!(tree.skills[1].name, "Cloud & Database");
    assert_eq!(tree.experience.items[2].highlights.len(), 5);
    assert_eq!(tree.education[1].note, None);
    Ok(())
}

#[test]
fn test_apply_all_stops_at_first_failure() -> anyhow::Result<()> {
    let defaults = LocalDefaults::embedded()?;
    let map = defaults.content();
    let mut draft = Draft::open(&map, Language::En);

    let result = draft.apply_all(vec![
        Mutation::SetField {
            path: "hero.cta".parse()?,
            value: json!("First"),
        },
        Mutation::RemoveAt {
            path: "teaching".parse()?,
            index: 5,
        },
        Mutation::SetField {
            path: "hero.cta".parse()?,
            value: json!("Never applied"),
        },
    ]);

    assert!(result.is_err());
    assert_eq!(draft.version(), 1);
    assert_eq!(draft.tree().hero.cta, "First");
    Ok(())
}
