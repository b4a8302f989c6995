//! Mutation tests against the default content, one per editor form action

use folio_content::{Language, LocalDefaults, LocalizedContentMap};
use folio_editor::{templates, Direction, Draft, EditorError, Mutation, MutationError};
use serde_json::json;

fn map() -> LocalizedContentMap {
    LocalDefaults::embedded().unwrap().content().as_ref().clone()
}

#[test]
fn test_update_hero_text() {
    let map = map();
    let mut draft = Draft::open(&map, Language::En);

    draft
        .apply(Mutation::SetField {
            path: "hero.subtitle".parse().unwrap(),
            value: json!("Builder of teams"),
        })
        .unwrap();

    assert_eq!(draft.tree().hero.subtitle, "Builder of teams");
    assert_eq!(draft.tree().hero.name, map.en.hero.name);
}

#[test]
fn test_update_metric_progress() {
    let map = map();
    let mut draft = Draft::open(&map, Language::En);

    draft
        .apply(Mutation::SetField {
            path: "metrics.2.progress".parse().unwrap(),
            value: json!(42),
        })
        .unwrap();

    assert_eq!(draft.tree().metrics[2].progress, Some(42));
}

#[test]
fn test_edit_string_list_entry() {
    let map = map();
    let mut draft = Draft::open(&map, Language::En);

    draft
        .apply(Mutation::SetField {
            path: "about.points.1".parse().unwrap(),
            value: json!("Ten years on each side of the table."),
        })
        .unwrap();

    assert_eq!(draft.tree().about.points[1], "Ten years on each side of the table.");
    assert_eq!(draft.tree().about.points.len(), map.en.about.points.len());
}

#[test]
fn test_add_and_remove_list_item() {
    let map = map();
    let mut draft = Draft::open(&map, Language::En);
    let points = "about.points".parse().unwrap();

    draft.apply(templates::add_list_item(points)).unwrap();
    assert_eq!(draft.tree().about.points.last().unwrap(), templates::NEW_LIST_ITEM);

    draft
        .apply(Mutation::RemoveAt {
            path: "about.points".parse().unwrap(),
            index: 0,
        })
        .unwrap();
    assert_eq!(draft.tree().about.points.len(), map.en.about.points.len());
    assert_eq!(draft.tree().about.points[0], map.en.about.points[1]);
}

#[test]
fn test_reorder_skill_categories() {
    let map = map();
    let mut draft = Draft::open(&map, Language::En);

    draft
        .apply(Mutation::SwapAdjacent {
            path: "skills".parse().unwrap(),
            index: 1,
            direction: Direction::Up,
        })
        .unwrap();

    assert_eq!(draft.tree().skills[0].name, "AI Tools & Systems");
    assert_eq!(draft.tree().skills[1].name, "Cloud & Database");
}

#[test]
fn test_replace_highlights() {
    let map = map();
    let mut draft = Draft::open(&map, Language::En);

    draft
        .apply(Mutation::ReplaceList {
            path: "experience.items.0.highlights".parse().unwrap(),
            items: vec![json!("Shipped the ERP"), json!("Grew the team")],
        })
        .unwrap();

    assert_eq!(
        draft.tree().experience.items[0].highlights,
        vec!["Shipped the ERP", "Grew the team"]
    );
}

#[test]
fn test_replace_list_rejects_records_in_string_list() {
    let map = map();
    let mut draft = Draft::open(&map, Language::En);

    let result = draft.apply(Mutation::ReplaceList {
        path: "skills.0.skills".parse().unwrap(),
        items: vec![json!({ "name": "AWS" })],
    });

    assert!(matches!(
        result,
        Err(EditorError::Mutation(MutationError::InvalidStructure(_)))
    ));
    assert_eq!(draft.tree(), &map.en);
}

#[test]
fn test_add_experience_goes_first() {
    let map = map();
    let mut draft = Draft::open(&map, Language::Zh);

    draft.apply(templates::add_experience().unwrap()).unwrap();

    let items = &draft.tree().experience.items;
    assert_eq!(items.len(), map.zh.experience.items.len() + 1);
    assert_eq!(items[0].company, "New Company");
    assert_eq!(items[1].id, "91app");
}

#[test]
fn test_remove_experience() {
    let map = map();
    let mut draft = Draft::open(&map, Language::En);

    draft
        .apply(Mutation::RemoveAt {
            path: "experience.items".parse().unwrap(),
            index: 1,
        })
        .unwrap();

    let ids: Vec<_> = draft
        .tree()
        .experience
        .items
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(ids, vec!["91app", "tutorabc"]);
}

#[test]
fn test_add_skill_category() {
    let map = map();
    let mut draft = Draft::open(&map, Language::En);

    draft.apply(templates::add_skill_category().unwrap()).unwrap();

    let last = draft.tree().skills.last().unwrap();
    assert_eq!(last.name, "New Category");
    assert_eq!(last.skills, vec!["Skill 1"]);
}

#[test]
fn test_unknown_path() {
    let map = map();
    let mut draft = Draft::open(&map, Language::En);

    let result = draft.apply(Mutation::Append {
        path: "portfolio.items".parse().unwrap(),
        item: json!("x"),
    });

    assert!(matches!(
        result,
        Err(EditorError::Mutation(MutationError::PathNotFound(_)))
    ));
}
