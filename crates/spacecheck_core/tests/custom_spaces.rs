use spacecheck_core::db::open_db_in_memory;
use spacecheck_core::{
    CheckStore, CustomSpaceError, CustomSpaceRequest, ItemKey, SelectionType, SourceTable,
    SqliteSnapshotRepository,
};

fn sample_table() -> SourceTable {
    SourceTable::from_json(
        r#"{
            "header": ["category", "project", "note", "A", "B", "done"],
            "data": [
                { "category": "c1", "project": "p1", "note": "", "A": 1 },
                { "category": "c2", "project": "p2", "note": "", "A": 1, "B": 1 },
                { "category": "c3", "project": "p3", "note": "", "B": 1 }
            ]
        }"#,
    )
    .unwrap()
}

fn request(title: &str, sources: &[&str]) -> CustomSpaceRequest {
    CustomSpaceRequest {
        title: title.to_string(),
        selection_type: SelectionType::Multiple,
        original_spaces: sources.iter().map(ToString::to_string).collect(),
    }
}

#[test]
fn creates_union_of_base_spaces_without_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut store = CheckStore::new(repo, &sample_table());

    store
        .create_custom_space(request("Both", &["A", "B"]))
        .unwrap();

    // p2 belongs to both sources but is copied once.
    let items = store.get_data_by_space("Both");
    let mut projects: Vec<&str> = items.iter().map(|i| i.project.as_str()).collect();
    projects.sort_unstable();
    assert_eq!(projects, vec!["p1", "p2", "p3"]);
    assert!(items.iter().all(|i| !i.checked));

    let header = store
        .get_data()
        .header
        .into_iter()
        .find(|h| h.title == "Both")
        .unwrap();
    assert!(header.is_custom);
    assert!(header.checked);
    assert_eq!(header.original_spaces, vec!["A", "B"]);
    assert_eq!(store.get_header_list(), vec!["Both"]);
}

#[test]
fn duplicate_title_fails_and_leaves_model_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut store = CheckStore::new(repo, &sample_table());

    let before = store.get_data();
    let err = store
        .create_custom_space(request("A", &["B"]))
        .unwrap_err();
    assert_eq!(err, CustomSpaceError::DuplicateTitle("A".to_string()));
    assert_eq!(store.get_data(), before);
    assert!(store.get_header_list().is_empty());
}

#[test]
fn invalid_source_lists_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut store = CheckStore::new(repo, &sample_table());

    assert_eq!(
        store.create_custom_space(request("Empty", &[])),
        Err(CustomSpaceError::NoSourceSpaces)
    );
    assert_eq!(
        store.create_custom_space(request("Bad", &["A", "Nope"])),
        Err(CustomSpaceError::UnknownSourceSpace("Nope".to_string()))
    );

    store.create_custom_space(request("Both", &["A", "B"])).unwrap();
    assert_eq!(
        store.create_custom_space(request("Nested", &["Both"])),
        Err(CustomSpaceError::SourceSpaceIsCustom("Both".to_string()))
    );
}

#[test]
fn custom_space_items_are_independent_copies() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut store = CheckStore::new(repo, &sample_table());

    store.create_custom_space(request("Both", &["A", "B"])).unwrap();
    store.toggle_item(&ItemKey::new("Both", "p1"));
    store.update_description(&ItemKey::new("Both", "p1"), "copy note");

    let base = store
        .get_data_by_space("A")
        .into_iter()
        .find(|i| i.project == "p1")
        .unwrap();
    assert!(!base.checked);
    assert_eq!(base.note, "");
}

#[test]
fn custom_items_count_toward_selected_count() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut store = CheckStore::new(repo, &sample_table());

    store.create_custom_space(request("Both", &["A", "B"])).unwrap();
    store.toggle_item(&ItemKey::new("A", "p1"));
    store.toggle_item(&ItemKey::new("Both", "p1"));
    assert_eq!(store.get_selected_count(), 2);
}
