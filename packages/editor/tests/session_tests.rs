//! Integration tests for the editing session
//!
//! This covers:
//! - Permission gating per role
//! - Edit-mode gating and selection lifecycle
//! - Confirmation flow for destructive operations
//! - Draft/live separation across store reopens
//! - History restore after multiple publishes

use pagecraft_document::{AdminRole, ElementType, SiteDocument, StyleKey};
use pagecraft_editor::{
    CollectionKey, DocumentStore, EditorError, EditorSession, FilePersistence, FixedRole,
    ImageConstraints, ImageSource, Intent, MemoryPersistence, MoveDirection, PendingAction,
};
use serde_json::json;

fn session_with_role(role: AdminRole) -> EditorSession {
    let store = DocumentStore::open(Box::new(MemoryPersistence::new()), true);
    EditorSession::new(store, Box::new(FixedRole(role)))
}

fn editing_session(role: AdminRole) -> EditorSession {
    let mut session = session_with_role(role);
    session.enter_editing();
    session
}

#[test]
fn test_mutation_requires_edit_mode() {
    let mut session = session_with_role(AdminRole::SuperAdmin);

    let result = session.update_field("general.name", json!("New Name"));
    assert!(matches!(result, Err(EditorError::NotEditing)));

    session.enter_editing();
    session
        .update_field("general.name", json!("New Name"))
        .unwrap();
    assert_eq!(session.document().general.name, "New Name");
}

#[test]
fn test_viewer_cannot_mutate() {
    let mut session = editing_session(AdminRole::Viewer);

    let result = session.update_field("general.name", json!("Hacked"));
    assert!(matches!(
        result,
        Err(EditorError::PermissionDenied { .. })
    ));

    let result = session.add_item(CollectionKey::Services);
    assert!(matches!(
        result,
        Err(EditorError::PermissionDenied { .. })
    ));
}

#[test]
fn test_editor_can_mutate_but_not_delete() {
    let mut session = editing_session(AdminRole::Editor);

    let id = session.add_item(CollectionKey::Services).unwrap();
    assert!(session.document().services.iter().any(|s| s.id == id));

    let result = session.remove_item(CollectionKey::Services, &id);
    assert!(matches!(
        result,
        Err(EditorError::PermissionDenied { .. })
    ));

    // Hiding is not deleting; editors may do it.
    assert!(session
        .toggle_item_hidden(CollectionKey::Services, &id)
        .unwrap());
}

#[test]
fn test_item_removal_needs_confirmation() {
    let mut session = editing_session(AdminRole::SuperAdmin);
    let id = session.add_item(CollectionKey::Portfolio).unwrap();

    let intent = session.remove_item(CollectionKey::Portfolio, &id).unwrap();
    // Nothing removed yet.
    assert!(session.document().portfolio.iter().any(|p| p.id == id));

    let Intent::NeedsConfirmation(action) = intent else {
        panic!("expected confirmation request, got {:?}", intent);
    };
    assert!(session.confirm(action).unwrap());
    assert!(!session.document().portfolio.iter().any(|p| p.id == id));
}

#[test]
fn test_selection_cleared_when_selected_element_removed() {
    let mut session = editing_session(AdminRole::SuperAdmin);

    let key = session.add_custom_section().unwrap().unwrap();
    let root_id = session.document().custom_sections[&key].id.clone();
    let heading = session
        .add_element(&root_id, ElementType::Heading, None)
        .unwrap()
        .unwrap();

    session.select_element(Some(heading.clone()));
    assert_eq!(session.selected_element_id(), Some(heading.as_str()));

    assert!(session.remove_element(&heading).unwrap());
    assert_eq!(session.selected_element_id(), None);

    // Removing an already-gone node is a logged no-op, not an error.
    assert!(!session.remove_element(&heading).unwrap());
}

#[test]
fn test_add_style_and_reorder_elements() {
    let mut session = editing_session(AdminRole::SuperAdmin);

    let key = session.add_custom_section().unwrap().unwrap();
    let section = &session.document().custom_sections[&key];
    // Scaffold is section > container > row > column.
    let column_id = section.children.as_ref().unwrap()[0]
        .children
        .as_ref()
        .unwrap()[0]
        .children
        .as_ref()
        .unwrap()[0]
        .id
        .clone();

    let first = session
        .add_element(&column_id, ElementType::Text, None)
        .unwrap()
        .unwrap();
    let second = session
        .add_element(&column_id, ElementType::Button, None)
        .unwrap()
        .unwrap();

    let patch = [(StyleKey::Color, "#ff0000".to_string())]
        .into_iter()
        .collect();
    assert!(session.update_element_style(&first, patch).unwrap());
    let styled = session.document().find_element(&first).unwrap();
    assert_eq!(styled.style.get(&StyleKey::Color), Some("#ff0000"));

    // Move the second element to the front.
    assert!(session.move_element(&second, MoveDirection::Up).unwrap());
    let column = session.document().find_element(&column_id).unwrap();
    let order: Vec<&str> = column
        .children
        .as_ref()
        .unwrap()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(order, vec![second.as_str(), first.as_str()]);

    // Already at the front; boundary move is a no-op that still succeeds.
    assert!(session.move_element(&second, MoveDirection::Up).unwrap());
}

#[test]
fn test_remove_section_confirmation_and_noop() {
    let mut session = editing_session(AdminRole::Editor);

    assert_eq!(session.remove_section("no-such-key").unwrap(), Intent::NoOp);

    let key = session.add_custom_section().unwrap().unwrap();
    assert!(session.document().page_structure.home.contains(&key));

    let intent = session.remove_section(&key).unwrap();
    let Intent::NeedsConfirmation(action) = intent else {
        panic!("expected confirmation request");
    };
    assert!(session.confirm(action).unwrap());
    assert!(!session.document().custom_sections.contains_key(&key));
    assert!(!session.document().page_structure.home.contains(&key));
}

#[test]
fn test_section_visibility_and_order() {
    let mut session = editing_session(AdminRole::Editor);

    assert!(session.document().section_enabled("services"));
    session.toggle_section_visibility("services").unwrap();
    assert!(!session.document().section_enabled("services"));

    let before = session.document().page_structure.home.clone();
    session.move_section(&before[1], MoveDirection::Up).unwrap();
    let after = &session.document().page_structure.home;
    assert_eq!(after[0], before[1]);
    assert_eq!(after[1], before[0]);

    // First section cannot move further up.
    let pinned = after.clone();
    session.move_section(&pinned[0], MoveDirection::Up).unwrap();
    assert_eq!(session.document().page_structure.home, pinned);
}

#[test]
fn test_expertise_lifecycle() {
    let mut session = editing_session(AdminRole::SuperAdmin);

    let id = session.add_expertise("Cover Design").unwrap();
    assert!(session.update_expertise(&id, "Interior Layout").unwrap());
    let about = &session.document().about;
    assert!(about
        .expertises
        .iter()
        .any(|e| e.id == id && e.text == "Interior Layout"));

    assert!(session.remove_expertise(&id).unwrap());
    assert!(!session.document().about.expertises.iter().any(|e| e.id == id));
}

#[test]
fn test_reset_restores_defaults() {
    let mut session = editing_session(AdminRole::SuperAdmin);

    session
        .update_field("general.name", json!("Renamed"))
        .unwrap();
    assert!(session.has_unsaved_changes());

    let Intent::NeedsConfirmation(action) = session.request_reset().unwrap() else {
        panic!("expected confirmation request");
    };
    assert_eq!(action, PendingAction::ResetContent);
    session.confirm(action).unwrap();

    let defaults = SiteDocument::default();
    assert_eq!(session.document().general.name, defaults.general.name);
    assert!(!session.has_unsaved_changes());
}

struct StubImages {
    url: String,
}

impl ImageSource for StubImages {
    fn request_image(&mut self, _constraints: ImageConstraints) -> Result<String, String> {
        Ok(self.url.clone())
    }
}

#[test]
fn test_image_pick_stores_url_as_content() {
    let mut session = editing_session(AdminRole::Editor);

    let key = session.add_custom_section().unwrap().unwrap();
    let root_id = session.document().custom_sections[&key].id.clone();
    let image_id = session
        .add_element(&root_id, ElementType::Image, None)
        .unwrap()
        .unwrap();

    let mut source = StubImages {
        url: "https://cdn.example.com/hero.jpg".to_string(),
    };
    assert!(session
        .set_element_image(&image_id, &mut source, ImageConstraints::default())
        .unwrap());
    let element = session.document().find_element(&image_id).unwrap();
    assert_eq!(element.content.as_deref(), Some("https://cdn.example.com/hero.jpg"));
}

#[test]
fn test_publish_draft_separation_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FilePersistence::new(dir.path()).unwrap();
    let store = DocumentStore::open(Box::new(backend), true);
    let mut session = EditorSession::new(store, Box::new(FixedRole(AdminRole::SuperAdmin)));
    session.enter_editing();

    session
        .update_field("general.name", json!("Published Name"))
        .unwrap();
    let report = session.save_changes().unwrap();
    assert!(report.live_persisted);
    assert!(!session.has_unsaved_changes());

    // Keep editing past the publish.
    session
        .update_field("general.name", json!("Draft Name"))
        .unwrap();
    assert!(session.has_unsaved_changes());

    // The public site loads the live slot.
    let public = DocumentStore::open(
        Box::new(FilePersistence::new(dir.path()).unwrap()),
        false,
    );
    assert_eq!(public.document().general.name, "Published Name");

    // A fresh editing context resumes the draft.
    let editing = DocumentStore::open(
        Box::new(FilePersistence::new(dir.path()).unwrap()),
        true,
    );
    assert_eq!(editing.document().general.name, "Draft Name");
}

#[test]
fn test_discard_changes_reloads_last_publish() {
    let mut session = editing_session(AdminRole::SuperAdmin);

    session
        .update_field("general.name", json!("Keeper"))
        .unwrap();
    session.save_changes().unwrap();

    session
        .update_field("general.name", json!("Throwaway"))
        .unwrap();
    session.select_element(None);
    session.discard_changes().unwrap();

    assert_eq!(session.document().general.name, "Keeper");
    assert!(!session.has_unsaved_changes());
}

#[test]
fn test_history_restore_between_publishes() {
    let mut session = editing_session(AdminRole::SuperAdmin);

    session
        .update_field("general.name", json!("Version One"))
        .unwrap();
    session.save_changes().unwrap();

    session
        .update_field("general.name", json!("Version Two"))
        .unwrap();
    session.save_changes().unwrap();

    let history = session.store().history();
    assert_eq!(history.len(), 2);
    let first = &history[0];
    assert_eq!(first.snapshot().unwrap().general.name, "Version One");

    assert!(session.restore_history(&first.id).unwrap());
    assert_eq!(session.document().general.name, "Version One");

    // Restore touches only the draft; a third publish adds a new entry.
    session.save_changes().unwrap();
    assert_eq!(session.store().history().len(), 3);
}

#[test]
fn test_publish_timestamps_admin_settings() {
    let mut session = editing_session(AdminRole::Editor);
    assert!(session.document().admin_settings.last_published_at.is_none());

    session.save_changes().unwrap();
    let settings = &session.document().admin_settings;
    assert!(settings.last_published_at.is_some());
    assert!(!settings.is_draft);
}
