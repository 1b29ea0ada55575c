//! # Editor Session
//!
//! Transient editing state layered over the document store: selection,
//! device preview, the unsaved-changes flag, and permission gating. Nothing
//! here is persisted; the session is rebuilt at every editing start.
//!
//! Destructive operations never execute directly. They return
//! [`Intent::NeedsConfirmation`] carrying a [`PendingAction`], which the UI
//! acknowledges by passing it back to [`EditorSession::confirm`]. This keeps
//! the core free of blocking prompts while still making "are you sure?" a
//! hard requirement.

use crate::capabilities::{ImageConstraints, ImageSource, RoleProvider};
use crate::collections::{self, CollectionKey};
use crate::errors::EditorError;
use crate::mutations::{ElementSeed, MoveDirection, Mutation};
use crate::path::set_field;
use crate::store::{DocumentStore, UpdateReport};
use pagecraft_common::unix_millis;
use pagecraft_document::{ElementType, SiteDocument, StyleBag};
use serde_json::{json, Value};

/// Preview viewport. Purely presentational; never touches the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceMode {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

/// A destructive operation awaiting explicit acknowledgement.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    RemoveItem { collection: CollectionKey, id: String },
    RemoveSection { key: String },
    ResetContent,
}

/// Outcome of requesting an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// The mutation was applied.
    Applied,
    /// Nothing to do (target already gone); logged, not an error.
    NoOp,
    /// Destructive: call [`EditorSession::confirm`] with this action.
    NeedsConfirmation(PendingAction),
}

/// One editing client's view over the store.
pub struct EditorSession {
    store: DocumentStore,
    roles: Box<dyn RoleProvider>,
    editing: bool,
    selected_element_id: Option<String>,
    device_mode: DeviceMode,
    has_unsaved_changes: bool,
}

impl EditorSession {
    pub fn new(store: DocumentStore, roles: Box<dyn RoleProvider>) -> Self {
        Self {
            store,
            roles,
            editing: false,
            selected_element_id: None,
            device_mode: DeviceMode::Desktop,
            has_unsaved_changes: false,
        }
    }

    pub fn document(&self) -> &SiteDocument {
        self.store.document()
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    // --- mode / selection / preview ---------------------------------------

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Entering edit mode never alters the document by itself.
    pub fn enter_editing(&mut self) {
        self.editing = true;
    }

    pub fn exit_editing(&mut self) {
        self.editing = false;
        self.selected_element_id = None;
    }

    pub fn selected_element_id(&self) -> Option<&str> {
        self.selected_element_id.as_deref()
    }

    /// Replace the selection (single-select; `None` = canvas click).
    pub fn select_element(&mut self, id: Option<String>) {
        if self.editing {
            self.selected_element_id = id;
        }
    }

    pub fn device_mode(&self) -> DeviceMode {
        self.device_mode
    }

    pub fn set_device_mode(&mut self, mode: DeviceMode) {
        self.device_mode = mode;
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    // --- guards -----------------------------------------------------------

    fn guard_mutate(&self, action: &'static str) -> Result<(), EditorError> {
        if !self.editing {
            return Err(EditorError::NotEditing);
        }
        let role = self.roles.current_role();
        if !role.can_mutate() {
            return Err(EditorError::PermissionDenied { role, action });
        }
        Ok(())
    }

    fn guard_delete(&self, action: &'static str) -> Result<(), EditorError> {
        self.guard_mutate(action)?;
        let role = self.roles.current_role();
        if !role.can_delete() {
            return Err(EditorError::PermissionDenied { role, action });
        }
        Ok(())
    }

    /// Swap in a new document as the draft and mark the session dirty.
    fn commit(&mut self, doc: SiteDocument) {
        let report = self.store.update(doc, false);
        if let Some(warning) = report.warning {
            tracing::warn!(warning, "draft save degraded, editing continues");
        }
        self.has_unsaved_changes = true;
    }

    /// Apply a tree mutation copy-on-write. Missing targets are logged
    /// no-ops; anything else propagates.
    fn apply_tree(&mut self, mutation: Mutation) -> Result<bool, EditorError> {
        let mut next = self.store.document().clone();
        match mutation.apply(&mut next) {
            Ok(()) => {
                self.commit(next);
                Ok(true)
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!(%err, "tree mutation target missing, no-op");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    // --- structured-content mutation ---------------------------------------

    /// Replace one leaf of the structured document by path.
    pub fn update_field(&mut self, path: &str, value: Value) -> Result<(), EditorError> {
        self.guard_mutate("update fields")?;
        let next = set_field(self.store.document(), path, value)?;
        self.commit(next);
        Ok(())
    }

    pub fn toggle_section_visibility(&mut self, section_key: &str) -> Result<(), EditorError> {
        let enabled = self.store.document().section_enabled(section_key);
        self.update_field(&format!("enabledSections.{section_key}"), json!(!enabled))
    }

    /// Swap a section key with its neighbor in the home page order.
    /// Boundary moves are no-ops.
    pub fn move_section(
        &mut self,
        section_key: &str,
        direction: MoveDirection,
    ) -> Result<(), EditorError> {
        self.guard_mutate("reorder sections")?;
        let doc = self.store.document();
        let mut home = doc.page_structure.home.clone();
        let Some(idx) = home.iter().position(|k| k == section_key) else {
            tracing::warn!(section_key, "move_section: key not in page structure");
            return Ok(());
        };
        match direction {
            MoveDirection::Up | MoveDirection::Left if idx > 0 => home.swap(idx, idx - 1),
            MoveDirection::Down | MoveDirection::Right if idx + 1 < home.len() => {
                home.swap(idx, idx + 1)
            }
            _ => return Ok(()),
        }
        self.update_field("pageStructure.home", json!(home))
    }

    // --- item collections ---------------------------------------------------

    /// Append a new record with defaults; returns its id.
    pub fn add_item(&mut self, collection: CollectionKey) -> Result<String, EditorError> {
        self.guard_mutate("add items")?;
        let mut next = self.store.document().clone();
        let id = collections::add_item(&mut next, collection);
        self.commit(next);
        Ok(id)
    }

    /// Deleting records is restricted to the highest privilege role and
    /// always goes through confirmation.
    pub fn remove_item(
        &mut self,
        collection: CollectionKey,
        id: &str,
    ) -> Result<Intent, EditorError> {
        self.guard_delete("delete items")?;
        Ok(Intent::NeedsConfirmation(PendingAction::RemoveItem {
            collection,
            id: id.to_string(),
        }))
    }

    pub fn toggle_item_hidden(
        &mut self,
        collection: CollectionKey,
        id: &str,
    ) -> Result<bool, EditorError> {
        self.guard_mutate("toggle item visibility")?;
        let mut next = self.store.document().clone();
        let found = collections::toggle_hidden(&mut next, collection, id);
        if found {
            self.commit(next);
        }
        Ok(found)
    }

    pub fn update_item_field(
        &mut self,
        collection: CollectionKey,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<bool, EditorError> {
        self.guard_mutate("update items")?;
        let mut next = self.store.document().clone();
        let found = collections::update_item_field(&mut next, collection, id, field, value)?;
        if found {
            self.commit(next);
        }
        Ok(found)
    }

    pub fn add_expertise(&mut self, text: &str) -> Result<String, EditorError> {
        self.guard_mutate("add expertises")?;
        let mut next = self.store.document().clone();
        let id = collections::add_expertise(&mut next, text);
        self.commit(next);
        Ok(id)
    }

    pub fn update_expertise(&mut self, id: &str, text: &str) -> Result<bool, EditorError> {
        self.guard_mutate("update expertises")?;
        let mut next = self.store.document().clone();
        let found = collections::update_expertise(&mut next, id, text);
        if found {
            self.commit(next);
        }
        Ok(found)
    }

    pub fn remove_expertise(&mut self, id: &str) -> Result<bool, EditorError> {
        self.guard_delete("delete expertises")?;
        let mut next = self.store.document().clone();
        let found = collections::remove_expertise(&mut next, id);
        if found {
            self.commit(next);
        }
        Ok(found)
    }

    // --- element tree -------------------------------------------------------

    /// Append a new element under `parent_id`; returns the new id, or `None`
    /// if the parent vanished.
    pub fn add_element(
        &mut self,
        parent_id: &str,
        element_type: ElementType,
        seed: Option<ElementSeed>,
    ) -> Result<Option<String>, EditorError> {
        self.guard_mutate("add elements")?;
        let (mutation, id) = Mutation::add_element(parent_id, element_type, seed);
        Ok(self.apply_tree(mutation)?.then_some(id))
    }

    pub fn remove_element(&mut self, id: &str) -> Result<bool, EditorError> {
        self.guard_mutate("remove elements")?;
        let removed = self.apply_tree(Mutation::RemoveElement { id: id.to_string() })?;
        if removed && self.selected_element_id.as_deref() == Some(id) {
            self.selected_element_id = None;
        }
        Ok(removed)
    }

    pub fn update_element_style(&mut self, id: &str, patch: StyleBag) -> Result<bool, EditorError> {
        self.guard_mutate("style elements")?;
        self.apply_tree(Mutation::UpdateStyle {
            id: id.to_string(),
            patch,
        })
    }

    /// Atomic content replacement; inline text edits buffer locally and
    /// commit here on focus loss.
    pub fn update_element_content(&mut self, id: &str, content: &str) -> Result<bool, EditorError> {
        self.guard_mutate("edit element content")?;
        self.apply_tree(Mutation::UpdateContent {
            id: id.to_string(),
            content: content.to_string(),
        })
    }

    pub fn update_element_props(
        &mut self,
        id: &str,
        patch: pagecraft_document::PropsBag,
    ) -> Result<bool, EditorError> {
        self.guard_mutate("edit element props")?;
        self.apply_tree(Mutation::UpdateProps {
            id: id.to_string(),
            patch,
        })
    }

    pub fn move_element(&mut self, id: &str, direction: MoveDirection) -> Result<bool, EditorError> {
        self.guard_mutate("reorder elements")?;
        self.apply_tree(Mutation::MoveElement {
            id: id.to_string(),
            direction,
        })
    }

    /// Scaffold a new custom section; returns its key.
    pub fn add_custom_section(&mut self) -> Result<Option<String>, EditorError> {
        self.guard_mutate("add sections")?;
        let (mutation, key) = Mutation::add_section();
        Ok(self.apply_tree(mutation)?.then_some(key))
    }

    pub fn remove_section(&mut self, key: &str) -> Result<Intent, EditorError> {
        self.guard_mutate("remove sections")?;
        if !self.store.document().custom_sections.contains_key(key) {
            tracing::warn!(key, "remove_section: no such custom section");
            return Ok(Intent::NoOp);
        }
        Ok(Intent::NeedsConfirmation(PendingAction::RemoveSection {
            key: key.to_string(),
        }))
    }

    /// Pick an image through the injected capability and store its URL as
    /// the element's content. Raw bytes never enter the document.
    pub fn set_element_image(
        &mut self,
        id: &str,
        source: &mut dyn ImageSource,
        constraints: ImageConstraints,
    ) -> Result<bool, EditorError> {
        self.guard_mutate("set element image")?;
        let url = source.request_image(constraints).map_err(EditorError::Image)?;
        self.update_element_content(id, &url)
    }

    // --- destructive / lifecycle -------------------------------------------

    pub fn request_reset(&mut self) -> Result<Intent, EditorError> {
        self.guard_delete("reset content")?;
        Ok(Intent::NeedsConfirmation(PendingAction::ResetContent))
    }

    /// Execute a previously returned destructive action. Permissions are
    /// checked again at execution time.
    pub fn confirm(&mut self, action: PendingAction) -> Result<bool, EditorError> {
        match action {
            PendingAction::RemoveItem { collection, id } => {
                self.guard_delete("delete items")?;
                let mut next = self.store.document().clone();
                let removed = collections::remove_item(&mut next, collection, &id);
                if removed {
                    self.commit(next);
                }
                Ok(removed)
            }
            PendingAction::RemoveSection { key } => {
                self.guard_mutate("remove sections")?;
                let removed = self.apply_tree(Mutation::RemoveSection { key })?;
                if removed {
                    self.selected_element_id = None;
                }
                Ok(removed)
            }
            PendingAction::ResetContent => {
                self.guard_delete("reset content")?;
                self.store.reset();
                self.selected_element_id = None;
                self.has_unsaved_changes = false;
                Ok(true)
            }
        }
    }

    /// Publish the draft. Clears the unsaved flag only if the live slot was
    /// actually written.
    pub fn save_changes(&mut self) -> Result<UpdateReport, EditorError> {
        self.guard_mutate("publish")?;
        let mut doc = self.store.document().clone();
        doc.admin_settings.last_published_at = Some(unix_millis());
        doc.admin_settings.is_draft = false;
        let report = self.store.update(doc, true);
        if report.live_persisted {
            self.has_unsaved_changes = false;
        }
        Ok(report)
    }

    /// Drop every unsaved edit at once, reloading the last-published
    /// document into the draft.
    pub fn discard_changes(&mut self) -> Result<(), EditorError> {
        self.guard_mutate("discard changes")?;
        self.store.discard_draft();
        self.selected_element_id = None;
        self.has_unsaved_changes = false;
        Ok(())
    }

    /// Replace the draft with a history snapshot (live slot untouched).
    pub fn restore_history(&mut self, history_entry_id: &str) -> Result<bool, EditorError> {
        self.guard_mutate("restore history")?;
        Ok(self.store.restore(history_entry_id))
    }
}
