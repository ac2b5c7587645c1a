//! Reactive editor state: the ERD, its history and the control panel inputs

use crate::core::api::GenerateErdResponse;
use crate::core::{ErdHistory, ErdObject, ErdState, FieldType, Zoom};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct EditorState {
    /// ERD currently on screen
    pub erd: RwSignal<ErdState>,
    history: RwSignal<ErdHistory>,
    /// Object names of the signed-in org
    pub objects: RwSignal<Vec<String>>,
    pub selected: RwSignal<Vec<String>>,
    /// Objects created locally, re-appended after every generation
    pub custom_objects: RwSignal<Vec<ErdObject>>,
    /// Object that "Add Field" appends to
    pub field_object: RwSignal<String>,
    pub field_limit: RwSignal<usize>,
    pub show_all_relationships: RwSignal<bool>,
    pub zoom: RwSignal<Zoom>,
    pub collapsed: RwSignal<bool>,
    /// True while /generate_erd is in flight
    pub generating: RwSignal<bool>,
}

impl EditorState {
    pub fn new(default_field_limit: usize) -> Self {
        Self {
            erd: RwSignal::new(ErdState::new()),
            history: RwSignal::new(ErdHistory::new()),
            objects: RwSignal::new(Vec::new()),
            selected: RwSignal::new(Vec::new()),
            custom_objects: RwSignal::new(Vec::new()),
            field_object: RwSignal::new(String::new()),
            field_limit: RwSignal::new(default_field_limit),
            show_all_relationships: RwSignal::new(false),
            zoom: RwSignal::new(Zoom::new()),
            collapsed: RwSignal::new(false),
            generating: RwSignal::new(false),
        }
    }

    /// Make `state` current and record it as a new history snapshot
    pub fn apply(&self, state: ErdState) {
        self.history.update(|h| {
            h.record(state.clone());
        });
        self.erd.set(state);
    }

    pub fn undo(&self) {
        let mut restored = None;
        self.history.update(|h| restored = h.undo().cloned());
        if let Some(state) = restored {
            self.erd.set(state);
        }
    }

    pub fn redo(&self) {
        let mut restored = None;
        self.history.update(|h| restored = h.redo().cloned());
        if let Some(state) = restored {
            self.erd.set(state);
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.with(|h| h.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.history.with(|h| h.can_redo())
    }

    /// Store the org object list; the first one becomes the field target
    pub fn set_objects(&self, objects: Vec<String>) {
        if let Some(first) = objects.first() {
            self.field_object.set(first.clone());
        }
        self.objects.set(objects);
    }

    pub fn set_selected(&self, selected: Vec<String>) {
        if let Some(first) = selected.first() {
            self.field_object.set(first.clone());
        }
        self.selected.set(selected);
    }

    pub fn toggle_selected(&self, name: &str) {
        let next = toggled(&self.selected.get_untracked(), name);
        self.set_selected(next);
    }

    /// Names offered as field target and lookup target
    pub fn field_targets(&self) -> Vec<String> {
        field_targets(&self.selected.get(), &self.custom_objects.get())
    }

    /// Replace the ERD with a freshly generated one plus local objects.
    ///
    /// Returns false without touching anything when the state has already
    /// been disposed, e.g. a response arriving after the editor unmounted.
    pub fn apply_generated(&self, response: GenerateErdResponse) -> bool {
        let Some(annotations) = self.erd.try_with_untracked(|erd| erd.annotations.clone()) else {
            return false;
        };
        let Some(state) = self.custom_objects.try_with_untracked(|custom| {
            ErdState::merge_generated(
                response.objects,
                response.relationships,
                custom,
                annotations,
            )
        }) else {
            return false;
        };
        self.apply(state);
        true
    }

    /// Returns false when the name is blank
    pub fn add_custom_object(&self, name: &str) -> bool {
        let Some(next) = self.erd.with_untracked(|erd| erd.with_custom_object(name)) else {
            return false;
        };

        self.custom_objects
            .update(|custom| custom.push(ErdObject::custom(name)));
        self.field_object.set(name.to_string());
        self.selected.update(|selected| selected.push(name.to_string()));
        self.apply(next);
        true
    }

    /// Returns false when the field name or target object is blank
    pub fn add_custom_field(&self, name: &str, field_type: FieldType, relation: &str) -> bool {
        let object = self.field_object.get_untracked();
        let next = self
            .erd
            .with_untracked(|erd| erd.with_custom_field(&object, name, field_type, relation));

        match next {
            Some(state) => {
                self.apply(state);
                true
            }
            None => false,
        }
    }

    pub fn add_annotation(&self, text: &str) -> bool {
        match self.erd.with_untracked(|erd| erd.with_annotation(text)) {
            Some(state) => {
                self.apply(state);
                true
            }
            None => false,
        }
    }

    /// Forget everything tied to the signed-in org
    pub fn reset(&self) {
        self.erd.set(ErdState::new());
        self.history.update(|h| h.clear());
        self.objects.set(Vec::new());
        self.selected.set(Vec::new());
        self.custom_objects.set(Vec::new());
        self.field_object.set(String::new());
        self.generating.set(false);
    }
}

pub fn provide_editor_state(default_field_limit: usize) -> EditorState {
    let state = EditorState::new(default_field_limit);
    provide_context(state);
    state
}

pub fn use_editor_state() -> EditorState {
    expect_context::<EditorState>()
}

/// Selected names followed by custom object names, duplicates removed
fn field_targets(selected: &[String], custom: &[ErdObject]) -> Vec<String> {
    let mut targets: Vec<String> = Vec::with_capacity(selected.len() + custom.len());
    for name in selected.iter().chain(custom.iter().map(|o| &o.name)) {
        if !targets.contains(name) {
            targets.push(name.clone());
        }
    }
    targets
}

fn toggled(selected: &[String], name: &str) -> Vec<String> {
    if selected.iter().any(|s| s == name) {
        selected.iter().filter(|s| *s != name).cloned().collect()
    } else {
        let mut next = selected.to_vec();
        next.push(name.to_string());
        next
    }
}
