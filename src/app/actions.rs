use eframe::egui;

use super::DiagramApp;
use crate::error::Error;
use crate::model::{Color, DiagramElement, Direction};

/// Offset applied to successive pasted clones so they fan out from the
/// paste point instead of stacking exactly.
const PASTE_STAGGER: f32 = 20.0;

/// One editable element property with its strongly-typed value. The
/// property panel and palette dispatch these through an exhaustive match
/// instead of string-keyed path lookups.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementUpdate {
    Fill(Color),
    Stroke(Color),
    StrokeWidth(f32),
    Opacity(f32),
    FontSize(f32),
    FontFamily(String),
    Text(String),
    Direction(Direction),
    Position { x: f32, y: f32 },
    Size { width: f32, height: f32 },
}

impl DiagramApp {
    /// Snapshots the current element list into the history ledger. Called
    /// once at the start of every mutating gesture or structural edit.
    pub fn save_history(&mut self) {
        self.history.save_state(&self.elements);
    }

    /// Atomic undo: the ledger step and the copy back into the live
    /// element list happen in one call, with the selection cleared so no
    /// stale ids survive the restore.
    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.elements = snapshot.to_vec();
            self.selection.clear();
            self.dirty = true;
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.elements = snapshot.to_vec();
            self.selection.clear();
            self.dirty = true;
        }
    }

    pub fn select_element(&mut self, id: String) {
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    pub fn select_only(&mut self, id: String) {
        self.selection.clear();
        self.selection.push(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        self.selection = self.elements.iter().map(|e| e.id.clone()).collect();
    }

    /// Drops selection entries whose element no longer exists. Runs after
    /// every structural mutation so danglers never outlive the frame that
    /// removed their element.
    pub fn reconcile_selection(&mut self) {
        let elements = &self.elements;
        self.selection.retain(|id| elements.iter().any(|e| &e.id == id));
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|s| s == id)
    }

    /// Selected elements in element (z) order.
    pub fn selected_elements(&self) -> Vec<&DiagramElement> {
        self.elements
            .iter()
            .filter(|e| self.is_selected(&e.id))
            .collect()
    }

    pub fn move_selected_by(&mut self, delta: egui::Vec2) {
        if self.selection.is_empty() {
            return;
        }
        let selection = &self.selection;
        for element in &mut self.elements {
            if selection.iter().any(|id| id == &element.id) {
                element.x += delta.x;
                element.y += delta.y;
            }
        }
        self.dirty = true;
    }

    /// Removes the selected elements and their selection entries in one
    /// step; ids with no matching element are silently skipped.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.save_history();
        let selection = std::mem::take(&mut self.selection);
        self.elements.retain(|e| !selection.iter().any(|id| id == &e.id));
        self.reconcile_selection();
        self.dirty = true;
        self.status = Some(format!("Deleted {} element(s)", selection.len()));
    }

    pub fn copy_selected(&mut self) {
        if self.selection.is_empty() {
            self.status = Some("Nothing selected to copy".to_string());
            return;
        }
        self.clipboard = self.selected_elements().into_iter().cloned().collect();
        self.status = Some(format!("Copied {} element(s)", self.clipboard.len()));
    }

    pub fn cut_selected(&mut self) {
        self.copy_selected();
        self.delete_selected();
    }

    /// Pastes clipboard contents at a world position. Clones get fresh
    /// ids, a staggered position per clone, and become the new selection.
    pub fn paste_at(&mut self, world: egui::Pos2) {
        if self.clipboard.is_empty() {
            self.status = Some("Nothing in clipboard to paste".to_string());
            return;
        }
        self.save_history();
        let sources = self.clipboard.clone();
        let mut new_ids = Vec::with_capacity(sources.len());
        for (index, source) in sources.into_iter().enumerate() {
            let mut clone = source;
            clone.id = self.allocate_suffixed_id(&clone.id);
            clone.x = world.x + index as f32 * PASTE_STAGGER;
            clone.y = world.y + index as f32 * PASTE_STAGGER;
            new_ids.push(clone.id.clone());
            self.elements.push(clone);
        }
        self.status = Some(format!("Pasted {} element(s)", new_ids.len()));
        self.selection = new_ids;
        self.dirty = true;
    }

    fn allocate_suffixed_id(&mut self, base: &str) -> String {
        loop {
            let candidate = format!("{base}_copy_{}", self.next_id);
            self.next_id += 1;
            if !self.elements.iter().any(|e| e.id == candidate) {
                return candidate;
            }
        }
    }

    /// Empties the canvas. Undoable like any other structural edit.
    pub fn clear_diagram(&mut self) {
        self.save_history();
        self.elements.clear();
        self.selection.clear();
        self.dirty = false;
    }

    /// Replaces the element list wholesale (import, template load). The
    /// ledger is re-based so undo cannot step across the load boundary
    /// into snapshots of a different document.
    pub fn load_elements(&mut self, elements: Vec<DiagramElement>, file_name: Option<String>) {
        self.elements = elements;
        self.selection.clear();
        self.history.reset(&self.elements);
        if let Some(name) = file_name {
            self.file_name = name;
        }
        self.dirty = false;
    }

    /// Applies one typed property update to one element. Unknown ids are
    /// no-ops. Style invariants (`opacity` in [0, 1], `stroke_width` >= 0)
    /// are enforced here rather than trusted from the caller.
    pub fn apply_element_update(&mut self, id: &str, update: ElementUpdate) {
        let Some(index) = self.element_index_by_id(id) else {
            return;
        };
        let element = &mut self.elements[index];
        match update {
            ElementUpdate::Fill(color) => element.style.fill = color,
            ElementUpdate::Stroke(color) => element.style.stroke = color,
            ElementUpdate::StrokeWidth(width) => element.style.stroke_width = width.max(0.0),
            ElementUpdate::Opacity(opacity) => element.style.opacity = opacity.clamp(0.0, 1.0),
            ElementUpdate::FontSize(size) => element.style.font_size = Some(size.max(1.0)),
            ElementUpdate::FontFamily(family) => element.style.font_family = Some(family),
            ElementUpdate::Text(text) => element.text = text,
            ElementUpdate::Direction(direction) => element.direction = Some(direction),
            ElementUpdate::Position { x, y } => {
                element.x = x;
                element.y = y;
            }
            ElementUpdate::Size { width, height } => {
                element.width = width;
                element.height = height;
            }
        }
        self.dirty = true;
    }

    pub(crate) fn report_error(&mut self, error: &Error) {
        log::error!("{error}");
        self.error = Some(error.to_string());
    }
}
