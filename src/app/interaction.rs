use eframe::egui;

use super::{DiagramApp, Gesture, HANDLE_SCREEN_SIZE, Tool, geometry};
use crate::model::DiagramElement;

/// A drawing gesture must span more than this many world units on both
/// axes before it materializes an element; a bare click creates nothing.
pub const MIN_DRAW_SIZE: f32 = 5.0;

impl DiagramApp {
    /// Pointer press in the canvas. `world`/`screen` are the same point in
    /// the two coordinate spaces; `additive` is true when a multi-select
    /// modifier (ctrl/cmd/shift) is held.
    pub fn pointer_pressed(&mut self, world: egui::Pos2, screen: egui::Pos2, additive: bool) {
        self.last_pointer_world = Some(world);
        match self.tool {
            Tool::Select => {
                // Handles extend past the element's box, so probe them
                // before the body hit-test.
                if let [selected_id] = self.selection.as_slice() {
                    let handle_size_world = HANDLE_SCREEN_SIZE / self.view.zoom;
                    if let Some(element) = self.element_by_id(selected_id) {
                        if let Some(handle) = geometry::resize_handle_at(
                            element,
                            world.x,
                            world.y,
                            handle_size_world,
                        ) {
                            let id = element.id.clone();
                            self.save_history();
                            self.gesture = Some(Gesture::Resize {
                                id,
                                handle,
                                anchor: world,
                            });
                            return;
                        }
                    }
                }
                if let Some(hit) = geometry::topmost_element_at(&self.elements, world.x, world.y) {
                    let id = hit.id.clone();
                    if !self.selection.contains(&id) {
                        if additive {
                            self.select_element(id);
                        } else {
                            self.select_only(id);
                        }
                    }
                    self.save_history();
                    self.gesture = Some(Gesture::Drag { anchor: world });
                } else {
                    self.clear_selection();
                }
            }
            Tool::Pan => {
                self.gesture = Some(Gesture::Pan { anchor: screen });
            }
            _ => {
                self.save_history();
                self.gesture = Some(Gesture::Draw { start: world });
            }
        }
    }

    /// Pointer motion. Always records the world position (it feeds the
    /// drawing preview), then advances whichever gesture is active.
    pub fn pointer_moved(&mut self, world: egui::Pos2, screen: egui::Pos2) {
        self.last_pointer_world = Some(world);
        match self.gesture.clone() {
            Some(Gesture::Resize { id, handle, anchor }) => {
                let delta = world - anchor;
                if let Some(idx) = self.element_index_by_id(&id) {
                    let resized = geometry::apply_resize(&self.elements[idx], handle, delta.x, delta.y);
                    let element = &mut self.elements[idx];
                    element.x = resized.x;
                    element.y = resized.y;
                    element.width = resized.width;
                    element.height = resized.height;
                    self.dirty = true;
                }
                self.gesture = Some(Gesture::Resize {
                    id,
                    handle,
                    anchor: world,
                });
            }
            Some(Gesture::Drag { anchor }) => {
                let raw = world - anchor;
                let applied = if self.view.snap_to_grid {
                    geometry::snap_delta(raw, self.view.grid_size)
                } else {
                    raw
                };
                if applied != egui::Vec2::ZERO {
                    self.move_selected_by(applied);
                }
                // Advance the anchor by the applied amount, not the raw
                // pointer motion, so snapped drags do not accumulate drift.
                self.gesture = Some(Gesture::Drag {
                    anchor: anchor + applied,
                });
            }
            Some(Gesture::Pan { anchor }) => {
                let delta_screen = screen - anchor;
                self.view.pan += delta_screen / self.view.zoom;
                self.gesture = Some(Gesture::Pan { anchor: screen });
            }
            Some(Gesture::Draw { .. }) | None => {}
        }
    }

    /// Pointer release: materializes a pending drawing gesture when it
    /// clears the minimum-size threshold, then returns to idle whatever
    /// the gesture was.
    pub fn pointer_released(&mut self) {
        if let Some(Gesture::Draw { start }) = self.gesture.take() {
            if let (Some(last), Some(shape)) = (self.last_pointer_world, self.tool.shape()) {
                let width = (last.x - start.x).abs();
                let height = (last.y - start.y).abs();
                if width > MIN_DRAW_SIZE && height > MIN_DRAW_SIZE {
                    let rect = egui::Rect::from_two_pos(start, last);
                    let id = self.allocate_id(shape);
                    self.elements.push(DiagramElement::new(id, shape, rect));
                    self.dirty = true;
                }
            }
        }
        self.gesture = None;
    }

    /// Wheel input: with the zoom modifier held, one geometric zoom notch
    /// per event (x1.1 in, x0.9 out) anchored at the cursor; otherwise the
    /// delta pans the view in world units.
    pub fn wheel(
        &mut self,
        origin: egui::Pos2,
        cursor: egui::Pos2,
        delta: egui::Vec2,
        zoom_modifier: bool,
    ) {
        if zoom_modifier {
            let factor = if delta.y > 0.0 {
                1.1
            } else if delta.y < 0.0 {
                0.9
            } else {
                return;
            };
            self.view.zoom_about_screen_point(origin, cursor, factor);
        } else {
            self.view.pan += delta / self.view.zoom;
        }
    }
}
