use eframe::egui;

use crate::model::DiagramElement;

/// Resize cannot shrink an element below this many world units per axis.
pub const MIN_RESIZE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleId {
    NW,
    NE,
    SW,
    SE,
    N,
    S,
    W,
    E,
}

/// Fixed probe order: corners before edge midpoints. On degenerate tiny
/// shapes where handle boxes overlap, the first match in this order wins.
pub const HANDLE_ORDER: [HandleId; 8] = [
    HandleId::NW,
    HandleId::NE,
    HandleId::SW,
    HandleId::SE,
    HandleId::N,
    HandleId::S,
    HandleId::W,
    HandleId::E,
];

/// World-space anchor point of a handle on an element's bounding box.
pub fn handle_anchor(element: &DiagramElement, handle: HandleId) -> egui::Pos2 {
    let (x, y, w, h) = (element.x, element.y, element.width, element.height);
    match handle {
        HandleId::NW => egui::pos2(x, y),
        HandleId::NE => egui::pos2(x + w, y),
        HandleId::SW => egui::pos2(x, y + h),
        HandleId::SE => egui::pos2(x + w, y + h),
        HandleId::N => egui::pos2(x + w * 0.5, y),
        HandleId::S => egui::pos2(x + w * 0.5, y + h),
        HandleId::W => egui::pos2(x, y + h * 0.5),
        HandleId::E => egui::pos2(x + w, y + h * 0.5),
    }
}

/// Tests the eight fixed resize hotspots, each a `handle_size_world` square
/// centered on its anchor, and returns the first hit.
pub fn resize_handle_at(
    element: &DiagramElement,
    px: f32,
    py: f32,
    handle_size_world: f32,
) -> Option<HandleId> {
    let half = handle_size_world * 0.5;
    HANDLE_ORDER.into_iter().find(|&handle| {
        let anchor = handle_anchor(element, handle);
        px >= anchor.x - half
            && px <= anchor.x + half
            && py >= anchor.y - half
            && py <= anchor.y + half
    })
}

/// Result of a resize step; the caller writes it back onto the element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizedBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Applies a pointer delta through a handle. Each handle controls which of
/// (x, y, width, height) move and with what sign; both extents are floored
/// at [`MIN_RESIZE`], and handles on the min edge shift the origin by the
/// actual extent change so the opposite edge stays anchored even when the
/// floor clamps the delta.
pub fn apply_resize(
    element: &DiagramElement,
    handle: HandleId,
    delta_x: f32,
    delta_y: f32,
) -> ResizedBox {
    let (x, y, w, h) = (element.x, element.y, element.width, element.height);
    let grow_e = (w + delta_x).max(MIN_RESIZE);
    let grow_w = (w - delta_x).max(MIN_RESIZE);
    let grow_s = (h + delta_y).max(MIN_RESIZE);
    let grow_n = (h - delta_y).max(MIN_RESIZE);
    let (width, height) = match handle {
        HandleId::SE => (grow_e, grow_s),
        HandleId::NE => (grow_e, grow_n),
        HandleId::SW => (grow_w, grow_s),
        HandleId::NW => (grow_w, grow_n),
        HandleId::E => (grow_e, h),
        HandleId::W => (grow_w, h),
        HandleId::S => (w, grow_s),
        HandleId::N => (w, grow_n),
    };
    let x = match handle {
        HandleId::NW | HandleId::SW | HandleId::W => x + (w - width),
        _ => x,
    };
    let y = match handle {
        HandleId::NW | HandleId::NE | HandleId::N => y + (h - height),
        _ => y,
    };
    ResizedBox {
        x,
        y,
        width,
        height,
    }
}

/// Frontmost element under a world point. Later array entries draw on top,
/// so the scan runs back-to-front.
pub fn topmost_element_at(
    elements: &[DiagramElement],
    px: f32,
    py: f32,
) -> Option<&DiagramElement> {
    elements.iter().rev().find(|e| e.contains_point(px, py))
}

/// Rounds a drag delta to the nearest grid multiple. Snapping the delta
/// (rather than the absolute position) preserves whatever alignment the
/// element had when the drag started.
pub fn snap_delta(delta: egui::Vec2, grid_size: f32) -> egui::Vec2 {
    if grid_size <= f32::EPSILON {
        return delta;
    }
    egui::vec2(
        (delta.x / grid_size).round() * grid_size,
        (delta.y / grid_size).round() * grid_size,
    )
}
