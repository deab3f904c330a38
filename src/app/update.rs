use eframe::egui;

use super::command_palette::{CommandContext, CommandPalette};
use super::render::{
    draw_background, draw_elements, draw_in_progress, draw_selection_overlays, tool_button,
};
use super::{DiagramApp, Gesture, Tool, export, file_io, geometry, help, settings, templates};
use crate::error::Error;
use crate::model::{Color, DiagramElement, Direction, ShapeKind};

impl DiagramApp {
    pub fn save_to_library(&mut self) {
        let snapshot = file_io::DiagramFile::snapshot(&self.file_name, &self.elements);
        match self.library.save(snapshot) {
            Ok(()) => {
                self.dirty = false;
                self.status = Some(format!("Saved \"{}\"", self.file_name));
            }
            Err(e) => self.report_error(&e),
        }
    }

    pub fn open_import_dialog(&mut self) {
        self.refresh_library_cache();
        self.show_import_dialog = true;
    }

    pub fn refresh_library_cache(&mut self) {
        match self.library.load_all() {
            Ok(entries) => self.library_cache = entries,
            Err(e) => {
                self.library_cache.clear();
                self.report_error(&e);
            }
        }
    }

    pub fn load_template(&mut self, id: &str) {
        if let Some(elements) = templates::instantiate(id) {
            self.load_elements(elements, None);
            self.status = Some(format!("Loaded template \"{id}\""));
        }
    }

    /// Paste targeted at the context-menu position when one is pending,
    /// else the pointer, else a fixed spot.
    pub fn paste_at_pointer(&mut self) {
        let target = self
            .context_world
            .take()
            .or(self.last_pointer_world)
            .unwrap_or(egui::pos2(100.0, 100.0));
        self.paste_at(target);
    }

    pub fn persist_settings(&mut self) {
        let snapshot = settings::AppSettings {
            library_path: self.library.path().display().to_string(),
            snap_to_grid: self.view.snap_to_grid,
            show_grid: self.view.show_grid,
            grid_size: self.view.grid_size,
        };
        if let Err(e) = settings::save_settings(&self.settings_path, &snapshot) {
            self.report_error(&e);
        }
    }

    /// Adds a shape at the library's default spot, like clicking a shape
    /// palette button.
    pub fn add_shape_from_library(&mut self, shape: ShapeKind, direction: Option<Direction>) {
        self.save_history();
        let id = self.allocate_id(shape);
        let size = if shape == ShapeKind::Line {
            egui::vec2(100.0, 2.0)
        } else {
            egui::vec2(80.0, 60.0)
        };
        let rect = egui::Rect::from_min_size(egui::pos2(100.0, 100.0), size);
        let mut element = DiagramElement::new(id.clone(), shape, rect);
        if let Some(direction) = direction {
            element.direction = Some(direction);
        }
        self.elements.push(element);
        self.select_only(id);
        self.dirty = true;
    }

    fn import_from_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        match file_io::read_diagram(&path) {
            Ok(file) => {
                let name = file.file_name.clone();
                self.load_elements(file.elements, Some(name.clone()));
                self.show_import_dialog = false;
                self.status = Some(format!("Imported \"{name}\""));
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn export_via_dialog(&mut self) {
        if self.elements.is_empty() {
            self.report_error(&Error::EmptyDiagram);
            return;
        }
        let format = self.export_format;
        let quality = self.export_quality;
        let default_name = format!("{}.{}", self.file_name, format.extension());
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter(format.label(), &[format.extension()])
            .save_file()
        else {
            return;
        };
        match export::export_to_file(&path, &self.elements, format, quality) {
            Ok(()) => {
                self.show_export_dialog = false;
                self.status = Some(format!("Exported {}", path.display()));
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn save_json_dialog(&mut self) {
        let default_name = format!("{}.json", self.file_name);
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        let file = file_io::DiagramFile::snapshot(&self.file_name, &self.elements);
        match file_io::write_diagram(&path, &file) {
            Ok(()) => {
                self.dirty = false;
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn command_context(&self) -> CommandContext {
        CommandContext {
            selected_len: self.selection.len(),
            has_undo: self.history.can_undo(),
            has_redo: self.history.can_redo(),
            has_clipboard: !self.clipboard.is_empty(),
            has_elements: !self.elements.is_empty(),
        }
    }
}

impl eframe::App for DiagramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wants_keyboard = ctx.wants_keyboard_input();
        ctx.input_mut(|i| {
            if !self.command_palette.open
                && i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::P)
            {
                self.command_palette.open("");
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                self.save_to_library();
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) {
                self.open_import_dialog();
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::E) {
                self.show_export_dialog = true;
            }
            let skip_shortcuts = wants_keyboard || self.command_palette.open;
            if !skip_shortcuts {
                if i.consume_key(
                    egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
                    egui::Key::Z,
                ) || i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y)
                {
                    self.redo();
                } else if i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z) {
                    self.undo();
                }
                if i.consume_key(egui::Modifiers::COMMAND, egui::Key::C) {
                    self.copy_selected();
                }
                if i.consume_key(egui::Modifiers::COMMAND, egui::Key::X) {
                    self.cut_selected();
                }
                if i.consume_key(egui::Modifiers::COMMAND, egui::Key::V) {
                    self.paste_at_pointer();
                }
                if i.consume_key(egui::Modifiers::COMMAND, egui::Key::A) {
                    self.select_all();
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::Delete)
                    || i.consume_key(egui::Modifiers::NONE, egui::Key::Backspace)
                {
                    self.delete_selected();
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                    self.gesture = None;
                    self.tool = Tool::Select;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::V) {
                    self.tool = Tool::Select;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::R) {
                    self.tool = Tool::Rectangle;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::O) {
                    self.tool = Tool::Circle;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::D) {
                    self.tool = Tool::Diamond;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::A) {
                    self.tool = Tool::Arrow;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::T) {
                    self.tool = Tool::Text;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::L) {
                    self.tool = Tool::Line;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::C) {
                    self.tool = Tool::Connector;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::H) {
                    self.tool = Tool::Pan;
                }
            }
        });

        if let Some(cmd) = {
            let cx = self.command_context();
            self.command_palette.ui(ctx, cx)
        } {
            CommandPalette::execute(self, ctx, cmd);
        }

        self.top_bar(ctx);
        self.shape_library_panel(ctx);
        self.property_panel(ctx);
        self.status_bar(ctx);
        self.canvas(ctx);
        self.dialogs(ctx);
    }
}

impl DiagramApp {
    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    ui.label("Diagram name:");
                    ui.text_edit_singleline(&mut self.file_name);
                    ui.separator();
                    if ui.button("New Diagram").clicked() {
                        self.clear_diagram();
                        ui.close_menu();
                    }
                    if ui.button("Open... (⌘O)").clicked() {
                        self.open_import_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Save to Library (⌘S)").clicked() {
                        self.save_to_library();
                        ui.close_menu();
                    }
                    if ui.button("Save JSON As...").clicked() {
                        self.save_json_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Export... (⌘E)").clicked() {
                        self.show_export_dialog = true;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(self.history.can_undo(), egui::Button::new("Undo (⌘Z)"))
                        .clicked()
                    {
                        self.undo();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(self.history.can_redo(), egui::Button::new("Redo (⌘⇧Z)"))
                        .clicked()
                    {
                        self.redo();
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_selection = !self.selection.is_empty();
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Cut (⌘X)"))
                        .clicked()
                    {
                        self.cut_selected();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Copy (⌘C)"))
                        .clicked()
                    {
                        self.copy_selected();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(!self.clipboard.is_empty(), egui::Button::new("Paste (⌘V)"))
                        .clicked()
                    {
                        self.paste_at_pointer();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Delete (Del)"))
                        .clicked()
                    {
                        self.delete_selected();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Select All (⌘A)").clicked() {
                        self.select_all();
                        ui.close_menu();
                    }
                    if ui.button("Deselect All").clicked() {
                        self.clear_selection();
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Zoom In").clicked() {
                        self.view.set_zoom(self.view.zoom * 1.25);
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.view.set_zoom(self.view.zoom / 1.25);
                        ui.close_menu();
                    }
                    if ui.button("Reset Zoom (100%)").clicked() {
                        self.view.set_zoom(1.0);
                        ui.close_menu();
                    }
                    if ui.button("Reset Pan").clicked() {
                        self.view.pan = egui::Vec2::ZERO;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.checkbox(&mut self.view.show_grid, "Show Grid").changed() {
                        self.persist_settings();
                    }
                    if ui
                        .checkbox(&mut self.view.snap_to_grid, "Snap to Grid")
                        .changed()
                    {
                        self.persist_settings();
                    }
                    ui.horizontal(|ui| {
                        ui.label("Grid size:");
                        if ui
                            .add(
                                egui::DragValue::new(&mut self.view.grid_size)
                                    .range(5.0..=100.0)
                                    .speed(1.0),
                            )
                            .changed()
                        {
                            self.persist_settings();
                        }
                    });
                });
                ui.menu_button("Templates", |ui| {
                    if ui.button("Browse...").clicked() {
                        self.show_template_dialog = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    for template in templates::TEMPLATES {
                        if ui.button(template.name).clicked() {
                            self.load_template(template.id);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("Shortcuts").clicked() {
                        self.show_help = true;
                        ui.close_menu();
                    }
                });
                ui.separator();
                tool_button(ui, "V", Tool::Select, &mut self.tool);
                tool_button(ui, "R", Tool::Rectangle, &mut self.tool);
                tool_button(ui, "O", Tool::Circle, &mut self.tool);
                tool_button(ui, "◇", Tool::Diamond, &mut self.tool);
                tool_button(ui, "→", Tool::Arrow, &mut self.tool);
                tool_button(ui, "T", Tool::Text, &mut self.tool);
                tool_button(ui, "—", Tool::Line, &mut self.tool);
                tool_button(ui, "⌁", Tool::Connector, &mut self.tool);
                tool_button(ui, "✋", Tool::Pan, &mut self.tool);
                ui.separator();
                let title = if self.dirty {
                    format!("{}*", self.file_name)
                } else {
                    self.file_name.clone()
                };
                ui.label(title);
            });
        });
    }

    fn shape_library_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("shape_library")
            .resizable(true)
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.heading("Shape Library");
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.label("Basic Shapes");
                    let basics = [
                        (ShapeKind::Rectangle, "Rectangle"),
                        (ShapeKind::Circle, "Circle"),
                        (ShapeKind::Diamond, "Diamond"),
                        (ShapeKind::Text, "Text"),
                        (ShapeKind::Line, "Line"),
                    ];
                    for (shape, label) in basics {
                        if ui.button(label).clicked() {
                            self.add_shape_from_library(shape, None);
                        }
                    }
                    ui.separator();
                    ui.label("Arrows");
                    let arrows = [
                        (Direction::Right, "Right Arrow"),
                        (Direction::Left, "Left Arrow"),
                        (Direction::Up, "Up Arrow"),
                        (Direction::Down, "Down Arrow"),
                    ];
                    for (direction, label) in arrows {
                        if ui.button(label).clicked() {
                            self.add_shape_from_library(ShapeKind::Arrow, Some(direction));
                        }
                    }
                    ui.separator();
                    ui.label("Flowchart");
                    if ui.button("Process").clicked() {
                        self.add_shape_from_library(ShapeKind::Rectangle, None);
                    }
                    if ui.button("Decision").clicked() {
                        self.add_shape_from_library(ShapeKind::Diamond, None);
                    }
                    if ui.button("Start/End").clicked() {
                        self.add_shape_from_library(ShapeKind::Circle, None);
                    }
                });
            });
    }

    fn property_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("properties")
            .resizable(true)
            .min_width(220.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Properties");
                    ui.separator();
                    match self.selection.as_slice() {
                        [id] => {
                            let id = id.clone();
                            self.single_element_editor(ui, &id);
                        }
                        [] => {
                            ui.label("Nothing selected");
                        }
                        many => {
                            ui.label(format!("{} elements selected", many.len()));
                        }
                    }
                });
            });
    }

    fn single_element_editor(&mut self, ui: &mut egui::Ui, id: &str) {
        use super::actions::ElementUpdate;

        let Some(element) = self.element_by_id(id).cloned() else {
            return;
        };
        let mut push_undo = false;
        let mut updates: Vec<ElementUpdate> = Vec::new();

        ui.label(format!("{} ({})", element.shape.label(), element.id));
        ui.separator();

        if element.shape != ShapeKind::Line {
            ui.label("Text");
            let mut text = element.text.clone();
            let resp = ui.text_edit_singleline(&mut text);
            push_undo |= resp.gained_focus();
            if resp.changed() {
                updates.push(ElementUpdate::Text(text));
            }
            ui.separator();
        }

        ui.label("Position & Size");
        let (mut x, mut y) = (element.x, element.y);
        let (mut w, mut h) = (element.width, element.height);
        ui.horizontal(|ui| {
            ui.label("X:");
            let rx = ui.add(egui::DragValue::new(&mut x).speed(1.0));
            ui.label("Y:");
            let ry = ui.add(egui::DragValue::new(&mut y).speed(1.0));
            push_undo |= rx.gained_focus() || ry.gained_focus();
        });
        ui.horizontal(|ui| {
            ui.label("W:");
            let rw = ui.add(egui::DragValue::new(&mut w).range(1.0..=10_000.0).speed(1.0));
            ui.label("H:");
            let rh = ui.add(egui::DragValue::new(&mut h).range(1.0..=10_000.0).speed(1.0));
            push_undo |= rw.gained_focus() || rh.gained_focus();
        });
        if (x, y) != (element.x, element.y) {
            updates.push(ElementUpdate::Position { x, y });
        }
        if (w, h) != (element.width, element.height) {
            updates.push(ElementUpdate::Size {
                width: w,
                height: h,
            });
        }

        ui.separator();
        ui.label("Fill");
        let mut fill = [
            element.style.fill.r,
            element.style.fill.g,
            element.style.fill.b,
            element.style.fill.a,
        ];
        if ui.color_edit_button_srgba_unmultiplied(&mut fill).changed() {
            push_undo = true;
            updates.push(ElementUpdate::Fill(Color {
                r: fill[0],
                g: fill[1],
                b: fill[2],
                a: fill[3],
            }));
        }
        ui.label("Stroke");
        let mut stroke = [
            element.style.stroke.r,
            element.style.stroke.g,
            element.style.stroke.b,
            element.style.stroke.a,
        ];
        if ui
            .color_edit_button_srgba_unmultiplied(&mut stroke)
            .changed()
        {
            push_undo = true;
            updates.push(ElementUpdate::Stroke(Color {
                r: stroke[0],
                g: stroke[1],
                b: stroke[2],
                a: stroke[3],
            }));
        }
        let mut stroke_width = element.style.stroke_width;
        let resp = ui.add(egui::Slider::new(&mut stroke_width, 0.0..=12.0).text("Stroke width"));
        push_undo |= resp.drag_started();
        if resp.changed() {
            updates.push(ElementUpdate::StrokeWidth(stroke_width));
        }
        let mut opacity = element.style.opacity;
        let resp = ui.add(egui::Slider::new(&mut opacity, 0.0..=1.0).text("Opacity"));
        push_undo |= resp.drag_started();
        if resp.changed() {
            updates.push(ElementUpdate::Opacity(opacity));
        }

        if element.shape != ShapeKind::Line {
            ui.separator();
            ui.label("Font");
            let mut font_size = element.style.font_size();
            let resp = ui.add(
                egui::DragValue::new(&mut font_size)
                    .range(6.0..=96.0)
                    .speed(1.0),
            );
            push_undo |= resp.gained_focus();
            if resp.changed() {
                updates.push(ElementUpdate::FontSize(font_size));
            }
            let mut family = element.style.font_family().to_string();
            let resp = ui.text_edit_singleline(&mut family);
            push_undo |= resp.gained_focus();
            if resp.changed() {
                updates.push(ElementUpdate::FontFamily(family));
            }
        }

        if element.shape == ShapeKind::Arrow {
            ui.separator();
            ui.label("Direction");
            let mut direction = element.direction();
            let before = direction;
            egui::ComboBox::from_id_salt("arrow_direction")
                .selected_text(format!("{direction:?}"))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut direction, Direction::Right, "Right");
                    ui.selectable_value(&mut direction, Direction::Left, "Left");
                    ui.selectable_value(&mut direction, Direction::Up, "Up");
                    ui.selectable_value(&mut direction, Direction::Down, "Down");
                });
            if direction != before {
                push_undo = true;
                updates.push(ElementUpdate::Direction(direction));
            }
        }

        if push_undo {
            self.save_history();
        }
        for update in updates {
            self.apply_element_update(id, update);
        }
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Ready");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Zoom: {:.0}%", self.view.zoom * 100.0));
                    ui.separator();
                    ui.label(format!("Elements: {}", self.elements.len()));
                    ui.separator();
                    ui.label(format!("Selected: {}", self.selection.len()));
                });
            });
        });
    }

    fn canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            let origin = rect.min;
            let painter = ui.painter_at(rect);

            let pointer_screen = ctx.input(|i| i.pointer.interact_pos());
            let pointer_world = pointer_screen.map(|p| self.view.screen_to_world(origin, p));

            // Wheel: zoom with the platform modifier, pan otherwise.
            let (scroll, zoom_modifier) = ctx.input(|i| {
                (
                    i.raw_scroll_delta,
                    i.modifiers.command || i.modifiers.ctrl,
                )
            });
            if scroll != egui::Vec2::ZERO {
                if let Some(hover) = ctx.input(|i| i.pointer.hover_pos()) {
                    if rect.contains(hover) {
                        self.wheel(origin, hover, scroll, zoom_modifier);
                    }
                }
            }

            let additive = ctx.input(|i| i.modifiers.shift || i.modifiers.ctrl || i.modifiers.command);

            if let (Some(world), Some(screen)) = (pointer_world, pointer_screen) {
                if response.drag_started() {
                    self.pointer_pressed(world, screen, additive);
                }
                if response.dragged() || response.hovered() {
                    self.pointer_moved(world, screen);
                }
                if response.clicked() {
                    // A click that already opened a gesture via
                    // drag_started must not press a second time.
                    if self.gesture.is_none() {
                        self.pointer_pressed(world, screen, additive);
                    }
                    self.pointer_released();
                }
            }
            if response.drag_stopped() {
                self.pointer_released();
            }

            if response.secondary_clicked() {
                self.context_world = pointer_world;
            }
            response.context_menu(|ui| {
                let has_selection = !self.selection.is_empty();
                if ui
                    .add_enabled(has_selection, egui::Button::new("Copy"))
                    .clicked()
                {
                    self.copy_selected();
                    ui.close_menu();
                }
                if ui
                    .add_enabled(!self.clipboard.is_empty(), egui::Button::new("Paste"))
                    .clicked()
                {
                    self.paste_at_pointer();
                    ui.close_menu();
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new("Delete"))
                    .clicked()
                {
                    self.delete_selected();
                    ui.close_menu();
                }
            });

            self.update_cursor(ctx, pointer_world);

            draw_background(&painter, rect, &self.view);
            draw_elements(&painter, origin, &self.view, &self.elements);
            if let (Some(Gesture::Draw { start }), Some(current)) =
                (&self.gesture, self.last_pointer_world)
            {
                draw_in_progress(&painter, origin, &self.view, self.tool, *start, current);
            }
            draw_selection_overlays(&painter, origin, &self.view, &self.elements, &self.selection);
        });
    }

    fn update_cursor(&self, ctx: &egui::Context, pointer_world: Option<egui::Pos2>) {
        let icon = match self.tool {
            Tool::Pan => egui::CursorIcon::Grab,
            Tool::Select => {
                let hovering_handle = match (self.selection.as_slice(), pointer_world) {
                    ([id], Some(p)) => self.element_by_id(id).and_then(|e| {
                        geometry::resize_handle_at(
                            e,
                            p.x,
                            p.y,
                            super::HANDLE_SCREEN_SIZE / self.view.zoom,
                        )
                    }),
                    _ => None,
                };
                if let Some(handle) = hovering_handle {
                    use super::geometry::HandleId;
                    match handle {
                        HandleId::N | HandleId::S => egui::CursorIcon::ResizeVertical,
                        HandleId::E | HandleId::W => egui::CursorIcon::ResizeHorizontal,
                        HandleId::NE | HandleId::SW => egui::CursorIcon::ResizeNeSw,
                        HandleId::NW | HandleId::SE => egui::CursorIcon::ResizeNwSe,
                    }
                } else if pointer_world.is_some_and(|p| {
                    geometry::topmost_element_at(&self.elements, p.x, p.y).is_some()
                }) {
                    egui::CursorIcon::Move
                } else {
                    egui::CursorIcon::Default
                }
            }
            _ => egui::CursorIcon::Crosshair,
        };
        ctx.set_cursor_icon(icon);
    }

    fn dialogs(&mut self, ctx: &egui::Context) {
        if self.show_export_dialog {
            let mut open = true;
            let mut do_export = false;
            egui::Window::new("Export Diagram")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Format");
                    egui::ComboBox::from_id_salt("export_format")
                        .selected_text(self.export_format.label())
                        .show_ui(ui, |ui| {
                            for format in [
                                export::ExportFormat::Png,
                                export::ExportFormat::Svg,
                                export::ExportFormat::Jpeg,
                            ] {
                                ui.selectable_value(&mut self.export_format, format, format.label());
                            }
                        });
                    ui.label("Quality");
                    egui::ComboBox::from_id_salt("export_quality")
                        .selected_text(self.export_quality.label())
                        .show_ui(ui, |ui| {
                            for quality in [
                                export::ExportQuality::Low,
                                export::ExportQuality::Medium,
                                export::ExportQuality::High,
                            ] {
                                ui.selectable_value(
                                    &mut self.export_quality,
                                    quality,
                                    quality.label(),
                                );
                            }
                        });
                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button("Export").clicked() {
                            do_export = true;
                        }
                        if ui.button("Cancel").clicked() {
                            self.show_export_dialog = false;
                        }
                    });
                });
            if do_export {
                self.export_via_dialog();
            }
            if !open {
                self.show_export_dialog = false;
            }
        }

        if self.show_import_dialog {
            let mut open = true;
            let mut load: Option<file_io::DiagramFile> = None;
            let mut delete: Option<String> = None;
            let mut import_file = false;
            egui::Window::new("Open Diagram")
                .open(&mut open)
                .default_width(380.0)
                .show(ctx, |ui| {
                    if ui.button("Import from file...").clicked() {
                        import_file = true;
                    }
                    ui.separator();
                    ui.label(format!("Saved diagrams ({})", self.library_cache.len()));
                    if self.library_cache.is_empty() {
                        ui.label("No saved diagrams yet");
                    }
                    egui::ScrollArea::vertical().max_height(280.0).show(ui, |ui| {
                        for entry in &self.library_cache {
                            ui.horizontal(|ui| {
                                ui.label(format!(
                                    "{} ({} elements, {})",
                                    entry.file_name,
                                    entry.elements.len(),
                                    entry.timestamp,
                                ));
                                if ui.small_button("Load").clicked() {
                                    load = Some(entry.clone());
                                }
                                if ui.small_button("Delete").clicked() {
                                    delete = Some(entry.file_name.clone());
                                }
                            });
                        }
                    });
                });
            if import_file {
                self.import_from_file();
            }
            if let Some(file) = load {
                let name = file.file_name.clone();
                self.load_elements(file.elements, Some(name.clone()));
                self.show_import_dialog = false;
                self.status = Some(format!("Loaded \"{name}\""));
            }
            if let Some(name) = delete {
                match self.library.remove(&name) {
                    Ok(_) => self.refresh_library_cache(),
                    Err(e) => self.report_error(&e),
                }
            }
            if !open {
                self.show_import_dialog = false;
            }
        }

        if self.show_template_dialog {
            let mut open = true;
            let mut picked: Option<&'static str> = None;
            egui::Window::new("Choose Template")
                .open(&mut open)
                .collapsible(false)
                .show(ctx, |ui| {
                    for template in templates::TEMPLATES {
                        ui.horizontal(|ui| {
                            if ui.button(template.name).clicked() {
                                picked = Some(template.id);
                            }
                            ui.label(template.category);
                        });
                    }
                });
            if let Some(id) = picked {
                self.load_template(id);
                self.show_template_dialog = false;
            }
            if !open {
                self.show_template_dialog = false;
            }
        }

        if let Some(message) = self.error.clone() {
            let mut dismissed = false;
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(&message);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            if dismissed {
                self.error = None;
            }
        }

        if self.show_help {
            let mut open = self.show_help;
            help::draw_help_window(ctx, &mut open);
            self.show_help = open;
        }
    }
}
