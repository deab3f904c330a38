use eframe::egui;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::{DiagramApp, Tool};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandId {
    ToolSelect,
    ToolRectangle,
    ToolCircle,
    ToolDiamond,
    ToolArrow,
    ToolText,
    ToolLine,
    ToolConnector,
    ToolPan,
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    Delete,
    SelectAll,
    DeselectAll,
    NewDiagram,
    SaveDiagram,
    OpenDiagram,
    ExportDiagram,
    TemplateFlowchart,
    TemplateOrgChart,
    ToggleGrid,
    ToggleSnap,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    Help,
}

pub struct CommandSpec {
    pub id: CommandId,
    pub name: &'static str,
    pub search: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { id: CommandId::ToolSelect, name: "Tool: Select", search: "select tool v" },
    CommandSpec { id: CommandId::ToolRectangle, name: "Tool: Rectangle", search: "rectangle rect tool r" },
    CommandSpec { id: CommandId::ToolCircle, name: "Tool: Circle", search: "circle ellipse oval tool o" },
    CommandSpec { id: CommandId::ToolDiamond, name: "Tool: Diamond", search: "diamond decision rhombus tool d" },
    CommandSpec { id: CommandId::ToolArrow, name: "Tool: Arrow", search: "arrow tool a" },
    CommandSpec { id: CommandId::ToolText, name: "Tool: Text", search: "text label tool t" },
    CommandSpec { id: CommandId::ToolLine, name: "Tool: Line", search: "line tool l" },
    CommandSpec { id: CommandId::ToolConnector, name: "Tool: Connector", search: "connector link tool c" },
    CommandSpec { id: CommandId::ToolPan, name: "Tool: Pan", search: "pan hand move view tool" },
    CommandSpec { id: CommandId::Undo, name: "Edit: Undo", search: "undo" },
    CommandSpec { id: CommandId::Redo, name: "Edit: Redo", search: "redo" },
    CommandSpec { id: CommandId::Copy, name: "Edit: Copy", search: "copy clipboard" },
    CommandSpec { id: CommandId::Cut, name: "Edit: Cut", search: "cut clipboard" },
    CommandSpec { id: CommandId::Paste, name: "Edit: Paste", search: "paste clipboard" },
    CommandSpec { id: CommandId::Delete, name: "Edit: Delete", search: "delete remove" },
    CommandSpec { id: CommandId::SelectAll, name: "Edit: Select All", search: "select all" },
    CommandSpec { id: CommandId::DeselectAll, name: "Edit: Deselect All", search: "deselect clear selection" },
    CommandSpec { id: CommandId::NewDiagram, name: "File: New Diagram", search: "new clear diagram" },
    CommandSpec { id: CommandId::SaveDiagram, name: "File: Save", search: "save file json library" },
    CommandSpec { id: CommandId::OpenDiagram, name: "File: Open", search: "open load import file" },
    CommandSpec { id: CommandId::ExportDiagram, name: "File: Export...", search: "export png jpeg svg image" },
    CommandSpec { id: CommandId::TemplateFlowchart, name: "Template: Basic Flowchart", search: "template flowchart process" },
    CommandSpec { id: CommandId::TemplateOrgChart, name: "Template: Organization Chart", search: "template org chart business" },
    CommandSpec { id: CommandId::ToggleGrid, name: "View: Toggle Grid", search: "grid show hide toggle" },
    CommandSpec { id: CommandId::ToggleSnap, name: "View: Toggle Snap to Grid", search: "snap grid toggle" },
    CommandSpec { id: CommandId::ZoomIn, name: "View: Zoom In", search: "zoom in" },
    CommandSpec { id: CommandId::ZoomOut, name: "View: Zoom Out", search: "zoom out" },
    CommandSpec { id: CommandId::ZoomReset, name: "View: Reset Zoom", search: "zoom reset 100" },
    CommandSpec { id: CommandId::Help, name: "Help: Shortcuts", search: "help shortcuts keys" },
];

#[derive(Default)]
pub struct CommandPalette {
    pub open: bool,
    pub query: String,
    pub selected: usize,
    request_focus: bool,
}

#[derive(Clone, Copy)]
pub struct CommandContext {
    pub selected_len: usize,
    pub has_undo: bool,
    pub has_redo: bool,
    pub has_clipboard: bool,
    pub has_elements: bool,
}

impl CommandPalette {
    pub fn open(&mut self, query: impl Into<String>) {
        self.open = true;
        self.query = query.into();
        self.selected = 0;
        self.request_focus = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected = 0;
        self.request_focus = false;
    }

    fn is_enabled(cx: CommandContext, id: CommandId) -> bool {
        match id {
            CommandId::Undo => cx.has_undo,
            CommandId::Redo => cx.has_redo,
            CommandId::Copy | CommandId::Cut | CommandId::Delete => cx.selected_len > 0,
            CommandId::Paste => cx.has_clipboard,
            CommandId::SelectAll | CommandId::ExportDiagram | CommandId::SaveDiagram => {
                cx.has_elements
            }
            CommandId::DeselectAll => cx.selected_len > 0,
            _ => true,
        }
    }

    pub(crate) fn execute(app: &mut DiagramApp, ctx: &egui::Context, id: CommandId) {
        match id {
            CommandId::ToolSelect => app.tool = Tool::Select,
            CommandId::ToolRectangle => app.tool = Tool::Rectangle,
            CommandId::ToolCircle => app.tool = Tool::Circle,
            CommandId::ToolDiamond => app.tool = Tool::Diamond,
            CommandId::ToolArrow => app.tool = Tool::Arrow,
            CommandId::ToolText => app.tool = Tool::Text,
            CommandId::ToolLine => app.tool = Tool::Line,
            CommandId::ToolConnector => app.tool = Tool::Connector,
            CommandId::ToolPan => app.tool = Tool::Pan,
            CommandId::Undo => app.undo(),
            CommandId::Redo => app.redo(),
            CommandId::Copy => app.copy_selected(),
            CommandId::Cut => app.cut_selected(),
            CommandId::Paste => app.paste_at_pointer(),
            CommandId::Delete => app.delete_selected(),
            CommandId::SelectAll => app.select_all(),
            CommandId::DeselectAll => app.clear_selection(),
            CommandId::NewDiagram => app.clear_diagram(),
            CommandId::SaveDiagram => app.save_to_library(),
            CommandId::OpenDiagram => app.open_import_dialog(),
            CommandId::ExportDiagram => app.show_export_dialog = true,
            CommandId::TemplateFlowchart => app.load_template("flowchart"),
            CommandId::TemplateOrgChart => app.load_template("org-chart"),
            CommandId::ToggleGrid => {
                app.view.show_grid = !app.view.show_grid;
                app.persist_settings();
            }
            CommandId::ToggleSnap => {
                app.view.snap_to_grid = !app.view.snap_to_grid;
                app.persist_settings();
            }
            CommandId::ZoomIn => app.view.set_zoom(app.view.zoom * 1.25),
            CommandId::ZoomOut => app.view.set_zoom(app.view.zoom / 1.25),
            CommandId::ZoomReset => app.view.set_zoom(1.0),
            CommandId::Help => app.show_help = true,
        }
        ctx.request_repaint();
    }

    fn filtered(&self) -> Vec<(&'static CommandSpec, i64)> {
        let matcher = SkimMatcherV2::default();
        let q = self.query.trim();
        if q.is_empty() {
            return COMMANDS.iter().map(|c| (c, 0)).collect();
        }
        let mut out = Vec::new();
        for c in COMMANDS {
            if let Some(score) = matcher.fuzzy_match(c.search, q) {
                out.push((c, score));
            }
        }
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(b.0.name)));
        out
    }

    pub fn ui(&mut self, ctx: &egui::Context, cx: CommandContext) -> Option<CommandId> {
        if !self.open {
            return None;
        }
        let matches = self.filtered();
        if self.selected >= matches.len() {
            self.selected = matches.len().saturating_sub(1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.close();
            return None;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown)) && !matches.is_empty() {
            self.selected = (self.selected + 1).min(matches.len() - 1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp)) && !matches.is_empty() {
            self.selected = self.selected.saturating_sub(1);
        }
        let mut run_selected = ctx.input(|i| i.key_pressed(egui::Key::Enter));

        let screen = ctx.content_rect();
        let width = 560.0;
        let height = 320.0;
        let pos = egui::pos2(screen.center().x - width * 0.5, screen.top() + 48.0);
        egui::Area::new(egui::Id::new("command_palette"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let frame = egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 240))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(59, 130, 246)))
                    .inner_margin(10.0)
                    .corner_radius(egui::CornerRadius::same(8));
                frame.show(ui, |ui| {
                    ui.set_min_size(egui::vec2(width, height));
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .desired_width(f32::INFINITY)
                            .hint_text("Search commands"),
                    );
                    if self.request_focus {
                        resp.request_focus();
                        self.request_focus = false;
                    }
                    ui.separator();
                    egui::ScrollArea::vertical().max_height(height - 64.0).show(ui, |ui| {
                        for (idx, (spec, _score)) in matches.iter().take(24).enumerate() {
                            let enabled = CommandPalette::is_enabled(cx, spec.id);
                            let selected = idx == self.selected;
                            let resp = ui.add_enabled(
                                enabled,
                                egui::Button::new(spec.name).selected(selected),
                            );
                            if resp.clicked() {
                                self.selected = idx;
                                run_selected = true;
                            }
                        }
                    });
                });
            });

        if run_selected {
            if let Some((spec, _)) = matches.get(self.selected) {
                if CommandPalette::is_enabled(cx, spec.id) {
                    let cmd = spec.id;
                    self.close();
                    return Some(cmd);
                }
            }
        }
        None
    }
}
