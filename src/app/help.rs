use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help & Shortcuts")
        .open(open)
        .resizable(true)
        .default_width(520.0)
        .default_height(460.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Keyboard Shortcuts");
                ui.separator();

                ui.label("General");
                help_row(ui, "⌘⇧P", "Open command palette");
                help_row(ui, "⌘S", "Save diagram to library");
                help_row(ui, "⌘O", "Open a saved diagram");
                help_row(ui, "⌘E", "Export (PNG / JPEG / SVG)");
                help_row(ui, "⌘Z", "Undo");
                help_row(ui, "⌘⇧Z / ⌘Y", "Redo");
                help_row(ui, "Escape", "Cancel gesture / back to Select");

                ui.add_space(10.0);
                ui.label("Selection & Editing");
                help_row(ui, "⌘C / ⌘X / ⌘V", "Copy / Cut / Paste");
                help_row(ui, "⌘A", "Select all");
                help_row(ui, "Delete / Backspace", "Delete selected");
                help_row(ui, "Ctrl/⌘/⇧ + click", "Add to selection");
                help_row(ui, "Right-click", "Context menu (copy/paste/delete)");

                ui.add_space(10.0);
                ui.label("Tools");
                help_row(ui, "V", "Select");
                help_row(ui, "R", "Rectangle");
                help_row(ui, "O", "Circle");
                help_row(ui, "D", "Diamond");
                help_row(ui, "A", "Arrow");
                help_row(ui, "T", "Text");
                help_row(ui, "L", "Line");
                help_row(ui, "C", "Connector");
                help_row(ui, "H", "Pan");

                ui.add_space(10.0);
                ui.label("View");
                help_row(ui, "⌘ + scroll", "Zoom at cursor (0.1x – 5x)");
                help_row(ui, "Scroll", "Pan the canvas");

                ui.add_space(10.0);
                ui.label("Drawing");
                help_row(ui, "Drag with a shape tool", "Create a shape (min 5×5 units)");
                help_row(ui, "Drag a handle", "Resize (floor 10×10 units)");
            });
        });
}

fn help_row(ui: &mut egui::Ui, keys: &str, action: &str) {
    ui.horizontal(|ui| {
        ui.add_sized([140.0, 16.0], egui::Label::new(egui::RichText::new(keys).monospace()));
        ui.label(action);
    });
}
