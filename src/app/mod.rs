use eframe::egui;

use crate::model::ShapeKind;

pub mod actions;
pub mod command_palette;
pub mod export;
pub mod file_io;
pub mod geometry;
pub mod help;
pub mod history;
pub mod interaction;
pub mod library;
pub mod render;
pub mod settings;
pub mod svg;
pub mod templates;
pub mod update;

/// Side length of a resize handle square, in screen pixels. Hit-testing
/// divides by the zoom factor so the hotspot tracks the drawn square.
pub const HANDLE_SCREEN_SIZE: f32 = 8.0;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Select,
    Rectangle,
    Circle,
    Diamond,
    Arrow,
    Text,
    Line,
    Connector,
    Pan,
}

impl Tool {
    /// The shape a drawing gesture with this tool materializes, if any.
    pub fn shape(self) -> Option<ShapeKind> {
        match self {
            Tool::Select | Tool::Pan => None,
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Diamond => Some(ShapeKind::Diamond),
            Tool::Arrow => Some(ShapeKind::Arrow),
            Tool::Text => Some(ShapeKind::Text),
            Tool::Line => Some(ShapeKind::Line),
            Tool::Connector => Some(ShapeKind::Connector),
        }
    }
}

/// Pan/zoom state plus grid configuration. The affine transform is
/// `screen = origin + (world + pan) * zoom`.
#[derive(Clone, Copy, Debug)]
pub struct View {
    pub zoom: f32,
    pub pan: egui::Vec2,
    pub grid_size: f32,
    pub snap_to_grid: bool,
    pub show_grid: bool,
}

impl Default for View {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: egui::Vec2::ZERO,
            grid_size: 20.0,
            snap_to_grid: true,
            show_grid: true,
        }
    }
}

impl View {
    pub fn world_to_screen(&self, origin: egui::Pos2, world: egui::Pos2) -> egui::Pos2 {
        origin + (world.to_vec2() + self.pan) * self.zoom
    }

    pub fn screen_to_world(&self, origin: egui::Pos2, screen: egui::Pos2) -> egui::Pos2 {
        ((screen - origin) / self.zoom - self.pan).to_pos2()
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Multiplies the zoom by `factor` while keeping the world point under
    /// `screen_point` fixed on screen.
    pub fn zoom_about_screen_point(
        &mut self,
        origin: egui::Pos2,
        screen_point: egui::Pos2,
        factor: f32,
    ) {
        let before = self.screen_to_world(origin, screen_point);
        self.set_zoom(self.zoom * factor);
        self.pan = (screen_point - origin) / self.zoom - before.to_vec2();
    }
}

/// One continuous pointer-down..up interaction. Gestures are mutually
/// exclusive; transitions happen only on press and release.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    /// Moving the current selection; `anchor` is in world coordinates and
    /// advances by the (possibly grid-snapped) applied delta each frame.
    Drag { anchor: egui::Pos2 },
    /// Resizing one selected element through a handle.
    Resize {
        id: String,
        handle: geometry::HandleId,
        anchor: egui::Pos2,
    },
    /// Panning the view; `anchor` is in screen coordinates.
    Pan { anchor: egui::Pos2 },
    /// Rubber-banding a new shape from `start` (world coordinates).
    Draw { start: egui::Pos2 },
}

pub struct DiagramApp {
    pub elements: Vec<crate::model::DiagramElement>,
    pub selection: Vec<String>,
    pub clipboard: Vec<crate::model::DiagramElement>,
    pub history: history::HistoryLedger,
    pub view: View,
    pub tool: Tool,
    pub gesture: Option<Gesture>,
    pub last_pointer_world: Option<egui::Pos2>,
    pub file_name: String,
    pub dirty: bool,
    next_id: u64,
    /// World position captured when the context menu was opened; paste
    /// targets it so clones land under the cursor.
    pub(crate) context_world: Option<egui::Pos2>,

    // Shell state below: dialogs, notifications, palette.
    pub(crate) status: Option<String>,
    pub(crate) error: Option<String>,
    pub(crate) show_export_dialog: bool,
    pub(crate) export_format: export::ExportFormat,
    pub(crate) export_quality: export::ExportQuality,
    pub(crate) show_import_dialog: bool,
    pub(crate) show_template_dialog: bool,
    pub(crate) show_help: bool,
    pub(crate) command_palette: command_palette::CommandPalette,
    pub(crate) library: library::DiagramLibrary,
    pub(crate) library_cache: Vec<file_io::DiagramFile>,
    pub(crate) settings_path: String,
}

impl Default for DiagramApp {
    fn default() -> Self {
        Self::with_settings(settings::AppSettings::default(), "settings.toml".to_string())
    }
}

impl DiagramApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home)
                .join(".config")
                .join("diagramflow.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path).unwrap_or_default();
        Self::with_settings(settings, settings_path)
    }

    pub fn with_settings(settings: settings::AppSettings, settings_path: String) -> Self {
        let view = View {
            grid_size: settings.grid_size,
            snap_to_grid: settings.snap_to_grid,
            show_grid: settings.show_grid,
            ..View::default()
        };
        Self {
            elements: Vec::new(),
            selection: Vec::new(),
            clipboard: Vec::new(),
            history: history::HistoryLedger::new(),
            view,
            tool: Tool::Select,
            gesture: None,
            last_pointer_world: None,
            file_name: "Untitled Diagram".to_string(),
            dirty: false,
            next_id: 1,
            context_world: None,
            status: None,
            error: None,
            show_export_dialog: false,
            export_format: export::ExportFormat::Png,
            export_quality: export::ExportQuality::High,
            show_import_dialog: false,
            show_template_dialog: false,
            show_help: false,
            command_palette: command_palette::CommandPalette::default(),
            library: library::DiagramLibrary::new(settings.library_path),
            library_cache: Vec::new(),
            settings_path,
        }
    }

    /// Mints a type-prefixed id unique among the current elements. The
    /// counter survives loads, but loaded files may carry ids minted by
    /// any front-end, so candidates are checked against the live list.
    pub fn allocate_id(&mut self, shape: ShapeKind) -> String {
        loop {
            let candidate = format!("{}_{}", shape.key(), self.next_id);
            self.next_id += 1;
            if !self.elements.iter().any(|e| e.id == candidate) {
                return candidate;
            }
        }
    }

    pub fn element_index_by_id(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn element_by_id(&self, id: &str) -> Option<&crate::model::DiagramElement> {
        self.elements.iter().find(|e| e.id == id)
    }
}
